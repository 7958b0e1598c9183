use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Join a manifest key onto `folder` and clean the result lexically.
///
/// `.` segments and repeated separators are dropped and `..` removes the
/// preceding normal component. A leading `/` in the key stays relative to
/// `folder`. Nothing touches the filesystem.
pub fn join_key(folder: &Path, key: &str) -> PathBuf {
    let key_parts = key
        .split('/')
        .filter(|seg| !seg.is_empty())
        .map(|seg| match seg {
            "." => Component::CurDir,
            ".." => Component::ParentDir,
            _ => Component::Normal(OsStr::new(seg)),
        });

    let mut cleaned: Vec<Component> = Vec::new();
    for part in folder.components().chain(key_parts) {
        match part {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.last() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `..` at the root is the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(Component::ParentDir),
            },
            other => cleaned.push(other),
        }
    }

    if cleaned.is_empty() {
        return PathBuf::from(".");
    }
    cleaned.into_iter().collect()
}
