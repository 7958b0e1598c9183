use std::path::PathBuf;

use crate::api::{Manifest, SiteInfo};

use super::AppError;

/// Everything resolved before the first file is fetched
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    pub site: SiteInfo,
    pub manifest: Manifest,
}

/// Per-key outcomes of one `download_all` run.
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Manifest size, not the number of successes
    pub total: usize,
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<(String, AppError)>,
}

impl DownloadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
