use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::{
    api::{self, extract_site_info, ApiClient, Manifest, SiteInfo},
    domain::{AppError, DownloadPlan, DownloadReport},
    utils::join_key,
};

#[derive(Debug, Clone)]
pub enum DownloadEvent {
    /// 1-based position of `key` among `total` manifest entries
    Started {
        index: usize,
        total: usize,
        key: String,
    },
    Completed(PathBuf),
    Failed {
        key: String,
        error: AppError,
    },
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// Fetch the page at `page_url` and pull the embedded siteInfo out of it.
    pub async fn fetch_site_info(&self, page_url: &str) -> Result<SiteInfo, AppError> {
        let html = self.api_client.fetch_page(page_url).await?;
        let site = extract_site_info(&html)?;
        debug!(uid = %site.uid, host = %site.host, "found siteInfo");
        Ok(site)
    }

    pub async fn fetch_manifest(&self, site: &SiteInfo) -> Result<Manifest, AppError> {
        let manifest = self.api_client.fetch_manifest(site).await?;
        debug!(entries = manifest.len(), "fetched manifest");
        Ok(manifest)
    }

    /// Download every manifest key into `folder`, one at a time.
    ///
    /// A failing key is reported through `on_event` and recorded in the
    /// report; it never stops the remaining keys.
    pub async fn download_all<F>(
        &self,
        plan: &DownloadPlan,
        folder: &Path,
        mut on_event: F,
    ) -> DownloadReport
    where
        F: FnMut(DownloadEvent),
    {
        let total = plan.manifest.len();
        let mut report = DownloadReport {
            total,
            ..Default::default()
        };

        for (i, key) in plan.manifest.keys().enumerate() {
            on_event(DownloadEvent::Started {
                index: i + 1,
                total,
                key: key.clone(),
            });

            match self.download_one(&plan.site, folder, key).await {
                Ok(path) => {
                    on_event(DownloadEvent::Completed(path.clone()));
                    report.succeeded.push(path);
                }
                Err(error) => {
                    on_event(DownloadEvent::Failed {
                        key: key.clone(),
                        error: error.clone(),
                    });
                    report.failed.push((key.clone(), error));
                }
            }
        }

        report
    }

    async fn download_one(
        &self,
        site: &SiteInfo,
        folder: &Path,
        key: &str,
    ) -> Result<PathBuf, AppError> {
        let (_, stream) = self
            .api_client
            .download_file_stream(site, key)
            .await
            .map_err(|e| AppError::Network(format!("Error downloading {}: {}", key, e)))?;

        let path = join_key(folder, key);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_parent_dirs(parent).await.map_err(|e| {
                AppError::Filesystem(format!(
                    "Error creating directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let written = write_file(&path, stream).await?;
        debug!(key, bytes = written, path = %path.display(), "saved");
        Ok(path)
    }
}

async fn create_parent_dirs(dir: &Path) -> std::io::Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(dir).await
}

/// Stream `body` into a freshly truncated file at `path`.
///
/// The file handle is closed before returning. If the copy fails, the partial
/// file is removed.
async fn write_file<S>(path: &Path, body: S) -> Result<u64, AppError>
where
    S: Stream<Item = api::Result<Bytes>>,
{
    let mut file = tokio::fs::File::create(path).await.map_err(|e| {
        AppError::Filesystem(format!("Error creating file {}: {}", path.display(), e))
    })?;

    let copied = copy_body(&mut file, body).await;
    drop(file);

    match copied {
        Ok(written) => Ok(written),
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(path).await {
                warn!(path = %path.display(), error = %remove_err, "failed to remove partial file");
            }
            Err(AppError::Filesystem(format!(
                "Error writing file {}: {}",
                path.display(),
                e
            )))
        }
    }
}

/// Why a body copy stopped early
#[derive(Error, Debug)]
enum CopyError {
    #[error(transparent)]
    Body(#[from] api::ApiError),

    #[error(transparent)]
    Write(#[from] std::io::Error),
}

async fn copy_body<S>(file: &mut tokio::fs::File, body: S) -> Result<u64, CopyError>
where
    S: Stream<Item = api::Result<Bytes>>,
{
    tokio::pin!(body);

    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.sync_all().await?;
    Ok(written)
}
