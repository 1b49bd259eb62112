//! Neocities deploy: one multipart upload per file in the build output.

pub mod client;
pub mod error;
pub mod types;

pub use client::NeocitiesClient;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::command::CommandRunner;
use crate::config::{Config, NeocitiesConfig};
use crate::deploy::{Deployment, SiteDeployer};
use crate::error::{Error, require};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<String>,
}

impl UploadReport {
    /// A partial upload still counts: the run fails only when nothing went up.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.succeeded == self.total
    }
}

/// Files under `dist`, sorted, paired with their `/`-separated site path.
pub fn collect_files(dist: &Path) -> Result<Vec<(PathBuf, String)>, Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dist).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dist)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        let remote = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push((entry.path().to_path_buf(), remote));
    }
    Ok(files)
}

pub async fn upload_all(client: &NeocitiesClient, files: &[(PathBuf, String)]) -> UploadReport {
    let mut report = UploadReport {
        total: files.len(),
        ..Default::default()
    };
    for (local, remote) in files {
        match client.upload_file(local, remote).await {
            Ok(()) => {
                report.succeeded += 1;
                info!("  ✅ {remote}");
            }
            Err(e) => {
                error!("  ❌ {remote}: {e}");
                report.failed.push(remote.clone());
            }
        }
    }
    report
}

pub struct Neocities {
    config: NeocitiesConfig,
}

impl Neocities {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.neocities.clone(),
        }
    }
}

#[async_trait]
impl SiteDeployer for Neocities {
    fn name(&self) -> &str {
        "Neocities"
    }

    fn check_credentials(&self) -> Result<(), Error> {
        require(&self.config.api_key, "NEOCITIES_API_KEY").map(|_| ())
    }

    async fn publish(&self, dist: &Path, _runner: &dyn CommandRunner) -> Result<Deployment, Error> {
        let api_key = require(&self.config.api_key, "NEOCITIES_API_KEY")?;
        let client = NeocitiesClient::new(&self.config.api_url, api_key, self.config.upload_timeout)
            .map_err(error::map_error)?;

        let files = collect_files(dist)?;
        info!("📁 Found {} files to upload", files.len());

        let report = upload_all(&client, &files).await;
        if report.is_complete() {
            info!("✅ All files uploaded successfully!");
        } else {
            warn!("⚠️ Uploaded {}/{} files", report.succeeded, report.total);
        }
        if !report.is_success() {
            return Err(Error::ProviderError(format!(
                "No files uploaded to Neocities (0/{})",
                report.total
            )));
        }
        Ok(Deployment {
            url: Some(format!("https://{}.neocities.org", self.config.sitename)),
        })
    }
}
