use crate::core::{PostalCode, RegionMapping, RegionStore, RequestStore, ServiceRequest};
use crate::utils::error::{IntakeError, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub const REGIONS_FILE: &str = "regions.json";
pub const REQUESTS_FILE: &str = "requests.jsonl";

/// File-backed store for local runs.
///
/// `regions.json` holds a JSON array of `{ "zipCode", "region" }` objects and
/// accepted requests are appended to `requests.jsonl`, one object per line.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base_path: String,
}

impl LocalStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn path(&self, file: &str) -> PathBuf {
        Path::new(&self.base_path).join(file)
    }

    /// Reads back every stored request; an absent file means none yet.
    pub async fn read_requests(&self) -> Result<Vec<ServiceRequest>> {
        let path = self.path(REQUESTS_FILE);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(IntakeError::from))
            .collect()
    }
}

impl RegionStore for LocalStore {
    async fn find_region(&self, zip: &PostalCode) -> Result<Option<String>> {
        let path = self.path(REGIONS_FILE);
        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| IntakeError::ConnectionError {
                message: format!("Failed to open {}: {}", path.display(), e),
            })?;

        let mappings: Vec<RegionMapping> =
            serde_json::from_slice(&data).map_err(|e| IntakeError::QueryError {
                message: format!("Malformed {}: {}", path.display(), e),
            })?;

        Ok(mappings
            .into_iter()
            .find(|m| m.zip_code == zip.as_str())
            .map(|m| m.region))
    }
}

impl RequestStore for LocalStore {
    async fn insert_request(&self, request: &ServiceRequest) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;

        let mut line = serde_json::to_string(request)?;
        line.push('\n');

        let path = self.path(REQUESTS_FILE);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| IntakeError::QueryError {
                message: format!("Failed to open {}: {}", path.display(), e),
            })?;

        // 單次寫入整行，避免並發寫入交錯
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Appended request {} to {}", request.id, path.display());
        Ok(())
    }
}
