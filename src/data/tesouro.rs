//! Tesouro Transparente price/rate file acquisition.
//!
//! The daily file is downloaded to a local cache path; any failure falls back
//! to whatever copy is already on disk, so the tool keeps working offline.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::SourceConfig;
use crate::error::AppError;

pub const DEFAULT_URL: &str = "https://www.tesourotransparente.gov.br/ckan/dataset/df56aa42-484a-4a59-8184-7676580c81e3/resource/796d2059-14e9-44e3-80c9-2d9e30b405c1/download/PrecoTaxaTesouroDireto.csv";
pub const DEFAULT_LOCAL_PATH: &str = "PrecoTaxaTesouroDireto.csv";

const ENV_URL: &str = "TESOURO_CSV_URL";
const ENV_PATH: &str = "TESOURO_CSV_PATH";
const TIMEOUT: Duration = Duration::from_secs(60);

impl SourceConfig {
    /// Build a source config; explicit values win over `.env`/environment.
    pub fn from_env(url: Option<String>, local_path: Option<PathBuf>, offline: bool) -> Self {
        dotenvy::dotenv().ok();
        let url = url
            .or_else(|| std::env::var(ENV_URL).ok())
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let local_path = local_path
            .or_else(|| std::env::var(ENV_PATH).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_PATH));
        Self {
            url,
            local_path,
            offline,
        }
    }
}

pub struct TesouroClient {
    client: Client,
    config: SourceConfig,
}

impl TesouroClient {
    pub fn new(config: SourceConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Refresh the local file (unless offline) and return its path.
    ///
    /// Download problems are logged and the existing local copy is used; it
    /// is only an error when no local copy exists either.
    pub fn fetch(&self) -> Result<PathBuf, AppError> {
        let path = &self.config.local_path;
        if self.config.offline {
            tracing::info!(path = %path.display(), "offline mode; using local file");
        } else {
            match self.download(path) {
                Ok(bytes) => tracing::info!(bytes, path = %path.display(), "quote file downloaded"),
                Err(err) => tracing::warn!(error = %err, "download failed; using local file"),
            }
        }

        if !path.is_file() {
            return Err(AppError::new(
                4,
                format!("Quote file not available: {}", path.display()),
            ));
        }
        Ok(path.clone())
    }

    fn download(&self, path: &Path) -> Result<usize, AppError> {
        tracing::debug!(url = %self.config.url, "downloading quote file");
        let resp = self
            .client
            .get(&self.config.url)
            .send()
            .map_err(|e| AppError::new(4, format!("Request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Request failed with status {}.", resp.status()),
            ));
        }

        let body = resp
            .bytes()
            .map_err(|e| AppError::new(4, format!("Failed to read response body: {e}")))?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| AppError::new(4, format!("Failed to create '{}': {e}", dir.display())))?;
        }
        fs::write(path, &body)
            .map_err(|e| AppError::new(4, format!("Failed to write '{}': {e}", path.display())))?;
        Ok(body.len())
    }
}
