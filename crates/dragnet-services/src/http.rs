//! Production HTTP fetcher for remote assets.

use dragnet_core::fetch::ContentFetcher;
use dragnet_core::fs;
use dragnet_types::{DragnetError, Result};
use std::path::Path;
use std::time::Duration;

/// Blocking HTTP fetcher backed by `reqwest`.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a bounded request timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("dragnet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DragnetError::Download(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| DragnetError::Download(format!("{}: {}", url, e)))?;

        let body = response
            .bytes()
            .map_err(|e| DragnetError::Download(format!("{}: {}", url, e)))?;

        if let Some(parent) = dest.parent() {
            fs::ensure_dir(parent)?;
        }
        std::fs::write(dest, &body).map_err(|e| DragnetError::file(dest, e))?;

        tracing::debug!(url, dest = %dest.display(), "fetched remote asset");
        Ok(())
    }
}
