//! HTTP icon download

use pixpack_core::source::{IconFetcher, SourceError, ICON_DOWNLOAD_TIMEOUT};

/// Downloads icons over HTTPS with a per-request timeout.
pub struct HttpIconFetcher {
    client: reqwest::blocking::Client,
}

impl HttpIconFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(ICON_DOWNLOAD_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl IconFetcher for HttpIconFetcher {
    fn fetch(&self, id: &str, url: &str) -> Result<String, SourceError> {
        let download_error = |reason: String| SourceError::Download {
            id: id.to_string(),
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| download_error(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            return Err(download_error(format!("HTTP {}", response.status())));
        }

        response
            .text()
            .map_err(|e| download_error(format!("Failed to read response: {}", e)))
    }
}

/// Fetcher for runs that must not touch the network.
pub struct OfflineFetcher;

impl IconFetcher for OfflineFetcher {
    fn fetch(&self, id: &str, url: &str) -> Result<String, SourceError> {
        Err(SourceError::Download {
            id: id.to_string(),
            url: url.to_string(),
            reason: "offline mode, icon is not cached".to_string(),
        })
    }
}
