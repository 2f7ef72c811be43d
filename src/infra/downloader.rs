// ============================================================
// Layer 6: HTTP Downloader
// ============================================================
// Fetches the raw dataset bytes over HTTP(S).
//
// The client has no overall timeout: the dataset is a single
// small file and a slow mirror should finish rather than fail.
// Non-2xx responses are errors.

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use crate::domain::traits::RemoteSource;

pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(None)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Cannot build HTTP client")?;
        Ok(Self { client })
    }
}

impl RemoteSource for HttpDownloader {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()?;
        let bytes = response.bytes().context("Cannot read response body")?;
        tracing::debug!("Received {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
