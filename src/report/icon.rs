use crate::report::error::ReportError;
use crate::types::observation::IconRef;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

/// Downloads condition icons. Bytes are returned as-is; nothing is cached, so the
/// same icon on two days is downloaded twice.
#[derive(Debug, Clone)]
pub struct IconFetcher {
    http: Client,
}

impl IconFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ReportError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReportError::ClientBuild)?;
        Ok(Self { http })
    }

    pub async fn fetch(&self, icon: &IconRef) -> Result<Vec<u8>, ReportError> {
        let url = icon.url();
        debug!("Downloading icon {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ReportError::ImageFetch(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for icon {url}: {status}");
            return Err(ReportError::ImageStatus { url, status });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ReportError::ImageFetch(url.clone(), e))?;
        Ok(bytes.to_vec())
    }
}
