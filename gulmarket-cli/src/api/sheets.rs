//! Google Sheets export client
//!
//! Fetches a published spreadsheet as an xlsx document over the public
//! export endpoint. The spreadsheet must be shared so that an
//! unauthenticated GET can reach it; there is no retry here.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::SheetsConfig;

/// Client for the spreadsheet export endpoint.
pub struct SheetsClient {
    http: reqwest::Client,
    export_base_url: String,
}

impl SheetsClient {
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            export_base_url: config.export_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full xlsx export of a spreadsheet as raw bytes.
    ///
    /// The id's format is not validated here; the export endpoint is
    /// authoritative and a bad id simply comes back as an HTTP error.
    pub async fn fetch_export(&self, spreadsheet_id: &str) -> Result<Vec<u8>> {
        let url = self.export_url(spreadsheet_id)?;

        log::info!("fetching spreadsheet export: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch spreadsheet {}", spreadsheet_id))?
            .error_for_status()
            .with_context(|| format!("Export request for spreadsheet {} failed", spreadsheet_id))?;

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read export body for spreadsheet {}", spreadsheet_id))?;

        log::info!("fetched {} bytes for spreadsheet {}", body.len(), spreadsheet_id);

        Ok(body.to_vec())
    }

    fn export_url(&self, spreadsheet_id: &str) -> Result<String> {
        if spreadsheet_id.trim().is_empty() {
            anyhow::bail!("Spreadsheet id must not be empty");
        }

        Ok(format!(
            "{}/{}/export?format=xlsx",
            self.export_base_url,
            urlencoding::encode(spreadsheet_id)
        ))
    }
}
