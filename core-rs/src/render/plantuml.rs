//! PlantUML server transport
//!
//! Posts diagram text to a PlantUML server (`POST {base}/svg` or
//! `POST {base}/png`) and returns the image body.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::errors::{DocError, Result};
use crate::model::OutputFormat;

use super::RenderTransport;

/// Per-request timeout for the PlantUML server
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct PlantUmlServer {
    client: reqwest::Client,
    base_url: String,
}

impl PlantUmlServer {
    /// Create a transport for the server at `base_url`
    ///
    /// # Example
    ///
    /// ```
    /// use rdfsdoc_core::render::PlantUmlServer;
    ///
    /// let server = PlantUmlServer::new("http://localhost:8080/").unwrap();
    /// assert_eq!(server.endpoint(rdfsdoc_core::model::OutputFormat::Svg), "http://localhost:8080/svg");
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        if base_url.is_empty() {
            return Err(DocError::Config("PlantUML server URL cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, format: OutputFormat) -> String {
        format!("{}/{}", self.base_url, format.as_str())
    }
}

impl RenderTransport for PlantUmlServer {
    async fn render(&self, diagram: String, format: OutputFormat) -> Result<Vec<u8>> {
        let url = self.endpoint(format);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(diagram)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // PlantUML answers syntax errors with 400 and an error image
            return Err(DocError::Http(format!("{} returned {}", url, status)));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
