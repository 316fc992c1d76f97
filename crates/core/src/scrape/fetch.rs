use crate::config::Settings;
use anyhow::{Context, Result};

/// Single-attempt page retrieval. Implementations return `None` for any
/// transport failure or non-success status; never a partial page. Fallback to
/// the alternate view is the resolver's job, so no retry happens here.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.scraper_timeout())
            .build()
            .context("failed to build scraper http client")?;

        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let res = match self.http.get(url).send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::warn!(url, error = %err, "page request failed");
                return None;
            }
        };

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(url, http_status = %status, "page request returned non-success");
            return None;
        }

        match res.text().await {
            Ok(body) => Some(body),
            Err(err) => {
                tracing::warn!(url, error = %err, "failed to read page body");
                None
            }
        }
    }
}
