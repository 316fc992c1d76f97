pub mod domain;
pub mod scrape;
pub mod valuation;

pub mod config {
    use std::time::Duration;

    /// Upstream host serving the company pages we scrape.
    pub const DEFAULT_BASE_URL: &str = "https://www.screener.in";

    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub screener_base_url: Option<String>,
        pub scraper_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                screener_base_url: std::env::var("SCREENER_BASE_URL").ok(),
                scraper_timeout_secs: std::env::var("SCRAPER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn base_url(&self) -> &str {
            self.screener_base_url
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_BASE_URL)
        }

        pub fn scraper_timeout(&self) -> Duration {
            Duration::from_secs(self.scraper_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
        }
    }

}
