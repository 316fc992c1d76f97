use anyhow::ensure;
use std::fmt;

/// Company identifier as it appears in the upstream URL path. Normalized to
/// uppercase; built once per scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let s = raw.trim().to_ascii_uppercase();
        ensure!(!s.is_empty(), "symbol must be non-empty");
        ensure!(
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '&' | '.')),
            "symbol contains characters not allowed in a company URL: {s}"
        );
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two views the upstream site publishes per company. Consolidated is
/// preferred; standalone is the fallback when consolidated has no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    Consolidated,
    Standalone,
}

impl PageView {
    pub fn url(&self, base_url: &str, symbol: &Symbol) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            PageView::Consolidated => format!("{base}/company/{symbol}/consolidated/"),
            PageView::Standalone => format!("{base}/company/{symbol}/"),
        }
    }
}
