pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod page;

use crate::domain::report::ScrapeSnapshot;
use chrono::{Datelike, NaiveDate, Utc};
use scraper::Html;

use extract::{GrowthTables, RatioBlock};
use fallback::resolve_with_fallback;
use fetch::PageFetcher;
use page::Symbol;

/// Year substrings matched against table headers: one for the RoCE column of
/// the ratios section, one for the net-profit column of the profit & loss
/// section.
#[derive(Debug, Clone)]
pub struct ScrapeYears {
    pub ratio_year: String,
    pub profit_year: String,
}

impl ScrapeYears {
    /// Both default to the last completed calendar year; the current one is
    /// usually still unreported upstream.
    pub fn defaults_for(today: NaiveDate) -> Self {
        let year = (today.year() - 1).to_string();
        Self {
            ratio_year: year.clone(),
            profit_year: year,
        }
    }
}

/// Runs the three extraction tasks for one symbol, each with its own
/// consolidated→standalone fallback. Strictly sequential: at most six fetches,
/// no parallelism, no shared state between runs. Fields the site does not
/// provide stay absent; a run never aborts because of missing data.
pub async fn scrape_snapshot(
    fetcher: &dyn PageFetcher,
    base_url: &str,
    symbol: &Symbol,
    years: &ScrapeYears,
) -> ScrapeSnapshot {
    let ratios = resolve_with_fallback(
        fetcher,
        base_url,
        symbol,
        |body| extract::ratio_block(&Html::parse_document(body), &years.ratio_year),
        RatioBlock::is_empty,
    )
    .await
    .unwrap_or_default();

    let fiscal_pe = resolve_with_fallback(
        fetcher,
        base_url,
        symbol,
        |body| extract::fiscal_earnings_multiple(&Html::parse_document(body), &years.profit_year),
        Option::is_none,
    )
    .await
    .flatten();

    let growth = resolve_with_fallback(
        fetcher,
        base_url,
        symbol,
        |body| extract::growth_tables(&Html::parse_document(body)),
        GrowthTables::is_empty,
    )
    .await
    .unwrap_or_default();

    tracing::info!(
        %symbol,
        current_pe = ?ratios.current_pe,
        median_roce = ?ratios.median_roce,
        fiscal_pe = ?fiscal_pe,
        sales_periods = growth.sales.entries.len(),
        profit_periods = growth.profit.entries.len(),
        "scrape finished"
    );

    ScrapeSnapshot {
        symbol: symbol.to_string(),
        fetched_at: Utc::now(),
        current_pe: ratios.current_pe,
        median_roce: ratios.median_roce,
        fiscal_pe,
        sales_growth: growth.sales,
        profit_growth: growth.profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <div class="company-ratios">
          <li class="flex flex-space-between">
            <span class="name">Stock P/E</span>
            <span class="nowrap value">24.56</span>
          </li>
        </div>
        <span class="number">25,000</span>
        <section id="ratios">
          <table>
            <tr><th>Particulars</th><th>Mar 2019</th></tr>
            <tr><td>ROCE %</td><td>18%</td></tr>
          </table>
        </section>
        <section id="profit-loss">
          <table>
            <tr><th>Particulars</th><th>Mar 2022</th></tr>
            <tr><td>Net Profit +</td><td>1,000</td></tr>
          </table>
        </section>
        <table class="ranges-table">
          <tr><th>Compounded Sales Growth</th></tr>
          <tr><td>10 Years:</td><td>12%</td></tr>
        </table>
        <table class="ranges-table">
          <tr><th>Compounded Profit Growth</th></tr>
          <tr><td>10 Years:</td><td>18%</td></tr>
        </table>"#;

    struct ViewFetcher {
        consolidated: Option<&'static str>,
        standalone: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl fetch::PageFetcher for ViewFetcher {
        async fn fetch(&self, url: &str) -> Option<String> {
            let body = if url.ends_with("/consolidated/") {
                self.consolidated
            } else {
                self.standalone
            };
            body.map(str::to_string)
        }
    }

    fn years() -> ScrapeYears {
        ScrapeYears {
            ratio_year: "2019".to_string(),
            profit_year: "2022".to_string(),
        }
    }

    #[tokio::test]
    async fn full_page_fills_every_field() {
        let fetcher = ViewFetcher {
            consolidated: Some(FULL_PAGE),
            standalone: None,
        };
        let symbol = Symbol::parse("NESTLEIND").unwrap();

        let snap = scrape_snapshot(&fetcher, "https://example.test", &symbol, &years()).await;

        assert_eq!(snap.current_pe, Some(24.56));
        assert_eq!(snap.median_roce, Some(18.0));
        assert_eq!(snap.fiscal_pe, Some(25.0));
        assert_eq!(snap.sales_growth.get("10 Years"), Some(12.0));
        assert_eq!(snap.profit_growth.get("10 Years"), Some(18.0));
    }

    #[tokio::test]
    async fn empty_consolidated_view_uses_standalone_data() {
        let fetcher = ViewFetcher {
            consolidated: Some("<p>placeholder page</p>"),
            standalone: Some(FULL_PAGE),
        };
        let symbol = Symbol::parse("TCS").unwrap();

        let snap = scrape_snapshot(&fetcher, "https://example.test", &symbol, &years()).await;

        assert_eq!(snap.current_pe, Some(24.56));
        assert_eq!(snap.fiscal_pe, Some(25.0));
    }

    #[tokio::test]
    async fn unreachable_site_leaves_every_field_absent() {
        let fetcher = ViewFetcher {
            consolidated: None,
            standalone: None,
        };
        let symbol = Symbol::parse("TCS").unwrap();

        let snap = scrape_snapshot(&fetcher, "https://example.test", &symbol, &years()).await;

        assert_eq!(snap.current_pe, None);
        assert_eq!(snap.median_roce, None);
        assert_eq!(snap.fiscal_pe, None);
        assert!(snap.sales_growth.is_empty());
        assert!(snap.profit_growth.is_empty());
    }

    #[test]
    fn default_years_point_at_the_previous_calendar_year() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let y = ScrapeYears::defaults_for(today);
        assert_eq!(y.ratio_year, "2025");
        assert_eq!(y.profit_year, "2025");
    }
}
