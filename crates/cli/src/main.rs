use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compounder_core::domain::assumptions::ValuationAssumptions;
use compounder_core::domain::report::ValuationReport;
use compounder_core::scrape::fetch::HttpPageFetcher;
use compounder_core::scrape::page::Symbol;
use compounder_core::scrape::{scrape_snapshot, ScrapeYears};
use compounder_core::valuation;

mod render;

#[derive(Debug, Parser)]
#[command(name = "compounder", about = "Scrape a company's ratios and estimate its intrinsic P/E")]
struct Args {
    /// Company symbol as used in the upstream URL path.
    #[arg(default_value = "NESTLEIND")]
    symbol: String,

    /// Cost of capital, whole percent (8..=16).
    #[arg(long, default_value_t = 8)]
    cost_of_capital: u32,

    /// Target return on capital employed, whole percent (10..=100, steps of 10).
    #[arg(long, default_value_t = 10)]
    target_return: u32,

    /// Growth during the high growth period, whole percent (8..=20, steps of 2).
    #[arg(long, default_value_t = 8)]
    high_growth_rate: u32,

    /// High growth period in years (10..=24 in steps of 2, or 25).
    #[arg(long, default_value_t = 10)]
    high_growth_period: u32,

    /// Fade period in years (5, 10, 15 or 20).
    #[arg(long, default_value_t = 5)]
    fade_period: u32,

    /// Terminal growth rate, percent (1.0..=7.5 in steps of 0.5).
    #[arg(long, default_value_t = 1.0)]
    terminal_growth_rate: f64,

    /// Year header for the RoCE column. Defaults to the previous calendar year.
    #[arg(long)]
    ratio_year: Option<String>,

    /// Year header for the Net Profit column. Defaults to the previous calendar year.
    #[arg(long)]
    profit_year: Option<String>,

    /// Override the upstream base URL (also settable via SCREENER_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Emit the report as pretty-printed JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = compounder_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let assumptions = ValuationAssumptions {
        cost_of_capital: args.cost_of_capital,
        target_return_on_capital: args.target_return,
        high_growth_rate: args.high_growth_rate,
        high_growth_period: args.high_growth_period,
        fade_period: args.fade_period,
        terminal_growth_rate: args.terminal_growth_rate,
    };
    assumptions.validate()?;

    let symbol = Symbol::parse(&args.symbol).context("invalid symbol")?;
    let base_url = args
        .base_url
        .as_deref()
        .unwrap_or_else(|| settings.base_url())
        .to_string();
    let years = resolve_years(&args);

    let fetcher = HttpPageFetcher::from_settings(&settings)?;

    tracing::info!(
        %symbol,
        base_url,
        ratio_year = %years.ratio_year,
        profit_year = %years.profit_year,
        "scraping company pages"
    );

    let snapshot = scrape_snapshot(&fetcher, &base_url, &symbol, &years).await;

    let intrinsic_pe = match valuation::intrinsic_multiple_for(&assumptions) {
        Ok(v) => v,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            return Err(err);
        }
    };

    let overvaluation = match (snapshot.current_pe, snapshot.fiscal_pe) {
        (Some(current), Some(fiscal)) => Some(valuation::degree_of_overvaluation(
            current,
            fiscal,
            intrinsic_pe,
        )),
        _ => None,
    };

    let report = ValuationReport {
        snapshot,
        intrinsic_pe,
        overvaluation,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report_text(&report));
    }

    Ok(())
}

fn resolve_years(args: &Args) -> ScrapeYears {
    let mut years = ScrapeYears::defaults_for(chrono::Utc::now().date_naive());
    if let Some(y) = &args.ratio_year {
        years.ratio_year = y.clone();
    }
    if let Some(y) = &args.profit_year {
        years.profit_year = y.clone();
    }
    years
}

fn init_sentry(settings: &compounder_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
