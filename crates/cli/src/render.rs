use std::fmt::Write;

use compounder_core::domain::report::{GrowthTable, ValuationReport};

/// Text rendering of a finished run. Absent fields get an explicit "not
/// found" line instead of being silently dropped, so a degraded scrape is
/// visible in the output.
pub fn report_text(report: &ValuationReport) -> String {
    let mut out = String::new();
    let snap = &report.snapshot;

    let _ = writeln!(out, "Valuation report for {}", snap.symbol);
    let _ = writeln!(out);

    match snap.current_pe {
        Some(v) => {
            let _ = writeln!(out, "Current P/E:           {v:.2}");
        }
        None => {
            let _ = writeln!(out, "Current P/E not found for the specified symbol.");
        }
    }
    match snap.median_roce {
        Some(v) => {
            let _ = writeln!(out, "Pre-tax RoCE:          {v:.2}%");
        }
        None => {
            let _ = writeln!(out, "ROCE % not found for the specified symbol.");
        }
    }
    match snap.fiscal_pe {
        Some(v) => {
            let _ = writeln!(out, "Fiscal-year P/E:       {v:.2}");
        }
        None => {
            let _ = writeln!(out, "Fiscal-year P/E could not be computed for the specified symbol.");
        }
    }

    let _ = writeln!(out);
    growth_section(&mut out, "Sales growth", &snap.sales_growth);
    growth_section(&mut out, "Profit growth", &snap.profit_growth);

    let _ = writeln!(out, "Intrinsic P/E:         {:.2}", report.intrinsic_pe);
    match report.overvaluation {
        Some(v) => {
            let _ = writeln!(out, "Degree of overvaluation: {:.1}%", v * 100.0);
        }
        None => {
            let _ = writeln!(
                out,
                "Degree of overvaluation unavailable: current or fiscal-year P/E missing."
            );
        }
    }

    out
}

fn growth_section(out: &mut String, title: &str, table: &GrowthTable) {
    if table.is_empty() {
        let _ = writeln!(out, "{title} data not found for the specified symbol.");
        let _ = writeln!(out);
        return;
    }

    let _ = writeln!(out, "{title}:");
    for entry in &table.entries {
        let _ = writeln!(out, "  {:<10} {:>7.2}%", entry.period, entry.percent);
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use compounder_core::domain::report::{GrowthEntry, ScrapeSnapshot};

    fn snapshot() -> ScrapeSnapshot {
        ScrapeSnapshot {
            symbol: "NESTLEIND".to_string(),
            fetched_at: Utc::now(),
            current_pe: Some(24.56),
            median_roce: Some(18.0),
            fiscal_pe: Some(25.0),
            sales_growth: GrowthTable {
                entries: vec![GrowthEntry {
                    period: "10 Years".to_string(),
                    percent: 12.0,
                }],
            },
            profit_growth: GrowthTable::default(),
        }
    }

    #[test]
    fn renders_present_fields_and_tables() {
        let report = ValuationReport {
            snapshot: snapshot(),
            intrinsic_pe: 22.0,
            overvaluation: Some(20.0 / 22.0 - 1.0),
        };
        let text = report_text(&report);

        assert!(text.contains("Current P/E:           24.56"));
        assert!(text.contains("Pre-tax RoCE:          18.00%"));
        assert!(text.contains("10 Years     12.00%"));
        assert!(text.contains("Profit growth data not found"));
        assert!(text.contains("Degree of overvaluation: -9.1%"));
    }

    #[test]
    fn absent_multiples_disable_the_overvaluation_line() {
        let mut snap = snapshot();
        snap.current_pe = None;
        let report = ValuationReport {
            snapshot: snap,
            intrinsic_pe: 22.0,
            overvaluation: None,
        };
        let text = report_text(&report);

        assert!(text.contains("Current P/E not found"));
        assert!(text.contains("Degree of overvaluation unavailable"));
    }
}
