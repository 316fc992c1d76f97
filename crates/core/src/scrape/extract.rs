//! Locates ratio values inside the upstream company pages.
//!
//! Everything here is a contract with the upstream site's markup: the
//! `company-ratios` list, the `#ratios` / `#profit-loss` sections and the
//! `ranges-table` growth blocks. A markup change upstream breaks these
//! selectors, so the rule everywhere is to degrade to absence instead of
//! returning an error or panicking; callers only ever see `Option` / empty
//! tables out of this module.

use crate::domain::report::{GrowthTable, YearlySeries};
use scraper::{ElementRef, Html, Selector};

/// Label beside the current earnings multiple in the ratios block.
pub const STOCK_PE_LABEL: &str = "Stock P/E";

const SALES_GROWTH_HEADING: &str = "Compounded Sales Growth";
const PROFIT_GROWTH_HEADING: &str = "Compounded Profit Growth";

/// Where to find one labeled row inside a year-columned table.
#[derive(Debug, Clone, Copy)]
pub struct TableTarget<'a> {
    /// Anchor id of the section holding the table.
    pub section_id: &'a str,
    /// Substring matched against the first cell of each data row.
    pub row_label: &'a str,
    pub clean: CellClean,
}

/// RoCE row of the ratios section.
pub const ROCE_TARGET: TableTarget<'static> = TableTarget {
    section_id: "ratios",
    row_label: "ROCE %",
    clean: CellClean::Percent,
};

/// Net-profit row of the profit & loss section.
pub const NET_PROFIT_TARGET: TableTarget<'static> = TableTarget {
    section_id: "profit-loss",
    row_label: "Net Profit",
    clean: CellClean::Grouped,
};

/// Cell-text cleaning applied before the numeric parse.
#[derive(Debug, Clone, Copy)]
pub enum CellClean {
    /// Strip a trailing percent sign: "18%" → 18.0.
    Percent,
    /// Strip thousands separators: "12,792" → 12792.0.
    Grouped,
}

impl CellClean {
    fn parse(self, raw: &str) -> Option<f64> {
        match self {
            CellClean::Percent => parse_num(raw.trim().trim_end_matches('%')),
            CellClean::Grouped => parse_num(&raw.replace(',', "")),
        }
    }
}

/// Current ratio block: the quick-ratios value plus the year-indexed RoCE.
/// Both fields are independently absent-able; the fallback resolver treats the
/// block as empty only when neither could be located.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatioBlock {
    pub current_pe: Option<f64>,
    pub median_roce: Option<f64>,
}

impl RatioBlock {
    pub fn is_empty(&self) -> bool {
        self.current_pe.is_none() && self.median_roce.is_none()
    }
}

pub fn ratio_block(doc: &Html, roce_year: &str) -> RatioBlock {
    RatioBlock {
        current_pe: ratio_value(doc, STOCK_PE_LABEL),
        median_roce: year_table_value(doc, &ROCE_TARGET, roce_year),
    }
}

/// Scans the company-ratios list for an item whose name matches `label` and
/// parses the adjacent value. Blank value text is absence, not a parse error.
pub fn ratio_value(doc: &Html, label: &str) -> Option<f64> {
    let container_sel = sel("div.company-ratios")?;
    let item_sel = sel("li.flex.flex-space-between")?;
    let name_sel = sel("span.name")?;
    let value_sel = sel("span.nowrap.value")?;

    for container in doc.select(&container_sel) {
        for item in container.select(&item_sel) {
            let Some(name) = item.select(&name_sel).next() else {
                continue;
            };
            if text_of(&name) != label {
                continue;
            }
            let value = item.select(&value_sel).next()?;
            return parse_num(&text_of(&value));
        }
    }
    None
}

/// Reads the cell at (row matching `target.row_label`, column whose header
/// contains `year`) from the table in `section#{target.section_id}`.
pub fn year_table_value(doc: &Html, target: &TableTarget, year: &str) -> Option<f64> {
    labeled_row_series(doc, target)?.for_year(year)
}

/// Materializes one labeled table row as a year → value series, pairing each
/// data cell with its header text. Cells that fail the clean-and-parse step
/// are left out of the series.
pub fn labeled_row_series(doc: &Html, target: &TableTarget) -> Option<YearlySeries> {
    let table_sel = sel(&format!("section#{} table", target.section_id))?;
    let row_sel = sel("tr")?;
    let cell_sel = sel("th, td")?;

    let table = doc.select(&table_sel).next()?;
    let mut rows = table.select(&row_sel);

    let header = rows.next()?;
    let headers: Vec<String> = header.select(&cell_sel).map(|c| text_of(&c)).collect();

    for row in rows {
        let cells: Vec<String> = row.select(&cell_sel).map(|c| text_of(&c)).collect();
        let Some(first) = cells.first() else {
            continue;
        };
        if !first.contains(target.row_label) {
            continue;
        }

        let mut series = YearlySeries::default();
        // Column 0 is the row label; the year columns start at 1.
        for (idx, header_text) in headers.iter().enumerate().skip(1) {
            let Some(raw) = cells.get(idx) else {
                continue;
            };
            if let Some(value) = target.clean.parse(raw) {
                series.push_unique(header_text.clone(), value);
            }
        }
        return Some(series);
    }
    None
}

/// Fiscal-year earnings multiple: market cap over the net profit reported for
/// `profit_year`. Absent market cap, absent profit or a zero profit all yield
/// absence rather than a nonsensical ratio.
pub fn fiscal_earnings_multiple(doc: &Html, profit_year: &str) -> Option<f64> {
    let cap = market_cap(doc)?;
    let profit = year_table_value(doc, &NET_PROFIT_TARGET, profit_year)?;
    if profit == 0.0 {
        return None;
    }
    let multiple = cap / profit;
    multiple.is_finite().then_some(multiple)
}

/// Headline market cap: the first numeric span on the page, thousands
/// separators stripped.
pub fn market_cap(doc: &Html) -> Option<f64> {
    let number_sel = sel("span.number")?;
    let el = doc.select(&number_sel).next()?;
    parse_num(&text_of(&el).replace(',', ""))
}

/// Both compounded-growth blocks of a page. Blocks that are missing come back
/// as empty tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthTables {
    pub sales: GrowthTable,
    pub profit: GrowthTable,
}

impl GrowthTables {
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty() && self.profit.is_empty()
    }
}

/// Classifies every `ranges-table` by its heading and collects the data rows.
/// Rows whose growth cell is blank are skipped, not recorded as zero.
pub fn growth_tables(doc: &Html) -> GrowthTables {
    let mut out = GrowthTables::default();

    let Some(table_sel) = sel("table.ranges-table") else {
        return out;
    };
    let Some(heading_sel) = sel("th") else {
        return out;
    };
    let Some(row_sel) = sel("tr") else {
        return out;
    };
    let Some(cell_sel) = sel("td") else {
        return out;
    };

    for table in doc.select(&table_sel) {
        let Some(heading) = table.select(&heading_sel).next().map(|th| text_of(&th)) else {
            continue;
        };

        let dest = if heading.contains(SALES_GROWTH_HEADING) {
            &mut out.sales
        } else if heading.contains(PROFIT_GROWTH_HEADING) {
            &mut out.profit
        } else {
            continue;
        };

        // First row is the heading.
        for row in table.select(&row_sel).skip(1) {
            let mut cells = row.select(&cell_sel);
            let (Some(period_cell), Some(value_cell)) = (cells.next(), cells.next()) else {
                continue;
            };

            let period = text_of(&period_cell)
                .trim_end_matches(':')
                .trim()
                .to_string();
            if period.is_empty() {
                continue;
            }

            let raw = text_of(&value_cell);
            let Some(percent) = parse_num(raw.trim().trim_end_matches('%')) else {
                continue;
            };
            dest.push_unique(period, percent);
        }
    }

    out
}

fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn parse_num(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok()
}

// Static selector strings always parse; returning Option keeps the extraction
// path panic-free even if one ever does not.
fn sel(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}
