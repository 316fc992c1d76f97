use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a compounded-growth block: period label → growth percent.
/// Kept as a pair list rather than a map so the source column order survives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthTable {
    pub entries: Vec<GrowthEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEntry {
    pub period: String,
    pub percent: f64,
}

impl GrowthTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, period: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.period == period)
            .map(|e| e.percent)
    }

    /// Appends an entry unless the period label is already present.
    pub fn push_unique(&mut self, period: String, percent: f64) {
        if !self.entries.iter().any(|e| e.period == period) {
            self.entries.push(GrowthEntry { period, percent });
        }
    }
}

/// Values of one labeled row of a year-columned table, in source column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlySeries {
    pub values: Vec<(String, f64)>,
}

impl YearlySeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value under the first year header containing `year` as a substring.
    pub fn for_year(&self, year: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(label, _)| label.contains(year))
            .map(|(_, v)| *v)
    }

    /// Appends a value unless its year label is already present.
    pub fn push_unique(&mut self, label: String, value: f64) {
        if !self.values.iter().any(|(l, _)| *l == label) {
            self.values.push((label, value));
        }
    }
}

/// Everything one scrape run managed to pull for a symbol. Every field can be
/// absent independently; rendering decides what to say about the holes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSnapshot {
    pub symbol: String,
    pub fetched_at: DateTime<Utc>,
    pub current_pe: Option<f64>,
    pub median_roce: Option<f64>,
    pub fiscal_pe: Option<f64>,
    pub sales_growth: GrowthTable,
    pub profit_growth: GrowthTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationReport {
    pub snapshot: ScrapeSnapshot,
    pub intrinsic_pe: f64,
    /// Absent when either observed multiple could not be scraped.
    pub overvaluation: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_table_keeps_order_and_rejects_duplicate_periods() {
        let mut t = GrowthTable::default();
        t.push_unique("10 Years".to_string(), 12.0);
        t.push_unique("5 Years".to_string(), 14.0);
        t.push_unique("10 Years".to_string(), 99.0);

        assert_eq!(t.entries.len(), 2);
        assert_eq!(t.entries[0].period, "10 Years");
        assert_eq!(t.get("10 Years"), Some(12.0));
        assert_eq!(t.get("3 Years"), None);
    }

    #[test]
    fn yearly_series_matches_year_by_substring() {
        let s = YearlySeries {
            values: vec![
                ("Mar 2018".to_string(), 12.0),
                ("Mar 2019".to_string(), 18.0),
            ],
        };
        assert_eq!(s.for_year("2019"), Some(18.0));
        assert_eq!(s.for_year("2021"), None);
    }
}
