use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Allowed high-growth-period choices (years). The UI exposes 2-year steps plus
/// a 25-year cap, so this is an enumerated set rather than a plain range.
const HIGH_GROWTH_PERIODS: [u32; 9] = [10, 12, 14, 16, 18, 20, 22, 24, 25];
const FADE_PERIODS: [u32; 4] = [5, 10, 15, 20];

/// Caller-supplied valuation inputs, in the units the UI exposes: whole
/// percents for rates, years for periods. `validate` enforces the slider
/// domains; the percent→fraction division happens in [`Self::fractions`],
/// never inside the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    pub cost_of_capital: u32,
    pub target_return_on_capital: u32,
    pub high_growth_rate: u32,
    pub high_growth_period: u32,
    pub fade_period: u32,
    pub terminal_growth_rate: f64,
}

impl Default for ValuationAssumptions {
    fn default() -> Self {
        // Range minimums, mirroring the slider defaults.
        Self {
            cost_of_capital: 8,
            target_return_on_capital: 10,
            high_growth_rate: 8,
            high_growth_period: 10,
            fade_period: 5,
            terminal_growth_rate: 1.0,
        }
    }
}

impl ValuationAssumptions {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (8..=16).contains(&self.cost_of_capital),
            "cost of capital must be 8..=16% (got {})",
            self.cost_of_capital
        );
        ensure!(
            (10..=100).contains(&self.target_return_on_capital)
                && self.target_return_on_capital % 10 == 0,
            "target return on capital must be 10..=100% in steps of 10 (got {})",
            self.target_return_on_capital
        );
        ensure!(
            (8..=20).contains(&self.high_growth_rate) && self.high_growth_rate % 2 == 0,
            "high growth rate must be 8..=20% in steps of 2 (got {})",
            self.high_growth_rate
        );
        ensure!(
            HIGH_GROWTH_PERIODS.contains(&self.high_growth_period),
            "high growth period must be one of {HIGH_GROWTH_PERIODS:?} years (got {})",
            self.high_growth_period
        );
        ensure!(
            FADE_PERIODS.contains(&self.fade_period),
            "fade period must be one of {FADE_PERIODS:?} years (got {})",
            self.fade_period
        );
        let t = self.terminal_growth_rate;
        ensure!(
            (1.0..=7.5).contains(&t) && (t * 2.0).fract() == 0.0,
            "terminal growth rate must be 1.0..=7.5% in steps of 0.5 (got {t})"
        );
        Ok(())
    }

    /// Rates as fractions for the calculator. The calculator's arithmetic is
    /// only consistent if every rate uses the same convention, so the division
    /// lives here at the boundary rather than being left to each call site.
    pub fn fractions(&self) -> FractionalAssumptions {
        FractionalAssumptions {
            cost_of_capital: f64::from(self.cost_of_capital) / 100.0,
            target_return_on_capital: f64::from(self.target_return_on_capital) / 100.0,
            high_growth_rate: f64::from(self.high_growth_rate) / 100.0,
            high_growth_period: self.high_growth_period,
            fade_period: self.fade_period,
            terminal_growth_rate: self.terminal_growth_rate / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalAssumptions {
    pub cost_of_capital: f64,
    pub target_return_on_capital: f64,
    pub high_growth_rate: f64,
    pub high_growth_period: u32,
    pub fade_period: u32,
    pub terminal_growth_rate: f64,
}
