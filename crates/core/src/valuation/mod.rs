//! Closed-form intrinsic earnings multiple and the overvaluation estimate
//! derived from it. Pure arithmetic; nothing here touches the network.

use crate::domain::assumptions::ValuationAssumptions;
use anyhow::ensure;

/// Discounted-growth-factor sum over the high-growth and fade windows,
/// divided by the spread between the target return and the cost of capital.
///
/// All rates are fractions (0.12 for 12%); converting from the whole-percent
/// UI units is the caller's job, see [`ValuationAssumptions::fractions`].
/// Growth holds at `high_growth_rate` for the high-growth years, then fades
/// linearly to `terminal_growth_rate` across the fade window.
///
/// The multiple is only meaningful for a positive spread: a zero spread makes
/// it undefined and a negative one flips its sign, so both are rejected
/// rather than letting infinity or a negative multiple out.
pub fn intrinsic_multiple(
    cost_of_capital: f64,
    target_return: f64,
    high_growth_rate: f64,
    high_growth_period: u32,
    fade_period: u32,
    terminal_growth_rate: f64,
) -> anyhow::Result<f64> {
    ensure!(
        target_return > cost_of_capital,
        "target return ({target_return}) must exceed cost of capital ({cost_of_capital}); \
         the intrinsic multiple is undefined otherwise"
    );
    ensure!(fade_period > 0, "fade period must be at least one year");

    let fade = f64::from(fade_period);
    let mut sum = 0.0;
    for i in 0..(high_growth_period + fade_period) {
        let growth_rate = if i < high_growth_period {
            high_growth_rate
        } else {
            let elapsed = f64::from(i - high_growth_period + 1);
            high_growth_rate - (high_growth_rate - terminal_growth_rate) * (elapsed / fade)
        };
        sum += (1.0 + growth_rate) / (1.0 + cost_of_capital).powi(i as i32 + 1);
    }

    Ok(sum / (target_return - cost_of_capital))
}

/// [`intrinsic_multiple`] fed from validated UI assumptions, with the
/// percent→fraction conversion applied at this boundary.
pub fn intrinsic_multiple_for(assumptions: &ValuationAssumptions) -> anyhow::Result<f64> {
    let f = assumptions.fractions();
    intrinsic_multiple(
        f.cost_of_capital,
        f.target_return_on_capital,
        f.high_growth_rate,
        f.high_growth_period,
        f.fade_period,
        f.terminal_growth_rate,
    )
}

/// Compares the more conservative of the two observed multiples against the
/// intrinsic one. Kept as an explicit branch rather than `min`: this is the
/// documented policy spot should the tie-break ever change.
pub fn degree_of_overvaluation(current: f64, fiscal: f64, intrinsic: f64) -> f64 {
    let chosen = if current < fiscal { current } else { fiscal };
    (chosen / intrinsic) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn fade_interpolates_linearly_down_to_terminal() {
        // growth sequence for i=0..3 must be [0.15, 0.15, 0.10, 0.05]:
        // two high-growth years, then a linear fade from 0.15 to 0.05 over
        // two steps.
        let coc: f64 = 0.10;
        let expected_sum = 1.15 / (1.0_f64 + coc).powi(1)
            + 1.15 / (1.0_f64 + coc).powi(2)
            + 1.10 / (1.0_f64 + coc).powi(3)
            + 1.05 / (1.0_f64 + coc).powi(4);

        let got = intrinsic_multiple(coc, 0.20, 0.15, 2, 2, 0.05).unwrap();
        assert!(close(got, expected_sum / 0.10), "got {got}");
    }

    #[test]
    fn fade_reaches_terminal_rate_on_the_last_year() {
        let got = intrinsic_multiple(0.10, 0.20, 0.15, 1, 5, 0.05).unwrap();
        let coc: f64 = 0.10;
        let mut expected = 1.15 / (1.0 + coc);
        for (i, g) in [0.13, 0.11, 0.09, 0.07, 0.05].iter().enumerate() {
            expected += (1.0 + g) / (1.0 + coc).powi(i as i32 + 2);
        }
        assert!(close(got, expected / 0.10), "got {got}");
    }

    #[test]
    fn equal_target_and_cost_of_capital_is_an_error() {
        let res = intrinsic_multiple(0.10, 0.10, 0.15, 2, 2, 0.05);
        assert!(res.is_err());
    }

    #[test]
    fn result_is_positive_and_finite_across_the_ui_domain_corners() {
        for (coc, target) in [(0.08, 0.10), (0.08, 1.00), (0.16, 1.00)] {
            let v = intrinsic_multiple(coc, target, 0.20, 25, 20, 0.075).unwrap();
            assert!(v.is_finite() && v > 0.0);
        }
        // The UI domains allow a target return below the cost of capital;
        // that spread must be rejected, not turned into a negative multiple.
        assert!(intrinsic_multiple(0.16, 0.10, 0.20, 25, 20, 0.075).is_err());
    }

    #[test]
    fn overvaluation_uses_the_lower_observed_multiple() {
        let v = degree_of_overvaluation(20.0, 25.0, 22.0);
        assert!(close(v, 20.0 / 22.0 - 1.0), "got {v}");
        assert!(v < 0.0);

        // Fiscal lower than current: the branch picks the fiscal multiple.
        let v = degree_of_overvaluation(25.0, 20.0, 22.0);
        assert!(close(v, 20.0 / 22.0 - 1.0), "got {v}");
    }

    #[test]
    fn ui_valid_inverted_spread_is_rejected_not_negative() {
        use crate::domain::assumptions::ValuationAssumptions;

        // Both values pass the slider-domain validation on their own; the
        // combination still must not produce a negative multiple.
        let a = ValuationAssumptions {
            cost_of_capital: 16,
            target_return_on_capital: 10,
            ..ValuationAssumptions::default()
        };
        a.validate().unwrap();
        assert!(intrinsic_multiple_for(&a).is_err());
    }

    #[test]
    fn intrinsic_multiple_for_converts_percent_units() {
        use crate::domain::assumptions::ValuationAssumptions;

        let a = ValuationAssumptions {
            cost_of_capital: 10,
            target_return_on_capital: 20,
            high_growth_rate: 14,
            high_growth_period: 10,
            fade_period: 10,
            terminal_growth_rate: 5.0,
        };
        a.validate().unwrap();

        let via_ui = intrinsic_multiple_for(&a).unwrap();
        let direct = intrinsic_multiple(0.10, 0.20, 0.14, 10, 10, 0.05).unwrap();
        assert!(close(via_ui, direct));
    }
}
