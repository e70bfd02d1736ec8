//! Reverse calculator: the most a plan can spend and still last

use serde::{Deserialize, Serialize};

use crate::assumptions::PlanningAssumptions;
use crate::projection::{simulate, ProjectionConfig, ProjectionInput};

/// Highest constant spending level that survives the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SustainableSpend {
    pub horizon_years: u32,
    /// Total monthly spending (today's dollars, inflated in the projection)
    pub total_monthly_spend: f64,
    /// Spending on top of the plan's monthly income
    pub extra_withdrawal: f64,
}

/// Bisect on monthly expenses for the highest level a full projection
/// survives for `horizon_years` (at least one)
///
/// Bounds are `[0, max(principal, bisection_floor)]`. Every other input
/// (income, benefits, inheritance, expenditures, events) is held fixed.
pub fn sustainable_spend(
    input: &ProjectionInput,
    horizon_years: u32,
    assumptions: &PlanningAssumptions,
) -> SustainableSpend {
    let input = input.sanitized();
    let horizon_years = horizon_years.max(1);
    let config = ProjectionConfig::new(horizon_years);

    let mut low = 0.0_f64;
    let mut high = input.principal.max(assumptions.bisection_floor);
    let mut best = 0.0;

    for _ in 0..assumptions.bisection_iterations {
        let mid = (low + high) / 2.0;
        let candidate = ProjectionInput {
            monthly_expenses: mid,
            ..input.clone()
        };

        if simulate(&candidate, config).ran_out {
            high = mid;
        } else {
            best = mid;
            low = mid;
        }
    }

    log::debug!(
        "sustainable spend over {} years: {:.2}/month (bracket {:.2}..{:.2})",
        horizon_years,
        best,
        low,
        high
    );

    SustainableSpend {
        horizon_years,
        total_monthly_spend: best,
        extra_withdrawal: (best - input.monthly_income).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn flat_retiree(principal: f64, income: f64) -> ProjectionInput {
        ProjectionInput::new(65, principal, income, 0.0)
            .with_rates(0.0, 0.0)
            .with_retirement_age(65)
    }

    #[test]
    fn test_spend_exhausts_principal_over_horizon() {
        // 120k over 10 years at 0%: anything below 1000/month lasts
        let result = sustainable_spend(&flat_retiree(120_000.0, 0.0), 10, &PlanningAssumptions::default());

        assert!(result.total_monthly_spend < 1000.0);
        assert_abs_diff_eq!(result.total_monthly_spend, 1000.0, epsilon = 0.25);
        assert_abs_diff_eq!(result.extra_withdrawal, result.total_monthly_spend);
    }

    #[test]
    fn test_best_spend_survives_full_projection() {
        let input = flat_retiree(300_000.0, 0.0).with_rates(5.0, 3.0);
        let result = sustainable_spend(&input, 25, &PlanningAssumptions::default());

        let at_best = ProjectionInput {
            monthly_expenses: result.total_monthly_spend,
            ..input.clone()
        };
        assert!(!simulate(&at_best, ProjectionConfig::new(25)).ran_out);

        let above = ProjectionInput {
            monthly_expenses: result.total_monthly_spend + 5.0,
            ..input
        };
        assert!(simulate(&above, ProjectionConfig::new(25)).ran_out);
    }

    #[test]
    fn test_extra_withdrawal_nets_out_income() {
        // Salary keeps paying because retirement is past the horizon
        let input = ProjectionInput::new(40, 120_000.0, 500.0, 0.0)
            .with_rates(0.0, 0.0)
            .with_retirement_age(80);
        let result = sustainable_spend(&input, 10, &PlanningAssumptions::default());

        assert_abs_diff_eq!(result.total_monthly_spend, 1500.0, epsilon = 0.25);
        assert_abs_diff_eq!(result.extra_withdrawal, result.total_monthly_spend - 500.0);
    }

    #[test]
    fn test_more_principal_never_spends_less() {
        let assumptions = PlanningAssumptions::default();
        let small = sustainable_spend(&flat_retiree(200_000.0, 0.0), 30, &assumptions);
        let large = sustainable_spend(&flat_retiree(400_000.0, 0.0), 30, &assumptions);
        assert!(large.total_monthly_spend > small.total_monthly_spend);
    }

    #[test]
    fn test_zero_horizon_reports_the_year_searched() {
        let result = sustainable_spend(&flat_retiree(120_000.0, 0.0), 0, &PlanningAssumptions::default());

        assert_eq!(result.horizon_years, 1);
        assert_abs_diff_eq!(result.total_monthly_spend, 10_000.0, epsilon = 0.25);
    }

    #[test]
    fn test_floor_bound_for_small_principal() {
        // Principal below the floor still searches up to 100k/month
        let result = sustainable_spend(&flat_retiree(0.0, 0.0), 5, &PlanningAssumptions::default());
        assert_eq!(result.total_monthly_spend, 0.0);
        assert_eq!(result.extra_withdrawal, 0.0);
    }
}
