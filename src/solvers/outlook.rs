//! "Will it last?" retirement outlook

use serde::{Deserialize, Serialize};

use super::annuity::{future_value, nest_egg_target, required_monthly_contribution};
use super::plan::SavingsPlan;
use super::timeline::{retire_later, years_until_retirement, RetirementTimeline};
use crate::assumptions::PlanningAssumptions;

/// Result of one way to close the savings gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalOption<T> {
    /// The target is already covered; nothing to do
    OnTrack,
    /// No expenses entered, so there is no target to plan for
    NeedsData,
    /// What it would take
    Needs(T),
    /// Not achievable within the scan limits
    Unreachable,
}

impl<T> GoalOption<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            GoalOption::Needs(value) => Some(value),
            _ => None,
        }
    }
}

/// Four ways to retire within `target_years`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementOptions {
    pub target_years: u32,
    pub target_age: u32,
    /// Nest egg minus projected wealth at the target age
    pub target_gap: f64,
    /// One-time amount to add today
    pub lump_sum: GoalOption<f64>,
    /// Extra monthly saving on top of the current surplus
    pub extra_monthly: GoalOption<f64>,
    /// Age at which the current plan covers the nest egg
    pub retire_later: GoalOption<u32>,
    /// Monthly spending the projected wealth can sustain
    pub safe_monthly_spend: GoalOption<f64>,
}

/// Headline retirement numbers for a savings plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementOutlook {
    pub target_nest_egg: f64,
    /// Nest egg minus current net worth
    pub gap_today: f64,
    /// Projected net worth at the planned retirement age
    pub future_wealth: f64,
    pub final_gap: f64,
    pub timeline: RetirementTimeline,
    /// Neither income nor expenses have been entered
    pub needs_budget: bool,
    /// Absent once already retired
    pub options: Option<RetirementOptions>,
}

impl RetirementOutlook {
    pub fn evaluate(plan: &SavingsPlan, assumptions: &PlanningAssumptions) -> Self {
        let target_nest_egg = nest_egg_target(plan.monthly_expenses, plan.monthly_benefits, assumptions.withdrawal_rate);
        let rate = assumptions.quick_monthly_rate();
        let surplus = plan.monthly_surplus();

        let years_to_retirement = plan.years_to_retirement();
        let future_wealth = if years_to_retirement > 0 {
            future_value(plan.net_worth, surplus, rate, years_to_retirement * 12)
        } else {
            plan.net_worth
        };

        let timeline = years_until_retirement(plan, target_nest_egg, assumptions);
        let options = if plan.is_retired() {
            None
        } else {
            Some(Self::options(plan, target_nest_egg, future_wealth, assumptions))
        };

        Self {
            target_nest_egg,
            gap_today: target_nest_egg - plan.net_worth,
            future_wealth,
            final_gap: target_nest_egg - future_wealth,
            timeline,
            needs_budget: plan.monthly_income == 0.0 && plan.monthly_expenses == 0.0,
            options,
        }
    }

    fn options(
        plan: &SavingsPlan,
        target_nest_egg: f64,
        future_wealth: f64,
        assumptions: &PlanningAssumptions,
    ) -> RetirementOptions {
        let rate = assumptions.quick_monthly_rate();
        let years_to_retirement = plan.years_to_retirement();
        let target_years = if years_to_retirement > 0 {
            years_to_retirement.max(1).min(assumptions.default_target_years)
        } else {
            assumptions.default_target_years
        };
        let target_months = target_years * 12;
        let target_gap = target_nest_egg - future_value(plan.net_worth, plan.monthly_surplus(), rate, target_months);

        let expenses = plan.monthly_expenses;

        RetirementOptions {
            target_years,
            target_age: plan.current_age + target_years,
            target_gap,
            lump_sum: option_outcome(expenses, target_gap, || GoalOption::Needs(target_gap.max(0.0))),
            extra_monthly: option_outcome(expenses, target_gap, || {
                GoalOption::Needs(required_monthly_contribution(target_gap, rate, target_months))
            }),
            retire_later: option_outcome(expenses, target_gap, || {
                match retire_later(plan, target_nest_egg, future_wealth, assumptions) {
                    Some(age) => GoalOption::Needs(age),
                    None => GoalOption::Unreachable,
                }
            }),
            safe_monthly_spend: option_outcome(expenses, target_gap, || {
                GoalOption::Needs((future_wealth * assumptions.withdrawal_rate / 12.0).max(0.0))
            }),
        }
    }
}

/// On track wins over missing data, which wins over the computed need
fn option_outcome<T>(monthly_expenses: f64, target_gap: f64, needed: impl FnOnce() -> GoalOption<T>) -> GoalOption<T> {
    if monthly_expenses > 0.0 && target_gap <= 0.0 {
        GoalOption::OnTrack
    } else if monthly_expenses == 0.0 {
        GoalOption::NeedsData
    } else {
        needed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_outlook_for_saver_behind_target() {
        let plan = SavingsPlan::new(45, 60, 100_000.0, 7000.0, 4000.0);
        let outlook = RetirementOutlook::evaluate(&plan, &PlanningAssumptions::default());

        assert_relative_eq!(outlook.target_nest_egg, 1_200_000.0);
        assert_relative_eq!(outlook.gap_today, 1_100_000.0);
        assert!(outlook.future_wealth > 100_000.0 + 3000.0 * 180.0);
        assert!(matches!(outlook.timeline, RetirementTimeline::Reached { .. }));
        assert!(!outlook.needs_budget);

        let options = outlook.options.unwrap();
        assert_eq!(options.target_years, 10);
        assert_eq!(options.target_age, 55);
        assert!(options.target_gap > 0.0);
        assert_relative_eq!(*options.lump_sum.value().unwrap(), options.target_gap);

        let extra = *options.extra_monthly.value().unwrap();
        let rate = 0.05 / 12.0;
        let closed = future_value(100_000.0, 3000.0 + extra, rate, 120);
        assert_relative_eq!(closed, 1_200_000.0, max_relative = 1e-9);

        assert!(*options.retire_later.value().unwrap() >= 60);
        assert_relative_eq!(
            *options.safe_monthly_spend.value().unwrap(),
            outlook.future_wealth * 0.04 / 12.0
        );
    }

    #[test]
    fn test_on_track_is_distinct_from_needs() {
        let plan = SavingsPlan::new(50, 65, 2_000_000.0, 6000.0, 4000.0);
        let outlook = RetirementOutlook::evaluate(&plan, &PlanningAssumptions::default());

        assert_eq!(outlook.timeline, RetirementTimeline::TargetMet);
        let options = outlook.options.unwrap();
        assert_eq!(options.lump_sum, GoalOption::OnTrack);
        assert_eq!(options.extra_monthly, GoalOption::OnTrack);
        assert_eq!(options.retire_later, GoalOption::OnTrack);
        assert_eq!(options.safe_monthly_spend, GoalOption::OnTrack);
    }

    #[test]
    fn test_missing_expenses_needs_data() {
        let plan = SavingsPlan::new(30, 65, 0.0, 0.0, 0.0);
        let outlook = RetirementOutlook::evaluate(&plan, &PlanningAssumptions::default());

        assert!(outlook.needs_budget);
        assert_eq!(outlook.target_nest_egg, 0.0);
        let options = outlook.options.unwrap();
        assert_eq!(options.lump_sum, GoalOption::NeedsData);
        assert_eq!(options.retire_later, GoalOption::NeedsData);
    }

    #[test]
    fn test_income_without_expenses_needs_data() {
        let plan = SavingsPlan::new(40, 65, 10_000.0, 5000.0, 0.0);
        let outlook = RetirementOutlook::evaluate(&plan, &PlanningAssumptions::default());

        assert_eq!(outlook.timeline, RetirementTimeline::NeedsData);
        assert!(!outlook.needs_budget);
        let options = outlook.options.unwrap();
        assert_eq!(options.lump_sum, GoalOption::NeedsData);
        assert_eq!(options.safe_monthly_spend, GoalOption::NeedsData);
    }

    #[test]
    fn test_target_horizon_shrinks_near_retirement() {
        let plan = SavingsPlan::new(62, 65, 50_000.0, 5000.0, 4500.0);
        let options = RetirementOutlook::evaluate(&plan, &PlanningAssumptions::default())
            .options
            .unwrap();
        assert_eq!(options.target_years, 3);
        assert_eq!(options.target_age, 65);
    }

    #[test]
    fn test_retired_household_has_no_options() {
        let plan = SavingsPlan::new(70, 65, 800_000.0, 0.0, 3500.0).with_benefits(1500.0);
        let outlook = RetirementOutlook::evaluate(&plan, &PlanningAssumptions::default());

        assert_eq!(outlook.timeline, RetirementTimeline::AlreadyRetired);
        assert!(outlook.options.is_none());
        assert_relative_eq!(outlook.target_nest_egg, 600_000.0);
        assert_relative_eq!(outlook.future_wealth, 800_000.0);
    }
}
