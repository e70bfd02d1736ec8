//! Year-by-year scans for when retirement becomes affordable

use serde::{Deserialize, Serialize};

use super::annuity::future_value;
use super::plan::SavingsPlan;
use crate::assumptions::PlanningAssumptions;

/// When the household can stop working at its current savings rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetirementTimeline {
    /// Already at or past the planned retirement age
    AlreadyRetired,
    /// No expenses entered, so there is no nest egg to aim for
    NeedsData,
    /// Expenses meet or exceed income, so savings never grow
    NegativeCashflow,
    /// Current net worth already covers the nest egg
    TargetMet,
    /// The nest egg is reached after `years`, at `age`
    Reached { years: u32, age: u32 },
    /// Not reached within the scan limit
    Unreachable,
}

/// Scan forward a year at a time until savings reach the (inflating) target
///
/// Each year compounds monthly at the quick-estimate rate with the monthly
/// surplus added, then charges that year's annual expenditures; the target
/// grows by the target inflation rate every year.
pub fn years_until_retirement(
    plan: &SavingsPlan,
    target_nest_egg: f64,
    assumptions: &PlanningAssumptions,
) -> RetirementTimeline {
    if plan.is_retired() {
        return RetirementTimeline::AlreadyRetired;
    }
    if plan.monthly_expenses == 0.0 {
        return RetirementTimeline::NeedsData;
    }
    let surplus = plan.monthly_surplus();
    if surplus <= 0.0 {
        return RetirementTimeline::NegativeCashflow;
    }

    let rate = assumptions.quick_monthly_rate();
    let mut balance = plan.net_worth;
    let mut target = target_nest_egg;
    let mut years = 0;

    while balance < target && years < assumptions.max_scan_years {
        let age = plan.current_age + years;
        for _ in 0..12 {
            balance += balance * rate;
            balance += surplus;
        }
        balance -= plan.expenditures_at_age(age);
        target *= 1.0 + assumptions.target_inflation;
        years += 1;
    }

    if balance < target {
        log::debug!("nest egg not reached within {} years", assumptions.max_scan_years);
        RetirementTimeline::Unreachable
    } else if years == 0 {
        RetirementTimeline::TargetMet
    } else {
        log::debug!("nest egg reached after {} years", years);
        RetirementTimeline::Reached {
            years,
            age: plan.current_age + years,
        }
    }
}

/// First retirement age at which wealth covers the (inflating) target
///
/// Starts from `wealth_at_retirement` at the planned age and keeps saving the
/// monthly surplus for each extra year worked. `None` when the age cap is hit
/// first.
pub fn retire_later(
    plan: &SavingsPlan,
    target_nest_egg: f64,
    wealth_at_retirement: f64,
    assumptions: &PlanningAssumptions,
) -> Option<u32> {
    let rate = assumptions.quick_monthly_rate();
    let surplus = plan.monthly_surplus();
    let mut age = plan.retirement_age;
    let mut wealth = wealth_at_retirement;
    let mut target = target_nest_egg;

    while wealth < target && age < assumptions.max_retirement_age {
        age += 1;
        wealth = future_value(wealth, surplus, rate, 12);
        target *= 1.0 + assumptions.target_inflation;
    }

    if wealth < target {
        None
    } else {
        Some(age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{AnnualExpenditure, ExpenditureFrequency};

    #[test]
    fn test_already_retired_and_negative_cashflow() {
        let assumptions = PlanningAssumptions::default();

        let retired = SavingsPlan::new(66, 65, 10_000.0, 5000.0, 1000.0);
        assert_eq!(
            years_until_retirement(&retired, 1_000_000.0, &assumptions),
            RetirementTimeline::AlreadyRetired
        );

        let deficit = SavingsPlan::new(40, 65, 10_000.0, 3000.0, 3000.0);
        assert_eq!(
            years_until_retirement(&deficit, 1_000_000.0, &assumptions),
            RetirementTimeline::NegativeCashflow
        );
    }

    #[test]
    fn test_missing_expenses_is_not_target_met() {
        let assumptions = PlanningAssumptions::default();

        let earning = SavingsPlan::new(40, 65, 10_000.0, 5000.0, 0.0);
        assert_eq!(
            years_until_retirement(&earning, 0.0, &assumptions),
            RetirementTimeline::NeedsData
        );

        let empty = SavingsPlan::new(40, 65, 0.0, 0.0, 0.0);
        assert_eq!(years_until_retirement(&empty, 0.0, &assumptions), RetirementTimeline::NeedsData);
    }

    #[test]
    fn test_target_met_is_not_a_zero_year_reach() {
        let plan = SavingsPlan::new(40, 65, 2_000_000.0, 8000.0, 4000.0);
        let timeline = years_until_retirement(&plan, 1_200_000.0, &PlanningAssumptions::default());
        assert_eq!(timeline, RetirementTimeline::TargetMet);
    }

    #[test]
    fn test_reached_after_some_years() {
        // 0% return and 0% target growth: 120k/yr of savings toward 1.2M
        let assumptions = PlanningAssumptions {
            quick_annual_return: 0.0,
            target_inflation: 0.0,
            ..PlanningAssumptions::default()
        };
        let plan = SavingsPlan::new(35, 65, 0.0, 14_000.0, 4000.0);
        assert_eq!(
            years_until_retirement(&plan, 1_200_000.0, &assumptions),
            RetirementTimeline::Reached { years: 10, age: 45 }
        );
    }

    #[test]
    fn test_annual_expenditures_delay_retirement() {
        let assumptions = PlanningAssumptions {
            quick_annual_return: 0.0,
            target_inflation: 0.0,
            ..PlanningAssumptions::default()
        };
        let plan = SavingsPlan::new(35, 65, 0.0, 14_000.0, 4000.0).with_expenditures(vec![AnnualExpenditure::new(
            "t",
            "Travel",
            20_000.0,
            ExpenditureFrequency::EveryYear,
            35,
        )]);
        // Net 100k per year
        assert_eq!(
            years_until_retirement(&plan, 1_200_000.0, &assumptions),
            RetirementTimeline::Reached { years: 12, age: 47 }
        );
    }

    #[test]
    fn test_tiny_surplus_is_unreachable() {
        let plan = SavingsPlan::new(30, 65, 0.0, 4001.0, 4000.0);
        assert_eq!(
            years_until_retirement(&plan, 1_200_000.0, &PlanningAssumptions::default()),
            RetirementTimeline::Unreachable
        );
    }

    #[test]
    fn test_retire_later_finds_first_covering_age() {
        let assumptions = PlanningAssumptions {
            quick_annual_return: 0.0,
            target_inflation: 0.0,
            ..PlanningAssumptions::default()
        };
        let plan = SavingsPlan::new(50, 60, 0.0, 3000.0, 2000.0);

        assert_eq!(retire_later(&plan, 500_000.0, 500_000.0, &assumptions), Some(60));
        // 12k saved per extra year closes a 36k shortfall in 3 years
        assert_eq!(retire_later(&plan, 500_000.0, 464_000.0, &assumptions), Some(63));
        assert_eq!(retire_later(&plan, 5_000_000.0, 0.0, &assumptions), None);
    }
}
