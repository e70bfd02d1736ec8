//! The complete household record handed over by the presentation layer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::data::{
    Account, AnnualExpenditure, BudgetItem, BudgetSummary, GovernmentBenefits, Inheritance, Profile, Scenario,
};
use crate::assumptions::MarketAssumptions;
use crate::networth::{aggregate, NetWorth, NetWorthHistory};
use crate::projection::ProjectionInput;

/// Everything the household has entered, as one immutable snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    #[serde(rename = "personal")]
    pub profile: Profile,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub budget: Vec<BudgetItem>,
    #[serde(default)]
    pub annual_expenditures: Vec<AnnualExpenditure>,
    #[serde(default)]
    pub government: GovernmentBenefits,
    #[serde(default)]
    pub inheritance: Option<Inheritance>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub history: NetWorthHistory,
}

impl Household {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            accounts: Vec::new(),
            budget: Vec::new(),
            annual_expenditures: Vec::new(),
            government: GovernmentBenefits::default(),
            inheritance: None,
            scenarios: Vec::new(),
            history: NetWorthHistory::default(),
        }
    }

    pub fn net_worth(&self) -> NetWorth {
        aggregate(&self.accounts)
    }

    pub fn budget_summary(&self) -> BudgetSummary {
        BudgetSummary::from_items(&self.budget)
    }

    pub fn age_on(&self, today: NaiveDate) -> u32 {
        self.profile.age_on(today)
    }

    /// Build the engine input for the base plan (no what-if events)
    ///
    /// Principal is the liquid net worth floored at zero; income and expenses
    /// come from the budget.
    pub fn projection_input(&self, today: NaiveDate, market: MarketAssumptions) -> ProjectionInput {
        let budget = self.budget_summary();
        ProjectionInput {
            current_age: self.age_on(today),
            principal: self.net_worth().liquid_net_worth.max(0.0),
            monthly_income: budget.monthly_income,
            monthly_expenses: budget.monthly_expenses,
            annual_return_pct: market.annual_return_pct,
            annual_inflation_pct: market.annual_inflation_pct,
            retirement_age: self.profile.retirement_age,
            benefits: self.government,
            inheritance: self.inheritance,
            annual_expenditures: self.annual_expenditures.clone(),
            scenarios: Vec::new(),
        }
    }

    /// Same as [`projection_input`](Self::projection_input) with the household's what-if events applied
    pub fn what_if_input(&self, today: NaiveDate, market: MarketAssumptions) -> ProjectionInput {
        let mut input = self.projection_input(today, market);
        input.scenarios = self.scenarios.clone();
        input
    }

    /// Years from today until the plan horizon (life expectancy)
    pub fn horizon_years(&self, today: NaiveDate) -> u32 {
        self.profile.life_expectancy.saturating_sub(self.age_on(today)).max(1)
    }

    /// Record today's liquid net worth in the history; true when the history changed
    pub fn record_net_worth(&mut self, today: NaiveDate) -> bool {
        let liquid = self.net_worth().liquid_net_worth;
        self.history.record(today, liquid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{AccountType, BudgetFrequency, BudgetKind};
    use approx::assert_relative_eq;

    fn demo_household() -> Household {
        let mut household = Household::new(Profile::new(
            "Alex",
            NaiveDate::from_ymd_opt(1981, 1, 1).unwrap(),
            55,
            95,
        ));
        household.accounts = vec![
            Account::new("a1", "High Interest Savings", AccountType::Bank, 50_000.0),
            Account::new("a2", "RRSP", AccountType::Investments, 150_000.0),
            Account::new("a3", "Primary Residence", AccountType::Assets, 700_000.0),
            Account::new("a4", "Mortgage", AccountType::Liability, -500_000.0),
        ];
        household.budget = vec![
            BudgetItem::new("i1", "Employment Income", "", 5000.0, BudgetKind::Income, BudgetFrequency::Monthly),
            BudgetItem::new("e1", "Core Living Expenses", "", 4000.0, BudgetKind::Expense, BudgetFrequency::Monthly),
        ];
        household.government = GovernmentBenefits::new(70, 1100.0, 65, 713.0);
        household.inheritance = Some(Inheritance::cash(65, 500_000.0));
        household
    }

    #[test]
    fn test_projection_input_from_household() {
        let household = demo_household();
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let input = household.projection_input(today, MarketAssumptions::default());

        assert_eq!(input.current_age, 45);
        // Liquid net worth is negative (200k liquid - 500k mortgage), so principal floors at 0
        assert_eq!(input.principal, 0.0);
        assert_relative_eq!(input.monthly_income, 5000.0);
        assert_relative_eq!(input.monthly_expenses, 4000.0);
        assert_eq!(input.retirement_age, 55);
        assert!(input.scenarios.is_empty());
        assert_eq!(household.horizon_years(today), 50);
    }

    #[test]
    fn test_missing_collections_deserialize_empty() {
        let json = r#"{"personal": {"dob": "1970-05-05"}}"#;
        let household: Household = serde_json::from_str(json).unwrap();

        assert!(household.accounts.is_empty());
        assert!(household.scenarios.is_empty());
        assert!(household.inheritance.is_none());
        assert_eq!(household.profile.retirement_age, 65);
        assert_eq!(household.profile.life_expectancy, 95);
    }

    #[test]
    fn test_record_net_worth_once_per_day() {
        let mut household = demo_household();
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        assert!(household.record_net_worth(today));
        assert!(!household.record_net_worth(today));
        assert_eq!(household.history.len(), 1);
    }
}
