//! Working-years view of a household used by the quick estimates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::household::{non_negative, AnnualExpenditure, Household};

/// Savings picture while still working
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Liquid net worth; may be negative
    pub net_worth: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// CPP + OAS once both are paying
    pub monthly_benefits: f64,
    #[serde(default)]
    pub annual_expenditures: Vec<AnnualExpenditure>,
}

impl SavingsPlan {
    pub fn new(current_age: u32, retirement_age: u32, net_worth: f64, monthly_income: f64, monthly_expenses: f64) -> Self {
        Self {
            current_age,
            retirement_age,
            net_worth,
            monthly_income: non_negative(monthly_income),
            monthly_expenses: non_negative(monthly_expenses),
            monthly_benefits: 0.0,
            annual_expenditures: Vec::new(),
        }
    }

    pub fn with_benefits(mut self, monthly_benefits: f64) -> Self {
        self.monthly_benefits = non_negative(monthly_benefits);
        self
    }

    pub fn with_expenditures(mut self, expenditures: Vec<AnnualExpenditure>) -> Self {
        self.annual_expenditures = expenditures;
        self
    }

    pub fn from_household(household: &Household, today: NaiveDate) -> Self {
        let budget = household.budget_summary();
        Self::new(
            household.age_on(today),
            household.profile.retirement_age,
            household.net_worth().liquid_net_worth,
            budget.monthly_income,
            budget.monthly_expenses,
        )
        .with_benefits(household.government.monthly_total())
        .with_expenditures(household.annual_expenditures.clone())
    }

    pub fn is_retired(&self) -> bool {
        self.current_age >= self.retirement_age
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    /// Monthly savings (negative when expenses exceed income)
    pub fn monthly_surplus(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    /// Annual expenditures charged in the year of age `age`
    pub fn expenditures_at_age(&self, age: u32) -> f64 {
        self.annual_expenditures
            .iter()
            .filter(|e| e.frequency.fires_at_age(age, e.start_age))
            .map(|e| non_negative(e.amount))
            .sum()
    }
}
