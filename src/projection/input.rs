//! Immutable engine input assembled per call

use serde::{Deserialize, Serialize};

use crate::assumptions::{DEFAULT_ANNUAL_INFLATION_PCT, DEFAULT_ANNUAL_RETURN_PCT};
use crate::household::{
    finite_or_zero, non_negative, AnnualExpenditure, GovernmentBenefits, Inheritance, Scenario,
};

/// Everything a single projection run reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Integer age at the start of the projection
    pub current_age: u32,

    /// Starting balance
    pub principal: f64,

    /// Salary-type income, paid until retirement
    pub monthly_income: f64,

    /// Monthly spending in today's dollars, inflated every 12 months
    pub monthly_expenses: f64,

    /// Annual return in percent (5.0 = 5%)
    pub annual_return_pct: f64,

    /// Annual inflation in percent
    pub annual_inflation_pct: f64,

    /// Age at which salary income stops
    pub retirement_age: u32,

    #[serde(default)]
    pub benefits: GovernmentBenefits,

    #[serde(default)]
    pub inheritance: Option<Inheritance>,

    #[serde(default)]
    pub annual_expenditures: Vec<AnnualExpenditure>,

    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ProjectionInput {
    /// Input with default market rates, retirement at 65 and no extras
    pub fn new(current_age: u32, principal: f64, monthly_income: f64, monthly_expenses: f64) -> Self {
        Self {
            current_age,
            principal,
            monthly_income,
            monthly_expenses,
            annual_return_pct: DEFAULT_ANNUAL_RETURN_PCT,
            annual_inflation_pct: DEFAULT_ANNUAL_INFLATION_PCT,
            retirement_age: 65,
            benefits: GovernmentBenefits::default(),
            inheritance: None,
            annual_expenditures: Vec::new(),
            scenarios: Vec::new(),
        }
    }

    pub fn with_rates(mut self, annual_return_pct: f64, annual_inflation_pct: f64) -> Self {
        self.annual_return_pct = annual_return_pct;
        self.annual_inflation_pct = annual_inflation_pct;
        self
    }

    pub fn with_retirement_age(mut self, retirement_age: u32) -> Self {
        self.retirement_age = retirement_age;
        self
    }

    pub fn with_benefits(mut self, benefits: GovernmentBenefits) -> Self {
        self.benefits = benefits;
        self
    }

    pub fn with_inheritance(mut self, inheritance: Inheritance) -> Self {
        self.inheritance = Some(inheritance);
        self
    }

    pub fn with_expenditures(mut self, expenditures: Vec<AnnualExpenditure>) -> Self {
        self.annual_expenditures = expenditures;
        self
    }

    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Copy of this input with the what-if events removed
    pub fn without_scenarios(&self) -> Self {
        Self {
            scenarios: Vec::new(),
            ..self.clone()
        }
    }

    /// Copy with negative or non-finite amounts and rates replaced by zero
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        clean.principal = non_negative(self.principal);
        clean.monthly_income = non_negative(self.monthly_income);
        clean.monthly_expenses = non_negative(self.monthly_expenses);
        clean.annual_return_pct = non_negative(self.annual_return_pct);
        clean.annual_inflation_pct = non_negative(self.annual_inflation_pct);
        clean.benefits = GovernmentBenefits::new(
            self.benefits.cpp_start_age,
            self.benefits.cpp_amount,
            self.benefits.oas_start_age,
            self.benefits.oas_amount,
        );
        for expenditure in &mut clean.annual_expenditures {
            expenditure.amount = non_negative(expenditure.amount);
        }
        for scenario in &mut clean.scenarios {
            scenario.impact = finite_or_zero(scenario.impact);
            scenario.sc_return = non_negative(scenario.sc_return);
            scenario.sc_inflation = non_negative(scenario.sc_inflation);
        }
        if let Some(inheritance) = clean.inheritance.as_mut() {
            inheritance.amount = non_negative(inheritance.amount);
        }

        if clean != *self {
            log::warn!("projection input contained negative or non-finite values; defaulted to 0");
        }
        clean
    }

    /// Notable ages falling inside the projection window, for chart markers
    pub fn milestones(&self, horizon_years: u32) -> Vec<Milestone> {
        let end_age = self.current_age + horizon_years;
        let in_window = |age: u32| age > self.current_age && age <= end_age;
        let mut milestones = Vec::new();

        if in_window(self.retirement_age) {
            milestones.push(Milestone::new(self.retirement_age, MilestoneKind::Retirement, "Retirement"));
        }
        if in_window(self.benefits.cpp_start_age) {
            milestones.push(Milestone::new(self.benefits.cpp_start_age, MilestoneKind::Benefit, "CPP starts"));
        }
        if in_window(self.benefits.oas_start_age) {
            milestones.push(Milestone::new(self.benefits.oas_start_age, MilestoneKind::Benefit, "OAS starts"));
        }
        if let Some(month) = self.inheritance.and_then(|i| i.payout_month()) {
            let age = month / 12;
            if in_window(age) {
                milestones.push(Milestone::new(age, MilestoneKind::Inheritance, "Inheritance"));
            }
        }
        for scenario in &self.scenarios {
            if in_window(scenario.age) {
                milestones.push(Milestone::new(scenario.age, MilestoneKind::Scenario, &scenario.name));
            }
        }

        milestones.sort_by_key(|m| m.age);
        milestones
    }
}

/// What a milestone marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneKind {
    Retirement,
    Benefit,
    Inheritance,
    Scenario,
}

/// A labelled age on the projection timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub age: u32,
    pub kind: MilestoneKind,
    pub label: String,
}

impl Milestone {
    fn new(age: u32, kind: MilestoneKind, label: &str) -> Self {
        Self {
            age,
            kind,
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::ScenarioFrequency;

    #[test]
    fn test_sanitized_defaults_negative_and_nan() {
        let input = ProjectionInput::new(40, -5.0, f64::NAN, -100.0).with_rates(-1.0, f64::INFINITY);
        let clean = input.sanitized();

        assert_eq!(clean.principal, 0.0);
        assert_eq!(clean.monthly_income, 0.0);
        assert_eq!(clean.monthly_expenses, 0.0);
        assert_eq!(clean.annual_return_pct, 0.0);
        assert_eq!(clean.annual_inflation_pct, 0.0);
    }

    #[test]
    fn test_sanitized_keeps_signed_scenario_impact() {
        let input = ProjectionInput::new(40, 1000.0, 0.0, 0.0)
            .with_scenarios(vec![Scenario::new("s", "Car", 45, -20_000.0, ScenarioFrequency::OneTime)]);
        assert_eq!(input.sanitized().scenarios[0].impact, -20_000.0);
        assert_eq!(input.sanitized(), input);
    }

    #[test]
    fn test_milestones_within_window() {
        let input = ProjectionInput::new(45, 0.0, 0.0, 0.0)
            .with_retirement_age(55)
            .with_benefits(GovernmentBenefits::new(70, 1100.0, 65, 713.0))
            .with_inheritance(Inheritance::cash(65, 500_000.0))
            .with_scenarios(vec![Scenario::new("s", "Sabbatical", 48, -30_000.0, ScenarioFrequency::OneTime)]);

        let milestones = input.milestones(20);
        let ages: Vec<u32> = milestones.iter().map(|m| m.age).collect();
        // CPP at 70 is outside a 20-year window from 45
        assert_eq!(ages, vec![48, 55, 65, 65]);
        assert_eq!(milestones[0].label, "Sabbatical");
    }
}
