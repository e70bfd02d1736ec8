//! Projection output structures

use serde::{Deserialize, Serialize};

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    // Timing
    pub projection_month: u32,
    pub age_month: u32,
    pub age: f64,

    // Rates in force
    pub return_pct: f64,
    pub inflation_pct: f64,

    // Flows
    pub bop_balance: f64,
    pub salary_income: f64,
    pub benefit_income: f64,
    pub scenario_flow: f64,
    pub lump_sums: f64,
    pub interest: f64,
    pub expenses: f64,
    pub annual_expenditures: f64,
    pub eop_balance: f64,
}

impl CashflowRow {
    /// Create a new cashflow row with zeroed flows
    pub fn new(projection_month: u32, age_month: u32) -> Self {
        Self {
            projection_month,
            age_month,
            age: f64::from(age_month) / 12.0,
            return_pct: 0.0,
            inflation_pct: 0.0,
            bop_balance: 0.0,
            salary_income: 0.0,
            benefit_income: 0.0,
            scenario_flow: 0.0,
            lump_sums: 0.0,
            interest: 0.0,
            expenses: 0.0,
            annual_expenditures: 0.0,
            eop_balance: 0.0,
        }
    }

    /// Income plus recurring what-if flows for the month
    pub fn effective_income(&self) -> f64 {
        self.salary_income + self.benefit_income + self.scenario_flow
    }
}

/// How the plan ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Depletion {
    /// The balance lasts the whole horizon
    Never,
    /// The balance is gone within the first year
    Immediately,
    /// The balance is gone after this long
    After { years: u32, months: u32 },
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Integer age at month 0
    pub current_age: u32,

    /// Months the run was allowed to cover
    pub horizon_months: u32,

    /// Balance at month 0..=n, never negative
    pub balances: Vec<f64>,

    /// Age (fractional years) for each balance
    pub ages: Vec<f64>,

    /// Whether the balance reached zero within the horizon
    pub ran_out: bool,

    /// Month the balance reached zero, or the horizon when it never did
    pub months_survived: u32,

    /// Per-month detail, populated when detailed output is requested
    pub rows: Vec<CashflowRow>,
}

impl ProjectionResult {
    pub fn new(current_age: u32, principal: f64, horizon_months: u32) -> Self {
        let capacity = horizon_months as usize + 1;
        let mut balances = Vec::with_capacity(capacity);
        let mut ages = Vec::with_capacity(capacity);
        balances.push(principal);
        ages.push(f64::from(current_age));

        Self {
            current_age,
            horizon_months,
            balances,
            ages,
            ran_out: false,
            months_survived: horizon_months,
            rows: Vec::new(),
        }
    }

    /// Record the end-of-month balance (clamped at zero) for a projection month
    pub fn record(&mut self, projection_month: u32, balance: f64) {
        self.balances.push(balance.max(0.0));
        self.ages.push(self.age_at(projection_month));
    }

    /// Add a cashflow row
    pub fn add_row(&mut self, row: CashflowRow) {
        self.rows.push(row);
    }

    /// Mark the month the money ran out
    pub fn mark_run_out(&mut self, projection_month: u32) {
        self.ran_out = true;
        self.months_survived = projection_month;
    }

    /// Pad zero balances from `after_month + 1` to the end of the horizon
    pub fn fill_to_horizon(&mut self, after_month: u32) {
        for month in (after_month + 1)..=self.horizon_months {
            self.balances.push(0.0);
            self.ages.push(self.age_at(month));
        }
    }

    fn age_at(&self, projection_month: u32) -> f64 {
        f64::from(self.current_age) + f64::from(projection_month) / 12.0
    }

    /// Number of months recorded after month 0
    pub fn months_recorded(&self) -> u32 {
        (self.balances.len() - 1) as u32
    }

    pub fn final_balance(&self) -> f64 {
        self.balances.last().copied().unwrap_or(0.0)
    }

    /// Age at which the money runs out, or the end of the horizon
    pub fn lasts_until_age(&self) -> f64 {
        if self.ran_out {
            self.age_at(self.months_survived)
        } else {
            self.age_at(self.horizon_months)
        }
    }

    pub fn depletion(&self) -> Depletion {
        if !self.ran_out {
            return Depletion::Never;
        }
        let years = self.months_survived / 12;
        if years == 0 {
            Depletion::Immediately
        } else {
            Depletion::After {
                years,
                months: self.months_survived % 12,
            }
        }
    }

    /// One (age, balance) point per simulated year, for charts
    pub fn yearly_points(&self) -> Vec<(f64, f64)> {
        self.ages
            .iter()
            .zip(&self.balances)
            .step_by(12)
            .map(|(&age, &balance)| (age, balance))
            .collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let peak_balance = self.balances.iter().copied().fold(0.0, f64::max);

        ProjectionSummary {
            total_months: self.months_recorded(),
            starting_balance: self.balances.first().copied().unwrap_or(0.0),
            final_balance: self.final_balance(),
            peak_balance,
            ran_out: self.ran_out,
            months_survived: self.months_survived,
            lasts_until_age: self.lasts_until_age(),
            depletion: self.depletion(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub starting_balance: f64,
    pub final_balance: f64,
    pub peak_balance: f64,
    pub ran_out: bool,
    pub months_survived: u32,
    pub lasts_until_age: f64,
    pub depletion: Depletion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depletion_classification() {
        let mut result = ProjectionResult::new(60, 1000.0, 120);
        assert_eq!(result.depletion(), Depletion::Never);
        assert_eq!(result.lasts_until_age(), 70.0);

        result.mark_run_out(7);
        assert_eq!(result.depletion(), Depletion::Immediately);

        result.mark_run_out(38);
        assert_eq!(result.depletion(), Depletion::After { years: 3, months: 2 });
        assert!((result.lasts_until_age() - (60.0 + 38.0 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fill_to_horizon_pads_zeros() {
        let mut result = ProjectionResult::new(40, 10.0, 24);
        result.record(1, 5.0);
        result.record(2, -3.0);
        result.mark_run_out(2);
        result.fill_to_horizon(2);

        assert_eq!(result.balances.len(), 25);
        assert_eq!(result.ages.len(), 25);
        assert_eq!(result.balances[2], 0.0);
        assert!(result.balances[3..].iter().all(|&b| b == 0.0));
        assert_eq!(*result.ages.last().unwrap(), 42.0);
    }

    #[test]
    fn test_yearly_points() {
        let mut result = ProjectionResult::new(30, 100.0, 24);
        for month in 1..=24 {
            result.record(month, 100.0 + f64::from(month));
        }
        let points = result.yearly_points();
        assert_eq!(points, vec![(30.0, 100.0), (31.0, 112.0), (32.0, 124.0)]);
    }
}
