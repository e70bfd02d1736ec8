//! Running state of a single projection

use super::input::ProjectionInput;

/// Balance and rates in force at a point in the projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (1-indexed, 0 before the first step)
    pub projection_month: u32,

    /// Age expressed in months (current_age * 12 + projection_month)
    pub age_month: u32,

    /// Integer age at the start of the projection
    pub start_age: u32,

    /// Running balance
    pub balance: f64,

    /// Annual return (%) in force; what-if events may replace it
    pub current_return_pct: f64,

    /// Annual inflation (%) in force; what-if events may replace it
    pub current_inflation_pct: f64,

    /// Monthly expenses, inflated at each 12-month boundary
    pub current_expenses: f64,
}

impl ProjectionState {
    /// Initialize state from a (sanitized) input
    pub fn from_input(input: &ProjectionInput) -> Self {
        Self {
            projection_month: 0,
            age_month: input.current_age * 12,
            start_age: input.current_age,
            balance: input.principal,
            current_return_pct: input.annual_return_pct,
            current_inflation_pct: input.annual_inflation_pct,
            current_expenses: input.monthly_expenses,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.projection_month += 1;
        self.age_month = self.start_age * 12 + self.projection_month;
    }

    /// Fractional age used for reporting
    pub fn age_years(&self) -> f64 {
        f64::from(self.start_age) + f64::from(self.projection_month) / 12.0
    }

    /// Integer age used for annual expenditures
    pub fn floor_age(&self) -> u32 {
        self.age_month / 12
    }

    /// First month of a simulated year (months 1, 13, 25, ...)
    pub fn is_year_start(&self) -> bool {
        self.projection_month % 12 == 1
    }

    /// Last month of a simulated year (months 12, 24, ...)
    pub fn is_year_end(&self) -> bool {
        self.projection_month % 12 == 0
    }

    /// Monthly rate as simple division of the annual percentage
    pub fn monthly_return_rate(&self) -> f64 {
        self.current_return_pct / 100.0 / 12.0
    }

    /// Grow expenses by one year of the inflation rate in force
    pub fn inflate_expenses(&mut self) {
        self.current_expenses *= 1.0 + self.current_inflation_pct / 100.0;
    }
}
