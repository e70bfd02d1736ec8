//! Core projection engine for monthly balance projections

use serde::{Deserialize, Serialize};

use super::cashflows::{CashflowRow, ProjectionResult};
use super::input::ProjectionInput;
use super::state::ProjectionState;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub horizon_years: u32,

    /// Keep reporting zero balances to the horizon after the money runs out
    pub fill_to_horizon: bool,

    /// Whether to track per-month cashflow rows
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: 60,
            fill_to_horizon: false,
            detailed_output: false,
        }
    }
}

impl ProjectionConfig {
    pub fn new(horizon_years: u32) -> Self {
        Self {
            horizon_years,
            ..Default::default()
        }
    }

    /// Horizon running from `current_age` to `end_age` (at least one year)
    pub fn until_age(current_age: u32, end_age: u32) -> Self {
        Self::new(end_age.saturating_sub(current_age).max(1))
    }

    pub fn filled(mut self) -> Self {
        self.fill_to_horizon = true;
        self
    }

    pub fn detailed(mut self) -> Self {
        self.detailed_output = true;
        self
    }

    pub fn horizon_months(&self) -> u32 {
        self.horizon_years * 12
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection for one household input
    pub fn project(&self, input: &ProjectionInput) -> ProjectionResult {
        let input = input.sanitized();
        let horizon_months = self.config.horizon_months();
        let mut result = ProjectionResult::new(input.current_age, input.principal, horizon_months);
        let mut state = ProjectionState::from_input(&input);

        for _month in 1..=horizon_months {
            // Advance state to next month
            state.advance_month();

            let row = self.calculate_month(&input, &mut state);
            result.record(state.projection_month, state.balance);
            if self.config.detailed_output {
                result.add_row(row);
            }

            if state.balance <= 0.0 {
                // Once depleted the plan stays at zero; no phantom recovery
                state.balance = 0.0;
                result.mark_run_out(state.projection_month);
                log::debug!(
                    "balance depleted at month {} (age {:.2})",
                    state.projection_month,
                    state.age_years()
                );
                if self.config.fill_to_horizon {
                    result.fill_to_horizon(state.projection_month);
                }
                break;
            }

            if state.is_year_end() {
                // Income is never indexed
                state.inflate_expenses();
            }
        }

        result
    }

    /// Apply one month of flows to the state
    fn calculate_month(&self, input: &ProjectionInput, state: &mut ProjectionState) -> CashflowRow {
        let mut row = CashflowRow::new(state.projection_month, state.age_month);
        row.bop_balance = state.balance;

        // Salary stops outright at retirement
        row.salary_income = if state.age_month >= input.retirement_age * 12 {
            0.0
        } else {
            input.monthly_income
        };
        row.benefit_income = input.benefits.monthly_at(state.age_month);

        if let Some(inheritance) = &input.inheritance {
            if inheritance.payout_month() == Some(state.age_month) {
                state.balance += inheritance.amount;
                row.lump_sums += inheritance.amount;
            }
        }

        self.apply_scenarios(input, state, &mut row);

        row.return_pct = state.current_return_pct;
        row.inflation_pct = state.current_inflation_pct;

        row.interest = state.balance * state.monthly_return_rate();
        state.balance += row.interest;

        row.expenses = state.current_expenses;
        state.balance += row.effective_income() - row.expenses;

        if state.is_year_start() {
            let age = state.floor_age();
            row.annual_expenditures = input
                .annual_expenditures
                .iter()
                .filter(|e| e.frequency.fires_at_age(age, e.start_age))
                .map(|e| e.amount)
                .sum();
            state.balance -= row.annual_expenditures;
        }

        row.eop_balance = state.balance;
        row
    }

    /// One-time events hit the balance, recurring events the monthly flow;
    /// a positive rate override stays in force from its first trigger
    fn apply_scenarios(&self, input: &ProjectionInput, state: &mut ProjectionState, row: &mut CashflowRow) {
        for scenario in &input.scenarios {
            if !scenario.frequency.fires(state.age_month, scenario.age) {
                continue;
            }

            if scenario.is_recurring() {
                row.scenario_flow += scenario.impact;
            } else {
                state.balance += scenario.impact;
                row.lump_sums += scenario.impact;
            }

            if scenario.sc_return > 0.0 {
                state.current_return_pct = scenario.sc_return;
            }
            if scenario.sc_inflation > 0.0 {
                state.current_inflation_pct = scenario.sc_inflation;
            }
        }
    }
}

/// Run a single projection
pub fn simulate(input: &ProjectionInput, config: ProjectionConfig) -> ProjectionResult {
    ProjectionEngine::new(config).project(input)
}
