//! What-if runner for side-by-side projections
//!
//! Runs the base plan (what-if events removed) and the what-if plan with the
//! same config, and batches of independent inputs in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionResult};

/// Runner holding the projection config shared by every run
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ProjectionConfig::until_age(45, 95));
/// let comparison = runner.compare(&household.what_if_input(today, market));
/// println!("{:+.1} years", comparison.years_difference);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run a single projection
    pub fn run(&self, input: &ProjectionInput) -> ProjectionResult {
        ProjectionEngine::new(self.config).project(input)
    }

    /// Run the base plan and the what-if plan side by side
    pub fn compare(&self, input: &ProjectionInput) -> ScenarioComparison {
        let base_input = input.without_scenarios();
        let (base, what_if) = rayon::join(|| self.run(&base_input), || self.run(input));
        ScenarioComparison::new(base, what_if)
    }

    /// Run projections for many independent inputs
    pub fn run_batch(&self, inputs: &[ProjectionInput]) -> Vec<ProjectionResult> {
        let engine = ProjectionEngine::new(self.config);
        inputs.par_iter().map(|input| engine.project(input)).collect()
    }

    /// Run one input under several configs (for example different horizons)
    pub fn run_configs(input: &ProjectionInput, configs: &[ProjectionConfig]) -> Vec<ProjectionResult> {
        configs
            .par_iter()
            .map(|config| ProjectionEngine::new(*config).project(input))
            .collect()
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }
}

/// Base plan vs what-if plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub base: ProjectionResult,
    pub what_if: ProjectionResult,
    pub base_lasts_until: f64,
    pub what_if_lasts_until: f64,
    /// What-if minus base, in years (negative when the events shorten the plan)
    pub years_difference: f64,
    /// What-if minus base final balance
    pub final_difference: f64,
}

impl ScenarioComparison {
    pub fn new(base: ProjectionResult, what_if: ProjectionResult) -> Self {
        let base_lasts_until = base.lasts_until_age();
        let what_if_lasts_until = what_if.lasts_until_age();
        let final_difference = what_if.final_balance() - base.final_balance();

        Self {
            base_lasts_until,
            what_if_lasts_until,
            years_difference: what_if_lasts_until - base_lasts_until,
            final_difference,
            base,
            what_if,
        }
    }

    /// Whether the what-if events change when (or whether) the money runs out
    pub fn changes_outcome(&self) -> bool {
        self.base.ran_out != self.what_if.ran_out || self.base.months_survived != self.what_if.months_survived
    }
}
