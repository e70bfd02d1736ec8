//! Household Projection - month-by-month cash runway and retirement engine
//!
//! This library provides:
//! - Typed household records (accounts, budget, benefits, inheritance, what-if events)
//! - A deterministic monthly projection of a single balance
//! - Goal solvers (nest egg sizing, retirement timelines, sustainable spend)
//! - Net worth classification and dated history snapshots
//! - Side-by-side base vs what-if comparisons

pub mod error;
pub mod household;
pub mod assumptions;
pub mod projection;
pub mod solvers;
pub mod networth;
pub mod scenario;

// Re-export commonly used types
pub use error::{AssumptionError, LoadError};
pub use household::{Household, Account, AccountType, BudgetItem, BudgetSummary};
pub use assumptions::{PlanningAssumptions, MarketAssumptions};
pub use projection::{simulate, ProjectionEngine, ProjectionConfig, ProjectionInput, ProjectionResult, CashflowRow};
pub use solvers::{nest_egg_target, sustainable_spend, RetirementOutlook, RetirementTimeline, SavingsPlan};
pub use networth::{aggregate, NetWorth, NetWorthHistory};
pub use scenario::{ScenarioRunner, ScenarioComparison};
