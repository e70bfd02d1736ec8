//! Monthly balance projection for a single household plan

mod state;
mod engine;
mod cashflows;
mod input;
mod schedule;

pub use state::ProjectionState;
pub use engine::{simulate, ProjectionEngine, ProjectionConfig};
pub use cashflows::{CashflowRow, Depletion, ProjectionResult, ProjectionSummary};
pub use input::{Milestone, MilestoneKind, ProjectionInput};
