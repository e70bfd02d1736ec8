//! Goal solvers built on closed-form annuity math and the projection engine
//!
//! - Nest egg sizing under the withdrawal-rate rule
//! - Future wealth and required contributions at the quick-estimate rate
//! - Years-until-retirement and retire-later scans
//! - Sustainable spend by bisection over full projections

mod annuity;
mod outlook;
mod plan;
mod spend;
mod timeline;

pub use annuity::{future_value, nest_egg_target, required_monthly_contribution};
pub use outlook::{GoalOption, RetirementOptions, RetirementOutlook};
pub use plan::SavingsPlan;
pub use spend::{sustainable_spend, SustainableSpend};
pub use timeline::{retire_later, years_until_retirement, RetirementTimeline};
