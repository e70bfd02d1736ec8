//! Household data structures and loading

mod data;
mod snapshot;
pub mod loader;

pub use data::{
    Account, AccountType, AnnualExpenditure, BudgetFrequency, BudgetItem, BudgetKind, BudgetSummary,
    ExpenditureFrequency, GovernmentBenefits, Inheritance, InheritanceKind, Profile, Scenario, ScenarioFrequency,
    ScenarioKind,
};
pub(crate) use data::{finite_or_zero, non_negative};
pub use snapshot::Household;
pub use loader::{load_accounts, load_budget, load_household, save_household};
