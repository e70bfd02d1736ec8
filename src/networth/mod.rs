//! Net worth aggregation and history

mod aggregate;
mod history;

pub use aggregate::{aggregate, breakdown_by_type, classify, AccountClass, NetWorth};
pub use history::{HistoryEntry, NetWorthHistory, HISTORY_TOLERANCE};
