//! Dated net worth snapshots

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Changes at or below this amount do not rewrite an existing entry
pub const HISTORY_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub net_worth: f64,
}

/// One net worth value per calendar date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetWorthHistory {
    entries: Vec<HistoryEntry>,
}

impl NetWorthHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.entries.iter().find(|e| e.date == date).map(|e| e.net_worth)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.iter().max_by_key(|e| e.date)
    }

    /// Upsert the value for `date`. Returns true when the history changed.
    pub fn record(&mut self, date: NaiveDate, net_worth: f64) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.date == date) {
            if (entry.net_worth - net_worth).abs() <= HISTORY_TOLERANCE {
                return false;
            }
            log::info!(
                "updating net worth for {}: {:.2} -> {:.2}",
                date,
                entry.net_worth,
                net_worth
            );
            entry.net_worth = net_worth;
            return true;
        }

        log::info!("recording net worth for {}: {:.2}", date, net_worth);
        let position = self.entries.partition_point(|e| e.date < date);
        self.entries.insert(position, HistoryEntry { date, net_worth });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_record_upserts_per_date() {
        let mut history = NetWorthHistory::new();

        assert!(history.record(day(3), 1000.0));
        assert!(!history.record(day(3), 1000.005));
        assert_eq!(history.get(day(3)), Some(1000.0));

        assert!(history.record(day(3), 1000.5));
        assert_eq!(history.get(day(3)), Some(1000.5));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_entries_stay_sorted_by_date() {
        let mut history = NetWorthHistory::new();
        history.record(day(10), 3.0);
        history.record(day(1), 1.0);
        history.record(day(5), 2.0);

        let dates: Vec<NaiveDate> = history.entries().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(1), day(5), day(10)]);
        assert_eq!(history.latest().map(|e| e.net_worth), Some(3.0));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut history = NetWorthHistory::new();
        history.record(day(3), 250.0);

        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"[{"date":"2026-05-03","net_worth":250.0}]"#);

        let back: NetWorthHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
