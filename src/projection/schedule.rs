//! Trigger rules for recurring events
//!
//! What-if scenarios are checked every month against the age in months;
//! annual expenditures are checked once per year of age.

use crate::household::{ExpenditureFrequency, ScenarioFrequency};

impl ScenarioFrequency {
    /// Months between firings; `None` for a one-time event
    pub fn period_months(&self) -> Option<u32> {
        match self {
            ScenarioFrequency::OneTime => None,
            ScenarioFrequency::Monthly | ScenarioFrequency::UntilEndOfPlan => Some(1),
            ScenarioFrequency::TwicePerYear => Some(6),
            ScenarioFrequency::Annually => Some(12),
            ScenarioFrequency::Every2Years => Some(24),
            ScenarioFrequency::Every3Years => Some(36),
            ScenarioFrequency::Every5Years => Some(60),
            ScenarioFrequency::Every10Years => Some(120),
        }
    }

    /// Whether an event starting at `trigger_age` fires when age is `age_month` months
    pub fn fires(&self, age_month: u32, trigger_age: u32) -> bool {
        let elapsed = i64::from(age_month) - i64::from(trigger_age) * 12;
        match self.period_months() {
            None => elapsed == 0,
            Some(period) => elapsed >= 0 && elapsed % i64::from(period) == 0,
        }
    }
}

impl ExpenditureFrequency {
    /// Years between charges; `None` for a one-time expenditure
    pub fn interval_years(&self) -> Option<u32> {
        match self {
            ExpenditureFrequency::OneTime => None,
            ExpenditureFrequency::EveryYear => Some(1),
            ExpenditureFrequency::Every2Years => Some(2),
            ExpenditureFrequency::Every5Years => Some(5),
            ExpenditureFrequency::Every10Years => Some(10),
        }
    }

    /// Whether an expenditure starting at `start_age` is charged in the year of age `age`
    pub fn fires_at_age(&self, age: u32, start_age: u32) -> bool {
        match self.interval_years() {
            None => age == start_age,
            Some(interval) => age >= start_age && (age - start_age) % interval == 0,
        }
    }
}
