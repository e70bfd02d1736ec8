//! Household record types matching the persisted finance data format

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Clamp an amount or rate to a finite, non-negative value
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Replace NaN/inf with zero, keeping the sign of real values
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn default_start_age() -> u32 {
    65
}

/// Kind of account held by the household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Bank,
    Investments,
    #[serde(alias = "Asset")]
    Assets,
    Cash,
    Chattel,
    Other,
    Liability,
    #[serde(rename = "Credit Card", alias = "CreditCard")]
    CreditCard,
    Loan,
    Mortgage,
}

impl AccountType {
    /// Types that are always treated as debt, whatever the sign of the balance
    pub const LIABILITY_TYPES: [AccountType; 4] = [
        AccountType::Liability,
        AccountType::CreditCard,
        AccountType::Loan,
        AccountType::Mortgage,
    ];

    pub fn is_liability_type(&self) -> bool {
        Self::LIABILITY_TYPES.contains(self)
    }

    /// Only bank and investment balances can fund withdrawals
    pub fn is_liquid(&self) -> bool {
        matches!(self, AccountType::Bank | AccountType::Investments)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Bank => "Bank",
            AccountType::Investments => "Investments",
            AccountType::Assets => "Assets",
            AccountType::Cash => "Cash",
            AccountType::Chattel => "Chattel",
            AccountType::Other => "Other",
            AccountType::Liability => "Liability",
            AccountType::CreditCard => "Credit Card",
            AccountType::Loan => "Loan",
            AccountType::Mortgage => "Mortgage",
        }
    }

    /// Parse the label used in statements and spreadsheets
    pub fn from_label(label: &str) -> Option<Self> {
        let account_type = match label.trim() {
            "Bank" => AccountType::Bank,
            "Investments" | "Investment" => AccountType::Investments,
            "Assets" | "Asset" => AccountType::Assets,
            "Cash" => AccountType::Cash,
            "Chattel" => AccountType::Chattel,
            "Other" => AccountType::Other,
            "Liability" => AccountType::Liability,
            "Credit Card" | "CreditCard" => AccountType::CreditCard,
            "Loan" => AccountType::Loan,
            "Mortgage" => AccountType::Mortgage,
            _ => return None,
        };
        Some(account_type)
    }
}

/// A single account with a signed balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: f64,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, account_type: AccountType, balance: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type,
            balance: finite_or_zero(balance),
        }
    }
}

/// Whether a budget line brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetKind {
    Income,
    Expense,
}

/// How often a budget line recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BudgetFrequency {
    #[default]
    Monthly,
    Annually,
}

/// A recurring line in the household budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: BudgetKind,
    #[serde(default)]
    pub frequency: BudgetFrequency,
}

impl BudgetItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        kind: BudgetKind,
        frequency: BudgetFrequency,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            amount: non_negative(amount),
            kind,
            frequency,
        }
    }

    /// Monthly-equivalent amount (annual lines spread over 12 months)
    pub fn monthly_amount(&self) -> f64 {
        let amount = non_negative(self.amount);
        match self.frequency {
            BudgetFrequency::Monthly => amount,
            BudgetFrequency::Annually => amount / 12.0,
        }
    }
}

/// Monthly totals derived from the budget
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

impl BudgetSummary {
    pub fn from_items(items: &[BudgetItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            match item.kind {
                BudgetKind::Income => acc.monthly_income += item.monthly_amount(),
                BudgetKind::Expense => acc.monthly_expenses += item.monthly_amount(),
            }
            acc
        })
    }

    /// Monthly surplus (negative when expenses exceed income)
    pub fn net_cashflow(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }
}

/// Recurrence of a planned large expenditure, evaluated once per year of age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpenditureFrequency {
    #[default]
    #[serde(rename = "One-time")]
    OneTime,
    #[serde(rename = "Every Year")]
    EveryYear,
    #[serde(rename = "Every 2 Years", alias = "Every 2 years")]
    Every2Years,
    #[serde(rename = "Every 5 Years", alias = "Every 5 years")]
    Every5Years,
    #[serde(rename = "Every 10 Years", alias = "Every 10 years")]
    Every10Years,
}

/// A planned cost (travel, car, roof) charged in the first month of a year of age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualExpenditure {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub frequency: ExpenditureFrequency,
    #[serde(default = "default_start_age")]
    pub start_age: u32,
}

impl AnnualExpenditure {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        frequency: ExpenditureFrequency,
        start_age: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: non_negative(amount),
            frequency,
            start_age,
        }
    }
}

/// CPP and OAS monthly income streams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GovernmentBenefits {
    #[serde(default = "default_start_age")]
    pub cpp_start_age: u32,
    #[serde(default)]
    pub cpp_amount: f64,
    #[serde(default = "default_start_age")]
    pub oas_start_age: u32,
    #[serde(default)]
    pub oas_amount: f64,
}

impl Default for GovernmentBenefits {
    fn default() -> Self {
        Self {
            cpp_start_age: 65,
            cpp_amount: 0.0,
            oas_start_age: 65,
            oas_amount: 0.0,
        }
    }
}

impl GovernmentBenefits {
    pub fn new(cpp_start_age: u32, cpp_amount: f64, oas_start_age: u32, oas_amount: f64) -> Self {
        Self {
            cpp_start_age,
            cpp_amount: non_negative(cpp_amount),
            oas_start_age,
            oas_amount: non_negative(oas_amount),
        }
    }

    /// Combined monthly benefit once both streams are paying
    pub fn monthly_total(&self) -> f64 {
        non_negative(self.cpp_amount) + non_negative(self.oas_amount)
    }

    /// Benefit income paid in the month where age (in months) is `age_month`
    pub fn monthly_at(&self, age_month: u32) -> f64 {
        let mut income = 0.0;
        if age_month >= self.cpp_start_age * 12 {
            income += non_negative(self.cpp_amount);
        }
        if age_month >= self.oas_start_age * 12 {
            income += non_negative(self.oas_amount);
        }
        income
    }
}

/// Form of an expected inheritance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InheritanceKind {
    #[default]
    #[serde(rename = "Cash / Investments", alias = "Cash")]
    Cash,
    #[serde(rename = "Property / House", alias = "Property")]
    Property,
}

/// A single expected windfall
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Inheritance {
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: InheritanceKind,
    #[serde(default)]
    pub sell_property: bool,
    #[serde(default)]
    pub sell_age: u32,
}

impl Inheritance {
    pub fn cash(age: u32, amount: f64) -> Self {
        Self {
            age,
            amount: non_negative(amount),
            kind: InheritanceKind::Cash,
            sell_property: false,
            sell_age: 0,
        }
    }

    /// Inherited property, optionally converted to cash at `sell_age`
    pub fn property(age: u32, amount: f64, sell_age: Option<u32>) -> Self {
        Self {
            age,
            amount: non_negative(amount),
            kind: InheritanceKind::Property,
            sell_property: sell_age.is_some(),
            sell_age: sell_age.unwrap_or(0),
        }
    }

    /// Age in months at which cash lands in the plan, if it ever does
    pub fn payout_month(&self) -> Option<u32> {
        if self.age == 0 || non_negative(self.amount) <= 0.0 {
            return None;
        }
        match self.kind {
            InheritanceKind::Cash => Some(self.age * 12),
            InheritanceKind::Property if self.sell_property => Some(self.sell_age * 12),
            InheritanceKind::Property => None,
        }
    }
}

/// Recurrence of a what-if event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScenarioFrequency {
    #[default]
    #[serde(rename = "One-time")]
    OneTime,
    Monthly,
    #[serde(rename = "Twice per year")]
    TwicePerYear,
    #[serde(alias = "Every Year")]
    Annually,
    #[serde(rename = "Every 2 years", alias = "Every 2 Years")]
    Every2Years,
    #[serde(rename = "Every 3 years", alias = "Every 3 Years")]
    Every3Years,
    #[serde(rename = "Every 5 years", alias = "Every 5 Years")]
    Every5Years,
    #[serde(rename = "Every 10 years", alias = "Every 10 Years")]
    Every10Years,
    #[serde(rename = "Until End of Plan")]
    UntilEndOfPlan,
}

/// Direction of a what-if amount as labelled in saved files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Gain,
    Cost,
}

impl ScenarioKind {
    /// Gain labels add to the plan; anything else is a cost
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Financial Gain" | "Income" | "Asset" => ScenarioKind::Gain,
            _ => ScenarioKind::Cost,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Gain => "Financial Gain",
            ScenarioKind::Cost => "Cost",
        }
    }

    /// Signed impact for an amount entered under this label
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            ScenarioKind::Gain => amount,
            ScenarioKind::Cost => -amount.abs(),
        }
    }
}

/// A hypothetical life event layered onto the base plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ScenarioRecord", into = "ScenarioRecord")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub age: u32,
    /// Signed amount: positive is a gain, negative a cost
    pub impact: f64,
    pub frequency: ScenarioFrequency,
    /// Annual return (%) in force from the first trigger; 0 keeps the current rate
    pub sc_return: f64,
    /// Annual inflation (%) in force from the first trigger; 0 keeps the current rate
    pub sc_inflation: f64,
}

/// Saved form of a what-if event: an amount plus a `type` label giving its
/// direction. Without a label the amount is taken as already signed.
#[derive(Debug, Serialize, Deserialize)]
struct ScenarioRecord {
    id: String,
    #[serde(default)]
    name: String,
    age: u32,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    impact: f64,
    #[serde(default)]
    frequency: ScenarioFrequency,
    #[serde(default)]
    sc_return: f64,
    #[serde(default)]
    sc_inflation: f64,
}

impl From<ScenarioRecord> for Scenario {
    fn from(record: ScenarioRecord) -> Self {
        let impact = finite_or_zero(record.impact);
        let impact = match record.kind.as_deref() {
            Some(label) => ScenarioKind::from_label(label).signed(impact),
            None => impact,
        };
        Scenario::new(record.id, record.name, record.age, impact, record.frequency)
            .with_rates(record.sc_return, record.sc_inflation)
    }
}

impl From<Scenario> for ScenarioRecord {
    fn from(scenario: Scenario) -> Self {
        let kind = if scenario.impact < 0.0 {
            ScenarioKind::Cost
        } else {
            ScenarioKind::Gain
        };
        Self {
            id: scenario.id,
            name: scenario.name,
            age: scenario.age,
            kind: Some(kind.as_str().to_string()),
            impact: scenario.impact.abs(),
            frequency: scenario.frequency,
            sc_return: scenario.sc_return,
            sc_inflation: scenario.sc_inflation,
        }
    }
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: u32, impact: f64, frequency: ScenarioFrequency) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            impact: finite_or_zero(impact),
            frequency,
            sc_return: 0.0,
            sc_inflation: 0.0,
        }
    }

    /// Override the return and inflation rates from the first trigger onward
    pub fn with_rates(mut self, sc_return: f64, sc_inflation: f64) -> Self {
        self.sc_return = non_negative(sc_return);
        self.sc_inflation = non_negative(sc_inflation);
        self
    }

    /// One-time events hit the balance; everything else changes monthly flow
    pub fn is_recurring(&self) -> bool {
        self.frequency != ScenarioFrequency::OneTime
    }
}

fn default_retirement_age() -> u32 {
    65
}

fn default_life_expectancy() -> u32 {
    95
}

/// Personal planning details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Unknown dates of birth read as age 0
    #[serde(default, deserialize_with = "lenient_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default = "default_retirement_age", deserialize_with = "retirement_age_or_default")]
    pub retirement_age: u32,
    #[serde(default = "default_life_expectancy", deserialize_with = "life_expectancy_or_default")]
    pub life_expectancy: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `YYYY-MM-DD`; null, empty or unparseable values become `None`
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            if !value.trim().is_empty() {
                log::warn!("ignoring unparseable date of birth '{}'", value);
            }
            None
        }
    }))
}

fn retirement_age_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_retirement_age))
}

fn life_expectancy_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_life_expectancy))
}

impl Profile {
    pub fn new(name: impl Into<String>, dob: NaiveDate, retirement_age: u32, life_expectancy: u32) -> Self {
        Self {
            name: name.into(),
            dob: Some(dob),
            retirement_age,
            life_expectancy: life_expectancy.max(retirement_age),
        }
    }

    /// Completed years of age on `today` (0 for a missing or future date of birth)
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let Some(dob) = self.dob else {
            return 0;
        };
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    pub fn is_retired_on(&self, today: NaiveDate) -> bool {
        self.age_on(today) >= self.retirement_age
    }

    /// First word of the name, for greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("there")
    }
}
