//! Load household data from JSON snapshots and CSV account/budget lists

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use csv::Reader;

use super::{Account, AccountType, BudgetFrequency, BudgetItem, BudgetKind, Household};
use crate::error::LoadError;

/// Raw CSV row for an account list (id,name,type,balance)
#[derive(Debug, serde::Deserialize)]
struct AccountCsvRow {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "name", default)]
    name: String,
    #[serde(rename = "type")]
    account_type: String,
    #[serde(rename = "balance")]
    balance: f64,
}

impl AccountCsvRow {
    fn to_account(self) -> Result<Account, LoadError> {
        let account_type = AccountType::from_label(&self.account_type)
            .ok_or_else(|| LoadError::unknown("account type", &self.account_type))?;

        Ok(Account::new(self.id, self.name, account_type, self.balance))
    }
}

/// Raw CSV row for a budget list (id,name,category,amount,type,frequency)
#[derive(Debug, serde::Deserialize)]
struct BudgetCsvRow {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "name", default)]
    name: String,
    #[serde(rename = "category", default)]
    category: String,
    #[serde(rename = "amount")]
    amount: f64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "frequency", default)]
    frequency: String,
}

impl BudgetCsvRow {
    fn to_budget_item(self) -> Result<BudgetItem, LoadError> {
        let kind = match self.kind.trim() {
            "Income" => BudgetKind::Income,
            "Expense" => BudgetKind::Expense,
            other => return Err(LoadError::unknown("budget type", other)),
        };

        let frequency = match self.frequency.trim() {
            "" | "Monthly" => BudgetFrequency::Monthly,
            "Annually" | "Annual" => BudgetFrequency::Annually,
            other => return Err(LoadError::unknown("budget frequency", other)),
        };

        Ok(BudgetItem::new(self.id, self.name, self.category, self.amount, kind, frequency))
    }
}

/// Load accounts from a CSV file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<Account>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let accounts = load_accounts_from_reader(file)?;
    log::info!("loaded {} accounts from {}", accounts.len(), path.display());
    Ok(accounts)
}

/// Load accounts from any reader (e.g., string buffer, upload stream)
pub fn load_accounts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Account>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut accounts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: AccountCsvRow = result?;
        accounts.push(row.to_account()?);
    }

    Ok(accounts)
}

/// Load budget items from a CSV file
pub fn load_budget<P: AsRef<Path>>(path: P) -> Result<Vec<BudgetItem>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let items = load_budget_from_reader(file)?;
    log::info!("loaded {} budget items from {}", items.len(), path.display());
    Ok(items)
}

/// Load budget items from any reader
pub fn load_budget_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<BudgetItem>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut items = Vec::new();

    for result in csv_reader.deserialize() {
        let row: BudgetCsvRow = result?;
        items.push(row.to_budget_item()?);
    }

    Ok(items)
}

/// Load a household snapshot from a JSON file
pub fn load_household<P: AsRef<Path>>(path: P) -> Result<Household, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let household = load_household_from_reader(BufReader::new(file))?;
    log::info!(
        "loaded household from {} ({} accounts, {} budget items, {} scenarios)",
        path.display(),
        household.accounts.len(),
        household.budget.len(),
        household.scenarios.len()
    );
    Ok(household)
}

/// Load a household snapshot from any reader
pub fn load_household_from_reader<R: std::io::Read>(reader: R) -> Result<Household, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write a household snapshot back to a JSON file
pub fn save_household<P: AsRef<Path>>(path: P, household: &Household) -> Result<(), LoadError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| LoadError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), household)?;
    log::info!("saved household to {}", path.display());
    Ok(())
}
