//! Account classification and net worth totals

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::household::{Account, AccountType};

/// How an account balance counts toward net worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountClass {
    /// Bank and investment balances that can fund withdrawals
    Liquid,
    /// Property, chattel and other assets that count toward total assets only
    Illiquid,
    /// Debt-type accounts and any negative balance
    Liability,
}

/// Classify one balance. Every net worth figure goes through this.
pub fn classify(account_type: AccountType, balance: f64) -> AccountClass {
    if account_type.is_liability_type() || balance < 0.0 {
        AccountClass::Liability
    } else if account_type.is_liquid() {
        AccountClass::Liquid
    } else {
        AccountClass::Illiquid
    }
}

impl Account {
    pub fn class(&self) -> AccountClass {
        classify(self.account_type, self.balance)
    }
}

/// Net worth totals for a set of accounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorth {
    /// Liquid assets minus all liabilities
    pub liquid_net_worth: f64,
    pub total_assets: f64,
    /// Sum of absolute liability balances
    pub total_liabilities: f64,
}

impl NetWorth {
    pub fn total_net_worth(&self) -> f64 {
        self.total_assets - self.total_liabilities
    }

    fn add(&mut self, class: AccountClass, balance: f64) {
        match class {
            AccountClass::Liability => {
                let debt = balance.abs();
                self.total_liabilities += debt;
                self.liquid_net_worth -= debt;
            }
            AccountClass::Liquid => {
                self.total_assets += balance;
                self.liquid_net_worth += balance;
            }
            AccountClass::Illiquid => {
                self.total_assets += balance;
            }
        }
    }
}

/// Aggregate account balances into net worth totals
pub fn aggregate(accounts: &[Account]) -> NetWorth {
    accounts.iter().fold(NetWorth::default(), |mut totals, account| {
        totals.add(account.class(), account.balance);
        totals
    })
}

/// Net worth totals per account type, for asset and liability tabs
pub fn breakdown_by_type(accounts: &[Account]) -> BTreeMap<AccountType, NetWorth> {
    let mut by_type: BTreeMap<AccountType, NetWorth> = BTreeMap::new();
    for account in accounts {
        by_type
            .entry(account.account_type)
            .or_default()
            .add(account.class(), account.balance);
    }
    by_type
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classification_rules() {
        assert_eq!(classify(AccountType::Bank, 100.0), AccountClass::Liquid);
        assert_eq!(classify(AccountType::Investments, 0.0), AccountClass::Liquid);
        assert_eq!(classify(AccountType::Assets, 500_000.0), AccountClass::Illiquid);
        assert_eq!(classify(AccountType::Chattel, 20_000.0), AccountClass::Illiquid);
        // Debt types are liabilities whatever the sign
        assert_eq!(classify(AccountType::Mortgage, 300_000.0), AccountClass::Liability);
        assert_eq!(classify(AccountType::CreditCard, -2_000.0), AccountClass::Liability);
        // An overdrawn bank account is a liability
        assert_eq!(classify(AccountType::Bank, -50.0), AccountClass::Liability);
    }

    #[test]
    fn test_aggregate_mixed_accounts() {
        let accounts = vec![
            Account::new("1", "Chequing", AccountType::Bank, 10_000.0),
            Account::new("2", "TFSA", AccountType::Investments, 90_000.0),
            Account::new("3", "House", AccountType::Assets, 600_000.0),
            Account::new("4", "Car", AccountType::Chattel, 25_000.0),
            Account::new("5", "Mortgage", AccountType::Mortgage, 400_000.0),
            Account::new("6", "Visa", AccountType::CreditCard, -3_000.0),
        ];
        let totals = aggregate(&accounts);

        assert_relative_eq!(totals.total_assets, 725_000.0);
        assert_relative_eq!(totals.total_liabilities, 403_000.0);
        assert_relative_eq!(totals.liquid_net_worth, 100_000.0 - 403_000.0);
        assert_relative_eq!(totals.total_net_worth(), 322_000.0);
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate(&[]), NetWorth::default());
    }

    #[test]
    fn test_breakdown_matches_aggregate() {
        let accounts = vec![
            Account::new("1", "Chequing", AccountType::Bank, 10_000.0),
            Account::new("2", "Savings", AccountType::Bank, 5_000.0),
            Account::new("3", "Loan", AccountType::Loan, 8_000.0),
        ];
        let by_type = breakdown_by_type(&accounts);

        assert_eq!(by_type.len(), 2);
        assert_relative_eq!(by_type[&AccountType::Bank].total_assets, 15_000.0);
        assert_relative_eq!(by_type[&AccountType::Loan].total_liabilities, 8_000.0);

        let liquid: f64 = by_type.values().map(|t| t.liquid_net_worth).sum();
        assert_relative_eq!(liquid, aggregate(&accounts).liquid_net_worth);
    }
}
