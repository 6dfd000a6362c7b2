use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate};

use super::traits::TransactionSource;
use crate::errors::CoreError;
use crate::models::account::{Account, AccountKind};
use crate::models::transaction::TransactionRecord;

const SOURCE_NAME: &str = "Demo data";

/// (merchant, min amount, max amount)
const MERCHANTS: [(&str, f64, f64); 20] = [
    ("Starbucks Coffee", 4.0, 12.0),
    ("Whole Foods Market", 45.0, 150.0),
    ("Shell Gas Station", 35.0, 65.0),
    ("Amazon.com", 20.0, 200.0),
    ("Netflix", 15.0, 20.0),
    ("Uber", 8.0, 35.0),
    ("Target", 25.0, 120.0),
    ("Chipotle", 10.0, 18.0),
    ("CVS Pharmacy", 15.0, 75.0),
    ("Planet Fitness", 45.0, 45.0),
    ("ATM Withdrawal", 40.0, 200.0),
    ("Verizon Wireless", 85.0, 95.0),
    ("Electric Company", 100.0, 180.0),
    ("Spotify", 10.0, 11.0),
    ("Trader Joes", 30.0, 90.0),
    ("McDonalds", 6.0, 15.0),
    ("Home Depot", 40.0, 250.0),
    ("Walmart", 25.0, 100.0),
    ("Subway", 8.0, 12.0),
    ("Apple Store", 50.0, 500.0),
];

const PAYCHECK: f64 = 2500.0;
const PAYCHECK_INTERVAL_DAYS: i64 = 14;
const MORTGAGE: f64 = 1650.0;

/// Offline stand-in for the banking API.
///
/// Generates a realistic month of activity: 2-5 card purchases a day from a
/// fixed merchant list, a bi-weekly payroll deposit and a fixed mortgage
/// charge on the 1st. Output depends only on the requested range, so two
/// calls with the same range return identical data.
pub struct MockSource {
    accounts: Vec<Account>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            accounts: vec![
                Account::new("demo_checking", AccountKind::Checking, 3500.0).with_nickname("Main Account"),
                Account::new("demo_savings", AccountKind::Savings, 15000.0).with_nickname("Savings"),
                Account::new("demo_credit", AccountKind::Credit, -2300.0).with_nickname("Credit Card"),
            ],
        }
    }

    /// Serve these accounts instead of the built-in demo set.
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Deterministic record generation for `since..=until`, newest first.
    pub fn generate(&self, since: NaiveDate, until: NaiveDate) -> Vec<TransactionRecord> {
        let account_id = self
            .accounts
            .iter()
            .find(|a| a.kind == AccountKind::Checking)
            .or_else(|| self.accounts.first())
            .map(|a| a.id.clone())
            .unwrap_or_else(|| "demo_account".to_string());

        let mut records = Vec::new();
        let days = (until - since).num_days();
        for offset in 0..=days {
            let date = until - Duration::days(offset);
            let date_str = date.format("%Y-%m-%d").to_string();
            let seed = offset as usize;

            for k in 0..(2 + (seed * 7 + 3) % 4) {
                let (merchant, lo, hi) = MERCHANTS[(seed * 5 + k * 3) % MERCHANTS.len()];
                let fraction = ((seed * 13 + k * 7) % 100) as f64 / 100.0;
                let amount = ((lo + (hi - lo) * fraction) * 100.0).round() / 100.0;
                records.push(record(
                    format!("trans_{date_str}_{}", records.len()),
                    &account_id,
                    &date_str,
                    amount,
                    "debit",
                    merchant,
                    false,
                ));
            }

            if offset > 0 && offset % PAYCHECK_INTERVAL_DAYS == 0 {
                records.push(record(
                    format!("income_{date_str}"),
                    &account_id,
                    &date_str,
                    PAYCHECK,
                    "credit",
                    "Payroll Deposit",
                    false,
                ));
            }

            if date.day() == 1 {
                records.push(record(
                    format!("mortgage_{date_str}"),
                    &account_id,
                    &date_str,
                    MORTGAGE,
                    "debit",
                    "Mortgage Payment",
                    true,
                ));
            }
        }
        records
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

fn record(
    id: String,
    account_id: &str,
    date: &str,
    amount: f64,
    direction: &str,
    description: &str,
    is_fixed: bool,
) -> TransactionRecord {
    TransactionRecord {
        id,
        account_id: account_id.to_string(),
        date: Some(date.to_string()),
        amount: serde_json::Value::from(amount),
        direction: Some(direction.to_string()),
        description: description.to_string(),
        category: None,
        is_fixed,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionSource for MockSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError> {
        Ok(self.accounts.clone())
    }

    async fn fetch_transactions(
        &self,
        _accounts: &[Account],
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<TransactionRecord>, CoreError> {
        if since > until {
            return Err(CoreError::ValidationError(format!(
                "'since' date ({since}) must not be after 'until' date ({until})"
            )));
        }
        Ok(self.generate(since, until))
    }
}
