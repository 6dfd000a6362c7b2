use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::TransactionSource;
use crate::errors::{redact_query, CoreError};
use crate::models::account::{Account, AccountKind};
use crate::models::transaction::TransactionRecord;

const SOURCE_NAME: &str = "Nessie";

/// Capital One "Nessie" sandbox banking API.
///
/// - **Requires**: API key and customer id.
/// - **Accounts**: `/customers/{id}/accounts`
/// - **Debits**: `/accounts/{id}/purchases`
/// - **Credits**: `/accounts/{id}/deposits`
///
/// The key travels as a `?key=` query parameter on every request.
pub struct NessieSource {
    client: Client,
    base_url: String,
    api_key: String,
    customer_id: String,
}

impl NessieSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, customer_id: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            customer_id: customer_id.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}?key={}", self.base_url, self.api_key)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                source_name: SOURCE_NAME.into(),
                message: format!("GET {path} returned {status}"),
            });
        }
        resp.json().await.map_err(|e| CoreError::Api {
            source_name: SOURCE_NAME.into(),
            message: format!("Failed to parse response for {path}: {}", redact_query(&e.to_string())),
        })
    }
}

// ── Nessie API response types ───────────────────────────────────────

/// Account as returned by `/customers/{id}/accounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct NessieAccount {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub balance: f64,
}

impl NessieAccount {
    /// `None` for account types the dashboard does not model.
    pub fn into_account(self) -> Option<Account> {
        let kind = AccountKind::parse(&self.account_type)?;
        Some(Account::new(self.id, kind, self.balance).with_nickname(self.nickname))
    }
}

/// Purchase as returned by `/accounts/{id}/purchases`. Always a debit.
#[derive(Debug, Clone, Deserialize)]
pub struct NessiePurchase {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub amount: serde_json::Value,
    #[serde(default)]
    pub description: Option<String>,
}

impl NessiePurchase {
    pub fn into_record(self, account_id: &str) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            account_id: account_id.to_string(),
            date: self.purchase_date,
            amount: self.amount,
            direction: Some("debit".into()),
            description: self.description.unwrap_or_default(),
            category: None,
            is_fixed: false,
        }
    }
}

/// Deposit as returned by `/accounts/{id}/deposits`. Always a credit.
#[derive(Debug, Clone, Deserialize)]
pub struct NessieDeposit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub amount: serde_json::Value,
    #[serde(default)]
    pub description: Option<String>,
}

impl NessieDeposit {
    pub fn into_record(self, account_id: &str) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            account_id: account_id.to_string(),
            date: self.transaction_date,
            amount: self.amount,
            direction: Some("credit".into()),
            description: self.description.unwrap_or_else(|| "Deposit".to_string()),
            category: None,
            is_fixed: false,
        }
    }
}

/// Keep records whose date is unparsable (they are skipped and counted
/// later) and those inside the range.
fn within(record: &TransactionRecord, since: NaiveDate, until: NaiveDate) -> bool {
    let Some(date) = record
        .date
        .as_deref()
        .and_then(|d| d.get(..10))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    else {
        return true;
    };
    date >= since && date <= until
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionSource for NessieSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError> {
        let path = format!("/customers/{}/accounts", self.customer_id);
        let raw: Vec<NessieAccount> = self.get_json(&path).await?;

        let mut accounts = Vec::with_capacity(raw.len());
        for account in raw {
            let account_type = account.account_type.clone();
            let id = account.id.clone();
            match account.into_account() {
                Some(a) => accounts.push(a),
                None => warn!(account = %id, account_type = %account_type, "ignoring account of unsupported type"),
            }
        }
        debug!(count = accounts.len(), "fetched accounts");
        Ok(accounts)
    }

    async fn fetch_transactions(
        &self,
        accounts: &[Account],
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<TransactionRecord>, CoreError> {
        let mut records = Vec::new();

        for account in accounts {
            let purchases: Vec<NessiePurchase> =
                self.get_json(&format!("/accounts/{}/purchases", account.id)).await?;
            records.extend(purchases.into_iter().map(|p| p.into_record(&account.id)));

            let deposits: Vec<NessieDeposit> =
                self.get_json(&format!("/accounts/{}/deposits", account.id)).await?;
            records.extend(deposits.into_iter().map(|d| d.into_record(&account.id)));
        }

        records.retain(|r| within(r, since, until));
        debug!(count = records.len(), %since, %until, "fetched transaction records");
        Ok(records)
    }
}
