use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::transaction::TransactionRecord;

/// Anything that can supply accounts and transactions.
///
/// The live banking API and the offline generator both implement this,
/// so aggregation never knows which one produced its inputs.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Current accounts with their balances.
    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError>;

    /// Raw transaction records for `accounts` dated within `since..=until`.
    /// Records are passed on unvalidated.
    async fn fetch_transactions(
        &self,
        accounts: &[Account],
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<TransactionRecord>, CoreError>;
}
