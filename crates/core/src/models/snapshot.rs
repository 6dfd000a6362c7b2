use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::transaction::TransactionRecord;

/// One fetch from a transaction source: accounts plus raw records.
///
/// Balances are assumed to already reflect every record in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSnapshot {
    /// Name of the source that produced it
    pub source: String,

    /// Last day the records were requested for
    pub fetched_through: NaiveDate,

    pub accounts: Vec<Account>,
    pub records: Vec<TransactionRecord>,
}
