use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::category::Category;
use super::transaction::Transaction;

/// A user edit to one transaction. `None` fields leave the original value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEdit {
    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_fixed: Option<bool>,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TransactionEdit {
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn fixed(is_fixed: bool) -> Self {
        Self {
            is_fixed: Some(is_fixed),
            ..Self::default()
        }
    }

    /// Merge `later` on top of `self`. Set fields in `later` win; a delete sticks.
    fn merge(&mut self, later: TransactionEdit) {
        if later.category.is_some() {
            self.category = later.category;
        }
        if later.description.is_some() {
            self.description = later.description;
        }
        if later.is_fixed.is_some() {
            self.is_fixed = later.is_fixed;
        }
        self.deleted |= later.deleted;
        if later.updated_at.is_some() {
            self.updated_at = later.updated_at;
        }
    }
}

/// In-memory edits keyed by transaction id. Lives only as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionOverlay {
    edits: HashMap<String, TransactionEdit>,
}

impl TransactionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit, merging it over any earlier edit of the same transaction.
    pub fn record(&mut self, transaction_id: impl Into<String>, mut edit: TransactionEdit) {
        if edit.updated_at.is_none() {
            edit.updated_at = Some(Utc::now());
        }
        self.edits
            .entry(transaction_id.into())
            .or_default()
            .merge(edit);
    }

    /// Mark a transaction deleted.
    pub fn delete(&mut self, transaction_id: impl Into<String>) {
        self.record(
            transaction_id,
            TransactionEdit {
                deleted: true,
                ..TransactionEdit::default()
            },
        );
    }

    pub fn get(&self, transaction_id: &str) -> Option<&TransactionEdit> {
        self.edits.get(transaction_id)
    }

    pub fn is_deleted(&self, transaction_id: &str) -> bool {
        self.edits.get(transaction_id).is_some_and(|e| e.deleted)
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn clear(&mut self) {
        self.edits.clear();
    }

    /// Apply every edit to `transactions`, dropping deleted ones.
    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        if self.edits.is_empty() {
            return transactions;
        }
        transactions
            .into_iter()
            .filter_map(|mut txn| {
                let Some(edit) = self.edits.get(&txn.id) else {
                    return Some(txn);
                };
                if edit.deleted {
                    return None;
                }
                if let Some(category) = edit.category {
                    txn.category = category;
                }
                if let Some(description) = &edit.description {
                    txn.description = description.clone();
                }
                if let Some(is_fixed) = edit.is_fixed {
                    txn.is_fixed = is_fixed;
                }
                Some(txn)
            })
            .collect()
    }
}
