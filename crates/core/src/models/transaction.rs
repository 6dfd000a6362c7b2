use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::CoreError;
use crate::services::classifier_service::KeywordClassifier;

/// Money flow direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Outflow
    Debit,
    /// Inflow
    Credit,
}

impl Direction {
    /// Parse a direction label. Banking-API record types map onto the two
    /// directions (`purchase`/`withdrawal` are debits, `deposit` is a credit).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "debit" | "purchase" | "withdrawal" => Some(Direction::Debit),
            "credit" | "deposit" => Some(Direction::Credit),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Debit => write!(f, "debit"),
            Direction::Credit => write!(f, "credit"),
        }
    }
}

/// A transaction record exactly as a source delivered it.
///
/// Nothing here is trusted: the date may be missing, the amount may not be
/// a number and the direction may be unknown. Convert with
/// [`Transaction::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,

    #[serde(default)]
    pub account_id: String,

    /// `YYYY-MM-DD`, optionally followed by a time component
    #[serde(default)]
    pub date: Option<String>,

    /// Number or numeric string
    #[serde(default)]
    pub amount: serde_json::Value,

    #[serde(default)]
    pub direction: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Category label from an upstream categorizer, if any
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub is_fixed: bool,
}

/// A validated transaction with daily granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,

    /// Always non-negative; the sign lives in `direction`
    pub amount: f64,

    pub direction: Direction,
    pub description: String,
    pub category: Category,

    /// Recurring, non-discretionary charge (rent, mortgage, ...)
    #[serde(default)]
    pub is_fixed: bool,
}

impl Transaction {
    /// Build a debit, categorized by the default keyword rules.
    pub fn debit(id: impl Into<String>, date: NaiveDate, amount: f64, description: impl Into<String>) -> Self {
        Self::build(id.into(), date, amount, Direction::Debit, description.into())
    }

    /// Build a credit, categorized by the default keyword rules.
    pub fn credit(id: impl Into<String>, date: NaiveDate, amount: f64, description: impl Into<String>) -> Self {
        Self::build(id.into(), date, amount, Direction::Credit, description.into())
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    /// Validate a raw record.
    ///
    /// Missing or unparsable dates, non-numeric or non-finite amounts and
    /// unknown directions are rejected. Negative amounts are taken as their
    /// magnitude. A missing or unrecognized category label falls back to
    /// `classifier`.
    pub fn from_record(record: &TransactionRecord, classifier: &KeywordClassifier) -> Result<Self, CoreError> {
        let malformed = |reason: String| CoreError::MalformedRecord {
            id: record.id.clone(),
            reason,
        };

        let raw_date = record
            .date
            .as_deref()
            .ok_or_else(|| malformed("missing date".into()))?;
        let date = parse_date(raw_date).ok_or_else(|| malformed(format!("unparsable date '{raw_date}'")))?;

        let amount = parse_amount(&record.amount)
            .ok_or_else(|| malformed(format!("non-numeric amount {}", record.amount)))?;

        let raw_direction = record
            .direction
            .as_deref()
            .ok_or_else(|| malformed("missing direction".into()))?;
        let direction = Direction::parse(raw_direction)
            .ok_or_else(|| malformed(format!("unknown direction '{raw_direction}'")))?;

        let category = record
            .category
            .as_deref()
            .and_then(Category::parse)
            .unwrap_or_else(|| classifier.classify(&record.description));

        Ok(Self {
            id: record.id.clone(),
            account_id: record.account_id.clone(),
            date,
            amount: amount.abs(),
            direction,
            description: record.description.clone(),
            category,
            is_fixed: record.is_fixed,
        })
    }

    fn build(id: String, date: NaiveDate, amount: f64, direction: Direction, description: String) -> Self {
        let category = KeywordClassifier::new().classify(&description);
        Self {
            id,
            account_id: String::new(),
            date,
            amount: amount.abs(),
            direction,
            description,
            category,
            is_fixed: false,
        }
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.clone(),
            account_id: txn.account_id.clone(),
            date: Some(txn.date.format("%Y-%m-%d").to_string()),
            amount: serde_json::Value::from(txn.amount),
            direction: Some(txn.direction.to_string()),
            description: txn.description.clone(),
            category: Some(txn.category.to_string()),
            is_fixed: txn.is_fixed,
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| trimmed.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

fn parse_amount(raw: &serde_json::Value) -> Option<f64> {
    let amount = match raw {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}
