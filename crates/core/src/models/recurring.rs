use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// How often a recurring expense shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    Irregular,
}

impl Frequency {
    /// Classify from the mean gap (in days) between occurrences.
    pub fn from_mean_gap(days: f64) -> Self {
        if days < 10.0 {
            Frequency::Weekly
        } else if days < 20.0 {
            Frequency::BiWeekly
        } else if days < 40.0 {
            Frequency::Monthly
        } else {
            Frequency::Irregular
        }
    }

    /// Days until the next expected occurrence.
    pub fn interval_days(&self) -> i64 {
        match self {
            Frequency::Weekly => 7,
            Frequency::BiWeekly => 14,
            Frequency::Monthly | Frequency::Irregular => 30,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::BiWeekly => write!(f, "Bi-weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Irregular => write!(f, "Irregular"),
        }
    }
}

/// A debit pattern detected across several transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    /// Description of the first transaction in the group
    pub description: String,
    pub average_amount: f64,
    pub frequency: Frequency,
    pub occurrences: usize,
    pub last_date: NaiveDate,
    pub next_due: NaiveDate,
    pub category: Category,
    pub transaction_ids: Vec<String>,
}

/// All detected recurring expenses, largest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringSummary {
    pub expenses: Vec<RecurringExpense>,

    /// Sum of the average amounts
    pub total_monthly: f64,
}
