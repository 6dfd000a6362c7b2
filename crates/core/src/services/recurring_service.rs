use chrono::Duration;
use std::collections::BTreeMap;

use crate::models::recurring::{Frequency, RecurringExpense, RecurringSummary};
use crate::models::transaction::Transaction;

const STOP_WORDS: [&str; 7] = ["the", "at", "in", "on", "payment", "bill", "auto"];
const KEY_LENGTH: usize = 30;
/// Maximum `(max - min) / avg` for a two-occurrence group to count as recurring
const MAX_SPREAD: f64 = 0.3;

/// Detects recurring expenses from debit history.
#[derive(Debug, Clone, Default)]
pub struct RecurringService;

impl RecurringService {
    pub fn new() -> Self {
        Self
    }

    /// Group debits by normalized description and keep the groups that
    /// look like a repeating charge.
    ///
    /// A group needs at least two members, and either amounts within 30%
    /// of their average or at least three members.
    pub fn detect(&self, transactions: &[Transaction]) -> RecurringSummary {
        let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
        for txn in transactions.iter().filter(|t| t.is_debit() && t.amount > 0.0) {
            let key = normalize_description(&txn.description);
            if !key.is_empty() {
                groups.entry(key).or_default().push(txn);
            }
        }

        let mut expenses: Vec<RecurringExpense> = groups
            .into_values()
            .filter_map(|group| self.to_recurring(group))
            .collect();

        expenses.sort_by(|a, b| {
            b.average_amount
                .partial_cmp(&a.average_amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_monthly = expenses.iter().map(|e| e.average_amount).sum();
        RecurringSummary {
            expenses,
            total_monthly,
        }
    }

    fn to_recurring(&self, mut group: Vec<&Transaction>) -> Option<RecurringExpense> {
        if group.len() < 2 {
            return None;
        }

        let count = group.len() as f64;
        let average = group.iter().map(|t| t.amount).sum::<f64>() / count;
        let max = group.iter().map(|t| t.amount).fold(f64::MIN, f64::max);
        let min = group.iter().map(|t| t.amount).fold(f64::MAX, f64::min);
        if (max - min) / average > MAX_SPREAD && group.len() < 3 {
            return None;
        }

        let description = group[0].description.clone();
        group.sort_by_key(|t| t.date);

        let gaps: Vec<i64> = group
            .windows(2)
            .map(|pair| (pair[1].date - pair[0].date).num_days())
            .collect();
        let mean_gap = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
        let frequency = Frequency::from_mean_gap(mean_gap);

        // Latest occurrence carries the most recent user recategorization
        let last = group.last()?;
        let last_date = last.date;
        let category = last.category;
        let next_due = last_date + Duration::days(frequency.interval_days());

        Some(RecurringExpense {
            category,
            description,
            average_amount: (average * 100.0).round() / 100.0,
            frequency,
            occurrences: group.len(),
            last_date,
            next_due,
            transaction_ids: group.iter().map(|t| t.id.clone()).collect(),
        })
    }
}

/// Lowercase, drop filler words and bare numbers, keep the first 30 chars.
pub fn normalize_description(description: &str) -> String {
    let joined = description
        .to_lowercase()
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w) && !w.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(KEY_LENGTH).collect()
}
