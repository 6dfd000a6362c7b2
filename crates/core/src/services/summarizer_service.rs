use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::category::Category;
use crate::models::report::MonthlyReport;
use crate::models::transaction::Transaction;

/// Spend-to-ceiling band used in the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpendingTrend {
    /// Below 50% of the ceiling
    UnderControl,
    /// Between 50% and 80%
    OnTrack,
    /// Above 80%
    RunningHigh,
}

impl SpendingTrend {
    pub fn from_ratio(spent: f64, ceiling: f64) -> Self {
        if ceiling <= 0.0 {
            return if spent > 0.0 {
                SpendingTrend::RunningHigh
            } else {
                SpendingTrend::UnderControl
            };
        }
        let ratio = spent / ceiling;
        if ratio < 0.5 {
            SpendingTrend::UnderControl
        } else if ratio > 0.8 {
            SpendingTrend::RunningHigh
        } else {
            SpendingTrend::OnTrack
        }
    }
}

impl std::fmt::Display for SpendingTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpendingTrend::UnderControl => write!(f, "under control"),
            SpendingTrend::OnTrack => write!(f, "on track"),
            SpendingTrend::RunningHigh => write!(f, "running high"),
        }
    }
}

/// Figures the narrative is built from.
#[derive(Debug, Clone)]
pub struct NarrativeInput<'a> {
    pub spent_so_far: f64,
    pub budget_ceiling: f64,
    pub net_worth: f64,
    pub remaining: f64,
    pub transactions: &'a [Transaction],
}

impl<'a> NarrativeInput<'a> {
    pub fn from_report(report: &MonthlyReport, transactions: &'a [Transaction]) -> Self {
        Self {
            spent_so_far: report.budget.spent_so_far,
            budget_ceiling: report.budget.budget_ceiling,
            net_worth: report.assets_liabilities.net_worth,
            remaining: report.budget.remaining,
            transactions,
        }
    }
}

/// Generated summary with the facts it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub trend: SpendingTrend,
    pub top_category: Option<Category>,
    pub top_category_amount: f64,
    pub text: String,
}

impl std::fmt::Display for Narrative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Template-based spending summary, the offline stand-in for AI advice.
#[derive(Debug, Clone, Default)]
pub struct NarrativeSummarizer;

impl NarrativeSummarizer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, input: &NarrativeInput<'_>) -> Narrative {
        let trend = SpendingTrend::from_ratio(input.spent_so_far, input.budget_ceiling);
        let top = top_discretionary_category(input.transactions);

        let mut text = format!(
            "Your spending is {trend} at {} of your {} budget.",
            format_money(input.spent_so_far),
            format_money(input.budget_ceiling),
        );

        match top {
            Some((category, amount)) => text.push_str(&format!(
                " Your top spending category is {category} at {}.",
                format_money(amount)
            )),
            None => text.push_str(" No discretionary spending recorded yet."),
        }

        if input.remaining >= 0.0 {
            text.push_str(&format!(
                " You have {} left in your budget this month.",
                format_money(input.remaining)
            ));
        } else {
            text.push_str(&format!(
                " You are projected to go over budget by {}.",
                format_money(-input.remaining)
            ));
        }

        text.push_str(&format!(" Your net worth stands at {}.", format_money(input.net_worth)));

        Narrative {
            trend,
            top_category: top.map(|(c, _)| c),
            top_category_amount: top.map(|(_, a)| a).unwrap_or(0.0),
            text,
        }
    }
}

/// Category with the largest debit total, fixed charges excluded.
/// Ties go to the category declared first.
pub fn top_discretionary_category(transactions: &[Transaction]) -> Option<(Category, f64)> {
    let mut totals: HashMap<Category, f64> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_debit() && !t.is_fixed) {
        *totals.entry(txn.category).or_insert(0.0) += txn.amount;
    }

    Category::ALL
        .iter()
        .filter_map(|c| totals.get(c).map(|amount| (*c, *amount)))
        .filter(|(_, amount)| *amount > 0.0)
        .fold(None, |best: Option<(Category, f64)>, (c, amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((c, amount)),
        })
}

/// `$1,234.56` style, with a leading minus for negatives.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
