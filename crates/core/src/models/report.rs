use serde::{Deserialize, Serialize};

use super::reference::ReferenceDate;

/// Budget outcome marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    /// Projected spending stays within the ceiling
    OnTrack,
    /// Projected spending exceeds the ceiling
    Over,
    /// No usable transactions; every figure is a zeroed fallback
    NoData,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetStatus::OnTrack => write!(f, "on-track"),
            BudgetStatus::Over => write!(f, "over"),
            BudgetStatus::NoData => write!(f, "no-data"),
        }
    }
}

/// Total debit amount on one day of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpending {
    /// Day of month, starting at 1
    pub day: u32,
    pub amount: f64,
}

/// Budget view of the current calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Sum of this month's credits
    pub income: f64,

    /// Spending limit for the month
    pub budget_ceiling: f64,

    /// Sum of this month's debits
    pub spent_so_far: f64,

    /// `spent_so_far / today`, 0 on day 0
    pub avg_daily_spend: f64,

    /// Month-end spending extrapolated from the daily average
    pub projected_total: f64,

    /// `budget_ceiling - projected_total`; negative when over
    pub remaining: f64,

    /// One entry per elapsed day, zero-filled
    pub daily_spending: Vec<DailySpending>,

    pub status: BudgetStatus,
}

/// Balance sheet snapshot built from account balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsLiabilities {
    pub checking: f64,
    pub savings: f64,
    pub credit_card_debt: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,

    /// Always `total_assets - total_liabilities`
    pub net_worth: f64,
}

/// Net worth at the end of one day, with that day's flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNetWorthPoint {
    pub day: u32,
    pub net_worth: f64,
    pub income: f64,
    pub spending: f64,
}

/// Counters for records that were left out of an aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationDiagnostics {
    /// Records rejected as malformed
    pub skipped_records: usize,

    /// Valid transactions outside the elapsed part of the reference month
    pub out_of_period: usize,
}

/// Everything one aggregation pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub reference: ReferenceDate,
    pub budget: BudgetSummary,
    pub assets_liabilities: AssetsLiabilities,
    pub net_worth_series: Vec<DailyNetWorthPoint>,
    pub diagnostics: AggregationDiagnostics,
}

impl MonthlyReport {
    /// `false` when the report is the no-data fallback.
    pub fn has_data(&self) -> bool {
        self.budget.status != BudgetStatus::NoData
    }
}
