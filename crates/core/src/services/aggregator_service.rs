use chrono::Datelike;
use tracing::{debug, warn};

use crate::models::account::{Account, AccountKind};
use crate::models::reference::ReferenceDate;
use crate::models::report::{
    AggregationDiagnostics, AssetsLiabilities, BudgetStatus, BudgetSummary, DailyNetWorthPoint,
    DailySpending, MonthlyReport,
};
use crate::models::settings::Settings;
use crate::models::transaction::{Transaction, TransactionRecord};
use crate::services::classifier_service::KeywordClassifier;

/// Turns accounts and transactions into the monthly dashboard views.
///
/// Every call is a pure function of its inputs: nothing is cached between
/// passes, and the same inputs always produce the same report.
#[derive(Debug, Clone)]
pub struct MonthlyAggregator {
    budget_ratio: f64,
    default_budget_ceiling: f64,
    budget_period_days: u32,
}

impl MonthlyAggregator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            budget_ratio: settings.budget_ratio,
            default_budget_ceiling: settings.default_budget_ceiling,
            budget_period_days: settings.budget_period_days,
        }
    }

    /// Validate raw records, skip the malformed ones, then aggregate.
    /// Skipped records are counted in `diagnostics.skipped_records`.
    pub fn aggregate_records(
        &self,
        accounts: &[Account],
        records: &[TransactionRecord],
        classifier: &KeywordClassifier,
        reference: ReferenceDate,
    ) -> MonthlyReport {
        let (transactions, skipped) = validate_records(records, classifier);
        let mut report = self.aggregate(accounts, &transactions, reference);
        report.diagnostics.skipped_records = skipped;
        report
    }

    /// Build the budget summary, balance sheet and daily net-worth series.
    ///
    /// Only transactions in the reference month dated on or before the
    /// reference day take part; the rest are counted as out of period.
    /// With no accounts or no transactions in that window the budget is the
    /// zeroed `NoData` fallback.
    pub fn aggregate(
        &self,
        accounts: &[Account],
        transactions: &[Transaction],
        reference: ReferenceDate,
    ) -> MonthlyReport {
        let assets_liabilities = Self::assets_liabilities(accounts);

        let in_period: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| reference.contains(t.date))
            .collect();
        let out_of_period = transactions.len() - in_period.len();
        if out_of_period > 0 {
            debug!(out_of_period, %reference, "transactions outside the elapsed month excluded");
        }

        let today = reference.day();
        let (daily_income, daily_spending) = daily_totals(&in_period, today);

        let budget = if accounts.is_empty() || in_period.is_empty() {
            debug!(accounts = accounts.len(), %reference, "no usable data for the month");
            self.no_data_budget(&daily_spending)
        } else {
            self.budget_summary(&daily_income, &daily_spending, today)
        };

        let net_worth_series = net_worth_series(
            assets_liabilities.net_worth,
            budget.income,
            budget.spent_so_far,
            &daily_income,
            &daily_spending,
        );

        MonthlyReport {
            reference,
            budget,
            assets_liabilities,
            net_worth_series,
            diagnostics: AggregationDiagnostics {
                skipped_records: 0,
                out_of_period,
            },
        }
    }

    /// Sum balances by account kind. Credit balances count by magnitude.
    pub fn assets_liabilities(accounts: &[Account]) -> AssetsLiabilities {
        let mut checking = 0.0;
        let mut savings = 0.0;
        let mut credit_card_debt = 0.0;

        for account in accounts {
            if !account.balance.is_finite() {
                warn!(account = %account.id, "ignoring account with non-finite balance");
                continue;
            }
            match account.kind {
                AccountKind::Checking => checking += account.balance,
                AccountKind::Savings => savings += account.balance,
                AccountKind::Credit => credit_card_debt += account.balance.abs(),
            }
        }

        let total_assets = checking + savings;
        let total_liabilities = credit_card_debt;
        AssetsLiabilities {
            checking,
            savings,
            credit_card_debt,
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
        }
    }

    /// Ceiling for a month with the given income: a fixed share of income,
    /// or the configured default when nothing came in.
    pub fn budget_ceiling(&self, income: f64) -> f64 {
        if income > 0.0 {
            income * self.budget_ratio
        } else {
            self.default_budget_ceiling
        }
    }

    fn budget_summary(&self, daily_income: &[f64], daily_spending: &[f64], today: u32) -> BudgetSummary {
        let income: f64 = daily_income.iter().sum();
        let spent_so_far: f64 = daily_spending.iter().sum();
        let budget_ceiling = self.budget_ceiling(income);

        let avg_daily_spend = if today == 0 {
            0.0
        } else {
            spent_so_far / f64::from(today)
        };
        let days_left = self.budget_period_days.saturating_sub(today);
        let projected_total = spent_so_far + avg_daily_spend * f64::from(days_left);
        let remaining = budget_ceiling - projected_total;
        let status = if projected_total > budget_ceiling {
            BudgetStatus::Over
        } else {
            BudgetStatus::OnTrack
        };

        BudgetSummary {
            income,
            budget_ceiling,
            spent_so_far,
            avg_daily_spend,
            projected_total,
            remaining,
            daily_spending: daily_spending_entries(daily_spending),
            status,
        }
    }

    fn no_data_budget(&self, daily_spending: &[f64]) -> BudgetSummary {
        BudgetSummary {
            income: 0.0,
            budget_ceiling: self.default_budget_ceiling,
            spent_so_far: 0.0,
            avg_daily_spend: 0.0,
            projected_total: 0.0,
            remaining: self.default_budget_ceiling,
            daily_spending: daily_spending_entries(daily_spending),
            status: BudgetStatus::NoData,
        }
    }
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

/// Convert raw records into transactions, skipping malformed ones.
/// Returns the valid transactions and the number skipped.
pub fn validate_records(records: &[TransactionRecord], classifier: &KeywordClassifier) -> (Vec<Transaction>, usize) {
    let mut skipped = 0;
    let mut transactions = Vec::with_capacity(records.len());
    for record in records {
        match Transaction::from_record(record, classifier) {
            Ok(txn) => transactions.push(txn),
            Err(e) => {
                warn!(error = %e, "skipping malformed transaction");
                skipped += 1;
            }
        }
    }
    (transactions, skipped)
}

/// Per-day income and spending for days `1..=today`, index 0 is day 1.
fn daily_totals(transactions: &[&Transaction], today: u32) -> (Vec<f64>, Vec<f64>) {
    let mut income = vec![0.0; today as usize];
    let mut spending = vec![0.0; today as usize];

    for txn in transactions {
        let idx = (txn.date.day() - 1) as usize;
        // `ReferenceDate::contains` guarantees 1 <= day <= today
        let bucket = if txn.is_credit() { &mut income } else { &mut spending };
        if let Some(slot) = bucket.get_mut(idx) {
            *slot += txn.amount;
        }
    }

    (income, spending)
}

fn daily_spending_entries(daily_spending: &[f64]) -> Vec<DailySpending> {
    daily_spending
        .iter()
        .enumerate()
        .map(|(i, amount)| DailySpending {
            day: i as u32 + 1,
            amount: *amount,
        })
        .collect()
}

/// Reconstruct the month's net-worth trajectory.
///
/// Current balances are taken to already include this month's flows, so the
/// month-start value is `net_worth + spent - income`; each day then adds its
/// income and subtracts its spending. When balances were captured at another
/// instant the start value is off by the flows in between.
fn net_worth_series(
    net_worth: f64,
    income: f64,
    spent_so_far: f64,
    daily_income: &[f64],
    daily_spending: &[f64],
) -> Vec<DailyNetWorthPoint> {
    let mut running = net_worth + spent_so_far - income;

    daily_income
        .iter()
        .zip(daily_spending)
        .enumerate()
        .map(|(i, (day_income, day_spending))| {
            running += day_income - day_spending;
            DailyNetWorthPoint {
                day: i as u32 + 1,
                net_worth: running,
                income: *day_income,
                spending: *day_spending,
            }
        })
        .collect()
}
