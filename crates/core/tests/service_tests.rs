// ═══════════════════════════════════════════════════════════════════
// Service Tests: MonthlyAggregator, KeywordClassifier,
// NarrativeSummarizer, RecurringService
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use finance_dashboard_core::models::account::{Account, AccountKind};
use finance_dashboard_core::models::category::Category;
use finance_dashboard_core::models::recurring::Frequency;
use finance_dashboard_core::models::reference::ReferenceDate;
use finance_dashboard_core::models::report::BudgetStatus;
use finance_dashboard_core::models::settings::Settings;
use finance_dashboard_core::models::transaction::{Transaction, TransactionRecord};
use finance_dashboard_core::services::aggregator_service::{validate_records, MonthlyAggregator};
use finance_dashboard_core::services::classifier_service::{CategoryRule, KeywordClassifier};
use finance_dashboard_core::services::recurring_service::{normalize_description, RecurringService};
use finance_dashboard_core::services::summarizer_service::{
    format_money, top_discretionary_category, NarrativeInput, NarrativeSummarizer, SpendingTrend,
};
use finance_dashboard_core::sources::mock::MockSource;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn r(y: i32, m: u32, day: u32) -> ReferenceDate {
    ReferenceDate::new(y, m, day).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn scenario_accounts() -> Vec<Account> {
    vec![
        Account::new("chk", AccountKind::Checking, 3500.0),
        Account::new("sav", AccountKind::Savings, 15000.0),
        Account::new("cc", AccountKind::Credit, -2300.0),
    ]
}

fn scenario_transactions() -> Vec<Transaction> {
    vec![
        Transaction::debit("t1", d(2025, 6, 5), 100.0, "Starbucks Coffee"),
        Transaction::credit("t2", d(2025, 6, 1), 2600.0, "Payroll Deposit"),
    ]
}

// ═══════════════════════════════════════════════════════════════════
// MonthlyAggregator
// ═══════════════════════════════════════════════════════════════════

mod aggregator {
    use super::*;

    #[test]
    fn reference_scenario() {
        let agg = MonthlyAggregator::default();
        let report = agg.aggregate(&scenario_accounts(), &scenario_transactions(), r(2025, 6, 10));

        let al = &report.assets_liabilities;
        assert_eq!(al.checking, 3500.0);
        assert_eq!(al.savings, 15000.0);
        assert_eq!(al.credit_card_debt, 2300.0);
        assert_eq!(al.total_assets, 18500.0);
        assert_eq!(al.total_liabilities, 2300.0);
        assert_eq!(al.net_worth, 16200.0);

        let b = &report.budget;
        assert_eq!(b.income, 2600.0);
        assert_eq!(b.spent_so_far, 100.0);
        assert_close(b.budget_ceiling, 2210.0);
        assert_eq!(b.avg_daily_spend, 10.0);
        assert_eq!(b.projected_total, 300.0);
        assert_close(b.remaining, 1910.0);
        assert_eq!(b.status, BudgetStatus::OnTrack);

        assert_eq!(b.daily_spending.len(), 10);
        for entry in &b.daily_spending {
            let expected = if entry.day == 5 { 100.0 } else { 0.0 };
            assert_eq!(entry.amount, expected, "day {}", entry.day);
        }
        assert!(report.has_data());
    }

    #[test]
    fn net_worth_series_reconstructs_from_month_start() {
        let agg = MonthlyAggregator::default();
        let report = agg.aggregate(&scenario_accounts(), &scenario_transactions(), r(2025, 6, 10));
        let series = &report.net_worth_series;

        assert_eq!(series.len(), 10);
        // start = 16200 + 100 - 2600 = 13700; +2600 on day 1; -100 on day 5
        assert_eq!(series[0].net_worth, 16300.0);
        assert_eq!(series[0].income, 2600.0);
        assert_eq!(series[3].net_worth, 16300.0);
        assert_eq!(series[4].net_worth, 16200.0);
        assert_eq!(series[4].spending, 100.0);
        assert_eq!(series[9].net_worth, report.assets_liabilities.net_worth);
    }

    #[test]
    fn series_days_are_contiguous_from_one() {
        let agg = MonthlyAggregator::default();
        let report = agg.aggregate(&scenario_accounts(), &scenario_transactions(), r(2025, 6, 17));
        let spending_days: Vec<u32> = report.budget.daily_spending.iter().map(|e| e.day).collect();
        let worth_days: Vec<u32> = report.net_worth_series.iter().map(|p| p.day).collect();
        let expected: Vec<u32> = (1..=17).collect();
        assert_eq!(spending_days, expected);
        assert_eq!(worth_days, expected);
    }

    #[test]
    fn day_zero_has_finite_defined_values() {
        let agg = MonthlyAggregator::default();
        let report = agg.aggregate(&scenario_accounts(), &scenario_transactions(), r(2025, 6, 0));
        let b = &report.budget;
        assert_eq!(b.avg_daily_spend, 0.0);
        assert_eq!(b.projected_total, b.spent_so_far);
        assert!(b.remaining.is_finite());
        assert!(b.daily_spending.is_empty());
        assert!(report.net_worth_series.is_empty());
        assert_eq!(report.diagnostics.out_of_period, 2);
    }

    #[test]
    fn no_transactions_flags_no_data() {
        let agg = MonthlyAggregator::default();
        let report = agg.aggregate(&scenario_accounts(), &[], r(2025, 6, 10));
        let b = &report.budget;
        assert_eq!(b.status, BudgetStatus::NoData);
        assert!(!report.has_data());
        assert_eq!(b.income, 0.0);
        assert_eq!(b.spent_so_far, 0.0);
        assert_eq!(b.projected_total, 0.0);
        assert_eq!(b.budget_ceiling, 3000.0);
        assert_eq!(b.remaining, 3000.0);
        assert_eq!(b.daily_spending.len(), 10);
        assert!(b.daily_spending.iter().all(|e| e.amount == 0.0));
        assert!(report.net_worth_series.iter().all(|p| p.net_worth == 16200.0));
    }

    #[test]
    fn no_accounts_and_no_transactions_is_all_zero() {
        let agg = MonthlyAggregator::default();
        let report = agg.aggregate(&[], &[], r(2025, 6, 3));
        assert_eq!(report.assets_liabilities.net_worth, 0.0);
        assert_eq!(report.budget.status, BudgetStatus::NoData);
        assert!(report.net_worth_series.iter().all(|p| p.net_worth == 0.0));
    }

    #[test]
    fn only_other_months_flags_no_data() {
        let agg = MonthlyAggregator::default();
        let accounts = vec![Account::new("chk", AccountKind::Checking, 100.0)];
        let txns = vec![Transaction::debit("may", d(2025, 5, 20), 500.0, "Target")];
        let report = agg.aggregate(&accounts, &txns, r(2025, 6, 10));
        assert_eq!(report.budget.status, BudgetStatus::NoData);
        assert_eq!(report.budget.remaining, 3000.0);
        assert_eq!(report.diagnostics.out_of_period, 1);
        assert_eq!(report.assets_liabilities.net_worth, 100.0);
    }

    #[test]
    fn future_dated_entries_alone_flag_no_data() {
        let agg = MonthlyAggregator::default();
        let txns = vec![Transaction::debit("later", d(2025, 6, 20), 40.0, "Target")];
        let report = agg.aggregate(&scenario_accounts(), &txns, r(2025, 6, 10));
        assert_eq!(report.budget.status, BudgetStatus::NoData);
        assert_eq!(report.budget.daily_spending.len(), 10);
    }

    #[test]
    fn no_accounts_flags_no_data() {
        let agg = MonthlyAggregator::default();
        let txns = vec![Transaction::debit("t", d(2025, 6, 2), 50.0, "Uber")];
        let report = agg.aggregate(&[], &txns, r(2025, 6, 10));
        assert_eq!(report.budget.status, BudgetStatus::NoData);
        assert_eq!(report.budget.spent_so_far, 0.0);
        assert_eq!(report.budget.budget_ceiling, 3000.0);
        assert_eq!(report.assets_liabilities.net_worth, 0.0);
        assert!(report.net_worth_series.iter().all(|p| p.net_worth == 0.0));
    }

    #[test]
    fn no_income_uses_default_ceiling() {
        let agg = MonthlyAggregator::new(&Settings {
            default_budget_ceiling: 1200.0,
            ..Settings::default()
        });
        let txns = vec![Transaction::debit("t1", d(2025, 6, 2), 50.0, "Uber")];
        let report = agg.aggregate(&scenario_accounts(), &txns, r(2025, 6, 10));
        assert_eq!(report.budget.budget_ceiling, 1200.0);
        assert_eq!(agg.budget_ceiling(0.0), 1200.0);
    }

    #[test]
    fn over_budget_when_projection_exceeds_ceiling() {
        let agg = MonthlyAggregator::default();
        let txns = vec![
            Transaction::credit("inc", d(2025, 6, 1), 1000.0, "Payroll"),
            Transaction::debit("big", d(2025, 6, 8), 600.0, "Apple Store"),
        ];
        let report = agg.aggregate(&scenario_accounts(), &txns, r(2025, 6, 10));
        // avg 60/day, 20 days left: 600 + 1200
        assert_eq!(report.budget.projected_total, 1800.0);
        assert_close(report.budget.budget_ceiling, 850.0);
        assert_eq!(report.budget.status, BudgetStatus::Over);
        assert!(report.budget.remaining < 0.0);
    }

    #[test]
    fn days_left_clamped_on_day_thirty_one() {
        let agg = MonthlyAggregator::default();
        let txns = vec![Transaction::debit("t", d(2025, 7, 31), 310.0, "Target")];
        let report = agg.aggregate(&scenario_accounts(), &txns, r(2025, 7, 31));
        assert_eq!(report.budget.avg_daily_spend, 10.0);
        assert_eq!(report.budget.projected_total, 310.0);
        assert_eq!(report.budget.daily_spending.len(), 31);
    }

    #[test]
    fn other_months_and_future_days_are_excluded() {
        let agg = MonthlyAggregator::default();
        let txns = vec![
            Transaction::debit("may", d(2025, 5, 20), 500.0, "Target"),
            Transaction::debit("last_year", d(2024, 6, 3), 70.0, "Target"),
            Transaction::debit("future", d(2025, 6, 25), 40.0, "Target"),
            Transaction::debit("now", d(2025, 6, 3), 25.0, "Target"),
        ];
        let report = agg.aggregate(&scenario_accounts(), &txns, r(2025, 6, 10));
        assert_eq!(report.budget.spent_so_far, 25.0);
        assert_eq!(report.diagnostics.out_of_period, 3);
    }

    #[test]
    fn credit_balance_counts_by_magnitude_either_sign() {
        let accounts = vec![
            Account::new("a", AccountKind::Credit, -100.0),
            Account::new("b", AccountKind::Credit, 50.0),
            Account::new("c", AccountKind::Checking, 1000.0),
        ];
        let al = MonthlyAggregator::assets_liabilities(&accounts);
        assert_eq!(al.total_liabilities, 150.0);
        assert_eq!(al.net_worth, 850.0);
    }

    #[test]
    fn non_finite_balance_ignored() {
        let accounts = vec![
            Account::new("a", AccountKind::Savings, f64::NAN),
            Account::new("b", AccountKind::Checking, 10.0),
        ];
        let al = MonthlyAggregator::assets_liabilities(&accounts);
        assert_eq!(al.total_assets, 10.0);
    }

    #[test]
    fn malformed_records_skipped_and_counted() {
        let agg = MonthlyAggregator::default();
        let classifier = KeywordClassifier::new();
        let mut records: Vec<TransactionRecord> = scenario_transactions().iter().map(TransactionRecord::from).collect();

        let mut no_date = records[0].clone();
        no_date.id = "no_date".into();
        no_date.date = None;
        let mut bad_amount = records[0].clone();
        bad_amount.id = "bad_amount".into();
        bad_amount.amount = serde_json::json!("twelve");
        let mut bad_direction = records[0].clone();
        bad_direction.id = "bad_direction".into();
        bad_direction.direction = Some("sideways".into());
        records.extend([no_date, bad_amount, bad_direction]);

        let report = agg.aggregate_records(&scenario_accounts(), &records, &classifier, r(2025, 6, 10));
        assert_eq!(report.diagnostics.skipped_records, 3);
        assert_eq!(report.budget.spent_so_far, 100.0);
        assert_eq!(report.budget.income, 2600.0);
    }

    #[test]
    fn validate_records_splits_valid_from_malformed() {
        let mut records: Vec<TransactionRecord> = scenario_transactions().iter().map(TransactionRecord::from).collect();
        let mut broken = records[0].clone();
        broken.id = "broken".into();
        broken.amount = serde_json::Value::Null;
        records.push(broken);

        let (valid, skipped) = validate_records(&records, &KeywordClassifier::new());
        assert_eq!(skipped, 1);
        let ids: Vec<&str> = valid.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn only_malformed_records_is_no_data() {
        let agg = MonthlyAggregator::default();
        let records = vec![TransactionRecord {
            id: "x".into(),
            account_id: String::new(),
            date: None,
            amount: serde_json::Value::Null,
            direction: None,
            description: String::new(),
            category: None,
            is_fixed: false,
        }];
        let report = agg.aggregate_records(&scenario_accounts(), &records, &KeywordClassifier::new(), r(2025, 6, 10));
        assert_eq!(report.diagnostics.skipped_records, 1);
        assert_eq!(report.budget.status, BudgetStatus::NoData);
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let agg = MonthlyAggregator::default();
        let a = agg.aggregate(&scenario_accounts(), &scenario_transactions(), r(2025, 6, 10));
        let b = agg.aggregate(&scenario_accounts(), &scenario_transactions(), r(2025, 6, 10));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn invariants_hold_on_generated_month() {
        let agg = MonthlyAggregator::default();
        let classifier = KeywordClassifier::new();
        let source = MockSource::new();
        let accounts = vec![
            Account::new("chk", AccountKind::Checking, 4321.09),
            Account::new("sav", AccountKind::Savings, 987.65),
            Account::new("cc", AccountKind::Credit, -1234.56),
        ];

        for today in [1, 7, 15, 20, 30] {
            let records = source.generate(d(2025, 5, 15), d(2025, 6, today));
            let report = agg.aggregate_records(&accounts, &records, &classifier, r(2025, 6, today));

            let al = &report.assets_liabilities;
            assert_eq!(al.total_assets - al.total_liabilities, al.net_worth);

            let daily_sum: f64 = report.budget.daily_spending.iter().map(|e| e.amount).sum();
            assert_eq!(daily_sum, report.budget.spent_so_far);
            assert_eq!(report.budget.daily_spending.len(), today as usize);
            assert_eq!(report.net_worth_series.len(), today as usize);
            assert_close(report.net_worth_series.last().unwrap().net_worth, al.net_worth);
            assert_eq!(report.diagnostics.skipped_records, 0);
        }
    }

    #[test]
    fn report_serializes_camel_case_contract() {
        let agg = MonthlyAggregator::default();
        let report = agg.aggregate(&scenario_accounts(), &scenario_transactions(), r(2025, 6, 10));
        let json = serde_json::to_value(&report).unwrap();
        for key in ["income", "budgetCeiling", "spentSoFar", "projectedTotal", "remaining", "dailySpending", "status"] {
            assert!(json["budget"].get(key).is_some(), "missing budget.{key}");
        }
        for key in ["checking", "savings", "creditCardDebt", "totalAssets", "totalLiabilities"] {
            assert!(json["assetsLiabilities"].get(key).is_some(), "missing assetsLiabilities.{key}");
        }
        assert_eq!(json["budget"]["status"], "on-track");
        assert_eq!(json["netWorthSeries"][0]["netWorth"], 16300.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// KeywordClassifier
// ═══════════════════════════════════════════════════════════════════

mod classifier {
    use super::*;

    #[test]
    fn reference_examples() {
        let c = KeywordClassifier::new();
        assert_eq!(c.classify("Starbucks Coffee Run"), Category::Food);
        assert_eq!(c.classify("Whole Foods Market"), Category::Groceries);
        assert_eq!(c.classify("Random Store XYZ"), Category::Shopping);
        assert_eq!(c.classify("Totally Unknown Vendor"), Category::Other);
    }

    #[test]
    fn case_insensitive() {
        let c = KeywordClassifier::new();
        assert_eq!(c.classify("NETFLIX.COM"), Category::Entertainment);
        assert_eq!(c.classify("uBeR *trip"), Category::Transportation);
    }

    #[test]
    fn income_and_transport() {
        let c = KeywordClassifier::new();
        assert_eq!(c.classify("Payroll Deposit"), Category::Income);
        assert_eq!(c.classify("Direct Deposit - Employer"), Category::Income);
        assert_eq!(c.classify("Shell Gas Station"), Category::Transportation);
    }

    #[test]
    fn demo_merchants_classify_sensibly() {
        let c = KeywordClassifier::new();
        assert_eq!(c.classify("Trader Joes"), Category::Groceries);
        assert_eq!(c.classify("McDonalds"), Category::Food);
        assert_eq!(c.classify("Home Depot"), Category::Shopping);
        assert_eq!(c.classify("Planet Fitness"), Category::Entertainment);
        assert_eq!(c.classify("Amazon.com"), Category::Shopping);
    }

    #[test]
    fn empty_description_is_other() {
        assert_eq!(KeywordClassifier::new().classify(""), Category::Other);
    }

    #[test]
    fn first_matching_rule_wins() {
        let c = KeywordClassifier::with_rules(vec![
            CategoryRule::new(Category::Entertainment, &["store"]),
            CategoryRule::new(Category::Shopping, &["store"]),
        ]);
        assert_eq!(c.classify("Game Store"), Category::Entertainment);
    }

    #[test]
    fn custom_rules_lowercase_keywords() {
        let c = KeywordClassifier::with_rules(vec![CategoryRule::new(Category::Food, &["BAKERY"])]);
        assert_eq!(c.rules()[0].keywords, vec!["bakery".to_string()]);
        assert_eq!(c.classify("Corner Bakery"), Category::Food);
        assert_eq!(c.classify("Amazon"), Category::Other);
    }
}

// ═══════════════════════════════════════════════════════════════════
// NarrativeSummarizer
// ═══════════════════════════════════════════════════════════════════

mod summarizer {
    use super::*;

    fn month() -> Vec<Transaction> {
        vec![
            Transaction::debit("m", d(2025, 6, 1), 1650.0, "Mortgage Payment").fixed(),
            Transaction::debit("s", d(2025, 6, 2), 12.0, "Starbucks Coffee"),
            Transaction::debit("c", d(2025, 6, 3), 15.0, "Chipotle"),
            Transaction::debit("a", d(2025, 6, 4), 20.0, "Amazon.com"),
            Transaction::credit("p", d(2025, 6, 1), 2500.0, "Payroll Deposit"),
        ]
    }

    fn input(spent: f64, ceiling: f64, remaining: f64, txns: &[Transaction]) -> NarrativeInput<'_> {
        NarrativeInput {
            spent_so_far: spent,
            budget_ceiling: ceiling,
            net_worth: 16200.0,
            remaining,
            transactions: txns,
        }
    }

    #[test]
    fn trend_bands() {
        assert_eq!(SpendingTrend::from_ratio(100.0, 2000.0), SpendingTrend::UnderControl);
        assert_eq!(SpendingTrend::from_ratio(1000.0, 2000.0), SpendingTrend::OnTrack);
        assert_eq!(SpendingTrend::from_ratio(1600.0, 2000.0), SpendingTrend::OnTrack);
        assert_eq!(SpendingTrend::from_ratio(1700.0, 2000.0), SpendingTrend::RunningHigh);
    }

    #[test]
    fn zero_ceiling_does_not_divide() {
        assert_eq!(SpendingTrend::from_ratio(0.0, 0.0), SpendingTrend::UnderControl);
        assert_eq!(SpendingTrend::from_ratio(5.0, 0.0), SpendingTrend::RunningHigh);
    }

    #[test]
    fn top_category_skips_fixed_and_credits() {
        let top = top_discretionary_category(&month()).unwrap();
        assert_eq!(top.0, Category::Food);
        assert_eq!(top.1, 27.0);
    }

    #[test]
    fn top_category_none_without_discretionary_debits() {
        let txns = vec![
            Transaction::debit("m", d(2025, 6, 1), 1650.0, "Mortgage Payment").fixed(),
            Transaction::credit("p", d(2025, 6, 1), 2500.0, "Payroll Deposit"),
        ];
        assert_eq!(top_discretionary_category(&txns), None);
    }

    #[test]
    fn tie_goes_to_first_declared_category() {
        let txns = vec![
            Transaction::debit("a", d(2025, 6, 1), 20.0, "Amazon.com"),
            Transaction::debit("b", d(2025, 6, 1), 20.0, "Starbucks"),
        ];
        assert_eq!(top_discretionary_category(&txns).unwrap().0, Category::Food);
    }

    #[test]
    fn under_budget_sentence() {
        let txns = month();
        let n = NarrativeSummarizer::new().summarize(&input(100.0, 2210.0, 1910.0, &txns));
        assert_eq!(n.trend, SpendingTrend::UnderControl);
        assert_eq!(n.top_category, Some(Category::Food));
        assert_eq!(
            n.text,
            "Your spending is under control at $100.00 of your $2,210.00 budget. \
             Your top spending category is Food at $27.00. \
             You have $1,910.00 left in your budget this month. \
             Your net worth stands at $16,200.00."
        );
        assert_eq!(n.to_string(), n.text);
    }

    #[test]
    fn over_budget_sentence() {
        let txns = month();
        let n = NarrativeSummarizer::new().summarize(&input(1900.0, 2000.0, -250.0, &txns));
        assert_eq!(n.trend, SpendingTrend::RunningHigh);
        assert!(n.text.contains("running high"));
        assert!(n.text.contains("You are projected to go over budget by $250.00."));
    }

    #[test]
    fn no_discretionary_spending_sentence() {
        let n = NarrativeSummarizer::new().summarize(&input(0.0, 3000.0, 3000.0, &[]));
        assert_eq!(n.top_category, None);
        assert_eq!(n.top_category_amount, 0.0);
        assert!(n.text.contains("No discretionary spending recorded yet."));
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-42.1), "-$42.10");
        assert_eq!(format_money(999.999), "$1,000.00");
    }
}

// ═══════════════════════════════════════════════════════════════════
// RecurringService
// ═══════════════════════════════════════════════════════════════════

mod recurring {
    use super::*;

    #[test]
    fn normalization_drops_filler_and_numbers() {
        assert_eq!(normalize_description("The Electric Bill 2024 at Home"), "electric home");
        assert_eq!(normalize_description("AUTO PAYMENT"), "");
        assert_eq!(normalize_description(&"x".repeat(50)).len(), 30);
    }

    #[test]
    fn detects_monthly_and_similar_amount_pairs() {
        let txns = vec![
            Transaction::debit("n1", d(2025, 4, 7), 15.99, "Netflix"),
            Transaction::debit("n2", d(2025, 5, 7), 15.99, "Netflix"),
            Transaction::debit("n3", d(2025, 6, 7), 15.99, "Netflix"),
            Transaction::debit("e1", d(2025, 5, 12), 145.30, "Electric Bill"),
            Transaction::debit("e2", d(2025, 6, 11), 119.70, "Electric bill"),
            Transaction::debit("x1", d(2025, 6, 1), 50.0, "Apple Store"),
            Transaction::debit("x2", d(2025, 6, 9), 500.0, "Apple Store"),
            Transaction::credit("p1", d(2025, 5, 1), 2500.0, "Payroll"),
            Transaction::credit("p2", d(2025, 6, 1), 2500.0, "Payroll"),
        ];
        let summary = RecurringService::new().detect(&txns);

        assert_eq!(summary.expenses.len(), 2);
        let electric = &summary.expenses[0];
        assert_eq!(electric.description, "Electric Bill");
        assert_eq!(electric.average_amount, 132.5);
        assert_eq!(electric.occurrences, 2);
        assert_eq!(electric.frequency, Frequency::Monthly);

        let netflix = &summary.expenses[1];
        assert_eq!(netflix.frequency, Frequency::Monthly);
        assert_eq!(netflix.last_date, d(2025, 6, 7));
        assert_eq!(netflix.next_due, d(2025, 7, 7));
        assert_eq!(netflix.category, Category::Entertainment);
        assert_eq!(netflix.transaction_ids, vec!["n1", "n2", "n3"]);

        assert_close(summary.total_monthly, 148.49);
    }

    #[test]
    fn three_occurrences_recur_despite_spread() {
        let txns = vec![
            Transaction::debit("u1", d(2025, 6, 1), 8.0, "Uber"),
            Transaction::debit("u2", d(2025, 6, 8), 35.0, "Uber"),
            Transaction::debit("u3", d(2025, 6, 15), 12.0, "Uber"),
        ];
        let summary = RecurringService::new().detect(&txns);
        assert_eq!(summary.expenses.len(), 1);
        assert_eq!(summary.expenses[0].frequency, Frequency::Weekly);
        assert_eq!(summary.expenses[0].next_due, d(2025, 6, 22));
    }

    #[test]
    fn category_follows_transactions_not_description() {
        let txns = vec![
            Transaction::debit("g1", d(2025, 5, 3), 45.0, "Planet Fitness").with_category(Category::Other),
            Transaction::debit("g2", d(2025, 6, 3), 45.0, "Planet Fitness").with_category(Category::Shopping),
        ];
        let summary = RecurringService::new().detect(&txns);
        assert_eq!(summary.expenses.len(), 1);
        assert_eq!(summary.expenses[0].category, Category::Shopping);
    }

    #[test]
    fn single_occurrences_ignored() {
        let txns = vec![Transaction::debit("a", d(2025, 6, 1), 10.0, "Chipotle")];
        let summary = RecurringService::new().detect(&txns);
        assert!(summary.expenses.is_empty());
        assert_eq!(summary.total_monthly, 0.0);
    }
}
