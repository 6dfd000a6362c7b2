pub mod errors;
pub mod models;
pub mod services;
pub mod sources;

use chrono::NaiveDate;
use tracing::debug;

use errors::CoreError;
use models::{
    account::Account,
    category::Category,
    edit::{TransactionEdit, TransactionOverlay},
    recurring::RecurringSummary,
    reference::ReferenceDate,
    report::MonthlyReport,
    settings::Settings,
    snapshot::SourceSnapshot,
    transaction::Transaction,
};
use services::{
    aggregator_service::{validate_records, MonthlyAggregator},
    classifier_service::KeywordClassifier,
    recurring_service::RecurringService,
    source_service::SourceService,
    summarizer_service::{Narrative, NarrativeInput, NarrativeSummarizer},
};
use sources::registry::SourceRegistry;

/// Main entry point for the dashboard core.
/// Holds the last fetched snapshot, the user's in-memory edits and all
/// services needed to derive the dashboard views from them.
#[must_use]
pub struct FinanceDashboard {
    settings: Settings,
    source_service: SourceService,
    aggregator: MonthlyAggregator,
    classifier: KeywordClassifier,
    summarizer: NarrativeSummarizer,
    recurring_service: RecurringService,
    overlay: TransactionOverlay,
    snapshot: Option<SourceSnapshot>,
}

impl std::fmt::Debug for FinanceDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceDashboard")
            .field("sources", &self.source_service.registry().names())
            .field("snapshot_source", &self.snapshot.as_ref().map(|s| s.source.as_str()))
            .field("records", &self.snapshot.as_ref().map_or(0, |s| s.records.len()))
            .field("edits", &self.overlay.len())
            .finish()
    }
}

impl FinanceDashboard {
    /// Dashboard with the default sources for `settings`
    /// (banking API when configured, offline generator always).
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let registry = SourceRegistry::new_with_defaults(&settings);
        Self::with_registry(settings, registry)
    }

    /// Dashboard reading from a caller-built registry.
    pub fn with_registry(settings: Settings, registry: SourceRegistry) -> Result<Self, CoreError> {
        settings.validate()?;
        let source_service = SourceService::new(registry, settings.history_days, settings.min_live_transactions);
        Ok(Self {
            aggregator: MonthlyAggregator::new(&settings),
            classifier: KeywordClassifier::new(),
            summarizer: NarrativeSummarizer::new(),
            recurring_service: RecurringService::new(),
            overlay: TransactionOverlay::new(),
            snapshot: None,
            source_service,
            settings,
        })
    }

    // ── Data Loading ────────────────────────────────────────────────

    /// Fetch a fresh snapshot ending at `today`, falling back through the
    /// registered sources. The previous snapshot is kept if every source fails.
    pub async fn refresh(&mut self, today: NaiveDate) -> Result<&SourceSnapshot, CoreError> {
        let snapshot = self.source_service.fetch(today).await?;
        Ok(&*self.snapshot.insert(snapshot))
    }

    /// Use an already-fetched snapshot instead of calling the sources.
    pub fn load_snapshot(&mut self, snapshot: SourceSnapshot) {
        self.snapshot = Some(snapshot);
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&SourceSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        self.snapshot.as_ref().map(|s| s.accounts.as_slice()).unwrap_or(&[])
    }

    /// Valid transactions with edits applied, newest first.
    /// Malformed records and deleted transactions are left out.
    #[must_use]
    pub fn transactions(&self) -> Vec<Transaction> {
        let (mut transactions, _) = self.ledger();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        transactions
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Budget, balance sheet and net-worth series for the month of `reference`.
    /// Without a snapshot this is the no-data report.
    #[must_use]
    pub fn monthly_report(&self, reference: ReferenceDate) -> MonthlyReport {
        let (transactions, skipped) = self.ledger();
        let mut report = self.aggregator.aggregate(self.accounts(), &transactions, reference);
        report.diagnostics.skipped_records = skipped;
        report
    }

    /// Templated summary of the month so far.
    #[must_use]
    pub fn narrative(&self, reference: ReferenceDate) -> Narrative {
        let report = self.monthly_report(reference);
        let (transactions, _) = self.ledger();
        let current: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| reference.contains(t.date))
            .collect();
        self.summarizer.summarize(&NarrativeInput::from_report(&report, &current))
    }

    /// Recurring charges detected across the whole snapshot.
    #[must_use]
    pub fn recurring_expenses(&self) -> RecurringSummary {
        let (transactions, _) = self.ledger();
        self.recurring_service.detect(&transactions)
    }

    /// The closed category set, for pickers.
    #[must_use]
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// The monthly report as pretty JSON (camelCase fields).
    pub fn export_report_json(&self, reference: ReferenceDate) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.monthly_report(reference))
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize monthly report: {e}")))
    }

    // ── Edits ───────────────────────────────────────────────────────

    /// Apply a user edit to a transaction in the current snapshot.
    pub fn update_transaction(&mut self, transaction_id: &str, edit: TransactionEdit) -> Result<(), CoreError> {
        self.ensure_known(transaction_id)?;
        self.overlay.record(transaction_id, edit);
        Ok(())
    }

    /// Hide a transaction from every view.
    pub fn delete_transaction(&mut self, transaction_id: &str) -> Result<(), CoreError> {
        self.ensure_known(transaction_id)?;
        self.overlay.delete(transaction_id);
        Ok(())
    }

    #[must_use]
    pub fn edits(&self) -> &TransactionOverlay {
        &self.overlay
    }

    /// Drop every edit.
    pub fn clear_edits(&mut self) {
        self.overlay.clear();
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn source_names(&self) -> Vec<String> {
        self.source_service.registry().names()
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Validated transactions with edits applied, plus the malformed count.
    fn ledger(&self) -> (Vec<Transaction>, usize) {
        let Some(snapshot) = &self.snapshot else {
            return (Vec::new(), 0);
        };

        let (transactions, skipped) = validate_records(&snapshot.records, &self.classifier);
        if skipped > 0 {
            debug!(skipped, source = %snapshot.source, "malformed records skipped");
        }

        (self.overlay.apply(transactions), skipped)
    }

    fn ensure_known(&self, transaction_id: &str) -> Result<(), CoreError> {
        let known = self
            .snapshot
            .as_ref()
            .is_some_and(|s| s.records.iter().any(|r| r.id == transaction_id));
        if known {
            Ok(())
        } else {
            Err(CoreError::TransactionNotFound(transaction_id.to_string()))
        }
    }
}
