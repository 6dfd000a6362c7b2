use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::snapshot::SourceSnapshot;
use crate::sources::registry::SourceRegistry;
use crate::sources::traits::TransactionSource;

/// Pulls accounts and transactions from the registered sources with fallback.
///
/// Sources are tried in registration order:
/// - A source that errors is logged and skipped.
/// - A source returning fewer than `min_records` records is remembered as a
///   fallback result, but the next source is still tried.
pub struct SourceService {
    registry: SourceRegistry,
    history_days: u32,
    min_records: usize,
}

impl SourceService {
    pub fn new(registry: SourceRegistry, history_days: u32, min_records: usize) -> Self {
        Self {
            registry,
            history_days,
            min_records,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Fetch the `history_days` window ending at `until`.
    pub async fn fetch(&self, until: NaiveDate) -> Result<SourceSnapshot, CoreError> {
        let since = until
            .checked_sub_signed(Duration::days(i64::from(self.history_days)))
            .ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "history of {} days before {until} is out of the supported date range",
                    self.history_days
                ))
            })?;
        let sources = self.registry.sources();
        if sources.is_empty() {
            return Err(CoreError::NoSource);
        }

        let mut thin: Option<SourceSnapshot> = None;
        let mut last_error = None;

        for source in sources {
            match fetch_from(source, since, until).await {
                Ok(snapshot) if snapshot.records.len() >= self.min_records => {
                    info!(
                        source = %snapshot.source,
                        accounts = snapshot.accounts.len(),
                        records = snapshot.records.len(),
                        "fetched snapshot"
                    );
                    return Ok(snapshot);
                }
                Ok(snapshot) => {
                    warn!(
                        source = %snapshot.source,
                        records = snapshot.records.len(),
                        min = self.min_records,
                        "source returned too little data, trying next"
                    );
                    if thin.is_none() {
                        thin = Some(snapshot);
                    }
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "source failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        if let Some(snapshot) = thin {
            return Ok(snapshot);
        }
        Err(last_error.unwrap_or(CoreError::NoSource))
    }
}

async fn fetch_from(
    source: &dyn TransactionSource,
    since: NaiveDate,
    until: NaiveDate,
) -> Result<SourceSnapshot, CoreError> {
    let accounts = source.fetch_accounts().await?;
    let records = source.fetch_transactions(&accounts, since, until).await?;
    Ok(SourceSnapshot {
        source: source.name().to_string(),
        fetched_through: until,
        accounts,
        records,
    })
}
