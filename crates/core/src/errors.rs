use thiserror::Error;

/// Unified error type for the entire finance-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Aggregation never fails on bad data: malformed records are skipped
/// and counted, so these variants surface from sources, config and edits.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Sources / Network ───────────────────────────────────────────
    #[error("API error ({source_name}): {message}")]
    Api {
        source_name: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No transaction source available")]
    NoSource,

    // ── Records ─────────────────────────────────────────────────────
    #[error("Malformed transaction {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // The banking API takes its key as `?key=`; never keep the query.
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Strip everything after the first `?` in a message that may contain a URL.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
