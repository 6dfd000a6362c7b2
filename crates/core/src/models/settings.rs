use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const DEFAULT_NESSIE_BASE_URL: &str = "http://api.nessieisreal.com";

/// Longest transaction history a source is asked for.
pub const MAX_HISTORY_DAYS: u32 = 366;

/// Dashboard configuration: budget policy and banking API access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Budget ceiling used when no income was observed this month.
    pub default_budget_ceiling: f64,

    /// Share of observed income that becomes the budget ceiling.
    pub budget_ratio: f64,

    /// Length of the budget cycle used for projections, independent of
    /// the calendar month's actual length.
    pub budget_period_days: u32,

    /// How far back sources are asked for transactions.
    pub history_days: u32,

    /// A source returning fewer records than this is treated as thin
    /// and the next source is tried.
    pub min_live_transactions: usize,

    pub nessie_base_url: String,

    /// Sandbox banking API key. Without it (or a customer id) only the
    /// offline generator is registered.
    #[serde(default)]
    pub nessie_api_key: Option<String>,

    #[serde(default)]
    pub nessie_customer_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_budget_ceiling: 3000.0,
            budget_ratio: 0.85,
            budget_period_days: 30,
            history_days: 30,
            min_live_transactions: 10,
            nessie_base_url: DEFAULT_NESSIE_BASE_URL.to_string(),
            nessie_api_key: None,
            nessie_customer_id: None,
        }
    }
}

impl Settings {
    /// Defaults overlaid with environment variables:
    /// `NESSIE_API_KEY`, `NESSIE_CUSTOMER_ID`, `NESSIE_BASE_URL`,
    /// `DASHBOARD_DEFAULT_BUDGET`, `DASHBOARD_BUDGET_RATIO`, `DASHBOARD_HISTORY_DAYS`.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        settings.nessie_api_key = non_empty("NESSIE_API_KEY");
        settings.nessie_customer_id = non_empty("NESSIE_CUSTOMER_ID");
        if let Some(url) = non_empty("NESSIE_BASE_URL") {
            settings.nessie_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty("DASHBOARD_DEFAULT_BUDGET") {
            settings.default_budget_ceiling = parse_var("DASHBOARD_DEFAULT_BUDGET", &raw)?;
        }
        if let Some(raw) = non_empty("DASHBOARD_BUDGET_RATIO") {
            settings.budget_ratio = parse_var("DASHBOARD_BUDGET_RATIO", &raw)?;
        }
        if let Some(raw) = non_empty("DASHBOARD_HISTORY_DAYS") {
            settings.history_days = parse_var("DASHBOARD_HISTORY_DAYS", &raw)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.default_budget_ceiling.is_finite() || self.default_budget_ceiling < 0.0 {
            return Err(CoreError::Config(format!(
                "default_budget_ceiling must be a finite, non-negative amount (got {})",
                self.default_budget_ceiling
            )));
        }
        if !(self.budget_ratio > 0.0 && self.budget_ratio <= 1.0) {
            return Err(CoreError::Config(format!(
                "budget_ratio must be in (0, 1] (got {})",
                self.budget_ratio
            )));
        }
        if self.budget_period_days == 0 {
            return Err(CoreError::Config("budget_period_days must be at least 1".into()));
        }
        if self.history_days > MAX_HISTORY_DAYS {
            return Err(CoreError::Config(format!(
                "history_days must be at most {MAX_HISTORY_DAYS} (got {})",
                self.history_days
            )));
        }
        Ok(())
    }

    /// Both credentials needed to reach the banking API are present.
    pub fn has_nessie_credentials(&self) -> bool {
        self.nessie_api_key.is_some() && self.nessie_customer_id.is_some()
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, CoreError> {
    raw.parse::<T>()
        .map_err(|_| CoreError::Config(format!("{key} has an invalid value '{raw}'")))
}
