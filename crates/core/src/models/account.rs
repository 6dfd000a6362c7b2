use serde::{Deserialize, Serialize};

/// Kind of bank account. Decides which side of the balance sheet it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Asset
    Checking,
    /// Asset
    Savings,
    /// Liability, the balance magnitude is what is owed
    Credit,
}

impl AccountKind {
    /// Parse an account type string as the banking API reports it
    /// ("Checking", "Savings", "Credit Card"). Case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "checking" => Some(AccountKind::Checking),
            "savings" => Some(AccountKind::Savings),
            "credit" | "credit card" | "credit_card" => Some(AccountKind::Credit),
            _ => None,
        }
    }

    pub fn is_asset(&self) -> bool {
        matches!(self, AccountKind::Checking | AccountKind::Savings)
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKind::Checking => write!(f, "checking"),
            AccountKind::Savings => write!(f, "savings"),
            AccountKind::Credit => write!(f, "credit"),
        }
    }
}

/// A bank account as of the last fetch. Immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,

    /// Display name (e.g., "Main Account")
    #[serde(default)]
    pub nickname: String,

    pub kind: AccountKind,

    /// Signed balance. Credit balances may be reported either sign;
    /// only the magnitude is used.
    pub balance: f64,
}

impl Account {
    pub fn new(id: impl Into<String>, kind: AccountKind, balance: f64) -> Self {
        Self {
            id: id.into(),
            nickname: String::new(),
            kind,
            balance,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }
}
