// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn api() {
        let err = CoreError::Api {
            source_name: "Nessie".into(),
            message: "GET /accounts returned 500".into(),
        };
        assert_eq!(err.to_string(), "API error (Nessie): GET /accounts returned 500");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn no_source() {
        assert_eq!(CoreError::NoSource.to_string(), "No transaction source available");
    }

    #[test]
    fn malformed_record() {
        let err = CoreError::MalformedRecord {
            id: "t9".into(),
            reason: "missing date".into(),
        };
        assert_eq!(err.to_string(), "Malformed transaction t9: missing date");
    }

    #[test]
    fn transaction_not_found() {
        let err = CoreError::TransactionNotFound("abc".into());
        assert_eq!(err.to_string(), "Transaction not found: abc");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("bad range".into());
        assert_eq!(err.to_string(), "Validation failed: bad range");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("budget_ratio must be in (0, 1]".into());
        assert_eq!(err.to_string(), "Configuration error: budget_ratio must be in (0, 1]");
    }

    #[test]
    fn serialization_pair() {
        assert_eq!(
            CoreError::Serialization("x".into()).to_string(),
            "Serialization error: x"
        );
        assert_eq!(
            CoreError::Deserialization("y".into()).to_string(),
            "Deserialization error: y"
        );
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::NoSource);
        assert!(err.source().is_none());
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{{invalid json");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_eof() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(msg.contains("EOF")),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn question_mark_converts() {
        fn parse(raw: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(raw)?)
        }
        assert!(parse("[1, 2]").is_ok());
        assert!(matches!(parse("[1,"), Err(CoreError::Deserialization(_))));
    }
}
