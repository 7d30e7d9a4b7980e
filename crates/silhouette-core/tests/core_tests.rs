//! Tests for silhouette-core: config types, bind modes, errors

use silhouette_core::*;

// ===========================================================================
// GatewayConfig
// ===========================================================================

#[test]
fn gateway_config_defaults() {
    let config = GatewayConfig::default();
    assert_eq!(config.port, 7717);
    assert_eq!(config.bind.to_addr(), "127.0.0.1");
    assert_eq!(config.auth.mode, AuthMode::Token);
    assert!(config.auth.token.is_none());
}

#[test]
fn gateway_config_from_partial_json() {
    let config: GatewayConfig = serde_json::from_str(r#"{"bind": "lan"}"#).unwrap();
    assert_eq!(config.port, 7717);
    assert_eq!(config.bind.to_addr(), "0.0.0.0");
}

#[test]
fn auth_mode_parses_lowercase() {
    let config: AuthConfig =
        serde_json::from_str(r#"{"mode": "none", "token": "t"}"#).unwrap();
    assert_eq!(config.mode, AuthMode::None);
    assert_eq!(config.token.as_deref(), Some("t"));
}

// ===========================================================================
// WorkflowConfig
// ===========================================================================

#[test]
fn workflow_config_defaults() {
    let config = WorkflowConfig::default();
    assert!(!config.enabled);
    assert!(config.continuous);
    assert_eq!(config.max_daily_tokens, 250_000);
    assert_eq!(config.max_runtime_hours, 0.0);
    assert_eq!(config.max_tokens_per_call, 1024);
}

#[test]
fn workflow_config_partial_json_keeps_defaults() {
    let config: WorkflowConfig =
        serde_json::from_str(r#"{"enabled": true, "max_daily_tokens": 100}"#).unwrap();
    assert!(config.enabled);
    assert_eq!(config.max_daily_tokens, 100);
    assert!(config.continuous);
    assert_eq!(config.max_tokens_per_call, 1024);
}

// ===========================================================================
// Error
// ===========================================================================

#[test]
fn error_display_messages() {
    assert_eq!(
        Error::auth_failed("no token").to_string(),
        "authentication failed: no token"
    );
    assert_eq!(
        Error::missing_field("task").to_string(),
        "missing required field: task"
    );
    assert_eq!(
        Error::not_found("backup").to_string(),
        "not found: backup"
    );
    assert_eq!(
        Error::generation("anthropic", "boom").to_string(),
        "generation error: anthropic - boom"
    );
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = io.into();
    assert!(matches!(err, Error::IoError(_)));
}

#[test]
fn error_from_json() {
    let parse = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
    let err: Error = parse.into();
    assert!(matches!(err, Error::JsonError(_)));
}
