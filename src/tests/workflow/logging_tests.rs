//! Tests for logger configuration.

use serde_json::json;

use crate::config::WorkflowConfig;
use crate::error::ErrorKind;
use crate::logging::{LogFormat, LoggerConfig};
use crate::workflow::Workflow;

#[test]
fn no_logger_section_is_a_no_op() {
    let workflow = Workflow::new(WorkflowConfig::new());
    workflow.setup_logging().unwrap();
}

#[test]
fn logger_section_defaults() {
    let config = LoggerConfig::from_section(&json!({"format": "json"})).unwrap();
    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.with_target);
    assert!(!config.ansi);
}

#[test]
fn filter_takes_precedence_over_level() {
    let section = json!({"level": "not=a=level", "filter": "ioflow=trace"});
    let config = LoggerConfig::from_section(&section).unwrap();
    assert!(config.env_filter().is_ok());
}

#[test]
fn invalid_filter_is_a_logging_error() {
    let config = LoggerConfig::from_section(&json!({"filter": "ioflow=loudest"})).unwrap();
    assert_eq!(config.env_filter().unwrap_err().kind(), ErrorKind::Logging);

    let workflow = Workflow::new(
        WorkflowConfig::new().with_section("logger", json!({"level": "ioflow=loudest"})),
    );
    assert_eq!(workflow.setup_logging().unwrap_err().kind(), ErrorKind::Logging);
}

#[test]
fn unknown_format_is_a_config_error() {
    let err = LoggerConfig::from_section(&json!({"format": "xml"})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn installing_twice_keeps_the_first_subscriber() {
    let config = LoggerConfig::default();
    config.apply().unwrap();
    assert!(!config.apply().unwrap());
}
