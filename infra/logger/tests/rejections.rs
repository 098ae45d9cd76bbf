//! Configurations that must fail before any subscriber is installed.

use demoji_domain::config::LoggingConfig;
use demoji_logger::{Logger, LoggerError};
use tempfile::tempdir;

fn invalid(result: Result<Logger, LoggerError>) -> String {
    match result {
        Err(err @ LoggerError::InvalidConfiguration { .. }) => err.to_string(),
        other => panic!("expected an invalid configuration, got {other:?}"),
    }
}

#[test]
fn unknown_rotation_is_rejected() {
    let config = LoggingConfig { rotation: "weekly".to_owned(), ..LoggingConfig::default() };
    assert!(invalid(Logger::from_config("demoji", &config)).contains("weekly"));
}

#[test]
fn unknown_level_is_rejected() {
    let config = LoggingConfig { level: "chatty".to_owned(), ..LoggingConfig::default() };
    assert!(invalid(Logger::from_config("demoji", &config)).contains("chatty"));
}

#[test]
fn zero_max_files_is_rejected() {
    let tmp_dir = tempdir().unwrap();
    let config = LoggingConfig {
        directory: Some(tmp_dir.path().to_path_buf()),
        max_files: 0,
        ..LoggingConfig::default()
    };
    assert!(invalid(Logger::from_config("demoji", &config)).contains("max_files"));
}

#[test]
fn no_output_at_all_is_rejected() {
    let result = Logger::builder().name("demoji").console(false).init();
    assert!(invalid(result).contains("No logging layers"));
}
