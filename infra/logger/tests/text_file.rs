use demoji_domain::config::LoggingConfig;
use demoji_logger::{Logger, LoggerError};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn plain_file_logging_then_second_init_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        level: "info".to_owned(),
        directory: Some(log_dir.clone()),
        rotation: "never".to_owned(),
        max_files: 2,
        ..LoggingConfig::default()
    };
    let logger = Logger::from_config("demoji-text", &config)?;

    tracing::debug!("below the configured level");
    tracing::info!(rewritten = 3, "document scrubbed");

    let again = Logger::from_config("demoji-text-again", &config);
    assert!(matches!(again, Err(LoggerError::Subscriber { .. })));

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");
    let file_name = log_file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(file_name.starts_with("demoji-text"), "unexpected file {file_name}");

    let contents = fs::read_to_string(log_file)?;
    assert!(contents.contains("document scrubbed"));
    assert!(contents.contains("rewritten=3"), "text fields expected, got: {contents}");
    assert!(!contents.contains("below the configured level"));
    assert!(!contents.contains('{'), "plain text expected, got: {contents}");
    Ok(())
}
