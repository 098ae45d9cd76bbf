use demoji_kernel::config::{ConfigError, load_config};
use demoji_kernel::domain::config::AppConfig;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn file_values_are_loaded() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("demoji.toml");
    fs::write(
        &path,
        "[relay]\ncapacity = 3\n\n[storage]\nsettings_path = \"/var/lib/demoji/settings.json\"\n",
    )?;

    let cfg: AppConfig = load_config(Some(&path))?;
    assert_eq!(cfg.relay.capacity, 3);
    assert_eq!(cfg.storage.settings_path, std::path::PathBuf::from("/var/lib/demoji/settings.json"));
    assert_eq!(cfg.engine.config_read_timeout_ms, 1_500, "unset sections keep defaults");
    Ok(())
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = load_config::<AppConfig>(Some(dir.path().join("absent.toml")))
        .expect_err("explicit path must exist");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}

#[test]
#[serial]
fn implicit_file_is_optional() {
    let cfg: AppConfig = load_config(None::<&str>).expect("defaults without a file");
    assert!(cfg.relay.capacity > 0);
}
