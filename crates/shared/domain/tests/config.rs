use demoji_domain::config::{AppConfig, EngineConfig, RelayConfig, StorageConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let storage = StorageConfig::default();
    assert_eq!(storage.settings_path, std::path::PathBuf::from("demoji-settings.json"));

    assert_eq!(RelayConfig::default().capacity, 16);
    assert_eq!(EngineConfig::default().config_read_timeout_ms, 1_500);

    let cfg = AppConfig::default();
    assert_eq!(cfg.logging.level, "info");
    assert!(cfg.logging.directory.is_none());
    assert_eq!(cfg.logging.rotation, "daily");
    assert_eq!(cfg.logging.max_files, 10);
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "storage": { "settings_path": "/tmp/demoji.json" },
        "relay": { "capacity": 4 },
        "logging": { "level": "debug", "json": true, "rotation": "hourly" }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.storage.settings_path, std::path::PathBuf::from("/tmp/demoji.json"));
    assert_eq!(cfg.relay.capacity, 4);
    assert_eq!(cfg.engine.config_read_timeout_ms, 1_500);
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.rotation, "hourly");
    assert_eq!(cfg.logging.max_files, 10);
}

#[test]
fn app_config_mutation_is_copy_on_write() {
    let original = AppConfig::default();
    let mut tweaked = original.clone();
    tweaked.relay.capacity = 1;

    assert_eq!(original.relay.capacity, 16);
    assert_eq!(tweaked.relay.capacity, 1);
}
