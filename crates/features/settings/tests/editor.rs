use demoji_domain::StoredSettings;
use demoji_relay::Relay;
use demoji_settings::{SettingsEditor, SettingsError, SettingsView};
use demoji_storage::{FileSettingsStore, MemorySettingsStore, SettingsStore, StorageError};

#[tokio::test]
async fn load_shows_defaults_for_a_fresh_profile() {
    let editor = SettingsEditor::new(MemorySettingsStore::default(), Relay::new());
    assert_eq!(
        editor.load().await.unwrap(),
        SettingsView { enabled: true, allow_list: String::new(), block_list: String::new() }
    );
}

#[tokio::test]
async fn toggle_is_persisted_then_announced() {
    let store = MemorySettingsStore::default();
    let relay = Relay::new();
    let mut inbox = relay.attach("tab");
    let editor = SettingsEditor::new(store.clone(), relay);

    assert_eq!(editor.set_enabled(false).await.unwrap(), 1);

    assert_eq!(store.snapshot().enabled, Some(false));
    let msg = inbox.recv().await.unwrap();
    assert_eq!(msg.update().enabled, Some(false));
    assert_eq!(msg.update().allow_list, None, "only the toggled field travels");
}

#[tokio::test]
async fn lists_are_saved_and_announced_together() {
    let store = MemorySettingsStore::default();
    let relay = Relay::new();
    let mut inbox = relay.attach("tab");
    let editor = SettingsEditor::new(store.clone(), relay);

    editor.save_lists("😀", "a").await.unwrap();

    let view = editor.load().await.unwrap();
    assert_eq!(view.allow_list, "😀");
    assert_eq!(view.block_list, "a");
    assert!(view.enabled);

    let json = serde_json::to_value(&*inbox.recv().await.unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "action": "updateState", "allowList": "😀", "blockList": "a" })
    );
}

#[tokio::test]
async fn install_writes_defaults_once() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileSettingsStore::open(tmp.path().join("settings.json")).await;
    let editor = SettingsEditor::new(store.clone(), Relay::new());

    assert!(editor.install().await.unwrap());
    assert!(!editor.install().await.unwrap());
    assert_eq!(
        store.load().await.unwrap(),
        StoredSettings { enabled: Some(true), allow_list: Some(String::new()), block_list: None }
    );
}

#[derive(Debug)]
struct ReadOnlyStore;

impl SettingsStore for ReadOnlyStore {
    async fn load(&self) -> Result<StoredSettings, StorageError> {
        Ok(StoredSettings::default())
    }

    async fn save(&self, _patch: &StoredSettings) -> Result<(), StorageError> {
        Err(StorageError::Unavailable { message: "read-only".into(), context: None })
    }
}

#[tokio::test]
async fn failed_save_announces_nothing() {
    let relay = Relay::new();
    let mut inbox = relay.attach("tab");
    let editor = SettingsEditor::new(ReadOnlyStore, relay);

    let err = editor.set_enabled(false).await.unwrap_err();
    assert!(matches!(err, SettingsError::Storage { .. }));
    assert!(err.to_string().contains("(save)"));
    assert_eq!(editor.relay().shutdown(), 1);
    assert!(inbox.recv().await.is_none(), "no announcement was queued");
}
