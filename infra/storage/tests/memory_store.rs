use demoji_domain::StoredSettings;
use demoji_storage::{MemorySettingsStore, SettingsStore, install_defaults};

#[tokio::test]
async fn clones_share_state() {
    let store = MemorySettingsStore::default();
    let other = store.clone();

    other.save(&StoredSettings { allow_list: Some("😀".into()), ..Default::default() }).await.unwrap();

    let cfg = store.load().await.unwrap().resolve();
    assert!(cfg.enabled, "missing enabled resolves to the default");
    assert_eq!(cfg.allow_list, vec!['😀']);
}

#[tokio::test]
async fn install_defaults_on_empty_memory_store() {
    let store = MemorySettingsStore::default();
    install_defaults(&store).await.unwrap();
    assert_eq!(
        store.snapshot(),
        StoredSettings { enabled: Some(true), allow_list: Some(String::new()), block_list: None }
    );
}
