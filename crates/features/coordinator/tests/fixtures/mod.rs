#![allow(dead_code)]

use demoji_dom::Document;
use demoji_domain::StoredSettings;
use demoji_storage::{MemorySettingsStore, SettingsStore, StorageError};
use std::time::Duration;

pub const PAGE: &str = "<html><head><title>Inbox 📬</title></head>\
    <body><p title=\"hi 👋\">Hello 😀 World 🚀</p><script>var s = '😀';</script></body></html>";

pub fn page() -> Document {
    Document::parse_html(PAGE)
}

pub fn store(enabled: bool, allow: &str, block: &str) -> MemorySettingsStore {
    MemorySettingsStore::new(StoredSettings {
        enabled: Some(enabled),
        allow_list: Some(allow.to_owned()),
        block_list: Some(block.to_owned()),
    })
}

pub fn first(doc: &Document, tag: &str) -> demoji_dom::NodeId {
    doc.elements_by_tag_name(tag)[0]
}

/// A store whose reads always fail.
#[derive(Debug)]
pub struct FailingStore;

impl SettingsStore for FailingStore {
    async fn load(&self) -> Result<StoredSettings, StorageError> {
        Err(StorageError::Unavailable { message: "profile locked".into(), context: None })
    }

    async fn save(&self, _patch: &StoredSettings) -> Result<(), StorageError> {
        Err(StorageError::Unavailable { message: "profile locked".into(), context: None })
    }
}

/// A store that answers only after `delay`.
#[derive(Debug)]
pub struct SlowStore {
    pub delay: Duration,
}

impl SettingsStore for SlowStore {
    async fn load(&self) -> Result<StoredSettings, StorageError> {
        tokio::time::sleep(self.delay).await;
        Ok(StoredSettings { enabled: Some(true), ..StoredSettings::default() })
    }

    async fn save(&self, _patch: &StoredSettings) -> Result<(), StorageError> {
        Ok(())
    }
}
