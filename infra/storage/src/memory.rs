use crate::SettingsStore;
use crate::error::StorageError;
use demoji_domain::StoredSettings;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-process settings store, shared between clones.
///
/// Used when the engine is embedded without a profile on disk, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    settings: Arc<RwLock<StoredSettings>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new(initial: StoredSettings) -> Self {
        Self { settings: Arc::new(RwLock::new(initial)) }
    }

    /// Current contents, without going through the async contract.
    #[must_use]
    pub fn snapshot(&self) -> StoredSettings {
        self.settings.read().clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<StoredSettings, StorageError> {
        Ok(self.snapshot())
    }

    async fn save(&self, patch: &StoredSettings) -> Result<(), StorageError> {
        self.settings.write().merge(patch);
        Ok(())
    }
}
