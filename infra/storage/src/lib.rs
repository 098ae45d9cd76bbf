//! Persistence layer for the three filter settings (`enabled`, `allowList`, `blockList`).
//!
//! The engine only ever reads through [`SettingsStore::load`]; the settings editor
//! writes through [`SettingsStore::save`], which merges the given keys into what is
//! already stored (absent keys are left alone).
//!
//! # Examples
//!
//! ```rust
//! use demoji_storage::{FileSettingsStore, SettingsStore, StorageError, install_defaults};
//! use demoji_domain::StoredSettings;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let path = tmp.path().join("settings.json");
//!     let store = FileSettingsStore::open(&path).await;
//!     install_defaults(&store).await?;
//!
//!     let patch = StoredSettings { allow_list: Some("😀".into()), ..Default::default() };
//!     store.save(&patch).await?;
//!
//!     let cfg = store.load().await?.resolve();
//!     assert!(cfg.enabled);
//!     assert_eq!(cfg.allow_list, vec!['😀']);
//!     Ok(())
//! }
//! ```

mod error;
mod file;
mod maintenance;
mod memory;

pub use error::{StorageError, StorageErrorExt};
pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

use demoji_domain::StoredSettings;
use demoji_domain::constants::DEFAULT_ENABLED;
use std::future::Future;
use tracing::info;

/// Key-value store holding the filter settings.
pub trait SettingsStore: Send + Sync {
    /// Reads every stored key. A store that was never written returns an empty value.
    fn load(&self) -> impl Future<Output = Result<StoredSettings, StorageError>> + Send;

    /// Persists the keys present in `patch`, keeping the others.
    fn save(&self, patch: &StoredSettings) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Writes first-run defaults for keys that are still missing.
///
/// `enabled` becomes `true` and `allowList` becomes empty; `blockList` is an
/// optional feature and is left unset. Returns whether anything was written.
///
/// # Errors
/// Propagates read or write failures of the underlying store.
pub async fn install_defaults<S: SettingsStore>(store: &S) -> Result<bool, StorageError> {
    let current = store.load().await?;

    let patch = StoredSettings {
        enabled: current.enabled.is_none().then_some(DEFAULT_ENABLED),
        allow_list: current.allow_list.is_none().then(String::new),
        block_list: None,
    };
    if patch.is_empty() {
        return Ok(false);
    }

    store.save(&patch).await?;
    info!(?patch, "Installed default settings");
    Ok(true)
}
