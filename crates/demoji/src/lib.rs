//! Facade crate for the `Demoji` filtering engine and its collaborators.
//! Re-exports domain/kernel primitives and wires the engine to storage and relay.
//! Keep this crate thin: it should compose other crates, not implement filtering logic.
//!
//! ## Usage
//! - Add `demoji` (the `html` feature is on by default).
//! - Open an [`Engine`] from the loaded [`AppConfig`](domain::config::AppConfig), then
//!   [`Engine::attach`] one session per document and use [`Engine::editor`] for changes.

pub use demoji_coordinator as coordinator;
pub use demoji_dom as dom;
pub use demoji_domain as domain;
pub use demoji_filter as filter;
pub use demoji_kernel as kernel;
pub use demoji_relay as relay;
pub use demoji_settings as settings;
pub use demoji_storage as storage;

use demoji_coordinator::Session;
use demoji_domain::config::AppConfig;
use demoji_relay::{Relay, RelayError, RelayInbox};
use demoji_settings::SettingsEditor;
use demoji_storage::FileSettingsStore;
use tracing::debug;

/// Build-time enabled features (by Cargo feature).
pub const ENABLED: &[&str] = &[
    #[cfg(feature = "html")]
    "html",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    ENABLED.contains(&name)
}

/// The pieces shared by every document instance of one profile.
#[derive(Debug, Clone)]
pub struct Engine {
    config: AppConfig,
    store: FileSettingsStore,
    relay: Relay,
}

impl Engine {
    /// Opens the settings store and builds the relay described by `config`.
    ///
    /// # Errors
    /// Returns [`RelayError::InvalidCapacity`] if the configured relay capacity is zero.
    pub async fn open(config: AppConfig) -> Result<Self, RelayError> {
        let relay = Relay::with_capacity(config.relay.capacity)?;
        let store = FileSettingsStore::open(&config.storage.settings_path).await;
        debug!(path = %store.path().display(), capacity = relay.capacity(), "Engine opened");
        Ok(Self { config, store, relay })
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &FileSettingsStore {
        &self.store
    }

    #[must_use]
    pub const fn relay(&self) -> &Relay {
        &self.relay
    }

    /// A fresh session for one document instance plus its relay inbox.
    #[must_use]
    pub fn attach(&self, label: &str) -> (Session<FileSettingsStore>, RelayInbox) {
        let session = Session::from_config(self.store.clone(), &self.config.engine);
        (session, self.relay.attach(label))
    }

    /// The settings editor bound to this engine's store and relay.
    #[must_use]
    pub fn editor(&self) -> SettingsEditor<FileSettingsStore> {
        SettingsEditor::new(self.store.clone(), self.relay.clone())
    }
}
