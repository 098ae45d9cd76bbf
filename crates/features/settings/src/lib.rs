//! # Settings Editor
//!
//! The user-facing side of the filter settings. Every change is persisted first and
//! then announced to running document instances through the [`Relay`], so an instance
//! that starts later reads the change from the store.

mod error;

pub use error::{SettingsError, SettingsErrorExt};

use demoji_domain::{RelayMessage, StateUpdate, StoredSettings};
use demoji_relay::Relay;
use demoji_storage::{SettingsStore, install_defaults};
use serde::Serialize;
use tracing::info;

/// The three settings as shown to the user, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub enabled: bool,
    pub allow_list: String,
    pub block_list: String,
}

#[derive(Debug)]
pub struct SettingsEditor<S> {
    store: S,
    relay: Relay,
}

impl<S: SettingsStore> SettingsEditor<S> {
    pub const fn new(store: S, relay: Relay) -> Self {
        Self { store, relay }
    }

    #[must_use]
    pub const fn relay(&self) -> &Relay {
        &self.relay
    }

    /// Writes first-run defaults for missing keys. Returns whether anything changed.
    ///
    /// # Errors
    /// [`SettingsError::Storage`] if the store cannot be read or written.
    pub async fn install(&self) -> Result<bool, SettingsError> {
        install_defaults(&self.store).await.context("install defaults")
    }

    /// Current values for display; missing keys show their defaults.
    ///
    /// # Errors
    /// [`SettingsError::Storage`] if the store cannot be read.
    pub async fn load(&self) -> Result<SettingsView, SettingsError> {
        let config = self.store.load().await.context("load")?.resolve();
        Ok(SettingsView {
            enabled: config.enabled,
            allow_list: config.allow_list_raw(),
            block_list: config.block_list_raw(),
        })
    }

    /// Persists the master switch and announces it.
    ///
    /// Returns the number of document instances that received the change.
    ///
    /// # Errors
    /// [`SettingsError::Storage`] if persisting fails; nothing is announced then.
    pub async fn set_enabled(&self, enabled: bool) -> Result<usize, SettingsError> {
        self.apply(StateUpdate { enabled: Some(enabled), ..StateUpdate::default() }).await
    }

    /// Persists both lists and announces them together.
    ///
    /// # Errors
    /// [`SettingsError::Storage`] if persisting fails; nothing is announced then.
    pub async fn save_lists(
        &self,
        allow_list: &str,
        block_list: &str,
    ) -> Result<usize, SettingsError> {
        self.apply(StateUpdate {
            enabled: None,
            allow_list: Some(allow_list.to_owned()),
            block_list: Some(block_list.to_owned()),
        })
        .await
    }

    /// Persists any subset of the settings and announces exactly that subset.
    ///
    /// # Errors
    /// [`SettingsError::Storage`] if persisting fails; nothing is announced then.
    pub async fn apply(&self, update: StateUpdate) -> Result<usize, SettingsError> {
        self.store.save(&StoredSettings::from(&update)).await.context("save")?;
        let reached = self.relay.forward(RelayMessage::from(update)).await;
        info!(reached, "Settings saved and announced");
        Ok(reached)
    }
}
