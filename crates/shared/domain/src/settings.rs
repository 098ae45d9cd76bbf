use crate::constants::DEFAULT_ENABLED;
use crate::filter::FilterConfig;
use crate::messages::StateUpdate;
use serde::{Deserialize, Serialize};

/// The persisted form of the three settings.
///
/// Every key is optional: a fresh profile has none of them, and the block-list
/// is an optional feature that older profiles never wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_list: Option<String>,
}

impl StoredSettings {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.allow_list.is_none() && self.block_list.is_none()
    }

    /// Applies documented defaults to missing keys.
    #[must_use]
    pub fn resolve(&self) -> FilterConfig {
        FilterConfig::from_raw(
            self.enabled.unwrap_or(DEFAULT_ENABLED),
            self.allow_list.as_deref().unwrap_or_default(),
            self.block_list.as_deref().unwrap_or_default(),
        )
    }

    /// Overwrites the keys that are present in `patch`.
    pub fn merge(&mut self, patch: &Self) {
        if let Some(enabled) = patch.enabled {
            self.enabled = Some(enabled);
        }
        if let Some(allow) = &patch.allow_list {
            self.allow_list = Some(allow.clone());
        }
        if let Some(block) = &patch.block_list {
            self.block_list = Some(block.clone());
        }
    }
}

impl From<&StateUpdate> for StoredSettings {
    fn from(update: &StateUpdate) -> Self {
        Self {
            enabled: update.enabled,
            allow_list: update.allow_list.clone(),
            block_list: update.block_list.clone(),
        }
    }
}
