use serde::{Deserialize, Serialize};

/// Partial configuration carried by an `updateState` notification.
///
/// Absent fields mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_list: Option<String>,
}

impl StateUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.allow_list.is_none() && self.block_list.is_none()
    }
}

/// A message travelling from the settings editor to document instances.
///
/// Serialized with an `action` tag, e.g. `{"action":"updateState","enabled":false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RelayMessage {
    UpdateState(StateUpdate),
}

impl RelayMessage {
    #[must_use]
    pub const fn update(&self) -> &StateUpdate {
        match self {
            Self::UpdateState(update) => update,
        }
    }
}

impl From<StateUpdate> for RelayMessage {
    fn from(update: StateUpdate) -> Self {
        Self::UpdateState(update)
    }
}
