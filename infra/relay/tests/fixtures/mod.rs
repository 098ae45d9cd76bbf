use demoji_domain::{RelayMessage, StateUpdate};

pub fn toggle(enabled: bool) -> RelayMessage {
    RelayMessage::from(StateUpdate { enabled: Some(enabled), ..StateUpdate::default() })
}

pub fn lists(allow: &str, block: &str) -> RelayMessage {
    RelayMessage::from(StateUpdate {
        allow_list: Some(allow.to_owned()),
        block_list: Some(block.to_owned()),
        ..StateUpdate::default()
    })
}
