use demoji_domain::constants::{ALLOW_LIST_KEY, BLOCK_LIST_KEY, ENABLED_KEY, UPDATE_STATE_ACTION};
use demoji_domain::{RelayMessage, StateUpdate, StoredSettings};
use serde_json::json;

#[test]
fn update_state_wire_format() {
    let msg = RelayMessage::from(StateUpdate {
        enabled: Some(false),
        allow_list: None,
        block_list: Some("a".to_owned()),
    });

    let value = serde_json::to_value(&msg).expect("serialize");
    assert_eq!(value, json!({ "action": UPDATE_STATE_ACTION, ENABLED_KEY: false, BLOCK_LIST_KEY: "a" }));
}

#[test]
fn update_state_accepts_any_subset() {
    let msg: RelayMessage =
        serde_json::from_value(json!({ "action": "updateState", ALLOW_LIST_KEY: "😀" }))
            .expect("deserialize");

    let update = msg.update();
    assert_eq!(update.allow_list.as_deref(), Some("😀"));
    assert!(update.enabled.is_none());
    assert!(update.block_list.is_none());
}

#[test]
fn unknown_action_is_rejected() {
    let res = serde_json::from_value::<RelayMessage>(json!({ "action": "ping" }));
    assert!(res.is_err());
}

#[test]
fn stored_settings_defaults() {
    let cfg = StoredSettings::default().resolve();
    assert!(cfg.enabled, "enabled defaults to true");
    assert!(cfg.allow_list.is_empty());
    assert!(cfg.block_list.is_empty());
}

#[test]
fn stored_settings_merge_keeps_absent_keys() {
    let mut stored = StoredSettings {
        enabled: Some(true),
        allow_list: Some("😀".to_owned()),
        block_list: None,
    };
    stored.merge(&StoredSettings { block_list: Some("x".to_owned()), ..StoredSettings::default() });

    assert_eq!(stored.enabled, Some(true));
    assert_eq!(stored.allow_list.as_deref(), Some("😀"));
    assert_eq!(stored.block_list.as_deref(), Some("x"));
}
