//! Wire and storage names shared by the engine, the settings editor and the relay.

/// Persisted key of the master switch.
pub const ENABLED_KEY: &str = "enabled";
/// Persisted key of the characters that are never removed.
pub const ALLOW_LIST_KEY: &str = "allowList";
/// Persisted key of the extra characters to remove.
pub const BLOCK_LIST_KEY: &str = "blockList";

/// Action tag of a configuration-change notification.
pub const UPDATE_STATE_ACTION: &str = "updateState";

/// The only attribute whose value is filtered (tooltips).
pub const TITLE_ATTRIBUTE: &str = "title";

/// Parent elements whose text content is never touched.
pub const EXCLUDED_PARENTS: [&str; 3] = ["script", "style", "textarea"];

/// Value of `enabled` when the key has never been written.
pub const DEFAULT_ENABLED: bool = true;
