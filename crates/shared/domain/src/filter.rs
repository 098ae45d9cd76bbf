use crate::messages::StateUpdate;

/// The user's filtering choices, as consumed by the pattern compiler.
///
/// Both lists are the raw setting strings split into Unicode scalar values. No
/// normalization happens here: a flag or a skin-toned emoji typed into a list
/// contributes each of its code points separately. Order and duplicates carry no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub enabled: bool,
    pub allow_list: Vec<char>,
    pub block_list: Vec<char>,
}

impl FilterConfig {
    /// Builds a config from the three raw setting values.
    #[must_use]
    pub fn from_raw(enabled: bool, allow_list: &str, block_list: &str) -> Self {
        Self { enabled, allow_list: allow_list.chars().collect(), block_list: block_list.chars().collect() }
    }

    /// The fail-closed configuration used whenever the real one is unknown.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { enabled: false, allow_list: Vec::new(), block_list: Vec::new() }
    }

    /// Returns a new config with only the fields present in `update` replaced.
    #[must_use]
    pub fn merged(&self, update: &StateUpdate) -> Self {
        Self {
            enabled: update.enabled.unwrap_or(self.enabled),
            allow_list: update
                .allow_list
                .as_deref()
                .map_or_else(|| self.allow_list.clone(), |raw| raw.chars().collect()),
            block_list: update
                .block_list
                .as_deref()
                .map_or_else(|| self.block_list.clone(), |raw| raw.chars().collect()),
        }
    }

    /// The allow-list joined back into its raw setting form.
    #[must_use]
    pub fn allow_list_raw(&self) -> String {
        self.allow_list.iter().collect()
    }

    /// The block-list joined back into its raw setting form.
    #[must_use]
    pub fn block_list_raw(&self) -> String {
        self.block_list.iter().collect()
    }
}
