//! # Pattern Compiler
//!
//! The generated pattern is one non-capturing group:
//!
//! ```text
//! (?:[\x{1F600}-\x{1F64F}]|…|\x{2197}|B1|B2|…)
//! ```
//!
//! the base ranges followed by the escaped block-listed characters. Each match
//! consumes exactly one character, so removal is a plain global replace.
//!
//! Allow-listed characters are not part of the pattern. A match whose character is
//! allow-listed is kept instead of removed, which is what a negative lookahead per
//! allowed character in front of the group would do. The pattern must stay free of
//! lookarounds so it runs on the linear-time engine with no backtrack limit.

use demoji_domain::FilterConfig;
use fancy_regex::Regex;
use fxhash::FxHashSet;
use std::borrow::Cow;
use std::fmt::Write as _;
use tracing::{debug, error, warn};

/// Code-point ranges removed regardless of configuration (inclusive bounds).
pub const BASE_RANGES: [(char, char); 12] = [
    ('\u{1F600}', '\u{1F64F}'), // emoticons
    ('\u{1F300}', '\u{1F5FF}'), // symbols and pictographs
    ('\u{1F680}', '\u{1F6FF}'), // transport and map
    ('\u{1F1E6}', '\u{1F1FF}'), // regional indicators
    ('\u{2600}', '\u{26FF}'),   // miscellaneous symbols
    ('\u{2700}', '\u{27BF}'),   // dingbats
    ('\u{FE0F}', '\u{FE0F}'),   // variation selector-16
    ('\u{1F900}', '\u{1F9FF}'), // supplemental symbols and pictographs
    ('\u{1F018}', '\u{1F270}'),
    ('\u{238C}', '\u{238C}'),
    ('\u{2B06}', '\u{2B06}'),
    ('\u{2197}', '\u{2197}'),
];

/// An executable matcher derived from one [`FilterConfig`].
///
/// Holds no reference to the config it came from; cheap to share by reference and
/// safe to use from several call sites at once.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pattern: String,
    regex: Option<Regex>,
    allowed: FxHashSet<char>,
    /// No ASCII character can match, so pure-ASCII input is returned untouched.
    ascii_inert: bool,
}

/// Compiles `config` into a [`CompiledRule`].
///
/// Total: empty lists degrade to the base table alone. The `enabled` flag is not
/// consulted; callers decide whether to compile at all.
#[must_use]
pub fn compile(config: &FilterConfig) -> CompiledRule {
    let pattern = build_pattern(config);
    let ascii_inert = !config.block_list.iter().any(char::is_ascii);
    let allowed: FxHashSet<char> = config.allow_list.iter().copied().collect();

    let regex = Regex::new(&pattern);
    debug_assert!(regex.is_ok(), "generated pattern must compile: {pattern}");

    match regex {
        Ok(regex) => {
            debug!(
                allow = config.allow_list.len(),
                block = config.block_list.len(),
                len = pattern.len(),
                "Filter pattern compiled"
            );
            CompiledRule { pattern, regex: Some(regex), allowed, ascii_inert }
        },
        Err(e) => {
            error!(err = %e, %pattern, "Generated filter pattern is malformed; filtering disabled");
            CompiledRule { pattern, regex: None, allowed, ascii_inert }
        },
    }
}

impl CompiledRule {
    /// `text` with every matched character removed. Borrows when nothing matched.
    #[must_use]
    pub fn remove_from<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(regex) = &self.regex else {
            return Cow::Borrowed(text);
        };
        if self.ascii_inert && text.is_ascii() {
            return Cow::Borrowed(text);
        }

        let mut out: Option<String> = None;
        let mut last = 0;
        for found in regex.find_iter(text) {
            let m = match found {
                Ok(m) => m,
                Err(e) => {
                    warn!(err = %e, "Filter matching failed; text left unchanged");
                    return Cow::Borrowed(text);
                },
            };
            if self.is_allowed(m.as_str()) {
                continue;
            }
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[last..m.start()]);
            last = m.end();
        }

        match out {
            Some(mut buf) => {
                buf.push_str(&text[last..]);
                Cow::Owned(buf)
            },
            None => Cow::Borrowed(text),
        }
    }

    /// Whether `text` contains at least one removable character.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        let Some(regex) = &self.regex else {
            return false;
        };
        if self.ascii_inert && text.is_ascii() {
            return false;
        }
        for found in regex.find_iter(text) {
            match found {
                Ok(m) if self.is_allowed(m.as_str()) => {},
                Ok(_) => return true,
                Err(e) => {
                    warn!(err = %e, "Filter matching failed");
                    return false;
                },
            }
        }
        false
    }

    /// The generated pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Every match is a single character, so checking the first one is enough.
    fn is_allowed(&self, matched: &str) -> bool {
        !self.allowed.is_empty()
            && matched.chars().next().is_some_and(|c| self.allowed.contains(&c))
    }
}

fn build_pattern(config: &FilterConfig) -> String {
    let mut pattern = String::with_capacity(256);

    pattern.push_str("(?:");
    for (i, &(start, end)) in BASE_RANGES.iter().enumerate() {
        if i > 0 {
            pattern.push('|');
        }
        // Writing into a String cannot fail.
        let _ = if start == end {
            write!(pattern, "\\x{{{:X}}}", u32::from(start))
        } else {
            write!(pattern, "[\\x{{{:X}}}-\\x{{{:X}}}]", u32::from(start), u32::from(end))
        };
    }
    for &ch in &config.block_list {
        pattern.push('|');
        pattern.push_str(&escape(ch));
    }
    pattern.push(')');

    pattern
}

fn escape(ch: char) -> String {
    let mut buf = [0u8; 4];
    fancy_regex::escape(ch.encode_utf8(&mut buf)).into_owned()
}
