//! # Emoji Filter
//!
//! The two stateless halves of the filtering engine:
//!
//! 1.  **Compilation ([`pattern`]):** turns a [`FilterConfig`] into one [`CompiledRule`]
//!     matching every base-table emoji and block-listed character, except those on the
//!     allow-list.
//! 2.  **Scrubbing ([`scrub`]):** walks a document subtree and removes what the rule
//!     matches from text nodes and `title` attributes, in place.
//!
//! ```rust
//! use demoji_domain::FilterConfig;
//! use demoji_filter::compile;
//!
//! let rule = compile(&FilterConfig::from_raw(true, "😀", ""));
//! assert_eq!(rule.remove_from("Hello 😀 World 🚀"), "Hello 😀 World ");
//! ```
//!
//! [`FilterConfig`]: demoji_domain::FilterConfig

pub mod pattern;
pub mod scrub;

pub use pattern::{BASE_RANGES, CompiledRule, compile};
pub use scrub::{ScrubReport, is_excluded, scrub, scrub_node};
