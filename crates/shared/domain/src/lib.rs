//! # Domain Models
//!
//! This crate contains pure domain types with a single dependency (`serde`).
//! Keep it lean: no I/O, no pattern matching, no document access, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod filter;
pub mod messages;
pub mod settings;

pub use filter::FilterConfig;
pub use messages::{RelayMessage, StateUpdate};
pub use settings::StoredSettings;
