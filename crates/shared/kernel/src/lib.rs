//! Kernel utilities shared across front ends.
//! Keep this crate lightweight; it re-exports the domain and hosts the layered config loader.
//!
//! ## Config loading (non-wasm)
//! ```rust,no_run
//! use demoji_kernel::config::load_config;
//! use demoji_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("demoji")).unwrap_or_default();
//! assert!(cfg.relay.capacity > 0);
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use demoji_domain as domain;
