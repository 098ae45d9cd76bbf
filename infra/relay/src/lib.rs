//! # Relay
//!
//! Carries [`RelayMessage`]s from the settings editor to every document instance that
//! runs the engine.
//!
//! Each instance attaches once and receives its own bounded queue ([`RelayInbox`]).
//! Every instance sees every change in forwarding order: a full queue makes
//! [`Relay::forward`] wait for that instance, and an instance whose inbox was dropped
//! is pruned on the next forward.
//!
//! # Example
//!
//! ```rust
//! use demoji_relay::{Relay, RelayError};
//! use demoji_domain::{RelayMessage, StateUpdate};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), RelayError> {
//!     let relay = Relay::with_capacity(8)?;
//!     let mut inbox = relay.attach("tab-1");
//!
//!     let reached = relay.forward(RelayMessage::from(StateUpdate {
//!         enabled: Some(false),
//!         ..StateUpdate::default()
//!     })).await;
//!     assert_eq!(reached, 1);
//!
//!     let msg = inbox.recv().await.unwrap();
//!     assert_eq!(msg.update().enabled, Some(false));
//!     Ok(())
//! }
//! ```
//!
//! [`RelayMessage`]: demoji_domain::RelayMessage

mod error;
mod inbox;
mod relay;

pub use error::{RelayError, RelayErrorExt};
pub use inbox::RelayInbox;
pub use relay::{Relay, parse_message};
