//! # Mutation Coordinator
//!
//! Owns the engine state for one document instance in a [`Session`]:
//!
//! * **start**: one bounded read of the stored settings; anything but a usable
//!   answer leaves the session idle (fail-closed);
//! * **active**: the whole document is scrubbed once, then only what the mutation
//!   stream reports as added or edited is scrubbed again;
//! * **reset**: a configuration change tears observation down, reloads the document
//!   from its pristine source and starts over under the merged configuration.
//!
//! ```rust
//! use demoji_coordinator::{Mode, Session};
//! use demoji_dom::Document;
//! use demoji_domain::StoredSettings;
//! use demoji_storage::MemorySettingsStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = MemorySettingsStore::new(StoredSettings {
//!     enabled: Some(true),
//!     ..Default::default()
//! });
//! let mut doc = Document::parse_html("<p>Hello 😀 World 🚀</p>");
//! let mut session = Session::new(store);
//!
//! assert_eq!(session.start(&mut doc).await, Mode::Active);
//! assert_eq!(doc.text_content(doc.body().unwrap()), "Hello  World ");
//! # }
//! ```

mod event;
mod session;
mod shared;

pub use event::ChangeEvent;
pub use session::{DEFAULT_READ_TIMEOUT, Mode, ResetOutcome, Session};
pub use shared::SharedDocument;
