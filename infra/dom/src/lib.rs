//! # Document host
//!
//! An arena-backed document tree that behaves like the live document a browser hands
//! to a content script:
//!
//! * nodes are addressed by [`NodeId`] handles stamped with the document generation,
//!   so handles taken before a [`Document::reload`] become inert instead of dangling;
//! * every write goes through one mutation API and, while an observer is attached,
//!   queues a [`MutationRecord`] (even when the written value is unchanged);
//! * [`Document::reload`] rebuilds the tree from the pristine snapshot taken at load.
//!
//! With the `html` feature (on by default) [`Document::parse_html`] builds a document
//! from HTML source.
//!
//! ```rust
//! use demoji_dom::{Document, ObserverOptions, MutationRecord};
//!
//! let mut doc = Document::new();
//! let body = doc.body().unwrap();
//! let root = doc.document_element().unwrap();
//! doc.observe(root, ObserverOptions::new().child_list().subtree()).unwrap();
//!
//! let text = doc.create_text("hi");
//! doc.append_child(body, text).unwrap();
//!
//! let records = doc.take_records();
//! assert!(matches!(&records[..], [MutationRecord::ChildList { added, .. }] if added == &[text]));
//! ```

mod document;
mod error;
#[cfg(feature = "html")]
mod html;
mod node;
mod observer;
mod serialize;

pub use document::Document;
pub use error::DomError;
pub use node::{NodeId, NodeType};
pub use observer::{MutationRecord, ObserverOptions};
