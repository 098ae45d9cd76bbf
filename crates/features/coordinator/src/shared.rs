use demoji_dom::Document;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug)]
struct SharedInner {
    doc: Mutex<Document>,
    edited: Notify,
}

/// A document shared between its host and a running [`Session::run`].
///
/// The host edits through [`SharedDocument::edit`], which wakes the session so the
/// queued mutation records are handled while it is also waiting for relay messages.
/// An edit made before the session gets to wait is not lost; the wake-up is kept.
///
/// Cheap to clone; all clones refer to the same document.
///
/// [`Session::run`]: crate::Session::run
#[derive(Debug, Clone)]
pub struct SharedDocument {
    inner: Arc<SharedInner>,
}

impl From<Document> for SharedDocument {
    fn from(doc: Document) -> Self {
        Self::new(doc)
    }
}

impl SharedDocument {
    #[must_use]
    pub fn new(doc: Document) -> Self {
        Self { inner: Arc::new(SharedInner { doc: Mutex::new(doc), edited: Notify::new() }) }
    }

    /// Runs `f` with exclusive access to the document, then wakes the session.
    pub fn edit<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let out = f(&mut *self.inner.doc.lock());
        self.inner.edited.notify_one();
        out
    }

    /// Runs `f` with read access to the document. Does not wake the session.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&*self.inner.doc.lock())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Document> {
        self.inner.doc.lock()
    }

    /// Resolves once an edit was made since the previous call.
    pub(crate) async fn edited(&self) {
        self.inner.edited.notified().await;
    }
}
