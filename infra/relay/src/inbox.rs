use demoji_domain::RelayMessage;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The receiving end handed to one document instance by [`Relay::attach`].
///
/// Dropping the inbox detaches the instance.
///
/// [`Relay::attach`]: crate::Relay::attach
#[derive(Debug)]
pub struct RelayInbox {
    id: u64,
    label: Arc<str>,
    receiver: mpsc::Receiver<Arc<RelayMessage>>,
}

impl RelayInbox {
    pub(crate) const fn new(
        id: u64,
        label: Arc<str>,
        receiver: mpsc::Receiver<Arc<RelayMessage>>,
    ) -> Self {
        Self { id, label, receiver }
    }

    /// Receive the next message, returning `None` once the relay has shut down.
    pub async fn recv(&mut self) -> Option<Arc<RelayMessage>> {
        self.receiver.recv().await
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
