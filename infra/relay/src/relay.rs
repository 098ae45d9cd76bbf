use crate::error::{RelayError, RelayErrorExt};
use crate::inbox::RelayInbox;
use demoji_domain::RelayMessage;
use demoji_domain::constants::UPDATE_STATE_ACTION;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, trace};

/// Configuration changes are rare and tiny; a full inbox only delays the sender.
const DEFAULT_CAPACITY: usize = 16;
const MIN_CAPACITY: usize = 1;

#[derive(Debug)]
struct Instance {
    label: Arc<str>,
    sender: mpsc::Sender<Arc<RelayMessage>>,
}

#[derive(Debug)]
struct RelayInner {
    capacity: usize,
    next_id: AtomicU64,
    instances: RwLock<FxHashMap<u64, Instance>>,
}

/// Thread-safe fan-out hub between the settings editor and document instances.
///
/// Cheap to clone; all clones share the same set of attached instances.
#[derive(Debug, Clone)]
pub struct Relay {
    inner: Arc<RelayInner>,
}

impl Default for Relay {
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY)
    }
}

impl Relay {
    /// Creates a relay with the default per-instance capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a relay whose inboxes each buffer up to `capacity` messages.
    ///
    /// # Errors
    /// Returns [`RelayError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, RelayError> {
        Ok(Self::build(validate_capacity(capacity)?))
    }

    fn build(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                capacity,
                next_id: AtomicU64::new(1),
                instances: RwLock::new(FxHashMap::default()),
            }),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Registers a document instance and returns its inbox.
    #[must_use]
    pub fn attach(&self, label: impl Into<Arc<str>>) -> RelayInbox {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let label = label.into();
        let (sender, receiver) = mpsc::channel(self.inner.capacity);

        self.inner.instances.write().insert(id, Instance { label: label.clone(), sender });
        trace!(id, label = %label, "Instance attached");

        RelayInbox::new(id, label, receiver)
    }

    /// Sends `message` to every attached instance.
    ///
    /// Returns how many instances accepted it. A full inbox makes this wait until the
    /// instance catches up, so no instance ever misses a change. Instances whose inbox
    /// is gone are pruned silently.
    pub async fn forward(&self, message: impl Into<Arc<RelayMessage>>) -> usize {
        let message = message.into();
        let targets: Vec<(u64, Arc<str>, mpsc::Sender<Arc<RelayMessage>>)> = self
            .inner
            .instances
            .read()
            .iter()
            .map(|(id, instance)| (*id, instance.label.clone(), instance.sender.clone()))
            .collect();

        let mut delivered = 0usize;
        let mut closed = Vec::new();
        for (id, label, sender) in targets {
            let sent = match sender.try_send(message.clone()) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(pending)) => {
                    debug!(
                        id,
                        label = %label,
                        capacity = self.inner.capacity,
                        "Relay inbox full; waiting for the instance"
                    );
                    sender.send(pending).await.map_err(drop)
                },
                Err(TrySendError::Closed(_)) => Err(()),
            };
            match sent {
                Ok(()) => delivered += 1,
                Err(()) => closed.push(id),
            }
        }

        if !closed.is_empty() {
            let mut instances = self.inner.instances.write();
            for id in &closed {
                instances.remove(id);
            }
            drop(instances);
            debug!(pruned = closed.len(), "Detached instances without a live inbox");
        }

        trace!(delivered, "Message forwarded");
        delivered
    }

    /// Decodes a raw notification and forwards it when it is one the engine understands.
    ///
    /// Returns `None` for foreign actions and undecodable payloads.
    pub async fn forward_raw(&self, raw: &str) -> Option<usize> {
        let message = parse_message(raw)?;
        Some(self.forward(message).await)
    }

    /// Labels of the instances currently attached, in no particular order.
    #[must_use]
    pub fn instances(&self) -> Vec<Arc<str>> {
        self.inner.instances.read().values().map(|i| i.label.clone()).collect()
    }

    /// Closes every inbox. Returns the number of instances that were detached.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut instances = self.inner.instances.write();
        let count = instances.len();
        instances.clear();
        count
    }
}

/// Decodes a JSON notification such as `{"action":"updateState","enabled":false}`.
///
/// Messages carrying any other action are ignored (`None`), as are payloads that
/// do not decode at all; the latter are logged at `debug`.
#[must_use]
pub fn parse_message(raw: &str) -> Option<RelayMessage> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            debug!(err = %e, "Ignoring undecodable relay payload");
            return None;
        },
    };
    if value.get("action").and_then(serde_json::Value::as_str) != Some(UPDATE_STATE_ACTION) {
        trace!("Ignoring relay payload with a foreign action");
        return None;
    }
    decode(value).inspect_err(|e| debug!(err = %e, "Ignoring malformed updateState")).ok()
}

fn decode(value: serde_json::Value) -> Result<RelayMessage, RelayError> {
    serde_json::from_value(value).context("updateState")
}

fn validate_capacity(capacity: usize) -> Result<usize, RelayError> {
    if capacity < MIN_CAPACITY {
        return Err(RelayError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
