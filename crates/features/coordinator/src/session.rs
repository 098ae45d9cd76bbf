use crate::event::ChangeEvent;
use crate::shared::SharedDocument;
use demoji_dom::{Document, ObserverOptions};
use demoji_domain::config::EngineConfig;
use demoji_domain::constants::TITLE_ATTRIBUTE;
use demoji_domain::{FilterConfig, RelayMessage, StateUpdate};
use demoji_filter::{CompiledRule, ScrubReport, compile, scrub, scrub_node};
use demoji_relay::RelayInbox;
use demoji_storage::SettingsStore;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bound of the initial settings read when none is configured.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1_500);

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `start` has not completed yet.
    Uninitialized,
    /// Scrubbing and observing.
    Active,
    /// Disabled: no scrubbing, no observation.
    Idle,
}

/// What a configuration change led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOutcome {
    /// The mode entered after the reload.
    pub mode: Mode,
    /// The full-document scrub performed on entering [`Mode::Active`]; empty otherwise.
    pub report: ScrubReport,
}

/// All mutable engine state of one document instance.
///
/// The session never owns the document; every operation borrows it, so the host keeps
/// editing the document between calls and hands the queued records over with
/// [`Session::pump`]. [`Session::run`] drives a [`SharedDocument`] instead and pumps on
/// every host edit by itself.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    read_timeout: Duration,
    mode: Mode,
    config: FilterConfig,
    rule: Option<CompiledRule>,
}

impl<S: SettingsStore> Session<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            read_timeout: DEFAULT_READ_TIMEOUT,
            mode: Mode::Uninitialized,
            config: FilterConfig::disabled(),
            rule: None,
        }
    }

    #[must_use]
    pub fn from_config(store: S, config: &EngineConfig) -> Self {
        Self::new(store).with_read_timeout(Duration::from_millis(config.config_read_timeout_ms))
    }

    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The configuration currently in force.
    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// The compiled rule; present only while [`Mode::Active`].
    #[must_use]
    pub const fn rule(&self) -> Option<&CompiledRule> {
        self.rule.as_ref()
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Reads the stored settings once and enters [`Mode::Active`] or [`Mode::Idle`].
    ///
    /// A failed, slow or empty read counts as disabled.
    pub async fn start(&mut self, doc: &mut Document) -> Mode {
        let config = self.read_config().await;
        self.begin(doc, config)
    }

    /// Reacts to one change event. Does nothing unless [`Mode::Active`].
    pub fn handle_change(&mut self, doc: &mut Document, event: &ChangeEvent) -> ScrubReport {
        let Some(rule) = self.rule.as_ref().filter(|_| self.mode == Mode::Active) else {
            return ScrubReport::default();
        };
        match event {
            ChangeEvent::NodesAdded { added } => {
                let mut report = ScrubReport::default();
                for &node in added {
                    report += scrub(doc, node, rule);
                }
                report
            },
            ChangeEvent::TextChanged { node } | ChangeEvent::TitleAttributeChanged { node } => {
                scrub_node(doc, *node, rule)
            },
        }
    }

    /// Drains the document's queued mutation records and handles them in order.
    ///
    /// Records caused by this session's own write-backs are drained by the same loop;
    /// they settle after one extra pass because unchanged values are never written.
    pub fn pump(&mut self, doc: &mut Document) -> ScrubReport {
        let mut report = ScrubReport::default();
        let mut events = 0usize;
        while let Some(record) = doc.next_record() {
            if let Some(event) = ChangeEvent::from_record(record) {
                events += 1;
                report += self.handle_change(doc, &event);
            }
        }
        if events > 0 {
            debug!(
                events,
                visited = report.visited,
                rewritten = report.rewritten,
                "Mutations handled"
            );
        }
        report
    }

    /// Applies a configuration change: stop observing, merge the present fields, reload
    /// the document from its pristine source and re-enter under the merged config.
    pub fn apply_update(&mut self, doc: &mut Document, update: &StateUpdate) -> ResetOutcome {
        doc.disconnect();
        self.rule = None;
        self.config = self.config.merged(update);
        doc.reload();

        let report = self.enter(doc);
        info!(
            mode = ?self.mode,
            enabled = self.config.enabled,
            allow = self.config.allow_list.len(),
            block = self.config.block_list.len(),
            "Configuration changed; document reset"
        );
        ResetOutcome { mode: self.mode, report }
    }

    pub fn handle_message(&mut self, doc: &mut Document, message: &RelayMessage) -> ResetOutcome {
        self.apply_update(doc, message.update())
    }

    /// Starts the session if needed, then serves `doc` until the inbox closes.
    ///
    /// Relay messages are applied in arrival order. Edits the host makes through
    /// [`SharedDocument::edit`] are pumped as they happen. The document is locked only
    /// while a message or an edit is being handled. Returns the final mode.
    pub async fn run(&mut self, doc: &SharedDocument, mut inbox: RelayInbox) -> Mode {
        if self.mode == Mode::Uninitialized {
            let config = self.read_config().await;
            self.begin(&mut doc.lock(), config);
        }
        self.pump(&mut doc.lock());

        let label = inbox.label().to_owned();
        loop {
            tokio::select! {
                message = inbox.recv() => {
                    let Some(message) = message else { break };
                    debug!(instance = %label, "Relay message received");
                    let mut guard = doc.lock();
                    self.handle_message(&mut guard, &message);
                    self.pump(&mut guard);
                },
                () = doc.edited() => {
                    self.pump(&mut doc.lock());
                },
            }
        }
        // Edits that raced the shutdown.
        self.pump(&mut doc.lock());

        debug!(instance = %label, mode = ?self.mode, "Relay closed; session finished");
        self.mode
    }

    fn begin(&mut self, doc: &mut Document, config: FilterConfig) -> Mode {
        self.config = config;
        let report = self.enter(doc);
        info!(
            mode = ?self.mode,
            visited = report.visited,
            removed_from = report.rewritten,
            "Filter session started"
        );
        self.mode
    }

    async fn read_config(&self) -> FilterConfig {
        match tokio::time::timeout(self.read_timeout, self.store.load()).await {
            Ok(Ok(stored)) if !stored.is_empty() => stored.resolve(),
            Ok(Ok(_)) => {
                warn!("No stored settings; filtering disabled");
                FilterConfig::disabled()
            },
            Ok(Err(e)) => {
                warn!(err = %e, "Settings unavailable; filtering disabled");
                FilterConfig::disabled()
            },
            Err(_) => {
                warn!(
                    timeout_ms = self.read_timeout.as_millis(),
                    "Settings read timed out; filtering disabled"
                );
                FilterConfig::disabled()
            },
        }
    }

    /// Enters the mode dictated by `self.config`; expects observation to be torn down.
    fn enter(&mut self, doc: &mut Document) -> ScrubReport {
        if !self.config.enabled {
            self.rule = None;
            self.mode = Mode::Idle;
            return ScrubReport::default();
        }

        let rule = compile(&self.config);
        let root = doc.document_element().unwrap_or_else(|| doc.document());
        let report = scrub(doc, root, &rule);

        let options = ObserverOptions::new()
            .child_list()
            .character_data()
            .attribute_filter([TITLE_ATTRIBUTE])
            .subtree();
        if let Err(e) = doc.observe(root, options) {
            // Only reachable with a stale root, which `scrub` has already skipped.
            warn!(err = %e, "Could not observe document");
        }

        self.rule = Some(rule);
        self.mode = Mode::Active;
        report
    }
}
