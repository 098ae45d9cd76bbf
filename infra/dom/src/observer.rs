use crate::node::NodeId;

/// What an observer wants to hear about. Mirrors the options of a host mutation observer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObserverOptions {
    pub child_list: bool,
    pub character_data: bool,
    pub attributes: bool,
    /// Restricts attribute records to these names. Setting a filter implies `attributes`.
    pub attribute_filter: Option<Vec<String>>,
    pub subtree: bool,
}

impl ObserverOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn child_list(mut self) -> Self {
        self.child_list = true;
        self
    }

    #[must_use]
    pub const fn character_data(mut self) -> Self {
        self.character_data = true;
        self
    }

    #[must_use]
    pub const fn attributes(mut self) -> Self {
        self.attributes = true;
        self
    }

    #[must_use]
    pub fn attribute_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_filter = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn subtree(mut self) -> Self {
        self.subtree = true;
        self
    }

    pub(crate) fn wants(&self, record: &MutationRecord) -> bool {
        match record {
            MutationRecord::ChildList { .. } => self.child_list,
            MutationRecord::CharacterData { .. } => self.character_data,
            MutationRecord::Attributes { name, .. } => match &self.attribute_filter {
                Some(filter) => filter.iter().any(|f| f == name),
                None => self.attributes,
            },
        }
    }
}

/// One observed change, queued in the order the writes happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// Children of `target` were inserted or removed.
    ChildList { target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId> },
    /// The payload of the text or comment node `target` was written.
    CharacterData { target: NodeId },
    /// Attribute `name` of the element `target` was written or removed.
    Attributes { target: NodeId, name: String },
}

impl MutationRecord {
    #[must_use]
    pub const fn target(&self) -> NodeId {
        match self {
            Self::ChildList { target, .. }
            | Self::CharacterData { target }
            | Self::Attributes { target, .. } => *target,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Observer {
    pub(crate) root: NodeId,
    pub(crate) options: ObserverOptions,
}
