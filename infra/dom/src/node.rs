use std::fmt;

/// Handle to a node of a [`Document`](crate::Document).
///
/// Handles are plain values; they stay valid until the document reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) const fn index(self) -> u32 {
        self.index
    }

    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}@{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Payload {
    Document,
    Element { tag: String, attributes: Vec<(String, String)> },
    Text(String),
    Comment(String),
}

impl Payload {
    pub(crate) const fn node_type(&self) -> NodeType {
        match self {
            Self::Document => NodeType::Document,
            Self::Element { .. } => NodeType::Element,
            Self::Text(_) => NodeType::Text,
            Self::Comment(_) => NodeType::Comment,
        }
    }
}

/// Arena slot. Links are arena indices; they are turned into [`NodeId`]s with the
/// current generation on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) payload: Payload,
    pub(crate) parent: Option<u32>,
    pub(crate) children: Vec<u32>,
}

impl NodeData {
    pub(crate) const fn new(payload: Payload) -> Self {
        Self { payload, parent: None, children: Vec::new() }
    }
}
