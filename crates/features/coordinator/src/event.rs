use demoji_dom::{MutationRecord, NodeId};
use demoji_domain::constants::TITLE_ATTRIBUTE;

/// One document mutation the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Nodes were inserted; each is scrubbed together with its descendants.
    NodesAdded { added: Vec<NodeId> },
    /// A text payload was written.
    TextChanged { node: NodeId },
    /// A `title` attribute was written.
    TitleAttributeChanged { node: NodeId },
}

impl ChangeEvent {
    /// Maps a raw mutation record onto the events the engine cares about.
    ///
    /// Pure removals and writes to other attributes map to `None`.
    #[must_use]
    pub fn from_record(record: MutationRecord) -> Option<Self> {
        match record {
            MutationRecord::ChildList { added, .. } if !added.is_empty() => {
                Some(Self::NodesAdded { added })
            },
            MutationRecord::ChildList { .. } => None,
            MutationRecord::CharacterData { target } => Some(Self::TextChanged { node: target }),
            MutationRecord::Attributes { target, name } if name == TITLE_ATTRIBUTE => {
                Some(Self::TitleAttributeChanged { node: target })
            },
            MutationRecord::Attributes { .. } => None,
        }
    }
}
