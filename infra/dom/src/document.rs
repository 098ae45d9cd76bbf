use crate::error::DomError;
use crate::node::{NodeData, NodeId, NodeType, Payload};
use crate::observer::{MutationRecord, Observer, ObserverOptions};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

const DOCUMENT_INDEX: u32 = 0;

/// A live document tree.
///
/// The document owns every node. Nodes are never freed; removing a child only
/// detaches it, so a detached handle keeps working until the next reload.
#[derive(Debug, Clone)]
pub struct Document {
    generation: u32,
    nodes: Vec<NodeData>,
    pristine: Arc<Vec<NodeData>>,
    observer: Option<Observer>,
    records: VecDeque<MutationRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an `html` document with empty `head` and `body` and marks it loaded.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.link(DOCUMENT_INDEX, html.index());
        doc.link(html.index(), head.index());
        doc.link(html.index(), body.index());
        doc.mark_loaded();
        doc
    }

    /// Creates a document with no document element.
    #[must_use]
    pub fn empty() -> Self {
        let nodes = vec![NodeData::new(Payload::Document)];
        Self {
            generation: 1,
            pristine: Arc::new(nodes.clone()),
            nodes,
            observer: None,
            records: VecDeque::new(),
        }
    }

    /// Captures the current tree as the pristine source restored by [`Document::reload`].
    pub fn mark_loaded(&mut self) {
        self.pristine = Arc::new(self.nodes.clone());
        trace!(nodes = self.nodes.len(), "Pristine snapshot captured");
    }

    /// Throws away every mutation made since load and rebuilds the tree from the
    /// pristine snapshot.
    ///
    /// Observation is torn down, pending records are discarded and every handle
    /// taken before the reload becomes stale.
    pub fn reload(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.nodes = (*self.pristine).clone();
        self.observer = None;
        self.records.clear();
        debug!(generation = self.generation, "Document reloaded from pristine source");
    }

    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    // ---------------------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------------------

    /// The document node itself.
    #[must_use]
    pub const fn document(&self) -> NodeId {
        NodeId::new(DOCUMENT_INDEX, self.generation)
    }

    /// The root element (`<html>`), if any.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.nodes[DOCUMENT_INDEX as usize]
            .children
            .iter()
            .copied()
            .find(|&i| matches!(self.nodes[i as usize].payload, Payload::Element { .. }))
            .map(|i| self.id(i))
    }

    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.root_child("head")
    }

    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.root_child("body")
    }

    /// Whether `id` is a handle of the current generation.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// Whether `id` is live and attached to the document node.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.slot(id).is_some_and(|index| self.ancestors_of(index).any(|i| i == DOCUMENT_INDEX))
    }

    #[must_use]
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.data(id).map(|n| n.payload.node_type())
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).and_then(|n| n.parent).map(|i| self.id(i))
    }

    /// Children of `id` in document order; empty for stale handles and leaves.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let generation = self.generation;
        self.data(id)
            .into_iter()
            .flat_map(move |n| n.children.iter().map(move |&i| NodeId::new(i, generation)))
    }

    /// `id` and all of its descendants in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let Some(start) = self.slot(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            out.push(self.id(index));
            stack.extend(self.nodes[index as usize].children.iter().rev());
        }
        out
    }

    /// Every connected element whose tag matches `tag` (ASCII case-insensitive).
    #[must_use]
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.document())
            .into_iter()
            .filter(|&id| self.tag_name(id).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.data(id)?.payload {
            Payload::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.data(id)?.payload {
            Payload::Element { attributes, .. } => {
                attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
            },
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        let attributes: &[(String, String)] = match self.data(id).map(|n| &n.payload) {
            Some(Payload::Element { attributes, .. }) => attributes.as_slice(),
            _ => &[],
        };
        attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Payload of a text or comment node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.data(id)?.payload {
            Payload::Text(text) | Payload::Comment(text) => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of every text node under `id` (comments excluded).
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| match &self.data(d)?.payload {
                Payload::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    // ---------------------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------------------

    /// Allocates a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(Payload::Element { tag: tag.into(), attributes: Vec::new() })
    }

    /// Allocates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Payload::Text(text.into()))
    }

    /// Allocates a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Payload::Comment(text.into()))
    }

    /// Appends `child` as the last child of `parent`, detaching it from its current
    /// parent first.
    ///
    /// # Errors
    /// [`DomError::StaleNode`] for dead handles and [`DomError::HierarchyRequest`] when
    /// `parent` cannot hold children or `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let p = self.slot(parent).ok_or_else(|| DomError::stale(parent))?;
        let c = self.slot(child).ok_or_else(|| DomError::stale(child))?;

        if !matches!(self.nodes[p as usize].payload, Payload::Document | Payload::Element { .. }) {
            return Err(DomError::hierarchy(format!("{parent} cannot have children")));
        }
        if matches!(self.nodes[c as usize].payload, Payload::Document) {
            return Err(DomError::hierarchy("the document node cannot be inserted"));
        }
        if self.ancestors_of(p).any(|a| a == c) {
            return Err(DomError::hierarchy(format!("{child} is an ancestor of {parent}")));
        }

        if let Some(old) = self.nodes[c as usize].parent {
            self.unlink(old, c);
            let target = self.id(old);
            let removed = vec![child];
            self.queue(MutationRecord::ChildList { target, added: Vec::new(), removed });
        }

        self.link(p, c);
        self.queue(MutationRecord::ChildList {
            target: parent,
            added: vec![child],
            removed: Vec::new(),
        });
        Ok(())
    }

    /// Detaches `child` from `parent`. The child and its subtree stay allocated.
    ///
    /// # Errors
    /// [`DomError::StaleNode`] for dead handles and [`DomError::HierarchyRequest`] if
    /// `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let p = self.slot(parent).ok_or_else(|| DomError::stale(parent))?;
        let c = self.slot(child).ok_or_else(|| DomError::stale(child))?;
        if self.nodes[c as usize].parent != Some(p) {
            return Err(DomError::hierarchy(format!("{child} is not a child of {parent}")));
        }

        self.unlink(p, c);
        self.queue(MutationRecord::ChildList {
            target: parent,
            added: Vec::new(),
            removed: vec![child],
        });
        Ok(())
    }

    /// Replaces the payload of a text or comment node.
    ///
    /// The write is recorded even if `text` equals the current payload.
    ///
    /// # Errors
    /// [`DomError::StaleNode`] or [`DomError::WrongNodeType`] for elements.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        let index = self.slot(id).ok_or_else(|| DomError::stale(id))?;
        match &mut self.nodes[index as usize].payload {
            Payload::Text(current) | Payload::Comment(current) => *current = text.into(),
            _ => return Err(DomError::wrong_type(id, "text or comment")),
        }
        self.queue(MutationRecord::CharacterData { target: id });
        Ok(())
    }

    /// Sets attribute `name` on an element, adding it if absent.
    ///
    /// The write is recorded even if the value is unchanged.
    ///
    /// # Errors
    /// [`DomError::StaleNode`] or [`DomError::WrongNodeType`] for non-elements.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let index = self.slot(id).ok_or_else(|| DomError::stale(id))?;
        let Payload::Element { attributes, .. } = &mut self.nodes[index as usize].payload else {
            return Err(DomError::wrong_type(id, "element"));
        };
        let value = value.into();
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, current)) => *current = value,
            None => attributes.push((name.to_owned(), value)),
        }
        self.queue(MutationRecord::Attributes { target: id, name: name.to_owned() });
        Ok(())
    }

    /// Removes attribute `name`, returning its previous value.
    ///
    /// # Errors
    /// [`DomError::StaleNode`] or [`DomError::WrongNodeType`] for non-elements.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        let index = self.slot(id).ok_or_else(|| DomError::stale(id))?;
        let Payload::Element { attributes, .. } = &mut self.nodes[index as usize].payload else {
            return Err(DomError::wrong_type(id, "element"));
        };
        let Some(pos) = attributes.iter().position(|(n, _)| n == name) else {
            return Ok(None);
        };
        let (_, old) = attributes.remove(pos);
        self.queue(MutationRecord::Attributes { target: id, name: name.to_owned() });
        Ok(Some(old))
    }

    // ---------------------------------------------------------------------------------
    // Observation
    // ---------------------------------------------------------------------------------

    /// Starts recording mutations of `root` (and its subtree if requested), replacing
    /// any previous observation.
    ///
    /// # Errors
    /// [`DomError::StaleNode`] if `root` is not a live handle.
    pub fn observe(&mut self, root: NodeId, options: ObserverOptions) -> Result<(), DomError> {
        if !self.contains(root) {
            return Err(DomError::stale(root));
        }
        debug!(%root, ?options, "Observation started");
        self.observer = Some(Observer { root, options });
        Ok(())
    }

    /// Stops recording and discards records that were not taken yet.
    pub fn disconnect(&mut self) {
        if self.observer.take().is_some() {
            debug!(dropped = self.records.len(), "Observation stopped");
        }
        self.records.clear();
    }

    #[must_use]
    pub const fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    #[must_use]
    pub fn pending_records(&self) -> usize {
        self.records.len()
    }

    /// Drains every queued record.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        self.records.drain(..).collect()
    }

    /// Takes the oldest queued record.
    pub fn next_record(&mut self) -> Option<MutationRecord> {
        self.records.pop_front()
    }

    // ---------------------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------------------

    pub(crate) const fn id(&self, index: u32) -> NodeId {
        NodeId::new(index, self.generation)
    }

    pub(crate) fn slot(&self, id: NodeId) -> Option<u32> {
        (id.generation() == self.generation && (id.index() as usize) < self.nodes.len())
            .then_some(id.index())
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.slot(id).map(|i| &self.nodes[i as usize])
    }

    pub(crate) fn node_at(&self, index: u32) -> &NodeData {
        &self.nodes[index as usize]
    }

    pub(crate) fn alloc(&mut self, payload: Payload) -> NodeId {
        // Arena growth past u32::MAX nodes is not a realistic document.
        #[allow(clippy::cast_possible_truncation)]
        let index = self.nodes.len() as u32;
        self.nodes.push(NodeData::new(payload));
        self.id(index)
    }

    /// Attaches without recording; used while building and by `append_child`.
    pub(crate) fn link(&mut self, parent: u32, child: u32) {
        self.nodes[parent as usize].children.push(child);
        self.nodes[child as usize].parent = Some(parent);
    }

    fn unlink(&mut self, parent: u32, child: u32) {
        self.nodes[parent as usize].children.retain(|&c| c != child);
        self.nodes[child as usize].parent = None;
    }

    /// `index` followed by its ancestors up to the topmost one.
    fn ancestors_of(&self, index: u32) -> impl Iterator<Item = u32> + '_ {
        std::iter::successors(Some(index), |&i| self.nodes[i as usize].parent)
    }

    fn root_child(&self, tag: &str) -> Option<NodeId> {
        let root = self.document_element()?;
        self.children(root).find(|&c| self.tag_name(c).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }

    fn queue(&mut self, record: MutationRecord) {
        let Some(observer) = &self.observer else {
            return;
        };
        if !observer.options.wants(&record) {
            return;
        }
        let Some(root) = self.slot(observer.root) else {
            return;
        };
        // A detached observed root makes observation inert.
        if !self.ancestors_of(root).any(|i| i == DOCUMENT_INDEX) {
            return;
        }
        let Some(target) = self.slot(record.target()) else {
            return;
        };
        let in_scope = if observer.options.subtree {
            self.ancestors_of(target).any(|i| i == root)
        } else {
            target == root
        };
        if in_scope {
            trace!(?record, "Mutation recorded");
            self.records.push_back(record);
        }
    }
}
