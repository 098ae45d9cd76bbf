use crate::document::Document;
use crate::node::Payload;
use scraper::{Html, Node};
use tracing::debug;

impl Document {
    /// Parses an HTML document and marks the result as loaded.
    ///
    /// Parsing is lenient the way browsers are: missing `html`, `head` or `body`
    /// elements are synthesized. Doctypes and processing instructions are dropped.
    #[must_use]
    pub fn parse_html(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            debug!(errors = html.errors.len(), "HTML parsed with recoverable errors");
        }

        let mut doc = Self::empty();
        let root = doc.document().index();
        let mut stack = vec![(html.tree.root(), root)];

        while let Some((source_node, parent)) = stack.pop() {
            let mut created = Vec::new();
            for child in source_node.children() {
                let payload = match child.value() {
                    Node::Element(element) => Payload::Element {
                        tag: element.name().to_owned(),
                        attributes: element
                            .attrs()
                            .map(|(name, value)| (name.to_owned(), value.to_owned()))
                            .collect(),
                    },
                    Node::Text(text) => {
                        let text: &str = &text.text;
                        Payload::Text(text.to_owned())
                    },
                    Node::Comment(comment) => {
                        let comment: &str = &comment.comment;
                        Payload::Comment(comment.to_owned())
                    },
                    _ => continue,
                };
                let is_element = matches!(payload, Payload::Element { .. });
                let id = doc.alloc(payload).index();
                doc.link(parent, id);
                if is_element {
                    created.push((child, id));
                }
            }
            stack.extend(created.into_iter().rev());
        }

        doc.mark_loaded();
        doc
    }
}
