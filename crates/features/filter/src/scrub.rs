//! # Tree Scrubber
//!
//! Removes matched characters from a document subtree in place. Text directly inside
//! `script`, `style` or `textarea` is never touched; comments are ignored. Values are
//! written back only when removal changed them, so a second pass over the same
//! subtree writes nothing.

use crate::pattern::CompiledRule;
use demoji_dom::{Document, NodeId, NodeType};
use demoji_domain::constants::{EXCLUDED_PARENTS, TITLE_ATTRIBUTE};
use std::borrow::Cow;
use std::ops::AddAssign;
use tracing::trace;

/// Cost and effect of one scrub pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrubReport {
    /// Nodes popped from the work-list, including skipped ones.
    pub visited: usize,
    /// Text payloads and `title` values that were written back.
    pub rewritten: usize,
}

impl AddAssign for ScrubReport {
    fn add_assign(&mut self, rhs: Self) {
        self.visited += rhs.visited;
        self.rewritten += rhs.rewritten;
    }
}

/// Scrubs `node` and all of its descendants.
///
/// Stale handles (from before a document reload) are tolerated and yield an empty
/// report. Detached nodes are scrubbed like any other.
pub fn scrub(doc: &mut Document, node: NodeId, rule: &CompiledRule) -> ScrubReport {
    let mut report = ScrubReport::default();
    if !doc.contains(node) {
        trace!(%node, "Scrub skipped: stale node");
        return report;
    }

    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        report.visited += 1;
        match doc.node_type(current) {
            Some(NodeType::Text) => {
                if is_excluded(doc, current) {
                    continue;
                }
                if let Some(cleaned) = doc.text(current).and_then(|t| changed(rule, t))
                    && doc.set_text(current, cleaned).is_ok()
                {
                    report.rewritten += 1;
                }
            },
            Some(NodeType::Element) => {
                if let Some(cleaned) =
                    doc.attribute(current, TITLE_ATTRIBUTE).and_then(|t| changed(rule, t))
                    && doc.set_attribute(current, TITLE_ATTRIBUTE, cleaned).is_ok()
                {
                    report.rewritten += 1;
                }
                push_children(doc, current, &mut stack);
            },
            Some(NodeType::Document) => push_children(doc, current, &mut stack),
            Some(NodeType::Comment) | None => {},
        }
    }

    if report.rewritten > 0 {
        trace!(%node, visited = report.visited, rewritten = report.rewritten, "Subtree scrubbed");
    }
    report
}

/// Scrubs `node` alone: the payload of a text node or the `title` of an element.
/// Children are not visited.
pub fn scrub_node(doc: &mut Document, node: NodeId, rule: &CompiledRule) -> ScrubReport {
    let mut report = ScrubReport::default();
    match doc.node_type(node) {
        Some(NodeType::Text) => {
            report.visited = 1;
            if !is_excluded(doc, node)
                && let Some(cleaned) = doc.text(node).and_then(|t| changed(rule, t))
                && doc.set_text(node, cleaned).is_ok()
            {
                report.rewritten = 1;
            }
        },
        Some(NodeType::Element) => {
            report.visited = 1;
            if let Some(cleaned) =
                doc.attribute(node, TITLE_ATTRIBUTE).and_then(|t| changed(rule, t))
                && doc.set_attribute(node, TITLE_ATTRIBUTE, cleaned).is_ok()
            {
                report.rewritten = 1;
            }
        },
        Some(NodeType::Document | NodeType::Comment) => report.visited = 1,
        None => trace!(%node, "Scrub skipped: stale node"),
    }
    report
}

/// Whether the text node `node` sits directly inside an element whose content must
/// not be altered.
#[must_use]
pub fn is_excluded(doc: &Document, node: NodeId) -> bool {
    doc.parent(node)
        .and_then(|parent| doc.tag_name(parent))
        .is_some_and(|tag| EXCLUDED_PARENTS.iter().any(|ex| tag.eq_ignore_ascii_case(ex)))
}

fn changed(rule: &CompiledRule, value: &str) -> Option<String> {
    match rule.remove_from(value) {
        Cow::Owned(cleaned) => Some(cleaned),
        Cow::Borrowed(_) => None,
    }
}

/// Pushes children so that they pop in document order.
fn push_children(doc: &Document, node: NodeId, stack: &mut Vec<NodeId>) {
    let first = stack.len();
    stack.extend(doc.children(node));
    stack[first..].reverse();
}
