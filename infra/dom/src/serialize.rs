use crate::document::Document;
use crate::node::{NodeId, Payload};

const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

enum Step {
    Enter(u32),
    Close(u32),
}

impl Document {
    /// Serializes the whole document as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.document()) {
            if let Some(index) = self.slot(child) {
                self.write_node(index, &mut out);
            }
        }
        out
    }

    /// Serializes `id` including its own tag; empty for stale handles.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(index) = self.slot(id) {
            self.write_node(index, &mut out);
        }
        out
    }

    fn write_node(&self, start: u32, out: &mut String) {
        let mut stack = vec![Step::Enter(start)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(index) => {
                    let node = self.node_at(index);
                    match &node.payload {
                        Payload::Document => {
                            stack.extend(node.children.iter().rev().map(|&c| Step::Enter(c)));
                        },
                        Payload::Element { tag, attributes } => {
                            out.push('<');
                            out.push_str(tag);
                            for (name, value) in attributes {
                                out.push(' ');
                                out.push_str(name);
                                out.push_str("=\"");
                                escape_into(value, true, out);
                                out.push('"');
                            }
                            out.push('>');
                            if is_void(tag) {
                                continue;
                            }
                            stack.push(Step::Close(index));
                            stack.extend(node.children.iter().rev().map(|&c| Step::Enter(c)));
                        },
                        Payload::Text(text) => {
                            if self.in_raw_text(index) {
                                out.push_str(text);
                            } else {
                                escape_into(text, false, out);
                            }
                        },
                        Payload::Comment(text) => {
                            out.push_str("<!--");
                            out.push_str(text);
                            out.push_str("-->");
                        },
                    }
                },
                Step::Close(index) => {
                    if let Payload::Element { tag, .. } = &self.node_at(index).payload {
                        out.push_str("</");
                        out.push_str(tag);
                        out.push('>');
                    }
                },
            }
        }
    }

    fn in_raw_text(&self, index: u32) -> bool {
        self.node_at(index).parent.is_some_and(|p| match &self.node_at(p).payload {
            Payload::Element { tag, .. } => {
                RAW_TEXT_ELEMENTS.iter().any(|raw| tag.eq_ignore_ascii_case(raw))
            },
            _ => false,
        })
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
