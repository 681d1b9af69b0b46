//! Convenience queries over parsed node trees.

use crate::{
    visit::{self, Visitor},
    Node,
};
use core::fmt::{self, Write as _};

/// Extracts all text from a node tree.
pub struct TextContent<W>
where
    W: fmt::Write,
{
    /// The accumulated text.
    content: W,
}

impl<W> TextContent<W>
where
    W: fmt::Write,
{
    /// Creates a new text content extractor with the given output.
    pub fn new(content: W) -> Self {
        Self { content }
    }

    /// Returns the text content, consuming the extractor.
    pub fn finish(self) -> W {
        self.content
    }
}

impl<'tt, W> Visitor<'tt, fmt::Error> for TextContent<W>
where
    W: fmt::Write,
{
    fn visit_text(&mut self, content: &'tt str) -> fmt::Result {
        self.content.write_str(content)
    }
}

/// Concatenates the content of all text leaves in depth-first order, then
/// trims the result.
#[must_use]
pub fn extract_text(nodes: &[Node]) -> String {
    let mut extractor = TextContent::new(String::new());
    // writing into a String cannot fail
    let _ = visit::visit_nodes(&mut extractor, nodes);
    extractor.finish().trim_ascii().to_string()
}

/// Collects every template node, depth first.
#[must_use]
pub fn find_templates(nodes: &[Node]) -> Vec<&Node> {
    collect(nodes, &|node| matches!(node, Node::Template { .. }))
}

/// Collects every link-family node: links, categories, files, and
/// interlanguage links.
#[must_use]
pub fn find_links(nodes: &[Node]) -> Vec<&Node> {
    collect(nodes, &|node| {
        matches!(
            node,
            Node::Link { .. } | Node::Category { .. } | Node::File { .. } | Node::InterlangLink { .. }
        )
    })
}

/// Collects every header node, depth first.
#[must_use]
pub fn find_headers(nodes: &[Node]) -> Vec<&Node> {
    collect(nodes, &|node| matches!(node, Node::Header { .. }))
}

fn collect<'a>(nodes: &'a [Node], wanted: &dyn Fn(&Node) -> bool) -> Vec<&'a Node> {
    let mut found = Vec::new();
    fill(nodes, wanted, &mut found);
    found
}

fn fill<'a>(nodes: &'a [Node], wanted: &dyn Fn(&Node) -> bool, found: &mut Vec<&'a Node>) {
    for node in nodes {
        if wanted(node) {
            found.push(node);
        }
        if let Node::Template { args, .. } = node {
            for arg in args {
                fill(arg.value(), wanted, found);
            }
        }
        fill(node.children(), wanted, found);
    }
}
