//! Shorthand constructors for building node trees.
//!
//! Mostly used by tests to state expected parses without spelling out every
//! field, but public because consumers comparing trees want them too.

use crate::{CellKind, ListKind, Node, TemplateArg};

/// A plain text node.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text {
        content: content.into(),
    }
}

/// A bold span.
pub fn bold(children: Vec<Node>) -> Node {
    Node::Bold { children }
}

/// An italic span.
pub fn italic(children: Vec<Node>) -> Node {
    Node::Italic { children }
}

/// A heading.
pub fn header(level: u8, children: Vec<Node>) -> Node {
    Node::Header { level, children }
}

/// An internal link.
pub fn link(target: impl Into<String>, display: impl Into<String>) -> Node {
    Node::Link {
        target: target.into(),
        display: display.into(),
    }
}

/// A category tag.
pub fn category(name: impl Into<String>) -> Node {
    Node::Category { name: name.into() }
}

/// A media link.
pub fn file(name: impl Into<String>, parameters: &[&str]) -> Node {
    Node::File {
        name: name.into(),
        parameters: parameters.iter().map(|p| (*p).to_string()).collect(),
    }
}

/// An interlanguage link.
pub fn interlang_link(lang: impl Into<String>, title: impl Into<String>) -> Node {
    Node::InterlangLink {
        lang: lang.into(),
        title: title.into(),
    }
}

/// A template invocation.
pub fn template(name: impl Into<String>, args: Vec<TemplateArg>) -> Node {
    Node::Template {
        name: name.into(),
        args,
    }
}

/// A positional template argument.
pub fn positional(value: Vec<Node>) -> TemplateArg {
    TemplateArg::Positional(value)
}

/// A named template argument.
pub fn named(key: impl Into<String>, value: Vec<Node>) -> TemplateArg {
    TemplateArg::Named(key.into(), value)
}

/// An HTML-like tag.
pub fn html_tag(tag: impl Into<String>, attributes: &[(&str, &str)], children: Vec<Node>) -> Node {
    Node::HtmlTag {
        tag: tag.into(),
        attributes: attributes
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect(),
        children,
    }
}

/// An HTML comment.
pub fn comment(content: impl Into<String>) -> Node {
    Node::Comment {
        content: content.into(),
    }
}

/// A literal region.
pub fn nowiki(content: impl Into<String>) -> Node {
    Node::Nowiki {
        content: content.into(),
    }
}

/// A citation tag.
pub fn reference(name: Option<&str>, group: Option<&str>, children: Vec<Node>) -> Node {
    Node::Ref {
        name: name.map(str::to_owned),
        group: group.map(str::to_owned),
        children,
    }
}

/// A list item line.
pub fn list_item(kind: ListKind, level: usize, children: Vec<Node>) -> Node {
    Node::ListItem {
        kind,
        level,
        children,
    }
}

/// A table.
pub fn table(children: Vec<Node>) -> Node {
    Node::Table { children }
}

/// A table row.
pub fn table_row(children: Vec<Node>) -> Node {
    Node::TableRow { children }
}

/// A table cell.
pub fn table_cell(kind: CellKind, children: Vec<Node>) -> Node {
    Node::TableCell { kind, children }
}
