//! A permissive MediaWiki wikitext parser.
//!
//! Wikitext mixes plain text with text-decoration runs, wiki links, templates,
//! HTML-like tags, comments, literal regions, lists, and tables. [`parse`]
//! scans a source string with a precedence-aware recursive-descent grammar and
//! produces a tree of typed [`Node`]s for downstream consumers to walk.
//!
//! Parsing never raises: a malformed fragment either demotes to plain text or
//! ends the parse, with the unconsumed suffix handed back in
//! [`Output::remainder`]. Templates, magic words, and parser functions are
//! preserved as nodes, not expanded.

pub use config::{Configuration, DEFAULT_RECURSION_LIMIT};
pub use helpers::{extract_text, find_headers, find_links, find_templates};
use std::{cell::Cell, collections::HashMap};

pub mod builder;
mod config;
pub mod helpers;
mod parser;
mod table;
#[cfg(test)]
mod tests;
pub mod visit;

/// A wikitext parser.
#[derive(Clone, Copy, Debug)]
pub struct Parser<'a> {
    /// The configuration for the parser.
    pub(crate) config: &'a Configuration,
}

impl<'a> Parser<'a> {
    /// Creates a new parser with the given configuration.
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Parses wikitext from `source` into a node tree.
    ///
    /// Leading and trailing ASCII whitespace is ignored. The driver consumes
    /// ordered alternatives until none matches; whatever is left becomes the
    /// remainder.
    pub fn parse(&self, source: &str) -> Output {
        let trimmed = source.trim_ascii();
        let lead = source.len() - source.trim_ascii_start().len();
        log::trace!("parsing {} bytes", trimmed.len());
        let globals = Globals::new(trimmed);
        let (mut nodes, mut consumed) = match parser::wikitext::document(
            trimmed,
            self,
            &globals,
            &parser::Context::default(),
        ) {
            Ok(parsed) => parsed,
            // `document` matches zero or more items and cannot reject.
            Err(_) => (Vec::new(), 0),
        };
        // A tripped limit makes every enclosing construct fail without
        // consuming. Their already-scanned openers are demoted to plain
        // text so the remainder starts at the offending position.
        if let Some(trip) = globals.limit_hit.get() {
            if trip > consumed {
                nodes.push(Node::Text {
                    content: trimmed[consumed..trip].to_string(),
                });
                nodes = parser::merge_text(nodes);
                consumed = trip;
            }
        }
        let error = globals.limit_hit.get().map(|offset| {
            log::debug!("recursion limit hit at byte {}", lead + offset);
            ParseError::RecursionLimit {
                limit: self.config.recursion_limit,
                offset: lead + offset,
            }
        });
        log::trace!(
            "parsed {} top-level nodes, {} bytes unconsumed",
            nodes.len(),
            trimmed.len() - consumed
        );
        Output {
            nodes,
            remainder: trimmed[consumed..].to_string(),
            error,
        }
    }
}

/// Parses wikitext with the default configuration.
#[must_use]
pub fn parse(source: &str) -> Output {
    Parser::new(&config::CONFIG).parse(source)
}

/// The parser output.
///
/// The parser is permissive: `error` is reserved for implementation-limit
/// failures. Callers that care about completeness inspect `remainder`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// The parsed top-level nodes, in source order.
    pub nodes: Vec<Node>,
    /// The unconsumed suffix of the input.
    pub remainder: String,
    /// Set when an implementation limit was exceeded.
    pub error: Option<ParseError>,
}

impl Output {
    /// Returns true unless an implementation limit was hit.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A parser failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input nested constructs deeper than
    /// [`Configuration::recursion_limit`].
    #[error("recursion limit of {limit} exceeded at byte {offset}")]
    RecursionLimit {
        /// The configured nesting cap.
        limit: usize,
        /// The byte offset of the construct that tripped the cap.
        offset: usize,
    },
}

/// Mutable state shared across a single parse.
#[derive(Debug)]
pub(crate) struct Globals<'a> {
    /// The whole trimmed source. Nested re-parses run on subslices of it,
    /// so positions inside a fragment can be made absolute again.
    pub source: &'a str,
    /// The absolute byte offset where the recursion limit tripped, if it
    /// did.
    pub limit_hit: Cell<Option<usize>>,
}

impl<'a> Globals<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            limit_hit: Cell::new(None),
        }
    }
}

/// A wikitext item.
///
/// Nodes own their string data; a tree never borrows from the input buffer.
/// `children` order equals textual order in the source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// A run of plain text. Always non-empty.
    Text {
        /// The exact bytes consumed; no unescaping occurs.
        content: String,
    },
    /// A bold span.
    ///
    /// ```wikitext
    /// '''bold'''
    /// ```
    Bold {
        /// The inline contents of the span.
        children: Vec<Node>,
    },
    /// An italic span.
    ///
    /// ```wikitext
    /// ''italic''
    /// ```
    Italic {
        /// The inline contents of the span.
        children: Vec<Node>,
    },
    /// A heading.
    ///
    /// ```wikitext
    /// ==Heading==
    /// ```
    Header {
        /// The heading outline level, 1 through 6.
        level: u8,
        /// The inline contents between the `=` runs.
        children: Vec<Node>,
    },
    /// An internal link.
    ///
    /// ```wikitext
    /// [[Target|display]]
    /// ```
    Link {
        /// The link target.
        target: String,
        /// The display text; equals `target` when no `|` was given.
        display: String,
    },
    /// A category membership tag.
    ///
    /// ```wikitext
    /// [[Category:Name]]
    /// ```
    Category {
        /// The category name, without the namespace prefix.
        name: String,
    },
    /// A media link.
    ///
    /// ```wikitext
    /// [[File:Name.png|40px|right]]
    /// ```
    File {
        /// The file name, without the namespace prefix.
        name: String,
        /// The pipe-separated tail of the display segment.
        parameters: Vec<String>,
    },
    /// An interlanguage link.
    ///
    /// ```wikitext
    /// [[de:Titel]]
    /// ```
    InterlangLink {
        /// The language prefix.
        lang: String,
        /// The title on the other language edition.
        title: String,
    },
    /// A template invocation, preserved verbatim rather than expanded.
    ///
    /// ```wikitext
    /// {{Template name|numbered argument|key=value}}
    /// ```
    Template {
        /// The template name, trimmed and non-empty.
        name: String,
        /// The arguments, in source order. Duplicate names are preserved.
        args: Vec<TemplateArg>,
    },
    /// An HTML-like tag.
    ///
    /// ```wikitext
    /// <span style="a">body</span> <br/>
    /// ```
    HtmlTag {
        /// The tag name, in its original case.
        tag: String,
        /// The tag attributes. The last occurrence wins on duplicates.
        attributes: HashMap<String, String>,
        /// The parsed body; empty for the self-closing form.
        children: Vec<Node>,
    },
    /// An HTML comment.
    ///
    /// ```wikitext
    /// <!-- note -->
    /// ```
    Comment {
        /// The verbatim body between the comment markers.
        content: String,
    },
    /// A literal region exempt from wikitext interpretation.
    ///
    /// ```wikitext
    /// <nowiki>''not italic''</nowiki>
    /// ```
    Nowiki {
        /// The verbatim body between the tags.
        content: String,
    },
    /// A citation tag.
    ///
    /// ```wikitext
    /// <ref name="a">citation</ref> <ref name="a"/>
    /// ```
    Ref {
        /// The `name` attribute, if present.
        name: Option<String>,
        /// The `group` attribute, if present.
        group: Option<String>,
        /// The parsed body; empty for the self-closing form.
        children: Vec<Node>,
    },
    /// A single list item line.
    ///
    /// ```wikitext
    /// ** item
    /// ```
    ListItem {
        /// Whether the item belongs to an ordered or unordered list.
        kind: ListKind,
        /// The marker count; nesting starts at 1.
        level: usize,
        /// The inline contents of the line.
        children: Vec<Node>,
    },
    /// A table. `children` are [`Node::TableRow`] items.
    Table {
        /// The rows of the table.
        children: Vec<Node>,
    },
    /// A table row. `children` are [`Node::TableCell`] items.
    TableRow {
        /// The cells of the row.
        children: Vec<Node>,
    },
    /// A table cell with any leading attribute block stripped.
    TableCell {
        /// Whether the cell came from a `!` or a `|` line.
        kind: CellKind,
        /// The parsed cell contents.
        children: Vec<Node>,
    },
}

impl Node {
    /// The node's children; empty for leaf variants.
    ///
    /// Template argument values are not children of the template node; walk
    /// them through [`TemplateArg::value`] or the [`visit`] module.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Bold { children }
            | Node::Italic { children }
            | Node::Header { children, .. }
            | Node::HtmlTag { children, .. }
            | Node::Ref { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children, .. } => children,
            Node::Text { .. }
            | Node::Link { .. }
            | Node::Category { .. }
            | Node::File { .. }
            | Node::InterlangLink { .. }
            | Node::Template { .. }
            | Node::Comment { .. }
            | Node::Nowiki { .. } => &[],
        }
    }
}

/// A template argument.
///
/// ```wikitext
/// {{Template|positional|name=value}}
///            ^^^^^^^^^^ ^^^^^^^^^^
/// ```
///
/// Values are node lists because an argument may mix text with markup.
/// Purely textual values are still single-element lists; use
/// [`TemplateArg::as_text`] to collapse them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TemplateArg {
    /// An argument without a key. Numbering is implicit by order.
    Positional(Vec<Node>),
    /// A `key=value` argument, key trimmed.
    Named(String, Vec<Node>),
}

impl TemplateArg {
    /// The argument key, if the argument is named.
    pub fn name(&self) -> Option<&str> {
        match self {
            TemplateArg::Named(name, _) => Some(name),
            TemplateArg::Positional(_) => None,
        }
    }

    /// The argument value.
    pub fn value(&self) -> &[Node] {
        match self {
            TemplateArg::Positional(value) | TemplateArg::Named(_, value) => value,
        }
    }

    /// The argument value collapsed to a string, when it is purely textual.
    pub fn as_text(&self) -> Option<&str> {
        match self.value() {
            [Node::Text { content }] => Some(content),
            _ => None,
        }
    }
}

/// The list family of a list item.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListKind {
    /// A `#` item.
    Ordered,
    /// A `*` item.
    Unordered,
}

/// The role of a table cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellKind {
    /// A `!` cell.
    Header,
    /// A `|` cell.
    Data,
}
