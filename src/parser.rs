//! A parsing expression grammar for wikitext documents.
//!
//! The grammar is a single-pass ordered choice: each alternative either
//! produces a node and advances, or fails without consuming. Context is
//! threaded through the rules by value; there is no shared parser state
//! beyond the recursion-limit latch in [`Globals`].

use crate::{
    config::{Configuration, Namespace},
    Globals, ListKind, Node, Parser, TemplateArg,
};
use peg::RuleResult;
use regex::Regex;
use std::sync::LazyLock;

/// The scope of the text being parsed. Selects the text exclusion set and
/// the constructs that may start.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Scope {
    /// The top-level driver. Header bodies and table cells re-enter here.
    #[default]
    Top,
    /// A template argument value, terminated by `|` or `}}`.
    TemplateValue,
    /// The line content of a list item.
    ListItem,
    /// The body of a container tag.
    TagBody,
}

/// Context threaded through grammar rules. Copied on derivation, never
/// mutated in place, so backtracking cannot observe stale state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Context {
    /// The active scope.
    pub scope: Scope,
    /// Inside a bold body; a further bold may not start.
    pub in_bold: bool,
    /// Inside an italic body; a further italic may not start.
    pub in_italic: bool,
    /// Construct nesting depth, checked against the recursion limit.
    pub depth: usize,
}

impl Context {
    /// One construct deeper.
    fn deeper(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Enters a bold body. The scope is kept so exclusion rules of an
    /// enclosing template value or tag body keep applying.
    fn with_bold(&self) -> Self {
        Self {
            in_bold: true,
            ..*self
        }
    }

    /// Enters an italic body.
    fn with_italic(&self) -> Self {
        Self {
            in_italic: true,
            ..*self
        }
    }

    /// Enters a template argument value.
    fn template_value(&self) -> Self {
        Self {
            scope: Scope::TemplateValue,
            in_bold: false,
            in_italic: false,
            ..*self
        }
    }

    /// Enters the body of a container tag.
    fn tag_body(&self) -> Self {
        Self {
            scope: Scope::TagBody,
            in_bold: false,
            in_italic: false,
            ..*self
        }
    }

    /// Enters the line content of a list item.
    fn list_item(&self) -> Self {
        Self {
            scope: Scope::ListItem,
            in_bold: false,
            in_italic: false,
            ..*self
        }
    }

    /// Re-enters the top-level driver on a captured fragment.
    fn reentry(&self) -> Self {
        Self {
            scope: Scope::Top,
            in_bold: false,
            in_italic: false,
            depth: self.depth + 1,
        }
    }

    /// True outside any bold or italic body.
    fn unstyled(&self) -> bool {
        !self.in_bold && !self.in_italic
    }
}

peg::parser! { pub(crate) grammar wikitext(state: &Parser<'_>, globals: &Globals<'_>) for str {
    /// The top-level entry. Returns the parsed nodes and the byte offset
    /// where the driver stopped.
    pub rule document(ctx: &Context) -> (Vec<Node>, usize)
    = nodes:node(ctx)* end:position!()
    { (merge_text(nodes), end) }

    /// A single item at the current position. The order of alternatives is
    /// fixed and encodes precedence.
    rule node(ctx: &Context) -> Node
    = unlimited()
      t:( template(ctx)
        / header(ctx)
        / comment(ctx)
        / nowiki(ctx)
        / table(ctx)
        / list_item(ctx)
        / bold_italic(ctx)
        / bold(ctx)
        / italic(ctx)
        / link(ctx)
        / ref_container(ctx)
        / ref_empty(ctx)
        / tag_container(ctx)
        / tag_empty(ctx)
        / text(ctx)
        / quote_run(ctx)
      )
    { t }

    ////////////////
    // Plain text //
    ////////////////

    /// A maximal run of plain text, per the context's exclusion set.
    rule text(ctx: &Context) -> Node
    = unlimited()
      t:#{|input, pos| {
          let end = scan_text(input, pos, ctx.scope);
          if end > pos {
              RuleResult::Matched(end, &input[pos..end])
          } else {
              RuleResult::Failed
          }
      }}
    { Node::Text { content: t.to_string() } }

    /// Apostrophes left behind when every text-style alternative failed.
    /// They are kept as plain text rather than ending the parse. Inside a
    /// style body a stray `''` must terminate the span instead, so this
    /// production is disabled there.
    rule quote_run(ctx: &Context) -> Node
    = &assert(ctx.unstyled(), "outside text styles")
      unlimited()
      t:$("''" ['\'']*)
    { Node::Text { content: t.to_string() } }

    /////////////////
    // Text styles //
    /////////////////

    /// A bold italic span, emitted as bold wrapping italic. The body may
    /// not contain further bold or italic.
    ///
    /// ```wikitext
    /// '''''both'''''
    /// ```
    rule bold_italic(ctx: &Context) -> Node
    = &assert(ctx.unstyled(), "outside text styles")
      limit(ctx)
      "'''''"
      ctx:({ ctx.deeper().with_bold().with_italic() })
      children:(!"'''''" n:node(&ctx) { n })*
      "'''''"
    { Node::Bold { children: vec![Node::Italic { children: merge_text(children) }] } }

    /// A bold span.
    ///
    /// ```wikitext
    /// '''bold'''
    /// ```
    rule bold(ctx: &Context) -> Node
    = &assert(!ctx.in_bold, "outside bold")
      limit(ctx)
      "'''"
      ctx:({ ctx.deeper().with_bold() })
      children:(!"'''" n:node(&ctx) { n })*
      "'''"
    { Node::Bold { children: merge_text(children) } }

    /// An italic span.
    ///
    /// ```wikitext
    /// ''italic''
    /// ```
    rule italic(ctx: &Context) -> Node
    = &assert(!ctx.in_italic, "outside italic")
      limit(ctx)
      "''"
      ctx:({ ctx.deeper().with_italic() })
      children:italic_item(&ctx)*
      "''"
    { Node::Italic { children: merge_text(children) } }

    /// An element of an italic body. A `'''` here opens a nested bold and
    /// must win over the `''` terminator; any other `''` ends the span.
    rule italic_item(ctx: &Context) -> Node
    = bold(ctx)
    / !"''" n:node(ctx) { n }

    //////////////
    // Template //
    //////////////

    /// A template invocation. The expansion is a wiki-side concern; the
    /// invocation is preserved as a node.
    ///
    /// ```wikitext
    /// {{Template name|numbered argument|key=value}}
    /// ```
    rule template(ctx: &Context) -> Node
    = limit(ctx)
      "{{" space_or_newline()*
      name:$([^ '|' | '\n' | '\r' | '}']+)
      &assert(!name.trim_ascii().is_empty(), "template name")
      space_or_newline()*
      args:("|" a:template_arg(ctx) { a })*
      space_or_newline()* "}}"
    { Node::Template {
        name: name.trim_ascii().to_string(),
        args: args.into_iter().flatten().collect(),
    } }

    /// A single template argument, classified as named or positional.
    /// Arguments whose value reduces to nothing are discarded.
    ///
    /// ```wikitext
    /// {{Template name|numbered argument|key=value}}
    ///                 ^^^^^^^^^^^^^^^^^ ^^^^^^^^^
    /// ```
    rule template_arg(ctx: &Context) -> Option<TemplateArg>
    = space_or_newline()*
      key:(k:$([^ '=' | '|' | '}' | '\n']+) "=" { k })?
      ctx:({ ctx.deeper().template_value() })
      value:node(&ctx)*
      space_or_newline()*
    { build_arg(key, merge_text(value)) }

    ///////////
    // Links //
    ///////////

    /// A wikilink, classified by its target prefix. The display is a plain
    /// string; link bodies are not parsed.
    ///
    /// ```wikitext
    /// [[Target|display]] [[Category:Name]] [[File:f.png|40px]] [[de:Titel]]
    /// ```
    rule link(_ctx: &Context) -> Node
    = "[[" payload:$((!"]]" [_])*) "]]"
    {? classify_link(state.config, payload).ok_or("link") }

    /////////////
    // Heading //
    /////////////

    /// A heading line. The level is the length of the opening run; the
    /// body between the runs is handed back to the top-level driver.
    ///
    /// ```wikitext
    /// ==Heading==
    /// ```
    rule header(ctx: &Context) -> Node
    = &assert(matches!(ctx.scope, Scope::Top) && ctx.unstyled(), "top level")
      sol()
      limit(ctx)
      h:#{|input, pos| match scan_header(input, pos) {
          Some((end, level, body)) => RuleResult::Matched(end, (level, body)),
          None => RuleResult::Failed,
      }}
    {
        let (level, body) = h;
        Node::Header { level, children: reparse(body, state, globals, ctx) }
    }

    ////////////////
    // List items //
    ////////////////

    /// A single list item line. The marker count is the nesting level; the
    /// line break after the item is not part of it.
    ///
    /// ```wikitext
    /// * unordered item
    /// ## nested ordered item
    /// ```
    rule list_item(ctx: &Context) -> Node
    = &assert(matches!(ctx.scope, Scope::Top) && ctx.unstyled(), "top level")
      sol()
      marker:$(['*']+ / ['#']+)
      [' ' | '\t']+
      ctx:({ ctx.list_item() })
      children:node(&ctx)*
    { Node::ListItem {
        kind: if marker.starts_with('*') { ListKind::Unordered } else { ListKind::Ordered },
        level: marker.len(),
        children: merge_text(children),
    } }

    ////////////
    // Tables //
    ////////////

    /// A table block. The body is captured whole and re-parsed line by
    /// line in [`crate::table`]; rows therefore cannot span lines.
    ///
    /// ```wikitext
    /// {|
    /// ! Heading
    /// |-
    /// | Data
    /// |}
    /// ```
    rule table(ctx: &Context) -> Node
    = &assert(matches!(ctx.scope, Scope::Top) && ctx.unstyled(), "top level")
      sol()
      limit(ctx)
      "{|" body:$((!"|}" [_])*) "|}"
    { crate::table::parse_body(body, state, globals, ctx) }

    ///////////////////////////
    // Generic XML-like tags //
    ///////////////////////////

    /// A container tag with a parsed body. The closing tag name is consumed
    /// without being checked against the opener.
    ///
    /// ```wikitext
    /// <span style="a">body</span>
    /// ```
    rule tag_container(ctx: &Context) -> Node
    = limit(ctx)
      "<" name:tag_name() attributes:attribute()* space_or_newline()* ">"
      ctx:({ ctx.deeper().tag_body() })
      children:(!"</" n:node(&ctx) { n })*
      "</" tag_name() space_or_newline()* ">"
    { Node::HtmlTag {
        tag: name.to_string(),
        attributes: attributes.into_iter().collect(),
        children: merge_text(children),
    } }

    /// A self-closing or void-style tag.
    ///
    /// ```wikitext
    /// <br/> <hr>
    /// ```
    rule tag_empty(_ctx: &Context) -> Node
    = "<" name:tag_name() attributes:attribute()* space_or_newline()*
      ("/" space_or_newline()*)? ">"
    { Node::HtmlTag {
        tag: name.to_string(),
        attributes: attributes.into_iter().collect(),
        children: vec![],
    } }

    /// The tag name part of an XML-like tag.
    rule tag_name() -> &'input str
    = $(['a'..='z' | 'A'..='Z']+)

    /// A single `name=value` tag attribute.
    ///
    /// ```wikitext
    /// <ref name="a" group='b' page=7>
    ///      ^^^^^^^^ ^^^^^^^^^ ^^^^^^
    /// ```
    rule attribute() -> (String, String)
    = space_or_newline()+
      name:$(['a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_']+)
      "=" value:attribute_value()
    { (name.to_string(), value.to_string()) }

    /// A double-quoted, single-quoted, or bare attribute value.
    rule attribute_value() -> &'input str
    = "\"" v:$([^ '"']*) "\"" { v }
    / "'" v:$([^ '\'']*) "'" { v }
    / $([^ ' ' | '\t' | '\n' | '>' | '/']+)

    //////////
    // Refs //
    //////////

    /// A citation tag container, parsed separately from generic tags
    /// because its attributes carry the payload.
    ///
    /// ```wikitext
    /// <ref name="a">citation</ref>
    /// ```
    rule ref_container(ctx: &Context) -> Node
    = &assert(!matches!(ctx.scope, Scope::TemplateValue), "ref context")
      limit(ctx)
      "<ref" !['a'..='z' | 'A'..='Z']
      attributes:attribute()* space_or_newline()* ">"
      ctx:({ ctx.deeper().tag_body() })
      children:(!"</" n:node(&ctx) { n })*
      "</ref" space_or_newline()* ">"
    { ref_node(attributes, merge_text(children)) }

    /// A self-closing citation tag.
    ///
    /// ```wikitext
    /// <ref name="a"/>
    /// ```
    rule ref_empty(ctx: &Context) -> Node
    = &assert(!matches!(ctx.scope, Scope::TemplateValue), "ref context")
      "<ref" !['a'..='z' | 'A'..='Z']
      attributes:attribute()* space_or_newline()* "/" space_or_newline()* ">"
    { ref_node(attributes, vec![]) }

    //////////////////////////
    // Comments and nowiki  //
    //////////////////////////

    /// An HTML comment with a verbatim body. Fails when unterminated.
    rule comment(ctx: &Context) -> Node
    = &assert(!matches!(ctx.scope, Scope::TagBody), "comment context")
      "<!--" content:$((!"-->" [_])*) "-->"
    { Node::Comment { content: content.to_string() } }

    /// A literal region exempt from wikitext interpretation.
    rule nowiki(ctx: &Context) -> Node
    = &assert(!matches!(ctx.scope, Scope::TemplateValue), "nowiki context")
      "<nowiki>" content:$((!"</nowiki>" [_])*) "</nowiki>"
    { Node::Nowiki { content: content.to_string() } }

    /////////////
    // Helpers //
    /////////////

    /// A lookahead that only matches at the start of the input or of a line.
    rule sol()
    = #{|input, pos| if pos == 0 || input.as_bytes().get(pos - 1) == Some(&b'\n') {
          RuleResult::Matched(pos, ())
      } else {
          RuleResult::Failed
      }}

    /// Fails and latches the error flag once the nesting cap is reached.
    /// The input here may be a re-parsed fragment, so the recorded position
    /// is translated back into the whole source.
    rule limit(ctx: &Context)
    = #{|input, pos| if ctx.depth < state.config.recursion_limit {
          RuleResult::Matched(pos, ())
      } else {
          if globals.limit_hit.get().is_none() {
              let base = input.as_ptr() as usize - globals.source.as_ptr() as usize;
              globals.limit_hit.set(Some(base + pos));
          }
          RuleResult::Failed
      }}

    /// Fails every production once the recursion limit has tripped, so the
    /// parse stops where the offending construct began.
    rule unlimited()
    = #{|_input, pos| if globals.limit_hit.get().is_none() {
          RuleResult::Matched(pos, ())
      } else {
          RuleResult::Failed
      }}

    /// Characters that match the PCRE "\s" class.
    rule space_or_newline() = [' ' | '\t' | '\n' | '\r']

    /// Asserts a precondition given by `cond`.
    rule assert(cond: bool, msg: &'static str)
    = {? if cond { Ok(()) } else { Err(msg) } }
}}

/// Re-enters the grammar on a captured fragment (header bodies, table
/// cells). A tail the driver could not consume is kept as trailing text so
/// no input is dropped.
pub(crate) fn reparse(
    source: &str,
    state: &Parser<'_>,
    globals: &Globals<'_>,
    ctx: &Context,
) -> Vec<Node> {
    let ctx = ctx.reentry();
    match wikitext::document(source, state, globals, &ctx) {
        Ok((mut nodes, end)) => {
            if end < source.len() {
                nodes.push(Node::Text {
                    content: source[end..].to_string(),
                });
                nodes = merge_text(nodes);
            }
            nodes
        }
        Err(_) => Vec::new(),
    }
}

/// Matches a heading line: opening run, body, closing run, trailing blanks.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(={1,6})(.+?)(={1,6})[ \t]*$").unwrap());

/// Recognises a heading at `pos`, which must be a line start. Returns the
/// end of the line, the level, and the body with its single-space pads
/// removed. The closing run length is not required to equal the opening.
fn scan_header(input: &str, pos: usize) -> Option<(usize, u8, &str)> {
    let line_end = input[pos..].find('\n').map_or(input.len(), |at| pos + at);
    let line = &input[pos..line_end];
    let captures = HEADING.captures(line)?;
    let level = u8::try_from(captures.get(1)?.len()).ok()?;
    let body = captures.get(2)?.as_str();
    let body = body.strip_prefix(' ').unwrap_or(body);
    let body = body.strip_suffix(' ').unwrap_or(body);
    Some((line_end, level, body))
}

/// Scans a maximal run of characters that cannot begin another construct
/// at the current position. A character from the exclusion set is still
/// admitted when the two-character lookahead disproves a construct start.
fn scan_text(input: &str, start: usize, scope: Scope) -> usize {
    let bytes = input.as_bytes();
    let mut pos = start;
    while pos < bytes.len() {
        let next = bytes.get(pos + 1).copied();
        let stop = match bytes[pos] {
            // argument and cell terminators are hard stops
            b'|' | b'}' => matches!(scope, Scope::TemplateValue),
            b'\n' => matches!(scope, Scope::TemplateValue | Scope::ListItem),
            b'{' => matches!(next, Some(b'{' | b'|')),
            b'\'' => next == Some(b'\''),
            b'[' => next == Some(b'['),
            b'<' => {
                matches!(next, Some(c) if c.is_ascii_alphabetic() || c == b'/')
                    || bytes[pos + 1..].starts_with(b"!--")
            }
            b'=' => matches!(scope, Scope::Top) && next == Some(b'='),
            b'*' | b'#' => {
                matches!(scope, Scope::Top)
                    && (next == Some(bytes[pos]) || matches!(next, Some(b' ' | b'\t')))
            }
            _ => false,
        };
        if stop {
            break;
        }
        pos += 1;
    }
    pos
}

/// Coalesces adjacent text nodes so repeated single-character and fallback
/// productions do not fragment runs.
pub(crate) fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match (out.last_mut(), node) {
            (Some(Node::Text { content: last }), Node::Text { content }) => {
                last.push_str(&content);
            }
            (_, node) => out.push(node),
        }
    }
    out
}

/// Assembles a template argument. Leading whitespace and trailing
/// pure-whitespace runs are stripped; an argument whose value reduces to
/// nothing is discarded.
fn build_arg(key: Option<&str>, mut value: Vec<Node>) -> Option<TemplateArg> {
    let value_len = value.len();
    if let Some(Node::Text { content }) = value.first_mut() {
        let trimmed = content.trim_ascii_start().to_string();
        if trimmed.is_empty() && value_len > 1 {
            value.remove(0);
        } else {
            *content = trimmed;
        }
    }
    while value.last().is_some_and(is_blank_text) {
        value.pop();
    }
    if let Some(Node::Text { content }) = value.last_mut() {
        content.truncate(content.trim_ascii_end().len());
    }
    if value.is_empty() {
        return None;
    }
    Some(match key {
        Some(key) => TemplateArg::Named(key.trim_ascii().to_string(), value),
        None => TemplateArg::Positional(value),
    })
}

/// True for a text node that is empty or whitespace.
fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text { content } if content.trim_ascii().is_empty())
}

/// Classifies a `[[...]]` payload by its target prefix. The payload is
/// split on the first `|` into target and display.
fn classify_link(config: &Configuration, payload: &str) -> Option<Node> {
    let (target, display) = match payload.split_once('|') {
        Some((target, display)) => (target.trim_ascii(), Some(display)),
        None => (payload.trim_ascii(), None),
    };
    if target.is_empty() {
        return None;
    }
    if let Some((prefix, rest)) = target.split_once(':') {
        match config.namespace(prefix) {
            Some(Namespace::Category) => {
                return Some(Node::Category {
                    name: rest.trim_ascii().to_string(),
                });
            }
            Some(Namespace::File) => {
                let parameters = display
                    .map(|display| {
                        display
                            .split('|')
                            .map(str::trim_ascii)
                            .filter(|parameter| !parameter.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default();
                return Some(Node::File {
                    name: rest.trim_ascii().to_string(),
                    parameters,
                });
            }
            None => {}
        }
        if config.is_interlang(target) {
            return Some(Node::InterlangLink {
                lang: prefix.to_string(),
                title: rest.trim_ascii().to_string(),
            });
        }
    }
    let display = display.map_or_else(
        || target.to_string(),
        |display| display.trim_ascii().to_string(),
    );
    Some(Node::Link {
        target: target.to_string(),
        display,
    })
}

/// Builds a citation node from the attributes that carry its payload.
fn ref_node(attributes: Vec<(String, String)>, children: Vec<Node>) -> Node {
    let mut name = None;
    let mut group = None;
    for (key, value) in attributes {
        match key.as_str() {
            "name" => name = Some(value),
            "group" => group = Some(value),
            _ => {}
        }
    }
    Node::Ref {
        name,
        group,
        children,
    }
}
