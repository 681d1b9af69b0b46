//! Line-oriented table parsing.
//!
//! The body between `{|` and `|}` is captured verbatim by the grammar and
//! re-parsed here line by line, re-entering the main grammar for cell
//! contents. This is a deliberate simplification over a fully integrated
//! table grammar: rows cannot span lines, and a template that embeds a
//! newline inside a cell is not supported.

use crate::{
    parser::{reparse, Context},
    CellKind, Globals, Node, Parser,
};

/// Groups the captured table body into rows and cells.
///
/// A line starting with `|-` opens a new row and is itself discarded; a
/// line starting with `!` or `|` becomes a cell of the current row; blank
/// and other lines are skipped.
pub(crate) fn parse_body(
    body: &str,
    state: &Parser<'_>,
    globals: &Globals<'_>,
    ctx: &Context,
) -> Node {
    let mut rows: Vec<Vec<&str>> = vec![Vec::new()];
    for line in body.lines() {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("|-") {
            rows.push(Vec::new());
        } else if line.starts_with('!') || line.starts_with('|') {
            if let Some(row) = rows.last_mut() {
                row.push(line);
            }
        } else {
            log::trace!("skipping table line {line:?}");
        }
    }

    let children = rows
        .into_iter()
        .filter(|cells| !cells.is_empty())
        .map(|cells| Node::TableRow {
            children: cells
                .into_iter()
                .map(|line| parse_cell(line, state, globals, ctx))
                .collect(),
        })
        .collect();

    Node::Table { children }
}

/// Parses one cell line: marker, optional attribute block, content.
///
/// An attribute block ends at the first space-pipe-space, so a template
/// inside the block (`{{foo|5px}}`) does not split it early. The block
/// itself is discarded.
fn parse_cell(line: &str, state: &Parser<'_>, globals: &Globals<'_>, ctx: &Context) -> Node {
    let kind = if line.starts_with('!') {
        CellKind::Header
    } else {
        CellKind::Data
    };
    let stripped = &line[1..];
    let content = match stripped.find(" | ") {
        Some(at) => &stripped[at + 3..],
        None => stripped,
    };
    Node::TableCell {
        kind,
        children: reparse(content.trim_ascii(), state, globals, ctx),
    }
}
