//! Failure semantics: unparseable tails, the recursion cap, and the
//! convenience queries.

use super::{parse_all, parse_checked};
use crate::{
    builder::text, extract_text, find_headers, find_links, find_templates, parse, Configuration,
    Node, ParseError, Parser,
};

#[test]
fn empty_input() {
    let output = parse_checked("");
    assert_eq!(output.nodes, vec![]);
    assert_eq!(output.remainder, "");
}

#[test]
fn whitespace_only_input() {
    let output = parse_checked("  \n\t ");
    assert_eq!(output.nodes, vec![]);
    assert_eq!(output.remainder, "");
}

#[test]
fn surrounding_whitespace_ignored() {
    assert_eq!(parse("  hi  ").nodes, vec![text("hi")]);
}

#[test]
fn unparseable_tail_is_returned() {
    let output = parse_checked("a ==b");
    assert_eq!(output.nodes, vec![text("a ")]);
    assert_eq!(output.remainder, "==b");
}

#[test]
fn unclosed_link_ends_the_parse() {
    let output = parse_checked("x[[y");
    assert_eq!(output.nodes, vec![text("x")]);
    assert_eq!(output.remainder, "[[y");
}

#[test]
fn list_marker_mid_line_ends_the_parse() {
    let output = parse_checked("a * b");
    assert_eq!(output.nodes, vec![text("a ")]);
    assert_eq!(output.remainder, "* b");
}

#[test]
fn deep_nesting_is_fine_below_the_cap() {
    let input = format!("{}x{}", "{{a|".repeat(10), "}}".repeat(10));
    let output = parse_checked(&input);
    assert_eq!(output.remainder, "");
    assert_eq!(find_templates(&output.nodes).len(), 10);
}

#[test]
fn recursion_limit_is_reported() {
    let input = format!("{}x{}", "{{a|".repeat(300), "}}".repeat(300));
    let output = parse(&input);
    assert!(!output.is_ok());
    assert_eq!(
        output.error,
        Some(ParseError::RecursionLimit {
            limit: 256,
            offset: 1024,
        })
    );
    // the openers of the templates that can no longer close are demoted to
    // plain text; the remainder starts at the construct that tripped
    assert_eq!(output.nodes, vec![text("{{a|".repeat(256))]);
    assert_eq!(output.remainder, &input[1024..]);
}

#[test]
fn recursion_limit_is_configurable() {
    let config = Configuration { recursion_limit: 4 };
    let input = format!("{}x{}", "{{a|".repeat(5), "}}".repeat(5));
    let output = Parser::new(&config).parse(&input);
    assert_eq!(
        output.error,
        Some(ParseError::RecursionLimit {
            limit: 4,
            offset: 16,
        })
    );
    assert_eq!(output.nodes, vec![text("{{a|".repeat(4))]);
    assert_eq!(output.remainder, &input[16..]);
    assert!(parse(&input).is_ok());
}

#[test]
fn text_before_the_limit_trip_survives() {
    let config = Configuration { recursion_limit: 2 };
    let input = format!("lead {}x{}", "{{a|".repeat(3), "}}".repeat(3));
    let output = Parser::new(&config).parse(&input);
    assert_eq!(
        output.error,
        Some(ParseError::RecursionLimit {
            limit: 2,
            offset: 13,
        })
    );
    // "lead " parsed normally and merges with the demoted openers
    assert_eq!(output.nodes, vec![text("lead {{a|{{a|")]);
    assert_eq!(output.remainder, &input[13..]);
}

#[test]
fn extract_text_concatenates_leaves() {
    let nodes = parse_all("Hello ''world''");
    assert_eq!(extract_text(&nodes), "Hello world");
}

#[test]
fn finders_walk_the_whole_tree() {
    let nodes = parse_all("==H==\n{{t|[[a]]}} [[b]]\n[[Category:C]]");
    assert_eq!(find_headers(&nodes).len(), 1);
    assert_eq!(find_templates(&nodes).len(), 1);
    let links = find_links(&nodes);
    assert_eq!(links.len(), 3);
    assert!(matches!(links[0], Node::Link { target, .. } if target == "a"));
    assert!(matches!(links[2], Node::Category { name } if name == "C"));
}
