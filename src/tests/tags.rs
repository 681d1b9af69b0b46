//! HTML-like tags, refs, comments, and nowiki regions.

use super::{parse_checked, tree_tests};
use crate::builder::{comment, html_tag, italic, nowiki, reference, text};

tree_tests! {
    self_closing_tag: "<br/>" => [html_tag("br", &[], vec![])],
    void_style_tag: "<hr>" => [html_tag("hr", &[], vec![])],
    br_prefers_container_form: "<br>x</br>" => [html_tag("br", &[], vec![text("x")])],
    container_with_attributes: "<div class=\"a\" id=b>x</div>" => [
        html_tag("div", &[("class", "a"), ("id", "b")], vec![text("x")]),
    ],
    attribute_quoting_styles: "<span a=\"1\" b='2' c=3>x</span>" => [
        html_tag("span", &[("a", "1"), ("b", "2"), ("c", "3")], vec![text("x")]),
    ],
    duplicate_attribute_last_wins: "<a x='1' x='2'></a>" => [
        html_tag("a", &[("x", "2")], vec![]),
    ],
    mismatched_closer_accepted: "<b>x</i>" => [html_tag("b", &[], vec![text("x")])],
    nested_containers: "<b><i>x</i></b>" => [
        html_tag("b", &[], vec![html_tag("i", &[], vec![text("x")])]),
    ],
    markup_inside_tag_body: "<span>''i''</span>" => [
        html_tag("span", &[], vec![italic(vec![text("i")])]),
    ],
    tag_case_preserved: "<Div>x</Div>" => [html_tag("Div", &[], vec![text("x")])],
    ref_self_closing: "<ref name=\"a\"/>" => [reference(Some("a"), None, vec![])],
    ref_with_group: "<ref group='notes' name=\"b\">x</ref>" => [
        reference(Some("b"), Some("notes"), vec![text("x")]),
    ],
    ref_without_attributes: "<ref>bare</ref>" => [reference(None, None, vec![text("bare")])],
    longer_tag_name_is_not_a_ref: "<references/>" => [html_tag("references", &[], vec![])],
    nowiki_verbatim: "<nowiki>''x''</nowiki>" => [nowiki("''x''")],
    comment_verbatim: "<!--a-b-->" => [comment("a-b")],
    lone_angle_is_text: "1 < 2" => [text("1 < 2")],
}

#[test]
fn comments_are_not_parsed_inside_tags() {
    let output = parse_checked("<b><!-- c --></b>");
    // the container cannot close over the comment, so the opener demotes to
    // the self-closing form and the closer is left unconsumed
    assert_eq!(
        output.nodes,
        vec![html_tag("b", &[], vec![]), comment(" c ")]
    );
    assert_eq!(output.remainder, "</b>");
}

#[test]
fn unterminated_comment_ends_the_parse() {
    let output = parse_checked("a<!--x");
    assert_eq!(output.nodes, vec![text("a")]);
    assert_eq!(output.remainder, "<!--x");
}

#[test]
fn unterminated_nowiki_demotes_to_tag() {
    let output = parse_checked("a<nowiki>b");
    assert_eq!(
        output.nodes,
        vec![text("a"), html_tag("nowiki", &[], vec![]), text("b")]
    );
    assert_eq!(output.remainder, "");
}
