use crate::{parse, Node, Output};

mod limits;
mod tables;
mod tags;

/// Parses `input` expecting complete consumption.
#[track_caller]
fn parse_all(input: &str) -> Vec<Node> {
    let output = parse_checked(input);
    assert_eq!(output.remainder, "", "unparsed tail for {input:?}");
    output.nodes
}

/// Parses `input` expecting no implementation-limit failure.
#[track_caller]
fn parse_checked(input: &str) -> Output {
    let _ = env_logger::try_init();
    let output = parse(input);
    assert!(
        output.is_ok(),
        "parse error for {input:?}: {:?}",
        output.error
    );
    output
}

macro_rules! tree_tests {
    ($($name:ident: $input:expr => [$($expected:expr),* $(,)?]),* $(,)?) => {
        $(#[test]
        fn $name() {
            let nodes = crate::tests::parse_all($input);
            assert_eq!(nodes, vec![$($expected),*], "parsing {:?}", $input);
        })*
    }
}

use tree_tests;
