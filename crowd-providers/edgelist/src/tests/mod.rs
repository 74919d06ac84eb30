//! Unit tests for the edge-list parser.

use std::io::Cursor;

use crowd_core::Direction;
use rstest::rstest;

use crate::errors::{EdgeListError, EdgeListErrorCode};
use crate::parse::parse_edges;

fn parse(input: &str, direction: Direction) -> Result<crate::parse::ParsedEdges, EdgeListError> {
    parse_edges(Cursor::new(input), direction)
}

#[rstest]
fn interns_tokens_in_first_seen_order() {
    let parsed = parse("b a\nc b\n", Direction::Directed).expect("input must parse");
    let labels: Vec<&str> = parsed.labels.iter().map(AsRef::as_ref).collect();
    assert_eq!(labels, ["b", "a", "c"]);
    assert_eq!(parsed.edges, vec![(0, 1, 1.0), (2, 0, 1.0)]);
    assert!(!parsed.weighted);
}

#[rstest]
fn skips_comments_and_blank_lines() {
    let input = "# header\n\n   \na b # trailing\n";
    let parsed = parse(input, Direction::Directed).expect("input must parse");
    assert_eq!(parsed.edges, vec![(0, 1, 1.0)]);
}

#[rstest]
fn self_loops_are_dropped_but_interned() {
    let parsed = parse("a a\na b\n", Direction::Directed).expect("input must parse");
    assert_eq!(parsed.labels.len(), 2);
    assert_eq!(parsed.edges, vec![(0, 1, 1.0)]);
}

#[rstest]
#[case::directed_keeps_reverse(Direction::Directed, vec![(0, 1, 3.0), (1, 0, 1.0)])]
#[case::undirected_merges_reverse(Direction::Undirected, vec![(0, 1, 4.0)])]
fn repeated_edges_sum_their_weights(
    #[case] direction: Direction,
    #[case] expected: Vec<(usize, usize, f64)>,
) {
    let parsed = parse("a b\na b 2\nb a\n", direction).expect("input must parse");
    assert_eq!(parsed.edges, expected);
    assert!(parsed.weighted);
}

#[rstest]
fn duplicate_unit_edges_become_weighted() {
    let parsed = parse("a b\na b\n", Direction::Directed).expect("input must parse");
    assert_eq!(parsed.edges, vec![(0, 1, 2.0)]);
    assert!(parsed.weighted);
}

#[rstest]
#[case::missing_target("a\n", 1)]
#[case::bad_weight("a b 1\nb c heavy\n", 2)]
#[case::negative_weight("a b -1\n", 1)]
#[case::infinite_weight("a b inf\n", 1)]
#[case::extra_token("\na b 1 2\n", 2)]
fn malformed_lines_report_their_number(#[case] input: &str, #[case] expected_line: usize) {
    let err = parse(input, Direction::Directed).expect_err("input must be rejected");
    match err {
        EdgeListError::Parse { line, .. } => assert_eq!(line, expected_line),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case(EdgeListError::EmptyInput, EdgeListErrorCode::EmptyInput, "EDGELIST_EMPTY_INPUT")]
#[case(EdgeListError::parse(3, "bad"), EdgeListErrorCode::Parse, "EDGELIST_PARSE")]
fn error_codes_are_stable(
    #[case] error: EdgeListError,
    #[case] code: EdgeListErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), code);
    assert_eq!(error.code().as_str(), text);
}
