//! Boundary-search tests: leftmost-longest span recovery
//!
//! The two-pass forward/backward protocol is the most delicate part of the
//! DFA engine, so these pin exact `[left, right)` spans.

use multirex::{MatchOptions, MatchOutcome, Regex, Style};

/// Span of the best match, or `None` when the pattern does not occur
fn boundary(pattern: &str, text: &str) -> Option<(usize, usize)> {
    boundary_with(pattern, text, MatchOptions::boundary())
}

fn boundary_with(pattern: &str, text: &str, opts: MatchOptions) -> Option<(usize, usize)> {
    let mut regex = Regex::with_options(pattern, opts).unwrap();
    match regex.matches(text).unwrap() {
        MatchOutcome::Found => {
            assert_eq!(regex.group_count(), 1);
            regex.group(0)
        }
        MatchOutcome::NotFound => None,
    }
}

fn ignore_case() -> MatchOptions {
    MatchOptions {
        ignore_case: true,
        ..MatchOptions::boundary()
    }
}

#[test]
fn test_star_star_leftmost_longest() {
    // A pattern matching the empty string matches at offset zero first
    assert_eq!(boundary("a*b*", "zhouyichao"), Some((0, 0)));
    assert_eq!(boundary("a*b*", "zhouyichabo"), Some((0, 0)));
    assert_eq!(boundary("a*b*", "fabbb"), Some((0, 0)));
    // With a match starting at zero the span stretches as far as it can
    assert_eq!(boundary("a*b*", "aaaaabbbbb"), Some((0, 10)));
    assert_eq!(boundary("a*b*", "aaaaabxbbb"), Some((0, 6)));
}

#[test]
fn test_plus_requires_one_occurrence() {
    assert_eq!(boundary("c*ab+c", "abcc"), Some((0, 3)));
    assert_eq!(boundary("c*ab+c", "ac"), None);
    assert_eq!(boundary("c*ab+c", "bac"), None);
}

#[test]
fn test_grouped_plus_alternation() {
    assert_eq!(
        boundary("(cabde)+|a.*", "ffffcabdecabdekkkkkkkkk"),
        Some((4, 14))
    );
    // The second arm wins when the repeated group breaks off early
    assert_eq!(
        boundary("(cabde)+|c.*", "ffffcabdfcabdekkkkkkkkk"),
        Some((4, 23))
    );
    assert_eq!(boundary("(cabde)+|c.*", "ffffCabdfCabdekkkkkkkkk"), None);
}

#[test]
fn test_grouped_plus_alternation_ignore_case() {
    assert_eq!(
        boundary_with("(caBDe)+|C.*", "FffFcaBdfCabDekKkkKkkKk", ignore_case()),
        Some((4, 23))
    );
    assert_eq!(
        boundary_with("(caBDe)+|C.*", "fFFFcABDFcABDEKKKKkkkkk", ignore_case()),
        Some((4, 23))
    );
}

#[test]
fn test_class_star_boundary() {
    assert_eq!(boundary_with("\\d*", "999", ignore_case()), Some((0, 3)));
    assert_eq!(boundary("\\d*", "abc99"), Some((0, 0)));
}

#[test]
fn test_alternation_prefers_completed_arm() {
    // Once an arm accepts with nothing left to extend, the scan stops
    assert_eq!(boundary("hel|hello", "hello"), Some((0, 3)));
    // A longer arm still live keeps the scan going
    assert_eq!(boundary("hello|hel", "hello"), Some((0, 5)));
    assert_eq!(boundary("hello|world", "hello"), Some((0, 5)));
    assert_eq!(boundary("hello|world", "hello world"), Some((0, 5)));
    assert_eq!(boundary("world|hello", "hello world"), Some((0, 5)));
}

#[test]
fn test_literal_boundaries() {
    assert_eq!(boundary("abc", "abc"), Some((0, 3)));
    assert_eq!(boundary("a", "abc"), Some((0, 1)));
    assert_eq!(boundary("hello", "ahealleoahhelolhello"), Some((15, 20)));
    assert_eq!(boundary("hello", "ahealleoahhelol"), None);
}

#[test]
fn test_boundary_agrees_with_reference_search() {
    // Literal patterns must land exactly where a plain substring search does
    let texts = ["", "x", "xyxy", "yyxyx", "xxxxx", "xyxyxyx"];
    for needle in ["x", "xy", "yx", "xyx", "xx"] {
        for text in texts {
            let expected = text.find(needle).map(|l| (l, l + needle.len()));
            assert_eq!(boundary(needle, text), expected, "needle {needle} in {text}");
        }
    }
}

#[test]
fn test_empty_match_at_offset_zero() {
    assert_eq!(boundary("a*", "za"), Some((0, 0)));
    assert_eq!(boundary("a*", "aaz"), Some((0, 2)));
    assert_eq!(boundary("x?", "yx"), Some((0, 0)));
}

#[test]
fn test_nongreedy_boundary() {
    let perl = MatchOptions {
        style: Style::Perl,
        ..MatchOptions::boundary()
    };
    assert_eq!(boundary_with("<.*>", "<a><b>", MatchOptions::boundary()), Some((0, 6)));
    assert_eq!(boundary_with("<.*?>", "<a><b>", perl), Some((0, 3)));
}
