//! Property tests: backend agreement on literal patterns
//!
//! Any pattern free of metacharacters must behave identically through the
//! shift-or matchers, Boyer-Moore, the DFA, and a reference substring
//! search, whichever the selector would have picked.

use multirex::literal::{BoyerMoore, ShiftOr};
use multirex::{MatchMode, MatchOptions, MatchOutcome, Regex};
use proptest::prelude::*;

/// Reference result: first occurrence span via the standard library
fn reference(needle: &str, hay: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return Some((0, 0));
    }
    hay.find(needle).map(|left| (left, left + needle.len()))
}

/// Span reported by the public API in boundary mode
fn engine_span(pattern: &str, text: &str) -> Option<(usize, usize)> {
    let mut regex = Regex::with_options(pattern, MatchOptions::boundary()).unwrap();
    match regex.matches(text).unwrap() {
        MatchOutcome::Found => regex.group(0),
        MatchOutcome::NotFound => None,
    }
}

proptest! {
    #[test]
    fn shift_or_words_agree_with_reference(
        pattern in "[ab]{1,6}",
        text in "[ab]{0,40}",
    ) {
        let expected = reference(&pattern, &text);
        let narrow = ShiftOr::<u32>::compile(pattern.as_bytes(), false);
        let wide = ShiftOr::<u64>::compile(pattern.as_bytes(), false);
        prop_assert_eq!(narrow.find(text.as_bytes()), expected);
        prop_assert_eq!(wide.find(text.as_bytes()), expected);
    }

    #[test]
    fn boyer_moore_agrees_with_reference(
        pattern in "[ab]{1,8}",
        text in "[ab]{0,60}",
    ) {
        let matcher = BoyerMoore::compile(pattern.clone().into_bytes(), false);
        prop_assert_eq!(matcher.find(text.as_bytes()), reference(&pattern, &text));
    }

    #[test]
    fn selected_backend_agrees_with_reference(
        pattern in "[abc]{1,7}",
        text in "[abc]{0,50}",
    ) {
        prop_assert_eq!(engine_span(&pattern, &text), reference(&pattern, &text));
    }

    #[test]
    fn dfa_agrees_with_literal_backends(
        pattern in "[ab]{1,6}",
        text in "[ab]{0,40}",
    ) {
        // Alternating a pattern with itself forces the automaton path
        // without changing the language
        let forced = format!("{pattern}|{pattern}");
        prop_assert_eq!(engine_span(&forced, &text), reference(&pattern, &text));
    }

    #[test]
    fn full_match_agrees_with_equality(
        pattern in "[ab]{1,6}",
        text in "[ab]{0,10}",
    ) {
        let opts = MatchOptions {
            match_mode: MatchMode::FullBool,
            ..MatchOptions::default()
        };
        let mut regex = Regex::with_options(&pattern, opts).unwrap();
        let outcome = regex.matches(&text).unwrap();
        prop_assert_eq!(outcome == MatchOutcome::Found, pattern == text);

        let forced = format!("{pattern}|{pattern}");
        let mut dfa = Regex::with_options(&forced, opts).unwrap();
        prop_assert_eq!(dfa.matches(&text).unwrap(), outcome);
    }

    #[test]
    fn case_folding_symmetry(
        pattern in "[a-c]{1,5}",
        text in "[a-c]{0,30}",
    ) {
        let folded = MatchOptions {
            ignore_case: true,
            ..MatchOptions::default()
        };
        let mut exact = Regex::new(&pattern).unwrap();
        let mut loose = Regex::with_options(&pattern, folded).unwrap();
        // A lower-case pattern hits upper-cased text iff it hits the
        // original text case-sensitively
        prop_assert_eq!(
            loose.matches(&text.to_uppercase()).unwrap(),
            exact.matches(&text).unwrap()
        );
    }
}
