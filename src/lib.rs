//! Multi-backend regular expression engine
//!
//! A pattern compiles into one of several specialized backends: bitmask
//! shift-or (32- or 64-bit) and Boyer-Moore when the pattern is a plain
//! literal, and a lazy subset-construction DFA for everything else. The
//! DFA drives a paired forward/backward automaton protocol to recover the
//! `[left, right)` byte span of the best match without backtracking.
//!
//! Matching operates on bytes; case folding and the shorthand classes are
//! ASCII-only.

pub mod charset;
pub mod dfa;
pub mod error;
pub mod literal;
pub mod nfa;
pub mod options;
pub mod parser;

pub use error::{RegexError, Result};
pub use options::{MatchMode, MatchOptions, Style, SyntaxFlags};
pub use parser::Algorithm;

use dfa::Fsm;
use literal::{BoyerMoore, ShiftOr};
use parser::Symbol;

/// Result of running a compiled pattern against a text.
///
/// `NotFound` is an expected outcome, not an error; errors are reserved
/// for misuse and unsupported requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The pattern does not match under the compiled mode
    NotFound,
    /// The pattern matches; boundary modes record group 0
    Found,
}

/// Backend state of a compiled pattern, one variant per algorithm
#[derive(Debug)]
enum Backend {
    ShiftOr32(ShiftOr<u32>),
    ShiftOr64(ShiftOr<u64>),
    BoyerMoore(BoyerMoore),
    Dfa {
        forward: Fsm,
        /// Flipped automaton; present only in boundary mode
        backward: Option<Fsm>,
    },
}

/// A compiled regular expression pattern.
///
/// Holds the postfix form of the pattern, the selected backend with its
/// precomputed tables or automata, and the boundaries of the last match.
/// Matching takes `&mut self`: the lazy DFA grows its transition tables in
/// place and the match boundaries are cached on the value, so sharing a
/// compiled pattern across threads requires cloning or external locking.
/// Dropping the value releases every table and automaton it owns.
#[derive(Debug)]
pub struct Regex {
    pattern: String,
    options: MatchOptions,
    #[allow(dead_code)]
    postfix: Vec<Symbol>,
    algorithm: Algorithm,
    backend: Backend,
    /// Byte offsets of the last match's groups; group 0 is the whole match
    groups: Vec<(usize, usize)>,
}

/// What a backend reported for one text
enum Hit {
    Miss,
    Found(Option<(usize, usize)>),
}

/// Map a literal backend's first-occurrence span onto the compiled mode:
/// full modes require the occurrence to cover the whole text
fn literal_hit(span: Option<(usize, usize)>, mode: MatchMode, text_len: usize) -> Hit {
    match span {
        None => Hit::Miss,
        Some(span) if mode == MatchMode::FullBool && span != (0, text_len) => Hit::Miss,
        Some(span) => Hit::Found(Some(span)),
    }
}

impl Regex {
    /// Compile a pattern with default options (POSIX style, substring
    /// boolean matching, case-sensitive)
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_options(pattern, MatchOptions::default())
    }

    /// Compile a pattern with explicit options
    pub fn with_options(pattern: &str, options: MatchOptions) -> Result<Self> {
        if matches!(
            options.match_mode,
            MatchMode::FullSubmatch | MatchMode::PartialSubmatch
        ) {
            return Err(RegexError::UnsupportedMode);
        }

        let (postfix, algorithm) = parser::parse(pattern.as_bytes(), options)?;
        let literal = parser::literal_bytes(&postfix, options.ignore_case);

        let backend = match algorithm {
            Algorithm::ShiftOr32 => {
                Backend::ShiftOr32(ShiftOr::compile(&literal, options.ignore_case))
            }
            Algorithm::ShiftOr64 => {
                Backend::ShiftOr64(ShiftOr::compile(&literal, options.ignore_case))
            }
            Algorithm::BoyerMoore => {
                Backend::BoyerMoore(BoyerMoore::compile(literal, options.ignore_case))
            }
            Algorithm::Dfa => match options.match_mode {
                MatchMode::FullBool => Backend::Dfa {
                    forward: Fsm::build(&postfix, false, false)?,
                    backward: None,
                },
                MatchMode::PartialBool => Backend::Dfa {
                    forward: Fsm::build(&postfix, false, true)?,
                    backward: None,
                },
                MatchMode::PartialBoundary => Backend::Dfa {
                    forward: Fsm::build(&postfix, false, true)?,
                    backward: Some(Fsm::build(&postfix, true, false)?),
                },
                // Submatch modes were rejected above
                _ => return Err(RegexError::UnsupportedMode),
            },
            Algorithm::Nfa => return Err(RegexError::UnsupportedMode),
        };

        Ok(Regex {
            pattern: pattern.to_owned(),
            options,
            postfix,
            algorithm,
            backend,
            groups: Vec::new(),
        })
    }

    /// Run the compiled pattern against a text.
    ///
    /// Automata and tables built by earlier calls are reused; boundary
    /// mode records the match span readable through [`Regex::group`].
    pub fn matches(&mut self, text: &str) -> Result<MatchOutcome> {
        let bytes = text.as_bytes();
        let mode = self.options.match_mode;
        self.groups.clear();

        let hit = match &mut self.backend {
            Backend::ShiftOr32(m) => literal_hit(m.find(bytes), mode, bytes.len()),
            Backend::ShiftOr64(m) => literal_hit(m.find(bytes), mode, bytes.len()),
            Backend::BoyerMoore(m) => literal_hit(m.find(bytes), mode, bytes.len()),
            Backend::Dfa { forward, backward } => match mode {
                MatchMode::FullBool => {
                    if forward.run_full(bytes) {
                        Hit::Found(None)
                    } else {
                        Hit::Miss
                    }
                }
                MatchMode::PartialBool => {
                    if forward.run_partial(bytes) {
                        Hit::Found(None)
                    } else {
                        Hit::Miss
                    }
                }
                MatchMode::PartialBoundary => match backward {
                    Some(backward) => match dfa::find_boundary(forward, backward, bytes) {
                        Some(span) => Hit::Found(Some(span)),
                        None => Hit::Miss,
                    },
                    // Boundary mode always builds the flipped automaton
                    None => return Err(RegexError::NoCompilation),
                },
                // Submatch modes cannot compile
                _ => return Err(RegexError::UnsupportedMode),
            },
        };

        match hit {
            Hit::Miss => Ok(MatchOutcome::NotFound),
            Hit::Found(span) => {
                if let Some(span) = span {
                    self.groups.push(span);
                }
                Ok(MatchOutcome::Found)
            }
        }
    }

    /// Number of groups recorded by the last match; group 0 is the whole
    /// match, and boolean modes record none
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Byte span `[left, right)` of a recorded group, or `None` when the
    /// index is out of range
    pub fn group(&self, index: usize) -> Option<(usize, usize)> {
        self.groups.get(index).copied()
    }

    /// The backend the pattern compiled to
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The original pattern text
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// One-shot convenience: compile and match in one call, returning the
/// compiled pattern on a hit so its boundaries can be read back
pub fn match_once(text: &str, pattern: &str, options: MatchOptions) -> Result<Option<Regex>> {
    let mut regex = Regex::with_options(pattern, options)?;
    match regex.matches(text)? {
        MatchOutcome::Found => Ok(Some(regex)),
        MatchOutcome::NotFound => Ok(None),
    }
}
