//! Error types for the regex engine

use thiserror::Error;

/// Result type for regex operations
pub type Result<T> = std::result::Result<T, RegexError>;

/// Errors that can occur during regex compilation or execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegexError {
    /// A `?` quantifier with nothing quantifiable before it
    #[error("badly placed question mark")]
    InvalidQuestionMark,
    /// A `*` quantifier with nothing quantifiable before it
    #[error("badly placed star")]
    InvalidStar,
    /// A `+` quantifier with nothing quantifiable before it
    #[error("badly placed plus")]
    InvalidPlus,
    /// Unbalanced `(` or `)` in the pattern
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
    /// The requested match mode or backend is not implemented
    #[error("unsupported match mode")]
    UnsupportedMode,
    /// Invalid UTF-8 in input (reserved; `&str` inputs cannot trigger it)
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,
    /// Matching was attempted against a pattern that failed to compile
    /// (reserved; ownership makes this unreachable from safe Rust)
    #[error("pattern did not compile")]
    NoCompilation,
}
