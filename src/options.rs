//! Match options: dialect style, match mode, and the syntax flags
//! the tokenizer consults

use bitflags::bitflags;

bitflags! {
    /// Syntax flags that control how the tokenizer reads metacharacters
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyntaxFlags: u32 {
        /// `(` and `)` group without a backslash; `\(` is a literal
        const PLAIN_PARENS = 1;
        /// `|` alternates without a backslash
        const PLAIN_VBAR = 2;
        /// `+` and `?` quantify without a backslash
        const PLAIN_PLUS_QM = 4;
        /// A `?` directly after a quantifier makes it non-greedy
        const NONGREEDY_SUFFIX = 8;
    }
}

impl SyntaxFlags {
    /// Check if parentheses group unescaped
    pub fn plain_parens(self) -> bool {
        self.contains(Self::PLAIN_PARENS)
    }

    /// Check if the vertical bar alternates unescaped
    pub fn plain_vbar(self) -> bool {
        self.contains(Self::PLAIN_VBAR)
    }

    /// Check if plus and question mark quantify unescaped
    pub fn plain_plus_qm(self) -> bool {
        self.contains(Self::PLAIN_PLUS_QM)
    }

    /// Check if a trailing `?` flips a quantifier non-greedy
    pub fn nongreedy_suffix(self) -> bool {
        self.contains(Self::NONGREEDY_SUFFIX)
    }
}

/// Pattern dialect selecting which raw characters act as metacharacters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// POSIX extended syntax
    #[default]
    Posix,
    /// POSIX with GNU extensions
    PosixGnu,
    /// Perl syntax; quantifiers accept a non-greedy `?` suffix
    Perl,
    /// Vim `magic` mode
    VimMagic,
    /// Vim `very magic` mode
    VimVeryMagic,
    /// Vim `nomagic` mode
    VimNoMagic,
    /// Vim `very nomagic` mode
    VimVeryNoMagic,
    /// Mixed style
    Mixed,
}

impl Style {
    /// Syntax flags for this dialect
    pub fn flags(self) -> SyntaxFlags {
        let base = SyntaxFlags::PLAIN_PARENS | SyntaxFlags::PLAIN_VBAR | SyntaxFlags::PLAIN_PLUS_QM;
        match self {
            Style::Perl => base | SyntaxFlags::NONGREEDY_SUFFIX,
            _ => base,
        }
    }
}

/// How much of the text must match and what result is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The whole text must match; boolean result
    FullBool,
    /// The whole text must match, with submatch extraction (unsupported)
    FullSubmatch,
    /// The pattern must occur somewhere in the text; boolean result
    #[default]
    PartialBool,
    /// The pattern must occur somewhere; the leftmost-longest span is reported
    PartialBoundary,
    /// Substring match with submatch extraction (unsupported)
    PartialSubmatch,
}

/// Options controlling compilation and matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Pattern dialect
    pub style: Style,
    /// Match protocol
    pub match_mode: MatchMode,
    /// Fold ASCII case on both pattern and text
    pub ignore_case: bool,
}

impl MatchOptions {
    /// Options for boundary search, the most common programmatic use
    pub fn boundary() -> Self {
        MatchOptions {
            match_mode: MatchMode::PartialBoundary,
            ..MatchOptions::default()
        }
    }
}
