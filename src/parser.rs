//! Pattern tokenizer, postfix expression builder, and algorithm selection
//!
//! The parser turns a pattern into a postfix (reverse-Polish) symbol
//! sequence via a shunting-yard pass, then classifies the sequence to pick
//! the cheapest capable backend.

use tracing::{debug, trace};

use crate::charset::{CharRange, CharSet};
use crate::error::{RegexError, Result};
use crate::options::{MatchOptions, SyntaxFlags};

/// Kind of a postfix symbol or parse token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Literal character operand (one range, two under case folding)
    Char,
    /// Shorthand class operand (`\d`, `\w`, `.`, ...)
    Class,
    /// Zero-length operand synthesized for empty alternation arms and groups
    Empty,
    /// Implicit concatenation operator
    Concat,
    /// Alternation operator
    Or,
    /// `?` quantifier
    Optional,
    /// `*` quantifier
    Star,
    /// `+` quantifier
    Plus,
    /// Non-greedy `??`
    OptionalLazy,
    /// Non-greedy `*?`
    StarLazy,
    /// Non-greedy `+?`
    PlusLazy,
    /// `(` delimiter (parse-time only)
    GroupOpen,
    /// `)` delimiter (parse-time only)
    GroupClose,
    /// Start-of-pattern sentinel (parse-time only)
    PatternStart,
    /// End-of-pattern sentinel (parse-time only)
    PatternEnd,
}

impl SymbolKind {
    /// Quantifier kinds, greedy and non-greedy
    pub fn is_quantifier(self) -> bool {
        matches!(
            self,
            SymbolKind::Optional
                | SymbolKind::Star
                | SymbolKind::Plus
                | SymbolKind::OptionalLazy
                | SymbolKind::StarLazy
                | SymbolKind::PlusLazy
        )
    }

    /// Tokens that open a sequence: nothing quantifiable sits before them
    fn opens_sequence(self) -> bool {
        matches!(
            self,
            SymbolKind::GroupOpen | SymbolKind::PatternStart | SymbolKind::Or
        )
    }

    /// Tokens that close a sequence
    fn closes_sequence(self) -> bool {
        matches!(
            self,
            SymbolKind::GroupClose | SymbolKind::PatternEnd | SymbolKind::Or
        )
    }

    /// Operator precedence used by the shunting-yard pass
    fn precedence(self) -> u32 {
        match self {
            SymbolKind::Optional
            | SymbolKind::Star
            | SymbolKind::Plus
            | SymbolKind::OptionalLazy
            | SymbolKind::StarLazy
            | SymbolKind::PlusLazy => 4,
            SymbolKind::Concat => 3,
            SymbolKind::Or => 2,
            SymbolKind::GroupOpen | SymbolKind::GroupClose => 1,
            SymbolKind::PatternStart | SymbolKind::PatternEnd => 0,
            // Operands never sit on the operator stack
            SymbolKind::Char | SymbolKind::Class | SymbolKind::Empty => 5,
        }
    }
}

/// One element of the postfix sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub set: CharSet,
}

impl Symbol {
    fn operator(kind: SymbolKind) -> Self {
        Symbol { kind, set: CharSet::new() }
    }

    fn operand(kind: SymbolKind, set: CharSet) -> Self {
        Symbol { kind, set }
    }
}

/// Backend selected for a compiled pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Bitmask shift-or over a 32-bit word
    ShiftOr32,
    /// Bitmask shift-or over a 64-bit word
    ShiftOr64,
    /// Boyer-Moore with good-suffix and bad-character tables
    BoyerMoore,
    /// Lazy subset-construction DFA
    Dfa,
    /// Thompson NFA simulation; declared but not implemented
    Nfa,
}

/// Tokenizer state over the raw pattern bytes
struct Tokenizer<'a> {
    pattern: &'a [u8],
    pos: usize,
    flags: SyntaxFlags,
    ignore_case: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(pattern: &'a [u8], flags: SyntaxFlags, ignore_case: bool) -> Self {
        Tokenizer { pattern, pos: 0, flags, ignore_case }
    }

    /// Literal operand; case folding widens alphabetic bytes with the
    /// opposite case as a second range on the same symbol
    fn literal(&self, byte: u8) -> Symbol {
        let mut set = CharSet::single(byte);
        if self.ignore_case && byte.is_ascii_alphabetic() {
            set.push(CharRange::single(byte ^ 0x20));
        }
        Symbol::operand(SymbolKind::Char, set)
    }

    /// Shorthand class for an escape letter
    fn class(&self, letter: u8) -> Symbol {
        let mut set = CharSet::new();
        match letter {
            b's' => {
                set.push(CharRange::single(b' '));
                set.push(CharRange::single(b'\t'));
            }
            b'd' => set.push(CharRange { lower: b'0', upper: b'9' }),
            b'x' => {
                set.push(CharRange { lower: b'0', upper: b'9' });
                set.push(CharRange { lower: b'A', upper: b'F' });
                set.push(CharRange { lower: b'a', upper: b'f' });
            }
            b'o' => set.push(CharRange { lower: b'0', upper: b'7' }),
            b'w' => {
                set.push(CharRange { lower: b'0', upper: b'9' });
                set.push(CharRange { lower: b'A', upper: b'Z' });
                set.push(CharRange { lower: b'a', upper: b'z' });
            }
            b'h' => {
                set.push(CharRange { lower: b'A', upper: b'Z' });
                set.push(CharRange { lower: b'a', upper: b'z' });
                set.push(CharRange::single(b'_'));
            }
            b'a' => {
                set.push(CharRange { lower: b'A', upper: b'Z' });
                set.push(CharRange { lower: b'a', upper: b'z' });
            }
            b'l' => {
                set.push(CharRange { lower: b'a', upper: b'z' });
                if self.ignore_case {
                    set.push(CharRange { lower: b'A', upper: b'Z' });
                }
            }
            b'u' => {
                set.push(CharRange { lower: b'A', upper: b'Z' });
                if self.ignore_case {
                    set.push(CharRange { lower: b'a', upper: b'z' });
                }
            }
            _ => set.push(CharRange::single(letter)),
        }
        Symbol::operand(SymbolKind::Class, set)
    }

    /// A quantifier, downgraded to its non-greedy variant when the dialect
    /// honors a trailing `?`
    fn quantifier(&mut self, greedy: SymbolKind, lazy: SymbolKind) -> Symbol {
        if self.flags.nongreedy_suffix() && self.pattern.get(self.pos) == Some(&b'?') {
            self.pos += 1;
            Symbol::operator(lazy)
        } else {
            Symbol::operator(greedy)
        }
    }

    /// Next token, or `None` at end of pattern
    fn next(&mut self) -> Option<Symbol> {
        let c0 = *self.pattern.get(self.pos)?;
        self.pos += 1;

        if c0.is_ascii_alphanumeric() {
            return Some(self.literal(c0));
        }

        let sym = match c0 {
            b'\\' => {
                let c1 = self.pattern.get(self.pos).copied();
                self.pos += 1;
                match c1 {
                    Some(c @ (b'(' | b')')) if self.flags.plain_parens() => self.literal(c),
                    Some(c @ (b'+' | b'?')) if self.flags.plain_plus_qm() => self.literal(c),
                    Some(b'\\') => self.literal(b'\\'),
                    Some(
                        c @ (b's' | b'd' | b'x' | b'o' | b'w' | b'h' | b'a' | b'l' | b'u'),
                    ) => self.class(c),
                    // Unknown escape: the backslash is a literal and the
                    // escaped byte is re-read as its own token
                    _ => {
                        self.pos -= 1;
                        self.literal(b'\\')
                    }
                }
            }
            b'(' if self.flags.plain_parens() => Symbol::operator(SymbolKind::GroupOpen),
            b')' if self.flags.plain_parens() => Symbol::operator(SymbolKind::GroupClose),
            b'+' if self.flags.plain_plus_qm() => {
                self.quantifier(SymbolKind::Plus, SymbolKind::PlusLazy)
            }
            b'?' if self.flags.plain_plus_qm() => {
                self.quantifier(SymbolKind::Optional, SymbolKind::OptionalLazy)
            }
            b'*' => self.quantifier(SymbolKind::Star, SymbolKind::StarLazy),
            b'|' if self.flags.plain_vbar() => Symbol::operator(SymbolKind::Or),
            b'.' => Symbol::operand(SymbolKind::Class, CharSet::printable()),
            _ => self.literal(c0),
        };
        Some(sym)
    }
}

/// Pop operators of equal or higher precedence to the output, then push
fn maintain(op: SymbolKind, stack: &mut Vec<SymbolKind>, output: &mut Vec<Symbol>) {
    let level = op.precedence();
    while let Some(&top) = stack.last() {
        if top.precedence() >= level {
            stack.pop();
            output.push(Symbol::operator(top));
        } else {
            break;
        }
    }
    stack.push(op);
}

/// Error kind for a badly placed quantifier
fn quantifier_error(kind: SymbolKind) -> RegexError {
    match kind {
        SymbolKind::Optional | SymbolKind::OptionalLazy => RegexError::InvalidQuestionMark,
        SymbolKind::Plus | SymbolKind::PlusLazy => RegexError::InvalidPlus,
        _ => RegexError::InvalidStar,
    }
}

/// Parse a pattern into its postfix symbol sequence and pick a backend
pub fn parse(pattern: &[u8], options: MatchOptions) -> Result<(Vec<Symbol>, Algorithm)> {
    let flags = options.style.flags();

    // First scan: tokenize between start/end sentinels
    let mut tokens = vec![Symbol::operator(SymbolKind::PatternStart)];
    let mut tokenizer = Tokenizer::new(pattern, flags, options.ignore_case);
    while let Some(sym) = tokenizer.next() {
        tokens.push(sym);
    }
    tokens.push(Symbol::operator(SymbolKind::PatternEnd));

    // Second scan: shunting-yard into postfix order
    let mut output: Vec<Symbol> = Vec::new();
    let mut stack: Vec<SymbolKind> = vec![SymbolKind::PatternStart];

    for i in 1..tokens.len() {
        let kind = tokens[i].kind;
        let prev = tokens[i - 1].kind;

        match kind {
            SymbolKind::Char | SymbolKind::Class => {
                if !prev.opens_sequence() {
                    maintain(SymbolKind::Concat, &mut stack, &mut output);
                }
                output.push(tokens[i].clone());
            }

            SymbolKind::Or => {
                // An empty left arm (`|xxx` or `(|xxx`) still needs an operand
                if prev.opens_sequence() {
                    output.push(Symbol::operand(SymbolKind::Empty, CharSet::new()));
                }
                maintain(SymbolKind::Or, &mut stack, &mut output);
                // Same for an empty right arm (`xxx|` or `xxx|)`)
                if tokens[i + 1].kind.closes_sequence() {
                    output.push(Symbol::operand(SymbolKind::Empty, CharSet::new()));
                }
            }

            _ if kind.is_quantifier() => {
                if prev.opens_sequence() || prev.is_quantifier() {
                    return Err(quantifier_error(kind));
                }
                maintain(kind, &mut stack, &mut output);
            }

            SymbolKind::GroupOpen => {
                if !prev.opens_sequence() {
                    maintain(SymbolKind::Concat, &mut stack, &mut output);
                }
                stack.push(SymbolKind::GroupOpen);
            }

            SymbolKind::GroupClose => {
                // `()` contributes a zero-length operand
                if prev == SymbolKind::GroupOpen {
                    output.push(Symbol::operand(SymbolKind::Empty, CharSet::new()));
                }
                loop {
                    match stack.pop() {
                        Some(SymbolKind::GroupOpen) => break,
                        Some(SymbolKind::PatternStart) | None => {
                            return Err(RegexError::UnmatchedParenthesis)
                        }
                        Some(op) => output.push(Symbol::operator(op)),
                    }
                }
            }

            SymbolKind::PatternEnd => {
                loop {
                    match stack.pop() {
                        Some(SymbolKind::PatternStart) | None => break,
                        Some(SymbolKind::GroupOpen) => {
                            return Err(RegexError::UnmatchedParenthesis)
                        }
                        Some(op) => output.push(Symbol::operator(op)),
                    }
                }
            }

            // Tokenizer never emits Empty or sentinels mid-stream
            _ => {}
        }
    }

    let algorithm = choose_algorithm(&output);
    trace!(?output, "postfix sequence");
    debug!(?algorithm, "selected algorithm");
    Ok((output, algorithm))
}

/// Pick the cheapest backend able to run the postfix sequence.
///
/// Plain literal concatenations run on the word-width bitmask matchers when
/// short enough, Boyer-Moore otherwise; anything with alternation,
/// quantifiers, or classes takes the DFA.
fn choose_algorithm(postfix: &[Symbol]) -> Algorithm {
    let mut literal_only = true;
    let mut num_char = 0usize;

    for sym in postfix {
        match sym.kind {
            SymbolKind::Char => num_char += 1,
            SymbolKind::Concat => {}
            _ => literal_only = false,
        }
    }

    if literal_only && num_char <= 32 {
        Algorithm::ShiftOr32
    } else if literal_only && num_char <= 64 {
        Algorithm::ShiftOr64
    } else if literal_only {
        Algorithm::BoyerMoore
    } else {
        Algorithm::Dfa
    }
}

/// Extract the literal byte string of a literal-only postfix sequence,
/// folded to lower case when matching case-insensitively
pub fn literal_bytes(postfix: &[Symbol], ignore_case: bool) -> Vec<u8> {
    postfix
        .iter()
        .filter(|sym| sym.kind == SymbolKind::Char)
        .filter_map(|sym| sym.set.first_byte())
        .map(|b| if ignore_case { b.to_ascii_lowercase() } else { b })
        .collect()
}
