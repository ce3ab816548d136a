//! Error types for the Composer parser.
//!
//! Parsing itself is total: malformed markup degrades to text instead of
//! failing. The only error surfaced by this crate is [`PatternError`], raised
//! when a `%pattern%` macro cannot be formatted. The lexer catches it and keeps
//! the raw pattern as text; it is public so that callers formatting patterns
//! through [`MacroContext::format`](crate::MacroContext::format) can inspect it.

use thiserror::Error;

/// Errors raised while formatting a date-time pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown pattern letter `{0}`")]
    UnknownLetter(char),

    #[error("too many pattern letters: `{letter}` repeated {count} times")]
    TooManyLetters { letter: char, count: usize },

    #[error("reserved character `{0}` in pattern")]
    ReservedCharacter(char),

    #[error("unterminated quoted literal in pattern")]
    UnterminatedQuote,

    #[error("unbalanced optional section in pattern")]
    UnbalancedOptional,
}
