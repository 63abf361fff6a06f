use thiserror::Error;

/// Syntax problems reported by strict parsing. Offsets are byte positions
/// into the pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("dangling quantifier: '{0}' has no preceding expression at position {1}")]
    DanglingQuantifier(char, usize),
    #[error("unknown escape sequence '\\{0}' at position {1}")]
    UnknownEscape(char, usize),
    #[error("unterminated escape: '\\' at position {0}")]
    TrailingEscape(usize),
    #[error("unmatched '{0}' at position {1}")]
    UnmatchedClose(char, usize),
    #[error("unterminated character class, missing ']' starting at position {0}")]
    UnterminatedCharClass(usize),
    #[error("unterminated group, missing ')' starting at position {0}")]
    UnterminatedGroup(usize),
    #[error("unterminated quantifier, missing '}}' starting at position {0}")]
    UnterminatedBrace(usize),
    #[error("invalid quantifier bounds starting at position {0}")]
    InvalidBrace(usize),
}
