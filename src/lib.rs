pub mod ast;
pub mod error;
pub mod parser;
pub mod printer;

use std::io;

pub use ast::{AnchorKind, Node, NodeId, Pattern, SpecialClass, UNBOUNDED};
pub use error::ParseError;
pub use parser::{Parser, Syntax};
pub use printer::render;

/// Compile `pattern` into a tree, accepting any input on a best-effort
/// basis. Returns `None` for an empty pattern.
pub fn compile(pattern: &str) -> Option<Pattern> {
    // Permissive parsing never fails.
    Parser::new(pattern).parse().ok().flatten()
}

/// Like [`compile`], but malformed syntax is reported as a [`ParseError`].
pub fn try_compile(pattern: &str) -> Result<Option<Pattern>, ParseError> {
    Parser::new(pattern).with_syntax(Syntax::Strict).parse()
}

/// Release a compiled pattern, returning how many nodes were freed.
pub fn free(pattern: Pattern) -> usize {
    pattern.free()
}

/// Write the diagnostic tree dump of `pattern` to standard output.
pub fn print(pattern: &Pattern) -> io::Result<()> {
    printer::print(pattern)
}
