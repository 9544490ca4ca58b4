use crate::{ast::Program, error::ParseError, lexer::Token};

/// Binary expression levels: comma, assignment, logical, equality,
/// comparison, additive, multiplicative.
pub mod binary;
/// Statement and declaration parsing, including whole programs.
pub mod statement;
/// Unary, postfix (calls and indexing), and primary expressions.
pub mod unary;
/// Shared token-stream helpers (expect/check/lookahead).
pub mod utils;

/// Result type used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a token sequence into a [`Program`].
///
/// The sequence is expected to end with an `Eof` token, as produced by
/// [`crate::lexer::Lexer::tokenize`]. Top-level `Newline` tokens are
/// skipped; everything else must be a function declaration.
///
/// # Errors
/// Returns the first [`ParseError`] encountered; parsing does not recover.
pub fn parse(tokens: &[Token]) -> ParseResult<Program> {
    let mut stream = tokens.iter().peekable();
    statement::parse_program(&mut stream)
}
