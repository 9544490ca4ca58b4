use std::iter::Peekable;

use crate::{
    error::ParseError,
    lexer::{Token, TokenKind},
    parser::ParseResult,
};

/// Returns the line of the next token, or 0 at the end of the stream.
pub(crate) fn current_line<'a, I>(tokens: &mut Peekable<I>) -> usize
where
    I: Iterator<Item = &'a Token>,
{
    tokens.peek().map_or(0, |tok| tok.line)
}

/// Returns the kind of the token `offset` positions ahead without
/// consuming anything. `offset` 0 is the next token.
pub(crate) fn kind_at<'a, I>(tokens: &Peekable<I>, offset: usize) -> Option<TokenKind>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    tokens.clone().nth(offset).map(|tok| tok.kind.clone())
}

/// Returns whether the next token has the given kind.
pub(crate) fn check<'a, I>(tokens: &mut Peekable<I>, kind: &TokenKind) -> bool
where
    I: Iterator<Item = &'a Token>,
{
    tokens.peek().is_some_and(|tok| tok.kind == *kind)
}

/// Consumes the next token when it has the given kind.
pub(crate) fn eat<'a, I>(tokens: &mut Peekable<I>, kind: &TokenKind) -> bool
where
    I: Iterator<Item = &'a Token>,
{
    if check(tokens, kind) {
        tokens.next();
        return true;
    }
    false
}

/// Consumes the next token, requiring the given kind.
///
/// `what` becomes the error message on mismatch, e.g.
/// `Expected ';' after expression`.
pub(crate) fn expect<'a, I>(
    tokens: &mut Peekable<I>,
    kind: &TokenKind,
    what: &str,
) -> ParseResult<()>
where
    I: Iterator<Item = &'a Token>,
{
    match tokens.next() {
        Some(tok) if tok.kind == *kind => Ok(()),
        Some(tok) => Err(ParseError::Expected { what: what.to_string(), line: tok.line }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes an identifier token and returns its name.
pub(crate) fn parse_identifier<'a, I>(
    tokens: &mut Peekable<I>,
    what: &str,
) -> ParseResult<String>
where
    I: Iterator<Item = &'a Token>,
{
    match tokens.next() {
        Some(tok) if tok.kind == TokenKind::Identifier => Ok(tok.text.clone()),
        Some(tok) => Err(ParseError::Expected { what: what.to_string(), line: tok.line }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Skips any run of `Newline` tokens.
pub(crate) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
where
    I: Iterator<Item = &'a Token>,
{
    while check(tokens, &TokenKind::Newline) {
        tokens.next();
    }
}

/// Returns whether `kind` can open a type position.
///
/// Identifiers count: a user-named type is indistinguishable from a
/// variable here, so the callers disambiguate with one token of lookahead.
pub(crate) fn is_type_token(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::IntType
            | TokenKind::FloatType
            | TokenKind::BoolType
            | TokenKind::VoidType
            | TokenKind::Identifier
    )
}

/// Renders a token in type position as a textual type name.
pub(crate) fn type_name(token: &Token) -> String {
    match token.kind {
        TokenKind::IntType => "int".to_string(),
        TokenKind::FloatType => "float".to_string(),
        TokenKind::BoolType => "bool".to_string(),
        TokenKind::VoidType => "void".to_string(),
        TokenKind::Identifier => token.text.clone(),
        _ => "unknown".to_string(),
    }
}
