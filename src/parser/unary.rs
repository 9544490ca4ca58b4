use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralKind, UnaryOp},
    error::ParseError,
    lexer::{Token, TokenKind},
    parser::{
        binary::{parse_assignment, parse_expression},
        utils::{check, current_line, eat, expect},
        ParseResult,
    },
};

/// Parses unary operators.
///
/// Grammar: `unary := ("!" | "-") unary | postfix`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    let op = match tokens.peek().map(|tok| &tok.kind) {
        Some(TokenKind::Bang) => Some(UnaryOp::Not),
        Some(TokenKind::Minus) => Some(UnaryOp::Neg),
        _ => None,
    };
    if let Some(op) = op {
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Expr::Unary { op, operand: Box::new(operand) });
    }
    parse_postfix(tokens)
}

/// Parses postfix call and index forms.
///
/// Grammar: `postfix := primary ( "(" args? ")" | "[" expression "]" )*`
///
/// A call target must be a bare identifier; anything else (for example
/// `(f)(x)` or `1(x)`) is rejected.
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    let mut expr = parse_primary(tokens)?;
    loop {
        if check(tokens, &TokenKind::LParen) {
            let line = current_line(tokens);
            tokens.next();
            let mut args = Vec::new();
            if !check(tokens, &TokenKind::RParen) {
                loop {
                    args.push(parse_assignment(tokens)?);
                    if !eat(tokens, &TokenKind::Comma) {
                        break;
                    }
                }
            }
            expect(tokens, &TokenKind::RParen, "Expected ')' after arguments")?;
            expr = match expr {
                Expr::Identifier { name } => Expr::Call { name, args },
                _ => return Err(ParseError::InvalidCallTarget { line }),
            };
        } else if check(tokens, &TokenKind::LBracket) {
            tokens.next();
            let index = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RBracket, "Expected ']' after index")?;
            expr = Expr::Index { array: Box::new(expr), index: Box::new(index) };
        } else {
            break;
        }
    }
    Ok(expr)
}

/// Parses a primary expression: literals, identifiers, parenthesized
/// expressions, and the built-in call forms.
///
/// Boolean literals materialize as `Literal` nodes with the texts `"1"`
/// and `"0"`. Each built-in name accepts an optional argument list and
/// produces either a dedicated node (`input`, `key_pressed`) or a `Call`
/// carrying the built-in's name.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    let Some(token) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };

    match &token.kind {
        TokenKind::True => {
            tokens.next();
            Ok(Expr::Literal { kind: LiteralKind::True, text: "1".to_string() })
        }
        TokenKind::False => {
            tokens.next();
            Ok(Expr::Literal { kind: LiteralKind::False, text: "0".to_string() })
        }
        TokenKind::Integer => {
            tokens.next();
            Ok(Expr::Literal { kind: LiteralKind::Int, text: token.text.clone() })
        }
        TokenKind::Float => {
            tokens.next();
            Ok(Expr::Literal { kind: LiteralKind::Float, text: token.text.clone() })
        }
        TokenKind::Str(_) => {
            tokens.next();
            Ok(Expr::Literal { kind: LiteralKind::Str, text: token.text.clone() })
        }
        TokenKind::Identifier => {
            tokens.next();
            Ok(Expr::Identifier { name: token.text.clone() })
        }
        TokenKind::Input => {
            tokens.next();
            let prompt = parse_optional_prompt(tokens)?;
            Ok(Expr::Input { prompt })
        }
        TokenKind::KeyPressed => {
            tokens.next();
            let prompt = parse_optional_prompt(tokens)?;
            Ok(Expr::KeyPressed { prompt })
        }
        TokenKind::Screen => parse_builtin_call(tokens, "screen"),
        TokenKind::ClearScreen => parse_builtin_call(tokens, "clearScreen"),
        TokenKind::DrawPixel => parse_builtin_call(tokens, "drawPixel"),
        TokenKind::DrawRect => parse_builtin_call(tokens, "drawRect"),
        TokenKind::DrawLine => parse_builtin_call(tokens, "drawLine"),
        TokenKind::DrawCircle => parse_builtin_call(tokens, "drawCircle"),
        TokenKind::Display => parse_builtin_call(tokens, "display"),
        TokenKind::Quit => parse_builtin_call(tokens, "quit"),
        TokenKind::IsKeyDown => parse_builtin_call(tokens, "isKeyDown"),
        TokenKind::UpdateInput => parse_builtin_call(tokens, "updateInput"),
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RParen, "Expected ')'")?;
            Ok(expr)
        }
        _ => Err(ParseError::UnexpectedToken {
            token: token.text.clone(),
            line: token.line,
        }),
    }
}

/// Parses the `input`/`key_pressed` tail: nothing, `()`, or `(<expr>)`.
fn parse_optional_prompt<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Box<Expr>>>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    if !eat(tokens, &TokenKind::LParen) {
        return Ok(None);
    }
    let mut prompt = None;
    if !check(tokens, &TokenKind::RParen) {
        prompt = Some(Box::new(parse_expression(tokens)?));
    }
    expect(tokens, &TokenKind::RParen, "Expected ')'")?;
    Ok(prompt)
}

/// Parses a built-in keyword used as a call: the keyword has already been
/// peeked; an argument list in parentheses is optional.
fn parse_builtin_call<'a, I>(tokens: &mut Peekable<I>, name: &str) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    tokens.next();
    let mut args = Vec::new();
    if eat(tokens, &TokenKind::LParen) {
        if !check(tokens, &TokenKind::RParen) {
            loop {
                args.push(parse_assignment(tokens)?);
                if !eat(tokens, &TokenKind::Comma) {
                    break;
                }
            }
        }
        expect(tokens, &TokenKind::RParen, "Expected ')'")?;
    }
    Ok(Expr::Call { name: name.to_string(), args })
}
