use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionDecl, Param, Program, Stmt},
    error::ParseError,
    lexer::{Token, TokenKind},
    parser::{
        binary::parse_expression,
        utils::{
            check, current_line, eat, expect, is_type_token, kind_at, parse_identifier,
            skip_newlines, type_name,
        },
        ParseResult,
    },
};

/// Parses a whole program: zero or more function declarations with
/// newlines skipped between them.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    let mut program = Program::default();
    loop {
        skip_newlines(tokens);
        if at_end(tokens) {
            break;
        }
        program.functions.push(parse_function(tokens)?);
    }
    Ok(program)
}

fn at_end<'a, I>(tokens: &mut Peekable<I>) -> bool
where
    I: Iterator<Item = &'a Token>,
{
    tokens.peek().is_none_or(|tok| tok.kind == TokenKind::Eof)
}

/// Parses one function declaration: `[ReturnType] Name '(' Params? ')' Block`.
///
/// The return type is optional. An identifier directly followed by `(` is
/// the function's name and the return type defaults to `void`; otherwise
/// the first token names the return type and the next the function.
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<FunctionDecl>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    let mut return_type = "void".to_string();

    if let Some(first) = kind_at(tokens, 0) {
        if is_type_token(&first) {
            let unnamed_return = first == TokenKind::Identifier
                && matches!(kind_at(tokens, 1), Some(TokenKind::LParen));
            if !unnamed_return {
                if let Some(tok) = tokens.next() {
                    return_type = type_name(tok);
                }
            }
        }
    }

    let name = parse_identifier(tokens, "Expected function name")?;
    expect(tokens, &TokenKind::LParen, "Expected '('")?;

    let mut params = Vec::new();
    if !check(tokens, &TokenKind::RParen) {
        loop {
            let ty = match tokens.next() {
                Some(tok) => type_name(tok),
                None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
            };
            let param_name = parse_identifier(tokens, "Expected parameter name")?;
            params.push(Param { ty, name: param_name });
            if !eat(tokens, &TokenKind::Comma) {
                break;
            }
        }
    }
    expect(tokens, &TokenKind::RParen, "Expected ')'")?;

    let body = parse_block(tokens)?;
    Ok(FunctionDecl { return_type, name, params, body })
}

/// Parses one statement, dispatching on the leading token.
///
/// An identifier only opens a variable declaration when the following
/// token is also an identifier (`TypeName varName`); otherwise it starts
/// an expression statement such as `x = 1;`.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    match kind_at(tokens, 0) {
        Some(TokenKind::LBrace) => parse_block(tokens),
        Some(TokenKind::Return) => parse_return(tokens),
        Some(TokenKind::If) => parse_if(tokens),
        Some(TokenKind::While) => parse_while(tokens),
        Some(TokenKind::For) => parse_for(tokens),
        Some(TokenKind::Print) => parse_print(tokens),
        Some(TokenKind::Let) => parse_var_decl(tokens, false),
        Some(TokenKind::Identifier)
            if matches!(kind_at(tokens, 1), Some(TokenKind::Identifier)) =>
        {
            parse_var_decl(tokens, false)
        }
        Some(
            TokenKind::IntType | TokenKind::FloatType | TokenKind::BoolType | TokenKind::VoidType,
        ) => parse_var_decl(tokens, false),
        _ => parse_expression_statement(tokens),
    }
}

/// Parses a `{ ... }` block, skipping newlines between statements.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    expect(tokens, &TokenKind::LBrace, "Expected '{'")?;
    let mut statements = Vec::new();
    loop {
        skip_newlines(tokens);
        if check(tokens, &TokenKind::RBrace) || at_end(tokens) {
            break;
        }
        statements.push(parse_statement(tokens)?);
    }
    expect(tokens, &TokenKind::RBrace, "Expected '}'")?;
    Ok(Stmt::Block { statements })
}

fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    expect(tokens, &TokenKind::Return, "Expected 'return'")?;
    let mut value = None;
    if !check(tokens, &TokenKind::Semicolon) {
        value = Some(parse_expression(tokens)?);
    }
    expect(tokens, &TokenKind::Semicolon, "Expected ';' after return")?;
    Ok(Stmt::Return { value })
}

/// Parses `if (cond) stmt [elif ... | else stmt]`.
///
/// `elif` re-enters this parser with the `elif` token playing the role of
/// `if`, so chains nest as plain if/else trees.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    match kind_at(tokens, 0) {
        Some(TokenKind::If | TokenKind::Elif) => {
            tokens.next();
        }
        _ => {
            return Err(ParseError::Expected {
                what: "Expected 'if' or 'elif'".to_string(),
                line: current_line(tokens),
            });
        }
    }

    expect(tokens, &TokenKind::LParen, "Expected '(' after 'if'")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &TokenKind::RParen, "Expected ')' after condition")?;
    let then_branch = parse_statement(tokens)?;

    let else_branch = if check(tokens, &TokenKind::Elif) {
        Some(Box::new(parse_if(tokens)?))
    } else if eat(tokens, &TokenKind::Else) {
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_branch: Box::new(then_branch),
        else_branch,
    })
}

fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    expect(tokens, &TokenKind::While, "Expected 'while'")?;
    expect(tokens, &TokenKind::LParen, "Expected '(' after 'while'")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &TokenKind::RParen, "Expected ')' after while condition")?;
    let body = parse_statement(tokens)?;
    Ok(Stmt::While { condition, body: Box::new(body) })
}

/// Parses a `for` header and body. All three header components are
/// optional; the initializer takes the same two declaration forms as a
/// variable declaration but leaves the separating `;` to the header.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    expect(tokens, &TokenKind::For, "Expected 'for'")?;
    expect(tokens, &TokenKind::LParen, "Expected '(' after 'for'")?;

    let mut init = None;
    if !check(tokens, &TokenKind::Semicolon) {
        init = Some(Box::new(parse_var_decl(tokens, true)?));
    }
    expect(tokens, &TokenKind::Semicolon, "Expected ';' after for-init")?;

    let mut condition = None;
    if !check(tokens, &TokenKind::Semicolon) {
        condition = Some(parse_expression(tokens)?);
    }
    expect(tokens, &TokenKind::Semicolon, "Expected ';' after for-condition")?;

    let mut increment = None;
    if !check(tokens, &TokenKind::RParen) {
        increment = Some(parse_expression(tokens)?);
    }
    expect(tokens, &TokenKind::RParen, "Expected ')' after for clauses")?;

    let body = parse_statement(tokens)?;
    Ok(Stmt::For {
        init,
        condition,
        increment,
        body: Box::new(body),
    })
}

/// Parses either declaration surface form:
///
/// 1. `let Name ':' Type '=' Expr ';'`
/// 2. `Type Name ('=' Expr)? ';'`
///
/// Inside a `for` header (`in_for_header`) the trailing `;` is left for
/// the header to consume.
fn parse_var_decl<'a, I>(tokens: &mut Peekable<I>, in_for_header: bool) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    if eat(tokens, &TokenKind::Let) {
        let name = parse_identifier(tokens, "Expected variable name")?;
        expect(tokens, &TokenKind::Colon, "Expected ':' after variable name")?;
        let ty = match tokens.peek().copied() {
            Some(tok) if is_type_token(&tok.kind) => {
                tokens.next();
                type_name(tok)
            }
            Some(tok) => {
                return Err(ParseError::Expected {
                    what: "Expected type after ':'".to_string(),
                    line: tok.line,
                });
            }
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        };
        expect(tokens, &TokenKind::Assign, "Expected '=' after type")?;
        let init = parse_expression(tokens)?;
        if !in_for_header {
            expect(
                tokens,
                &TokenKind::Semicolon,
                "Expected ';' after variable declaration",
            )?;
        }
        return Ok(Stmt::VarDecl { name, ty, init: Some(init) });
    }

    let ty = match tokens.peek().copied() {
        Some(tok) if is_type_token(&tok.kind) => {
            tokens.next();
            type_name(tok)
        }
        Some(tok) => {
            return Err(ParseError::Expected {
                what: "Expected type for variable declaration".to_string(),
                line: tok.line,
            });
        }
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };
    let name = parse_identifier(tokens, "Expected variable name")?;
    let mut init = None;
    if eat(tokens, &TokenKind::Assign) {
        init = Some(parse_expression(tokens)?);
    }
    if !in_for_header {
        expect(
            tokens,
            &TokenKind::Semicolon,
            "Expected ';' after variable declaration",
        )?;
    }
    Ok(Stmt::VarDecl { name, ty, init })
}

fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    expect(tokens, &TokenKind::Print, "Expected 'print'")?;
    expect(tokens, &TokenKind::LParen, "Expected '(' after 'print'")?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &TokenKind::RParen, "Expected ')'")?;
    expect(tokens, &TokenKind::Semicolon, "Expected ';' after print statement")?;
    Ok(Stmt::Print { expr })
}

fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a Token> + Clone,
{
    let expr: Expr = parse_expression(tokens)?;
    expect(tokens, &TokenKind::Semicolon, "Expected ';' after expression")?;
    Ok(Stmt::Expression { expr })
}
