use pixl::lexer::{Lexer, Token, TokenKind};

fn tokens(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokens(source).into_iter().map(|tok| tok.kind).collect()
}

#[test]
fn keywords_lex_as_keywords() {
    assert_eq!(
        kinds("if elif else while for return print let"),
        vec![
            TokenKind::If,
            TokenKind::Elif,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::Print,
            TokenKind::Let,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("int float bool void true false"),
        vec![
            TokenKind::IntType,
            TokenKind::FloatType,
            TokenKind::BoolType,
            TokenKind::VoidType,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn builtin_names_are_keywords() {
    assert_eq!(
        kinds("input key_pressed screen drawPixel drawRect drawLine drawCircle clearScreen display quit isKeyDown updateInput"),
        vec![
            TokenKind::Input,
            TokenKind::KeyPressed,
            TokenKind::Screen,
            TokenKind::DrawPixel,
            TokenKind::DrawRect,
            TokenKind::DrawLine,
            TokenKind::DrawCircle,
            TokenKind::ClearScreen,
            TokenKind::Display,
            TokenKind::Quit,
            TokenKind::IsKeyDown,
            TokenKind::UpdateInput,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn identifiers_that_extend_keywords_stay_identifiers() {
    assert_eq!(
        kinds("iffy whilex _if int3"),
        vec![
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn numbers_split_into_int_and_float() {
    let toks = tokens("42 3.14 0 1.");
    assert_eq!(toks[0].kind, TokenKind::Integer);
    assert_eq!(toks[0].text, "42");
    assert_eq!(toks[1].kind, TokenKind::Float);
    assert_eq!(toks[1].text, "3.14");
    assert_eq!(toks[2].kind, TokenKind::Integer);
    assert_eq!(toks[3].kind, TokenKind::Float);
    assert_eq!(toks[3].text, "1.");
}

#[test]
fn number_scan_is_greedy_over_dots() {
    let toks = tokens("1.2.3");
    assert_eq!(toks[0].kind, TokenKind::Float);
    assert_eq!(toks[0].text, "1.2.3");
    assert_eq!(toks[1].kind, TokenKind::Eof);
}

#[test]
fn strings_unescape_and_accept_both_quotes() {
    let toks = tokens(r#""hi\n" 'a\tb' "q\"q" "back\\slash""#);
    assert_eq!(toks[0].text, "hi\n");
    assert_eq!(toks[1].text, "a\tb");
    assert_eq!(toks[2].text, "q\"q");
    assert_eq!(toks[3].text, "back\\slash");
    for tok in &toks[..4] {
        assert!(matches!(tok.kind, TokenKind::Str(_)));
    }
}

#[test]
fn unknown_escapes_keep_the_character() {
    let toks = tokens(r#""a\qb""#);
    assert_eq!(toks[0].text, "aqb");
}

#[test]
fn unterminated_string_runs_to_end_of_input() {
    let toks = tokens("\"never closed");
    assert!(matches!(toks[0].kind, TokenKind::Str(_)));
    assert_eq!(toks[0].text, "never closed");
    assert_eq!(toks[1].kind, TokenKind::Eof);
}

#[test]
fn two_character_operators_win_over_prefixes() {
    assert_eq!(
        kinds("== != <= >= && || = ! < >"),
        vec![
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Assign,
            TokenKind::Bang,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lone_ampersand_and_pipe_are_unknown() {
    assert_eq!(
        kinds("& | @"),
        vec![
            TokenKind::Unknown,
            TokenKind::Unknown,
            TokenKind::Unknown,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn line_comments_are_skipped() {
    let toks = tokens("1 // ignored to the end\n2");
    assert_eq!(toks[0].kind, TokenKind::Integer);
    assert_eq!(toks[1].kind, TokenKind::Newline);
    assert_eq!(toks[2].kind, TokenKind::Integer);
    assert_eq!(toks[2].text, "2");
}

#[test]
fn block_comments_skip_and_count_lines() {
    let toks = tokens("1 /* a\nb\nc */ 2");
    assert_eq!(toks[0].line, 1);
    assert_eq!(toks[1].kind, TokenKind::Integer);
    assert_eq!(toks[1].line, 3);
}

#[test]
fn unterminated_block_comment_is_tolerated() {
    let toks = tokens("1 /* never closed");
    assert_eq!(toks[0].kind, TokenKind::Integer);
    assert_eq!(toks[1].kind, TokenKind::Eof);
}

#[test]
fn newline_token_reports_the_line_it_ends() {
    let toks = tokens("a\nb");
    assert_eq!(toks[0].kind, TokenKind::Identifier);
    assert_eq!(toks[0].line, 1);
    assert_eq!(toks[1].kind, TokenKind::Newline);
    assert_eq!(toks[1].line, 1);
    assert_eq!(toks[2].kind, TokenKind::Identifier);
    assert_eq!(toks[2].line, 2);
    assert_eq!(toks[2].column, 1);
}

#[test]
fn columns_are_one_based_byte_offsets() {
    let toks = tokens("int xy = 5;");
    assert_eq!(toks[0].column, 1);
    assert_eq!(toks[1].column, 5);
    assert_eq!(toks[2].column, 8);
    assert_eq!(toks[3].column, 10);
    assert_eq!(toks[4].column, 11);
}

#[test]
fn next_token_streams_and_then_repeats_eof() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn recognized_tokens_round_trip_through_their_text() {
    let source = "int x = 5 + 4 * foo ( ) { } ; , . : <= == while";
    let joined = tokens(source)
        .iter()
        .filter(|tok| !matches!(tok.kind, TokenKind::Newline | TokenKind::Eof))
        .map(|tok| tok.text.clone())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(joined, source);
}

#[test]
fn tokenize_always_ends_with_one_eof() {
    for source in ["", "x", "1 + 2", "\"s\"", "\n\n"] {
        let toks = tokens(source);
        assert_eq!(toks.last().map(|tok| tok.kind.clone()), Some(TokenKind::Eof));
        let eofs = toks.iter().filter(|tok| tok.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "source {source:?}");
    }
}
