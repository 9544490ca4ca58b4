use logos::{Logos, Skip};

/// The token automaton.
///
/// This private enum carries the `logos` patterns; the public
/// [`TokenKind`] adds the two kinds the automaton never yields (`Eof`,
/// appended by the wrapper, and `Unknown`, which is how match failures
/// surface). Comments and blank space are skipped here and never reach
/// the token stream.
#[derive(Logos, Debug, Clone, PartialEq)]
enum RawToken {
    // Literals. The float scan is greedy over digits and dots, so
    // `1.2.3` is one (malformed) float token; nothing is validated until
    // the value is loaded at run time.
    #[regex(r"[0-9]+\.[0-9.]*")]
    Float,
    #[regex(r"[0-9]+")]
    Integer,
    // The payload is the unescaped content; the callback consumes up to
    // the matching quote.
    #[token("\"", lex_string)]
    #[token("'", lex_string)]
    Str(String),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Keywords.
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("return")]
    Return,
    #[token("print")]
    Print,
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("bool")]
    BoolType,
    #[token("void")]
    VoidType,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("let")]
    Let,

    // Built-ins.
    #[token("input")]
    Input,
    #[token("key_pressed")]
    KeyPressed,
    #[token("screen")]
    Screen,
    #[token("drawPixel")]
    DrawPixel,
    #[token("drawRect")]
    DrawRect,
    #[token("drawLine")]
    DrawLine,
    #[token("drawCircle")]
    DrawCircle,
    #[token("clearScreen")]
    ClearScreen,
    #[token("display")]
    Display,
    #[token("quit")]
    Quit,
    #[token("isKeyDown")]
    IsKeyDown,
    #[token("updateInput")]
    UpdateInput,

    // Operators; two-character forms win by longest match. A lone `&`
    // or `|` matches nothing and falls out as an error.
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Assign,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // Delimiters.
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
    #[token("/*", skip_block_comment)]
    BlockComment,
    #[regex(r"[ \t\r]+", logos::skip)]
    Whitespace,
}

/// Classifies a lexical token.
///
/// Covers literals, keywords, the drawing/input built-ins, operators,
/// delimiters, and the structural kinds: one `Newline` per line break,
/// exactly one `Eof` at the end of a stream, and `Unknown` for any
/// character no rule matches (for example a lone `&` or `@`). The lexer
/// as a whole never fails; rejecting bad tokens is the parser's job.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A floating-point literal (its text contains a `.`).
    Float,
    /// An integer literal.
    Integer,
    /// A string literal; the payload is the unescaped content.
    Str(String),
    /// An identifier: `[A-Za-z_][A-Za-z0-9_]*`, minus the keywords.
    Identifier,
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `while`
    While,
    /// `for`
    For,
    /// `return`
    Return,
    /// `print`
    Print,
    /// `int`
    IntType,
    /// `float`
    FloatType,
    /// `bool`
    BoolType,
    /// `void`
    VoidType,
    /// `true`
    True,
    /// `false`
    False,
    /// `let`
    Let,
    /// `input`
    Input,
    /// `key_pressed`
    KeyPressed,
    /// `screen`
    Screen,
    /// `drawPixel`
    DrawPixel,
    /// `drawRect`
    DrawRect,
    /// `drawLine`
    DrawLine,
    /// `drawCircle`
    DrawCircle,
    /// `clearScreen`
    ClearScreen,
    /// `display`
    Display,
    /// `quit`
    Quit,
    /// `isKeyDown`
    IsKeyDown,
    /// `updateInput`
    UpdateInput,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `=`
    Assign,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `!`
    Bang,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// One token per line break.
    Newline,
    /// End of input; always the last token of [`Lexer::tokenize`].
    Eof,
    /// A character no rule matched.
    Unknown,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Float => Self::Float,
            RawToken::Integer => Self::Integer,
            RawToken::Str(content) => Self::Str(content),
            RawToken::Identifier => Self::Identifier,
            RawToken::If => Self::If,
            RawToken::Elif => Self::Elif,
            RawToken::Else => Self::Else,
            RawToken::While => Self::While,
            RawToken::For => Self::For,
            RawToken::Return => Self::Return,
            RawToken::Print => Self::Print,
            RawToken::IntType => Self::IntType,
            RawToken::FloatType => Self::FloatType,
            RawToken::BoolType => Self::BoolType,
            RawToken::VoidType => Self::VoidType,
            RawToken::True => Self::True,
            RawToken::False => Self::False,
            RawToken::Let => Self::Let,
            RawToken::Input => Self::Input,
            RawToken::KeyPressed => Self::KeyPressed,
            RawToken::Screen => Self::Screen,
            RawToken::DrawPixel => Self::DrawPixel,
            RawToken::DrawRect => Self::DrawRect,
            RawToken::DrawLine => Self::DrawLine,
            RawToken::DrawCircle => Self::DrawCircle,
            RawToken::ClearScreen => Self::ClearScreen,
            RawToken::Display => Self::Display,
            RawToken::Quit => Self::Quit,
            RawToken::IsKeyDown => Self::IsKeyDown,
            RawToken::UpdateInput => Self::UpdateInput,
            RawToken::Plus => Self::Plus,
            RawToken::Minus => Self::Minus,
            RawToken::Star => Self::Star,
            RawToken::Slash => Self::Slash,
            RawToken::Percent => Self::Percent,
            RawToken::Assign => Self::Assign,
            RawToken::EqualEqual => Self::EqualEqual,
            RawToken::BangEqual => Self::BangEqual,
            RawToken::Less => Self::Less,
            RawToken::Greater => Self::Greater,
            RawToken::LessEqual => Self::LessEqual,
            RawToken::GreaterEqual => Self::GreaterEqual,
            RawToken::AmpAmp => Self::AmpAmp,
            RawToken::PipePipe => Self::PipePipe,
            RawToken::Bang => Self::Bang,
            RawToken::LParen => Self::LParen,
            RawToken::RParen => Self::RParen,
            RawToken::LBrace => Self::LBrace,
            RawToken::RBrace => Self::RBrace,
            RawToken::LBracket => Self::LBracket,
            RawToken::RBracket => Self::RBracket,
            RawToken::Semicolon => Self::Semicolon,
            RawToken::Comma => Self::Comma,
            RawToken::Dot => Self::Dot,
            RawToken::Colon => Self::Colon,
            RawToken::Newline => Self::Newline,
            RawToken::LineComment | RawToken::BlockComment | RawToken::Whitespace => {
                // Skip rules never yield; mapped only for completeness.
                Self::Unknown
            }
        }
    }
}

/// Consumes a string literal after its opening quote and returns the
/// unescaped content.
///
/// The closing quote must match the opening one. `\n`, `\t`, `\\`, `\"`
/// and `\'` map to their characters; any other escape keeps the escaped
/// character verbatim. A missing closing quote ends the literal at the
/// end of input without an error.
fn lex_string(lex: &mut logos::Lexer<RawToken>) -> String {
    let quote = lex.slice().chars().next().unwrap_or('"');
    let rest = lex.remainder();

    let mut text = String::new();
    let mut consumed = rest.len();
    let mut chars = rest.char_indices();

    while let Some((at, c)) = chars.next() {
        if c == quote {
            consumed = at + c.len_utf8();
            break;
        }
        if c == '\\' {
            match chars.next() {
                Some((_, esc)) => text.push(match esc {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                }),
                None => break,
            }
        } else {
            text.push(c);
        }
    }

    lex.bump(consumed);
    text
}

/// Skips a `/* ... */` comment; without a closing `*/` it swallows the
/// rest of the input.
fn skip_block_comment(lex: &mut logos::Lexer<RawToken>) -> Skip {
    match lex.remainder().find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(lex.remainder().len()),
    }
    Skip
}

/// A single token with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token's text: the matched slice, or the unescaped content for
    /// string literals.
    pub text: String,
    /// 1-based source line. A `Newline` token carries the line it ends.
    pub line: usize,
    /// 1-based column of the token's first character.
    pub column: usize,
}

/// Streams [`Token`]s out of a source string.
///
/// Wraps the `logos`-generated machine and attaches `(line, column)`
/// pairs by tracking newline offsets over the spans logos reports, which
/// also covers newlines buried inside skipped comments and multi-line
/// strings.
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, RawToken>,
    line: usize,
    line_start: usize,
    scanned: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: RawToken::lexer(source),
            line: 1,
            line_start: 0,
            scanned: 0,
            done: false,
        }
    }

    /// Returns the next token.
    ///
    /// Once the input is exhausted this returns `Eof` tokens forever.
    pub fn next_token(&mut self) -> Token {
        match self.inner.next() {
            Some(result) => {
                let span = self.inner.span();
                self.count_lines(self.scanned, span.start);
                let line = self.line;
                let column = span.start - self.line_start + 1;
                self.count_lines(span.start, span.end);
                self.scanned = span.end;

                let (kind, text) = match result {
                    Ok(RawToken::Str(content)) => (TokenKind::Str(content.clone()), content),
                    Ok(raw) => (TokenKind::from(raw), self.inner.slice().to_string()),
                    Err(()) => (TokenKind::Unknown, self.inner.slice().to_string()),
                };

                Token { kind, text, line, column }
            }
            None => {
                self.count_lines(self.scanned, self.source.len());
                self.scanned = self.source.len();
                self.done = true;
                Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line: self.line,
                    column: self.source.len() - self.line_start + 1,
                }
            }
        }
    }

    /// Tokenizes the whole input. The returned sequence always ends with
    /// exactly one `Eof` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let at_end = self.done;
            tokens.push(token);
            if at_end {
                break;
            }
        }
        tokens
    }

    /// Advances the line counter over `source[from..to]`.
    ///
    /// Called once for the skipped gap before a token (so its location
    /// is computed first) and once for the token's own span (so a
    /// `Newline` token reports the line *before* the break).
    fn count_lines(&mut self, from: usize, to: usize) {
        for (offset, byte) in self.source.as_bytes()[from..to].iter().enumerate() {
            if *byte == b'\n' {
                self.line += 1;
                self.line_start = from + offset + 1;
            }
        }
    }
}
