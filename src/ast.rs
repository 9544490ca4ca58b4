/// Classifies a literal expression.
///
/// The literal's text is kept verbatim from the source; nothing is parsed
/// until the IR is executed. Boolean literals are materialized with the
/// texts `"1"` and `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// An integer literal such as `42`.
    Int,
    /// A floating-point literal such as `3.14`.
    Float,
    /// A string literal (text already unescaped).
    Str,
    /// The literal `true`.
    True,
    /// The literal `false`.
    False,
}

/// An expression node.
///
/// Expressions are built by the parser and consumed by the semantic
/// analyzer and the IR generator. Every operand that may legally be absent
/// is an `Option`; everything else is required.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value with its source text.
    Literal {
        /// What kind of literal this is.
        kind: LiteralKind,
        /// The literal's text, unescaped for strings.
        text: String,
    },
    /// A reference to a named variable or parameter.
    Identifier {
        /// The referenced name.
        name: String,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// The operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },
    /// A unary operation (`-x` or `!x`).
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// A call to a named function or built-in.
    Call {
        /// The callee name.
        name: String,
        /// Arguments in source order.
        args: Vec<Expr>,
    },
    /// A console `input` read with an optional prompt expression.
    Input {
        /// Prompt shown before reading, when present.
        prompt: Option<Box<Expr>>,
    },
    /// A single-key `key_pressed` read with an optional prompt expression.
    KeyPressed {
        /// Prompt shown before reading, when present.
        prompt: Option<Box<Expr>>,
    },
    /// An index read, `array[index]`.
    Index {
        /// The indexed expression.
        array: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
    },
    /// An assignment to a bare name. Only identifiers are legal targets.
    Assign {
        /// The assigned name.
        name: String,
        /// The assigned value.
        value: Box<Expr>,
    },
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A `{ ... }` block. Blocks do not introduce a scope.
    Block {
        /// Statements in source order.
        statements: Vec<Stmt>,
    },
    /// A `return` statement with an optional value.
    Return {
        /// The returned expression, when present.
        value: Option<Expr>,
    },
    /// An `if`/`elif`/`else` chain. `elif` nests as the else-branch.
    If {
        /// The condition expression.
        condition: Expr,
        /// Statement executed when the condition is non-zero.
        then_branch: Box<Stmt>,
        /// Statement executed otherwise, when present.
        else_branch: Option<Box<Stmt>>,
    },
    /// A `while` loop.
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// A C-style `for` loop; every header component is optional.
    For {
        /// Loop initializer (a declaration), when present.
        init: Option<Box<Stmt>>,
        /// Loop condition, when present.
        condition: Option<Expr>,
        /// Increment expression, when present.
        increment: Option<Expr>,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// A variable declaration in either surface form
    /// (`let name: type = expr;` or `type name [= expr];`).
    VarDecl {
        /// The declared name.
        name: String,
        /// The declared type, textual.
        ty: String,
        /// The initializer, when present.
        init: Option<Expr>,
    },
    /// An expression evaluated for its effects.
    Expression {
        /// The expression.
        expr: Expr,
    },
    /// A `print(expr);` statement.
    Print {
        /// The printed expression.
        expr: Expr,
    },
}

/// One `type name` parameter of a function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter's textual type.
    pub ty: String,
    /// The parameter name.
    pub name: String,
}

/// A function declaration: `[ReturnType] name(params) { ... }`.
///
/// When the return type is omitted in the source it defaults to `void`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The textual return type.
    pub return_type: String,
    /// The function name.
    pub name: String,
    /// Declared parameters in order.
    pub params: Vec<Param>,
    /// The function body (always a block).
    pub body: Stmt,
}

/// A whole program: a sequence of function declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// The declared functions in source order.
    pub functions: Vec<FunctionDecl>,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Equality (`==`)
    Eq,
    /// Inequality (`!=`)
    Ne,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    Le,
    /// Greater than or equal (`>=`)
    Ge,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
    /// Sequencing/concatenation (`,`)
    Comma,
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`).
    Neg,
    /// Logical not (`!x`).
    Not,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Comma => ",",
        };
        write!(f, "{op}")
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
