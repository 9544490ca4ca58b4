use crate::{
    ast::{BinaryOp, Expr, FunctionDecl, LiteralKind, Program, Stmt},
    error::SemanticError,
    semantics::scope::{Scope, Symbol},
};

/// Scope records and the symbols they own.
pub mod scope;

/// Validates names, calls, and type compatibility over a parsed program.
///
/// The analyzer runs in two passes: the first declares every function in
/// the global scope, the second walks each function body with its
/// parameters in a fresh scope. Errors never abort the pass; each one is
/// written to stderr as `Semantic Error: <message>` and recorded, and
/// [`SemanticAnalyzer::has_errors`] reports whether any occurred.
///
/// Scoping follows the language's rules exactly: `{}` blocks share the
/// enclosing scope (an inner declaration is visible until the function
/// ends), while function bodies and `for` headers push a scope of their
/// own.
pub struct SemanticAnalyzer<'a> {
    program: &'a Program,
    scopes: Vec<Scope>,
    current_return_type: String,
    diagnostics: Vec<SemanticError>,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Creates an analyzer for `program`. Nothing runs until
    /// [`analyze`](Self::analyze) is called.
    #[must_use]
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            scopes: Vec::new(),
            current_return_type: "void".to_string(),
            diagnostics: Vec::new(),
        }
    }

    /// Runs both passes over the program.
    pub fn analyze(&mut self) {
        self.scopes.clear();
        self.scopes.push(Scope::default());

        for func in &self.program.functions {
            let symbol = Symbol::function(&func.name, &func.return_type);
            if let Err(err) = self.current_scope().declare(symbol) {
                self.report(err);
            }
        }

        for func in &self.program.functions {
            self.analyze_function(func);
        }
    }

    /// Returns whether any diagnostic has been reported so far.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The diagnostics reported so far, in order.
    #[must_use]
    pub fn diagnostics(&self) -> &[SemanticError] {
        &self.diagnostics
    }

    fn analyze_function(&mut self, func: &FunctionDecl) {
        self.current_return_type = func.return_type.clone();
        self.enter_scope();

        for param in &func.params {
            let symbol = Symbol::variable(&param.name, &param.ty);
            if let Err(err) = self.current_scope().declare(symbol) {
                self.report(err);
            }
        }

        self.analyze_statement(&func.body);
        self.exit_scope();
    }

    fn analyze_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block { statements } => {
                for stmt in statements {
                    self.analyze_statement(stmt);
                }
            }

            Stmt::Return { value } => {
                if let Some(expr) = value {
                    let found = self.analyze_expression(expr);
                    if !is_compatible_type(&found, &self.current_return_type) {
                        self.report(SemanticError::ReturnTypeMismatch {
                            expected: self.current_return_type.clone(),
                            found,
                        });
                    }
                }
            }

            Stmt::If { condition, then_branch, else_branch } => {
                self.analyze_expression(condition);
                self.analyze_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.analyze_statement(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                self.analyze_expression(condition);
                self.analyze_statement(body);
            }

            Stmt::For { init, condition, increment, body } => {
                self.enter_scope();
                if let Some(init) = init {
                    self.analyze_statement(init);
                }
                if let Some(condition) = condition {
                    self.analyze_expression(condition);
                }
                if let Some(increment) = increment {
                    self.analyze_expression(increment);
                }
                self.analyze_statement(body);
                self.exit_scope();
            }

            Stmt::VarDecl { name, ty, init } => {
                if let Some(init) = init {
                    let found = self.analyze_expression(init);
                    if !is_compatible_type(&found, ty) {
                        self.report(SemanticError::InitTypeMismatch {
                            expected: ty.clone(),
                            found,
                        });
                    }
                }
                let symbol = Symbol::variable(name, ty);
                if let Err(err) = self.current_scope().declare(symbol) {
                    self.report(err);
                }
            }

            Stmt::Expression { expr } | Stmt::Print { expr } => {
                self.analyze_expression(expr);
            }
        }
    }

    /// Computes an expression's textual type, reporting any name or type
    /// errors found along the way. Unresolvable expressions type as
    /// `void` so analysis can continue.
    fn analyze_expression(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal { kind, .. } => match kind {
                LiteralKind::Int => "int".to_string(),
                LiteralKind::Float => "float".to_string(),
                LiteralKind::Str => "string".to_string(),
                LiteralKind::True | LiteralKind::False => "bool".to_string(),
            },

            Expr::Identifier { name } => match self.lookup(name) {
                Some(symbol) => symbol.ty.clone(),
                None => {
                    self.report(SemanticError::UndefinedIdentifier { name: name.clone() });
                    "void".to_string()
                }
            },

            Expr::Binary { left, op, right } => {
                let left_ty = self.analyze_expression(left);
                let right_ty = self.analyze_expression(right);
                match op {
                    BinaryOp::Add
                    | BinaryOp::Sub
                    | BinaryOp::Mul
                    | BinaryOp::Div
                    | BinaryOp::Mod => common_type(&left_ty, &right_ty),
                    BinaryOp::Eq
                    | BinaryOp::Ne
                    | BinaryOp::Lt
                    | BinaryOp::Gt
                    | BinaryOp::Le
                    | BinaryOp::Ge
                    | BinaryOp::And
                    | BinaryOp::Or => "int".to_string(),
                    BinaryOp::Comma => right_ty,
                }
            }

            Expr::Unary { operand, .. } => self.analyze_expression(operand),

            Expr::Call { name, args } => {
                let result = match self.lookup(name) {
                    Some(symbol) if symbol.is_function => Some(symbol.ty.clone()),
                    Some(_) => None,
                    None => {
                        self.report(SemanticError::UndefinedFunction { name: name.clone() });
                        Some("void".to_string())
                    }
                };
                let ty = match result {
                    Some(ty) => ty,
                    None => {
                        self.report(SemanticError::NotAFunction { name: name.clone() });
                        "void".to_string()
                    }
                };
                // Arguments are analyzed regardless, for their own errors.
                for arg in args {
                    self.analyze_expression(arg);
                }
                ty
            }

            Expr::Input { prompt } | Expr::KeyPressed { prompt } => {
                if let Some(prompt) = prompt {
                    self.analyze_expression(prompt);
                }
                "string".to_string()
            }

            Expr::Index { array, index } => {
                let array_ty = self.analyze_expression(array);
                self.analyze_expression(index);
                // Index reads take the indexed expression's type; there is
                // no element-type tracking.
                array_ty
            }

            Expr::Assign { name, value } => {
                let target_ty = match self.lookup(name) {
                    Some(symbol) => Some(symbol.ty.clone()),
                    None => {
                        self.report(SemanticError::UndefinedVariable { name: name.clone() });
                        None
                    }
                };
                let value_ty = self.analyze_expression(value);
                match target_ty {
                    Some(expected) => {
                        if !is_compatible_type(&value_ty, &expected) {
                            self.report(SemanticError::AssignmentTypeMismatch {
                                name: name.clone(),
                                expected: expected.clone(),
                                found: value_ty,
                            });
                        }
                        expected
                    }
                    None => "void".to_string(),
                }
            }
        }
    }

    fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn current_scope(&mut self) -> &mut Scope {
        // `analyze` seeds the global scope; the guard keeps this total
        // if a caller ever reaches it first.
        if self.scopes.is_empty() {
            self.scopes.push(Scope::default());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup_local(name))
    }

    fn report(&mut self, err: SemanticError) {
        eprintln!("Semantic Error: {err}");
        self.diagnostics.push(err);
    }
}

/// Returns whether a value of type `from` may flow into a slot of type
/// `to`.
///
/// The relation is reflexive and admits three bidirectional pairs:
/// `int ↔ float`, `int ↔ string`, and `bool ↔ int`. Everything else is
/// rejected.
#[must_use]
pub fn is_compatible_type(from: &str, to: &str) -> bool {
    if from == to {
        return true;
    }
    let numeric = |ty: &str| ty == "int" || ty == "float";
    let stringy = |ty: &str| ty == "int" || ty == "string";
    let boolish = |ty: &str| ty == "bool" || ty == "int";
    (numeric(from) && numeric(to)) || (stringy(from) && stringy(to)) || (boolish(from) && boolish(to))
}

/// Computes the result type of an arithmetic operation.
///
/// Equal types return themselves; otherwise `float` wins when either side
/// is `float`, and the left operand's type wins in all remaining cases.
#[must_use]
pub fn common_type(left: &str, right: &str) -> String {
    if left == right {
        return left.to_string();
    }
    if left == "float" || right == "float" {
        return "float".to_string();
    }
    left.to_string()
}
