#[derive(Debug, Clone, PartialEq, Eq)]
/// A diagnostic produced by the semantic analyzer.
///
/// Unlike parse and runtime errors these are non-fatal: the analyzer
/// records them and keeps going, and the pipeline still lowers and runs
/// the program afterwards.
pub enum SemanticError {
    /// A name was declared twice in the same scope.
    AlreadyDeclared {
        /// The duplicated name.
        name: String,
    },
    /// An expression referenced a name with no declaration in scope.
    UndefinedIdentifier {
        /// The unknown name.
        name: String,
    },
    /// A call referenced a name with no declaration in scope.
    UndefinedFunction {
        /// The unknown name.
        name: String,
    },
    /// A call referenced a name that is not a function.
    NotAFunction {
        /// The misused name.
        name: String,
    },
    /// An assignment targeted a name with no declaration in scope.
    UndefinedVariable {
        /// The unknown name.
        name: String,
    },
    /// A `return` expression's type does not fit the function's.
    ReturnTypeMismatch {
        /// The function's declared return type.
        expected: String,
        /// The type of the returned expression.
        found: String,
    },
    /// A declaration initializer's type does not fit the declared type.
    InitTypeMismatch {
        /// The declared type.
        expected: String,
        /// The initializer's type.
        found: String,
    },
    /// An assigned value's type does not fit the target's declared type.
    AssignmentTypeMismatch {
        /// The assigned name.
        name: String,
        /// The target's declared type.
        expected: String,
        /// The value's type.
        found: String,
    },
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyDeclared { name } => {
                write!(f, "Symbol '{name}' already declared in current scope")
            }

            Self::UndefinedIdentifier { name } => {
                write!(f, "Undefined identifier: {name}")
            }

            Self::UndefinedFunction { name } => {
                write!(f, "Undefined function: {name}")
            }

            Self::NotAFunction { name } => write!(f, "'{name}' is not a function"),

            Self::UndefinedVariable { name } => {
                write!(f, "Undefined variable: {name}")
            }

            Self::ReturnTypeMismatch { expected, found } => {
                write!(f, "Return type mismatch: expected {expected}, got {found}")
            }

            Self::InitTypeMismatch { expected, found } => write!(
                f,
                "Variable initialization type mismatch: expected {expected}, got {found}"
            ),

            Self::AssignmentTypeMismatch { name, expected, found } => write!(
                f,
                "Assignment type mismatch: '{name}' expects {expected}, got {found}"
            ),
        }
    }
}

impl std::error::Error for SemanticError {}
