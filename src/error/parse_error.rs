#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token stream.
pub enum ParseError {
    /// A required token was missing; `what` describes what was expected.
    Expected {
        /// Human-readable expectation, e.g. `Expected ';' after expression`.
        what: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token that cannot begin or continue an expression was found.
    UnexpectedToken {
        /// The offending token's text.
        token: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left-hand side of `=` was not a bare identifier.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call was applied to something that is not a plain name.
    InvalidCallTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The token stream ended in the middle of a construct.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expected { what, line } => write!(f, "Line {line}: {what}"),

            Self::UnexpectedToken { token, line } => {
                write!(f, "Line {line}: Unexpected token in expression: '{token}'")
            }

            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Line {line}: Invalid assignment target")
            }

            Self::InvalidCallTarget { line } => {
                write!(f, "Line {line}: Invalid function call")
            }

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Line {line}: Unexpected end of input")
            }
        }
    }
}

impl std::error::Error for ParseError {}
