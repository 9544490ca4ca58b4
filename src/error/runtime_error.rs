#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can abort IR execution.
pub enum RuntimeError {
    /// Division or modulo with a zero divisor.
    DivisionByZero,
    /// A comparison between values the coercion rules cannot order.
    InvalidComparison {
        /// The opcode's name, e.g. `LT`.
        op: String,
    },
    /// A value could not be coerced to an integer.
    InvalidNumber {
        /// The text that failed to parse.
        text: String,
    },
    /// A jump referenced a label missing from the current function.
    UndefinedLabel {
        /// The missing label name.
        name: String,
    },
    /// The graphics backend could not open a window.
    WindowCreation {
        /// Backend-reported details.
        details: String,
    },
    /// Console or terminal I/O failed.
    Io {
        /// The underlying error, rendered.
        details: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "Division by zero"),

            Self::InvalidComparison { op } => write!(f, "Invalid types for {op}"),

            Self::InvalidNumber { text } => {
                write!(f, "Cannot convert '{text}' to an integer")
            }

            Self::UndefinedLabel { name } => {
                write!(f, "Jump to undefined label '{name}'")
            }

            Self::WindowCreation { details } => {
                write!(f, "Failed to create graphics window: {details}")
            }

            Self::Io { details } => write!(f, "I/O error: {details}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io { details: err.to_string() }
    }
}
