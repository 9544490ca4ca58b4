use crate::error::RuntimeError;

/// A tagged runtime value.
///
/// Values live in the interpreter's flat slot map and die when the
/// executed function ends. Arithmetic coerces everything through the
/// integer path; comparison widens numerics to floats and orders strings
/// lexicographically — preserving that asymmetry is deliberate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// A boolean. Never produced by the current instruction set, but the
    /// model (and `PRINT`) handles it.
    Boolean(bool),
}

impl Value {
    /// Coerces to an integer: floats truncate toward zero, strings parse
    /// as signed decimal, booleans become 0/1.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InvalidNumber`] when a string does not
    /// parse.
    pub fn to_int(&self) -> Result<i64, RuntimeError> {
        match self {
            Self::Integer(value) => Ok(*value),
            Self::Float(value) => Ok(*value as i64),
            Self::Str(text) => text
                .trim()
                .parse()
                .map_err(|_| RuntimeError::InvalidNumber { text: text.clone() }),
            Self::Boolean(flag) => Ok(i64::from(*flag)),
        }
    }

    /// Like [`to_int`](Self::to_int) but total: unparseable strings
    /// coerce to 0. Used by the graphics instructions, which never fail.
    #[must_use]
    pub fn coerce_int(&self) -> i64 {
        self.to_int().unwrap_or(0)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(text) => write!(f, "{text}"),
            Self::Boolean(flag) => write!(f, "{}", if *flag { "true" } else { "false" }),
        }
    }
}
