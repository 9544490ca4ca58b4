use std::collections::HashMap;

use crate::error::SemanticError;

/// A named declaration recorded in a scope: a variable, parameter, or
/// function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The declared name.
    pub name: String,
    /// The declared textual type (a function's return type).
    pub ty: String,
    /// Whether the symbol names a function.
    pub is_function: bool,
    /// Whether the declaration has been seen (always true for symbols
    /// produced by the analyzer; kept for forward declarations).
    pub is_declared: bool,
}

impl Symbol {
    /// Builds a variable or parameter symbol.
    #[must_use]
    pub fn variable(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
            is_function: false,
            is_declared: true,
        }
    }

    /// Builds a function symbol carrying its return type.
    #[must_use]
    pub fn function(name: &str, return_type: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: return_type.to_string(),
            is_function: true,
            is_declared: true,
        }
    }
}

/// One lexical region's symbol table.
///
/// Scopes are kept on a stack owned by the analyzer; the top of the stack
/// is the current scope and name resolution walks downward. A scope owns
/// its symbols and nothing else.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    /// Declares a symbol in this scope.
    ///
    /// # Errors
    /// Returns [`SemanticError::AlreadyDeclared`] when the name is
    /// already present locally; enclosing scopes are not consulted, so
    /// shadowing an outer name is allowed.
    pub fn declare(&mut self, symbol: Symbol) -> Result<(), SemanticError> {
        if self.symbols.contains_key(&symbol.name) {
            return Err(SemanticError::AlreadyDeclared { name: symbol.name });
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Looks a name up in this scope only.
    #[must_use]
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }
}
