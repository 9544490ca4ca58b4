/// Parsing errors.
///
/// Defines all error types that can occur while turning tokens into an AST.
/// Parse errors are fatal: the first one aborts compilation of the program.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing IR: division
/// by zero, comparisons between incompatible values, failed numeric
/// conversions, and collaborator failures.
pub mod runtime_error;
/// Semantic diagnostics.
///
/// Non-fatal errors reported by the semantic analyzer. Each one is written
/// to the diagnostic sink as `Semantic Error: <message>` and recorded;
/// analysis continues past them.
pub mod semantic_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
