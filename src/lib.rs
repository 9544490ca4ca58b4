//! # pixl
//!
//! pixl is a small statically-typed imperative language for interactive
//! 2D programs and teaching, together with its whole toolchain: source
//! text is lexed into located tokens, parsed into an AST by recursive
//! descent, checked by a two-pass semantic analyzer, lowered into labeled
//! three-address IR, and executed by a bytecode interpreter that talks to
//! a pluggable graphics window and the console.
//!
//! The pipeline is strictly one-way; no stage calls back into its
//! predecessor:
//!
//! ```text
//! source → tokens → AST → (semantic diagnostics) → IR → execution
//! ```
//!
//! Semantic diagnostics are deliberately non-fatal: the analyzer reports
//! them and the driver still lowers and runs the program, which keeps the
//! language forgiving in the classroom. Syntax errors and runtime errors
//! abort.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::match_same_arms,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity
)]

use std::io::Write;

use crate::{
    graphics::CanvasFactory,
    interpreter::Interpreter,
    ir::{IrGenerator, IrProgram},
    lexer::Lexer,
    semantics::SemanticAnalyzer,
};

/// AST node definitions shared by the parser, analyzer, and lowering.
pub mod ast;
/// Error types for each phase: parse, semantic, runtime.
pub mod error;
/// The graphics collaborator: canvas traits, the minifb window, and a
/// recording stub for tests.
pub mod graphics;
/// The IR interpreter and its runtime value model.
pub mod interpreter;
/// IR data model and the AST-to-IR generator.
pub mod ir;
/// The logos-based lexer and token definitions.
pub mod lexer;
/// The recursive-descent parser.
pub mod parser;
/// The scope-stack semantic analyzer.
pub mod semantics;
/// Scoped cbreak reads for `key_pressed`.
pub mod term;

pub use error::{ParseError, RuntimeError, SemanticError};

/// Compiles source text down to IR.
///
/// Runs the lexer, parser, semantic analyzer, and IR generator. Semantic
/// diagnostics go to stderr and do not stop the pipeline; consult
/// [`SemanticAnalyzer::has_errors`] directly when a caller wants to gate
/// on them.
///
/// # Errors
/// Returns the first [`ParseError`] when the source does not parse.
///
/// # Examples
/// ```
/// let ir = pixl::compile("int main() { return 2 + 3; }").unwrap();
/// assert_eq!(ir.functions[0].name, "main");
/// ```
pub fn compile(source: &str) -> Result<IrProgram, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    let program = parser::parse(&tokens)?;

    let mut analyzer = SemanticAnalyzer::new(&program);
    analyzer.analyze();

    Ok(IrGenerator::new(&program).generate())
}

/// Compiles and runs a program in one call.
///
/// `factory` supplies the graphics window on demand and `out` receives
/// program output. This is the entry point the CLI uses with the real
/// window backend and stdout; tests call it with a recording factory and
/// a byte buffer.
///
/// # Errors
/// Returns the parse error or the fatal runtime error that stopped the
/// program, behind one boxed error type.
pub fn run_source<W: Write>(
    source: &str,
    factory: Box<dyn CanvasFactory>,
    out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let program = compile(source)?;
    let mut interpreter = Interpreter::new(factory, out);
    interpreter.run(&program)?;
    Ok(())
}
