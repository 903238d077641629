//! etch interpreter: evaluates AST nodes with a tree-walking evaluator.
//!
//! This crate provides the runtime for the etch language: values, the
//! lexically scoped environment chain, the builtin table, and the evaluator
//! itself. Evaluation is single-threaded, deterministic, and strictly
//! left-to-right.

pub mod env;
pub mod interpreter;
pub mod value;

mod builtins;

pub use env::Env;
pub use interpreter::Interpreter;
pub use value::Value;

use etch_syntax::error::Result;

/// Evaluate source text end-to-end: lex, parse, and run the program in a
/// fresh root environment.
pub fn evaluate(source: &str) -> Result<Value> {
    let program = etch_parser::parse(source)?;
    Interpreter::new().run(&program)
}
