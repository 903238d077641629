//! Error handling types and utilities for the etch toolchain.
//!
//! This module provides the unified error system shared by the lexer,
//! parser, and interpreter. There are exactly three error kinds, matching
//! the stage that produced them, and every error carries the 1-based source
//! line it refers to together with a human-readable message.
//!
//! # Error Philosophy
//!
//! - **One type, three kinds**: downstream code matches on [`Error`] without
//!   caring which crate produced it.
//! - **Line-accurate**: tokens and AST nodes carry their line, so every
//!   failure can point into the source.
//! - **Short-circuiting**: failures propagate unchanged with `?`; nothing is
//!   caught or retried internally, and callers see the first error hit.
//!
//! # Examples
//!
//! ```rust
//! use etch_syntax::error::{Error, Result, parse_error_at};
//!
//! fn expect_even(n: i64, line: usize) -> Result<i64> {
//!     if n % 2 == 0 {
//!         Ok(n)
//!     } else {
//!         parse_error_at(line, format!("expected an even number, got {}", n))
//!     }
//! }
//!
//! let err = expect_even(3, 7).unwrap_err();
//! assert_eq!(err.line(), 7);
//! assert_eq!(err.to_string(), "parse error at line 7: expected an even number, got 3");
//! ```

use thiserror::Error;

/// An error from one of the three pipeline stages.
///
/// Each variant carries the 1-based source line and a message. `Lex` errors
/// are produced when the parser reaches an illegal token; everything else
/// lexical surfaces as a `Parse` error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error at line {line}: {msg}")]
    Lex { line: usize, msg: String },
    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },
    #[error("eval error at line {line}: {msg}")]
    Eval { line: usize, msg: String },
}

impl Error {
    /// The 1-based source line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Error::Lex { line, .. } | Error::Parse { line, .. } | Error::Eval { line, .. } => *line,
        }
    }

    /// The bare message, without the kind/line prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Lex { msg, .. } | Error::Parse { msg, .. } | Error::Eval { msg, .. } => msg,
        }
    }
}

/// A specialized `Result` for etch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::Lex { .. })`.
pub fn lex_error_at<T>(line: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::Lex {
        line,
        msg: msg.into(),
    })
}

/// Shorthand for `Err(Error::Parse { .. })`.
///
/// ```rust
/// use etch_syntax::error::{Error, parse_error_at};
///
/// let res: Result<(), _> = parse_error_at(2, "unexpected token");
/// assert!(matches!(res, Err(Error::Parse { line: 2, .. })));
/// ```
pub fn parse_error_at<T>(line: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::Parse {
        line,
        msg: msg.into(),
    })
}

/// Shorthand for `Err(Error::Eval { .. })`.
pub fn eval_error_at<T>(line: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::Eval {
        line,
        msg: msg.into(),
    })
}
