//! etch language syntax definitions and abstract syntax tree.
//!
//! This crate provides the foundational syntax elements for the etch
//! language: token definitions, abstract syntax tree (AST) nodes, and the
//! shared error type. Every other crate in the workspace depends on it.
//!
//! # Overview
//!
//! - [`token`]: token kinds and the line-stamped token struct
//! - [`ast`]: statement and expression node definitions
//! - [`error`]: the three-kind error type and `Result` alias
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │            Interpreter              │  <- Produces Values
//! ├─────────────────────────────────────┤
//! │              Parser                 │  <- Produces AST
//! ├─────────────────────────────────────┤
//! │               Lexer                 │  <- Produces Tokens
//! ├─────────────────────────────────────┤
//! │           Source Code               │  <- Raw text input
//! └─────────────────────────────────────┘
//! ```

/// Token definitions and lexical analysis types.
pub mod token;

/// Abstract syntax tree node definitions.
pub mod ast;

/// Error handling utilities and types.
pub mod error;

// Re-export all public items for convenience
pub use ast::*;
pub use error::*;
pub use token::*;
