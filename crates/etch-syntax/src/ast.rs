//! AST (abstract syntax tree) types for the etch language.
//!
//! Every node records the 1-based line of its first token so runtime errors
//! can point back into the source.

use std::fmt;

/// An identifier occurrence (binding name, parameter, or reference).
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub line: usize,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// `-`
    Neg,
    /// `!`
    Not,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Neg => write!(f, "-"),
            PrefixOp::Not => write!(f, "!"),
        }
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Rem => "%",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        };
        write!(f, "{}", s)
    }
}

/// Expressions (literals, operations, closures, calls, containers).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer {
        value: i64,
        line: usize,
    },
    Boolean {
        value: bool,
        line: usize,
    },
    Ident(Ident),
    Prefix {
        op: PrefixOp,
        right: Box<Expr>,
        line: usize,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
        line: usize,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
        line: usize,
    },
    /// A closure literal: `|p, q| { .. }`.
    Function {
        params: Vec<Ident>,
        body: Block,
        line: usize,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        line: usize,
    },
    Array {
        elements: Vec<Expr>,
        line: usize,
    },
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
        line: usize,
    },
}

impl Expr {
    pub fn line(&self) -> usize {
        match self {
            Expr::Integer { line, .. }
            | Expr::Boolean { line, .. }
            | Expr::Prefix { line, .. }
            | Expr::Infix { line, .. }
            | Expr::If { line, .. }
            | Expr::Function { line, .. }
            | Expr::Call { line, .. }
            | Expr::Array { line, .. }
            | Expr::Index { line, .. } => *line,
            Expr::Ident(ident) => ident.line,
        }
    }
}

/// Statements (bindings, returns, bare expressions).
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Var {
        name: Ident,
        value: Expr,
        line: usize,
    },
    Return {
        value: Expr,
        line: usize,
    },
    Expr {
        value: Expr,
        line: usize,
    },
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::Var { line, .. } | Stmt::Return { line, .. } | Stmt::Expr { line, .. } => *line,
        }
    }
}

/// A brace-delimited statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub line: usize,
}

/// Entire program: an ordered statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}
