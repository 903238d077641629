//! Value types for the etch interpreter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use etch_syntax::ast::{Block, Ident};
use etch_syntax::error::Result;

use crate::env::Env;
use crate::interpreter::Interpreter;

/// A user-defined function: parameters, body, and the environment captured
/// when the function literal was evaluated.
pub struct Function {
    pub params: Vec<Ident>,
    pub body: Block,
    pub env: Rc<RefCell<Env>>,
}

// Closures routinely point back at the frame that binds them, so the
// captured environment is left out of the debug output.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Signature of a native function: the interpreter (so builtins can call
/// back into evaluation), the evaluated arguments, and the call-site line.
pub type BuiltinFn = fn(&mut Interpreter, Vec<Value>, usize) -> Result<Value>;

/// A named native function.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer value
    Integer(i64),
    /// A boolean value (true or false)
    Boolean(bool),
    /// The null value
    Null,
    /// An ordered sequence of values
    Array(Vec<Value>),
    /// A user-defined function with its captured environment
    Function(Rc<Function>),
    /// A native function
    Builtin(Builtin),
    /// Internal sentinel carrying a `return`'s payload up to the nearest
    /// call boundary. Never escapes a function call.
    Return(Box<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Return(_) => "return",
        }
    }

    /// A value is falsy iff it is `false` or null; everything else,
    /// including 0 and the empty array, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Return(a), Value::Return(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Null => write!(f, "null"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, it) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", it)?;
                }
                write!(f, "]")
            }
            Value::Function(func) => write!(f, "<function/{}>", func.params.len()),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
            Value::Return(value) => write!(f, "{}", value),
        }
    }
}
