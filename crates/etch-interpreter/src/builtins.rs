//! Builtin function table.
//!
//! Builtins resolve during identifier lookup, after the environment chain,
//! so a user binding with the same name shadows them.

use std::collections::HashMap;
use std::rc::Rc;

use etch_syntax::error::{eval_error_at, Result};

use crate::interpreter::Interpreter;
use crate::value::{Builtin, Function, Value};

pub(crate) fn table() -> HashMap<&'static str, Builtin> {
    let mut table = HashMap::new();
    for builtin in [
        Builtin { name: "puts", func: puts },
        Builtin { name: "len", func: len },
        Builtin { name: "map", func: map },
        Builtin { name: "filter", func: filter },
        Builtin { name: "reduce", func: reduce },
    ] {
        table.insert(builtin.name, builtin);
    }
    table
}

fn expect_array(value: &Value, what: &str, line: usize) -> Result<Vec<Value>> {
    match value {
        Value::Array(elements) => Ok(elements.clone()),
        other => eval_error_at(
            line,
            format!("{} must be an array, got {}", what, other.type_name()),
        ),
    }
}

fn expect_function(value: &Value, what: &str, arity: usize, line: usize) -> Result<Rc<Function>> {
    let func = match value {
        Value::Function(func) => Rc::clone(func),
        other => {
            return eval_error_at(
                line,
                format!("{} must be a function, got {}", what, other.type_name()),
            );
        }
    };
    if func.params.len() != arity {
        return eval_error_at(
            line,
            format!(
                "{} must take {} parameter(s), got {}",
                what,
                arity,
                func.params.len()
            ),
        );
    }
    Ok(func)
}

/// `puts(x..)`: write each argument's textual form to stdout, one per line.
fn puts(_interp: &mut Interpreter, args: Vec<Value>, _line: usize) -> Result<Value> {
    for arg in &args {
        println!("{}", arg);
    }
    Ok(Value::Null)
}

/// `len(a)`: length of an array.
fn len(_interp: &mut Interpreter, args: Vec<Value>, line: usize) -> Result<Value> {
    if args.len() != 1 {
        return eval_error_at(
            line,
            format!("number of arguments for len wrong: want=1 got={}", args.len()),
        );
    }
    let elements = expect_array(&args[0], "argument for len", line)?;
    Ok(Value::Integer(elements.len() as i64))
}

/// `map(a, f)`: apply a unary function to each element in order.
fn map(interp: &mut Interpreter, args: Vec<Value>, line: usize) -> Result<Value> {
    if args.len() != 2 {
        return eval_error_at(
            line,
            format!("number of arguments for map wrong: want=2 got={}", args.len()),
        );
    }
    let elements = expect_array(&args[0], "first argument for map", line)?;
    let func = expect_function(&args[1], "second argument for map", 1, line)?;

    let mut converted = Vec::with_capacity(elements.len());
    for elem in elements {
        converted.push(interp.call_function(&func, vec![elem], line)?);
    }
    Ok(Value::Array(converted))
}

/// `filter(a, f)`: keep the elements for which `f(elem)` is truthy.
fn filter(interp: &mut Interpreter, args: Vec<Value>, line: usize) -> Result<Value> {
    if args.len() != 2 {
        return eval_error_at(
            line,
            format!(
                "number of arguments for filter wrong: want=2 got={}",
                args.len()
            ),
        );
    }
    let elements = expect_array(&args[0], "first argument for filter", line)?;
    let func = expect_function(&args[1], "second argument for filter", 1, line)?;

    let mut filtered = Vec::new();
    for elem in elements {
        if interp
            .call_function(&func, vec![elem.clone()], line)?
            .is_truthy()
        {
            filtered.push(elem);
        }
    }
    Ok(Value::Array(filtered))
}

/// `reduce(a, init, f)`: left fold with a binary `(acc, elem)` function.
fn reduce(interp: &mut Interpreter, args: Vec<Value>, line: usize) -> Result<Value> {
    if args.len() != 3 {
        return eval_error_at(
            line,
            format!(
                "number of arguments for reduce wrong: want=3 got={}",
                args.len()
            ),
        );
    }
    let elements = expect_array(&args[0], "first argument for reduce", line)?;
    let func = expect_function(&args[2], "third argument for reduce", 2, line)?;

    let mut accumulated = args[1].clone();
    for elem in elements {
        accumulated = interp.call_function(&func, vec![accumulated, elem], line)?;
    }
    Ok(accumulated)
}
