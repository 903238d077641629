//! Main interpreter engine.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use etch_syntax::ast::{Block, Expr, InfixOp, PrefixOp, Program, Stmt};
use etch_syntax::error::{eval_error_at, Result};

use crate::builtins;
use crate::env::Env;
use crate::value::{Builtin, Function, Value};

/// Tree-walking evaluator. Holds the builtin table; everything else lives in
/// the environment chain passed to each evaluation.
pub struct Interpreter {
    builtins: HashMap<&'static str, Builtin>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let builtins = builtins::table();
        debug!("registered {} builtin functions", builtins.len());
        Self { builtins }
    }

    /// Evaluate a program in a fresh root environment.
    pub fn run(&mut self, program: &Program) -> Result<Value> {
        let env = Env::new_root();
        self.run_with_env(program, &env)
    }

    /// Evaluate a program in the given environment. A `return` at the top
    /// level terminates the program with the returned value; otherwise the
    /// program's value is the value of its last statement.
    pub fn run_with_env(&mut self, program: &Program, env: &Rc<RefCell<Env>>) -> Result<Value> {
        let mut last = Value::Null;
        for stmt in &program.statements {
            match self.exec_stmt(stmt, env)? {
                Value::Return(value) => return Ok(*value),
                value => last = value,
            }
        }
        Ok(last)
    }

    /// Evaluate a block. Unlike [`Interpreter::run_with_env`], a return
    /// sentinel passes through untouched so enclosing blocks and the call
    /// frame observe it.
    fn exec_block(&mut self, block: &Block, env: &Rc<RefCell<Env>>) -> Result<Value> {
        let mut last = Value::Null;
        for stmt in &block.statements {
            match self.exec_stmt(stmt, env)? {
                ret @ Value::Return(_) => return Ok(ret),
                value => last = value,
            }
        }
        Ok(last)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Rc<RefCell<Env>>) -> Result<Value> {
        match stmt {
            Stmt::Var { name, value, .. } => {
                let value = self.eval_expr(value, env)?;
                env.borrow_mut().set(name.name.clone(), value);
                Ok(Value::Null)
            }
            Stmt::Return { value, .. } => {
                let value = self.eval_expr(value, env)?;
                Ok(Value::Return(Box::new(value)))
            }
            Stmt::Expr { value, .. } => self.eval_expr(value, env),
        }
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Rc<RefCell<Env>>) -> Result<Value> {
        match expr {
            Expr::Integer { value, .. } => Ok(Value::Integer(*value)),
            Expr::Boolean { value, .. } => Ok(Value::Boolean(*value)),
            Expr::Ident(ident) => {
                if let Some(value) = env.borrow().get(&ident.name) {
                    return Ok(value);
                }
                match self.builtins.get(ident.name.as_str()) {
                    Some(builtin) => Ok(Value::Builtin(*builtin)),
                    None => eval_error_at(
                        ident.line,
                        format!("undefined identifier: \"{}\"", ident.name),
                    ),
                }
            }
            Expr::Prefix { op, right, line } => {
                let right = self.eval_expr(right, env)?;
                self.eval_prefix(*op, right, *line)
            }
            Expr::Infix {
                op, left, right, line,
            } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.eval_infix(*op, left, right, *line)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = self.eval_expr(condition, env)?;
                if condition.is_truthy() {
                    self.exec_block(consequence, env)
                } else {
                    match alternative {
                        Some(alternative) => self.exec_block(alternative, env),
                        None => Ok(Value::Null),
                    }
                }
            }
            Expr::Function { params, body, .. } => Ok(Value::Function(Rc::new(Function {
                params: params.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            }))),
            Expr::Call { callee, args, line } => {
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(self.eval_expr(arg, env)?);
                }
                let callee = self.eval_expr(callee, env)?;
                match callee {
                    Value::Function(func) => self.call_function(&func, evaluated, *line),
                    Value::Builtin(builtin) => (builtin.func)(self, evaluated, *line),
                    other => eval_error_at(
                        *line,
                        format!("unable to convert to function: {}", other.type_name()),
                    ),
                }
            }
            Expr::Array { elements, .. } => {
                let mut evaluated = Vec::with_capacity(elements.len());
                for elem in elements {
                    evaluated.push(self.eval_expr(elem, env)?);
                }
                Ok(Value::Array(evaluated))
            }
            Expr::Index { array, index, line } => {
                let array = self.eval_expr(array, env)?;
                let index = self.eval_expr(index, env)?;
                self.eval_index(array, index, *line)
            }
        }
    }

    fn eval_prefix(&mut self, op: PrefixOp, right: Value, line: usize) -> Result<Value> {
        match right {
            Value::Integer(n) => match op {
                PrefixOp::Neg => Ok(Value::Integer(n.wrapping_neg())),
                // any integer is truthy, so its negation is false
                PrefixOp::Not => Ok(Value::Boolean(false)),
            },
            Value::Boolean(b) => match op {
                PrefixOp::Not => Ok(Value::Boolean(!b)),
                PrefixOp::Neg => eval_error_at(
                    line,
                    format!("unknown prefix operator for boolean: '{}'", op),
                ),
            },
            other => eval_error_at(
                line,
                format!("invalid type for prefix expression: {}", other.type_name()),
            ),
        }
    }

    fn eval_infix(&mut self, op: InfixOp, left: Value, right: Value, line: usize) -> Result<Value> {
        if std::mem::discriminant(&left) != std::mem::discriminant(&right) {
            return eval_error_at(
                line,
                format!(
                    "type mismatch in infix expression: {} {} {}",
                    left.type_name(),
                    op,
                    right.type_name()
                ),
            );
        }
        match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => match op {
                InfixOp::Add => Ok(Value::Integer(l.wrapping_add(r))),
                InfixOp::Sub => Ok(Value::Integer(l.wrapping_sub(r))),
                InfixOp::Mul => Ok(Value::Integer(l.wrapping_mul(r))),
                InfixOp::Div => {
                    if r == 0 {
                        eval_error_at(line, "division by zero")
                    } else {
                        Ok(Value::Integer(l.wrapping_div(r)))
                    }
                }
                InfixOp::Rem => {
                    if r == 0 {
                        eval_error_at(line, "modulus by zero")
                    } else {
                        Ok(Value::Integer(l.wrapping_rem(r)))
                    }
                }
                InfixOp::Gt => Ok(Value::Boolean(l > r)),
                InfixOp::Lt => Ok(Value::Boolean(l < r)),
                InfixOp::Eq => Ok(Value::Boolean(l == r)),
                InfixOp::NotEq => Ok(Value::Boolean(l != r)),
            },
            (Value::Boolean(l), Value::Boolean(r)) => match op {
                InfixOp::Eq => Ok(Value::Boolean(l == r)),
                InfixOp::NotEq => Ok(Value::Boolean(l != r)),
                other => eval_error_at(
                    line,
                    format!("unknown infix operator for boolean: '{}'", other),
                ),
            },
            (left, _) => eval_error_at(
                line,
                format!("invalid type for infix expression: {}", left.type_name()),
            ),
        }
    }

    fn eval_index(&mut self, array: Value, index: Value, line: usize) -> Result<Value> {
        let elements = match array {
            Value::Array(elements) => elements,
            other => {
                return eval_error_at(
                    line,
                    format!("unable to convert to array: {}", other.type_name()),
                );
            }
        };
        let index = match index {
            Value::Integer(n) => n,
            other => {
                return eval_error_at(
                    line,
                    format!("unable to convert to integer: {}", other.type_name()),
                );
            }
        };
        if index < 0 || index as usize >= elements.len() {
            return eval_error_at(
                line,
                format!("index out of range: [{}] with length {}", index, elements.len()),
            );
        }
        Ok(elements[index as usize].clone())
    }

    /// Call a user function: check arity, bind parameters in a fresh frame
    /// enclosing the *captured* environment (not the caller's), evaluate the
    /// body, and unwrap a return sentinel exactly once.
    pub(crate) fn call_function(
        &mut self,
        func: &Function,
        args: Vec<Value>,
        line: usize,
    ) -> Result<Value> {
        if args.len() != func.params.len() {
            return eval_error_at(
                line,
                format!(
                    "number of arguments wrong: want={} got={}",
                    func.params.len(),
                    args.len()
                ),
            );
        }
        debug!("calling function with {} argument(s)", args.len());
        let call_env = Env::enclosed(&func.env);
        {
            let mut frame = call_env.borrow_mut();
            for (param, arg) in func.params.iter().zip(args) {
                frame.set(param.name.clone(), arg);
            }
        }
        match self.exec_block(&func.body, &call_env)? {
            Value::Return(value) => Ok(*value),
            value => Ok(value),
        }
    }
}
