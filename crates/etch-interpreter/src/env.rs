//! Environment chain for the etch interpreter.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// A single scope frame: name → value bindings plus an optional parent.
///
/// Frames are shared (`Rc<RefCell<..>>`) because closures keep their
/// captured frame alive past the call that created it. A binding whose value
/// is a closure over the same frame forms a reference cycle; such frames are
/// tolerated rather than collected.
pub struct Env {
    vars: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Env>>>,
}

impl Env {
    /// Create a fresh root environment.
    pub fn new_root() -> Rc<RefCell<Env>> {
        Rc::new(RefCell::new(Env {
            vars: HashMap::new(),
            parent: None,
        }))
    }

    /// Create an environment enclosed by `parent`.
    pub fn enclosed(parent: &Rc<RefCell<Env>>) -> Rc<RefCell<Env>> {
        Rc::new(RefCell::new(Env {
            vars: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Look up a name, searching the chain from innermost outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.vars.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|p| p.borrow().get(name)),
        }
    }

    /// Bind a name in this frame, replacing any existing binding here.
    /// Outer frames are never written through.
    pub fn set(&mut self, name: String, value: Value) {
        self.vars.insert(name, value);
    }

    /// The bindings of this frame only.
    pub fn vars_snapshot(&self) -> Vec<(String, Value)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
