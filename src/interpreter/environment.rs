use crate::interpreter::lox_value::LoxValue;
use crate::interpreter::tree_walker::RuntimeError;
use crate::scanner::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A runtime lexical scope: a name-to-value map chained to the scope that
/// encloses it.
///
/// Environments are shared: every closure that captured a scope and every
/// child scope chained from it keep it alive, so the whole chain is handled
/// through `Rc<RefCell<…>>`. Closures, classes and instances can form
/// reference cycles through their environments; those cycles are never
/// collected.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, LoxValue>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Bind a name in this scope. Re-defining an existing name overwrites it.
    pub fn define(&mut self, name: impl Into<String>, value: LoxValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &Token) -> Result<LoxValue, RuntimeError> {
        match self.values.get(name.lexeme()) {
            Some(value) => Ok(value.clone()),
            None => match &self.enclosing {
                Some(enclosing) => enclosing.borrow().get(name),
                None => Err(RuntimeError::undefined_variable(name)),
            },
        }
    }

    pub fn assign(&mut self, name: &Token, value: LoxValue) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(name.lexeme()) {
            *slot = value;
            Ok(())
        } else {
            match &self.enclosing {
                Some(enclosing) => enclosing.borrow_mut().assign(name, value),
                None => Err(RuntimeError::undefined_variable(name)),
            }
        }
    }

    /// Read `name` from the scope `distance` hops up the chain.
    ///
    /// The resolver guarantees that both the scope and the binding exist, so
    /// a miss here is not a user error.
    pub fn get_at(&self, distance: usize, name: &str) -> LoxValue {
        if distance == 0 {
            self.values
                .get(name)
                .cloned()
                .expect("Failed to look up a resolved variable. This is an interpreter bug.")
        } else {
            self.enclosing
                .as_ref()
                .expect("Ran out of scopes before the resolved depth. This is an interpreter bug.")
                .borrow()
                .get_at(distance - 1, name)
        }
    }

    /// Write `name` in the scope `distance` hops up the chain.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: LoxValue) {
        if distance == 0 {
            self.values.insert(name.lexeme().to_string(), value);
        } else {
            self.enclosing
                .as_ref()
                .expect("Ran out of scopes before the resolved depth. This is an interpreter bug.")
                .borrow_mut()
                .assign_at(distance - 1, name, value);
        }
    }
}
