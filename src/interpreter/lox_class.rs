use super::lox_callable::{LoxCallable, LoxFunction};
use super::lox_value::LoxValue;
use super::tree_walker::{Interpreter, RuntimeError};
use crate::scanner::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// A class is a callable: invoking it constructs an instance and runs the
/// `init` method, if the class (or an ancestor) declares one.
#[derive(Debug)]
pub struct LoxClass {
    name: String,
    superclass: Option<Rc<LoxClass>>,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub(super) fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        Self {
            name,
            superclass,
            methods,
        }
    }

    /// Look a method up on this class or, failing that, up the superclass
    /// chain.
    pub(super) fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        match self.methods.get(name) {
            Some(method) => Some(Rc::clone(method)),
            None => self
                .superclass
                .as_ref()
                .and_then(|superclass| superclass.find_method(name)),
        }
    }
}

impl LoxCallable for Rc<LoxClass> {
    fn arity(&self) -> u8 {
        self.find_method("init")
            .map(|initializer| initializer.arity())
            .unwrap_or(0)
    }

    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError> {
        let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(self))));
        if let Some(initializer) = self.find_method("init") {
            initializer
                .bind(Rc::clone(&instance))
                .call(interpreter, arguments)?;
        }
        Ok(LoxValue::Instance(instance))
    }
}

impl Display for LoxClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug)]
pub struct LoxInstance {
    klass: Rc<LoxClass>,
    fields: HashMap<String, LoxValue>,
}

impl LoxInstance {
    pub(super) fn new(klass: Rc<LoxClass>) -> Self {
        Self {
            klass,
            fields: HashMap::new(),
        }
    }

    /// Property access: fields shadow methods, and a method is bound to the
    /// instance it was reached through.
    ///
    /// Takes the `Rc` handle rather than `&self` because binding a method
    /// needs to hand the instance's own identity to the new closure.
    pub(super) fn get(
        instance: &Rc<RefCell<LoxInstance>>,
        name: &Token,
    ) -> Result<LoxValue, RuntimeError> {
        let field = instance.borrow().fields.get(name.lexeme()).cloned();
        if let Some(field) = field {
            return Ok(field);
        }
        let method = instance.borrow().klass.find_method(name.lexeme());
        match method {
            Some(method) => Ok(LoxValue::Function(Rc::new(
                method.bind(Rc::clone(instance)),
            ))),
            None => Err(RuntimeError::undefined_property(name)),
        }
    }

    /// Setting a property always succeeds, creating the field if needed.
    pub(super) fn set(&mut self, name: &Token, value: LoxValue) {
        self.fields.insert(name.lexeme().to_string(), value);
    }
}

impl Display for LoxInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.klass.name)
    }
}
