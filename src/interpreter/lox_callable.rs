use super::environment::Environment;
use super::lox_class::LoxInstance;
use super::lox_value::LoxValue;
use super::tree_walker::{Interpreter, RuntimeError, RuntimeErrorOrReturn};
use crate::parser::ast::FunctionDeclarationStatement;
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::iter::zip;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Anything a call expression can invoke: user-defined functions, classes
/// (calling a class constructs an instance) and native host hooks.
pub(super) trait LoxCallable: Display {
    fn arity(&self) -> u8;
    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError>;
}

/// A user-defined function or method together with the environment it was
/// declared in.
#[derive(Debug)]
pub struct LoxFunction {
    declaration: Rc<FunctionDeclarationStatement>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub(super) fn new(
        declaration: Rc<FunctionDeclarationStatement>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    /// A bound method: the same declaration, with the closure extended by a
    /// scope where `this` is the given instance.
    pub(super) fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> LoxFunction {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        environment.define("this", LoxValue::Instance(instance));
        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }
}

impl LoxCallable for LoxFunction {
    fn arity(&self) -> u8 {
        // Safe because the parser enforces that we do not have more than 255 parameters
        self.declaration.parameters.len() as u8
    }

    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError> {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (parameter, argument) in zip(self.declaration.parameters.iter(), arguments) {
            environment.define(parameter.lexeme(), argument);
        }

        let frame = Rc::new(RefCell::new(environment));
        match interpreter.execute_block(&self.declaration.body, frame) {
            // `init` always hands back the instance, whether the body ran to
            // completion or bailed out through a bare `return`.
            Ok(()) if self.is_initializer => Ok(self.closure.borrow().get_at(0, "this")),
            Ok(()) => Ok(LoxValue::Null),
            Err(RuntimeErrorOrReturn::Return(_)) if self.is_initializer => {
                Ok(self.closure.borrow().get_at(0, "this"))
            }
            Err(RuntimeErrorOrReturn::Return(value)) => Ok(value.0),
            Err(RuntimeErrorOrReturn::RuntimeError(e)) => Err(e),
        }
    }
}

impl Display for LoxFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme())
    }
}

/// A host hook exposed to Lox programs.
#[derive(Debug)]
pub struct NativeFunction {
    arity: u8,
    function: fn() -> LoxValue,
}

impl NativeFunction {
    /// `clock()`: wall-clock seconds since the Unix epoch, as a double.
    pub(super) fn clock() -> Self {
        Self {
            arity: 0,
            function: || {
                let elapsed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .expect("The system clock is set before the Unix epoch");
                LoxValue::Number(elapsed.as_secs_f64())
            },
        }
    }
}

impl LoxCallable for NativeFunction {
    fn arity(&self) -> u8 {
        self.arity
    }

    fn call(
        &self,
        _interpreter: &mut Interpreter<'_>,
        _arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError> {
        Ok((self.function)())
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}
