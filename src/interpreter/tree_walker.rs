use crate::interpreter::environment::Environment;
use crate::interpreter::lox_callable::{LoxCallable, LoxFunction, NativeFunction};
use crate::interpreter::lox_class::{LoxClass, LoxInstance};
use crate::interpreter::lox_value::LoxValue;
use crate::parser::ast::{
    BlockStatement, ClassDeclarationStatement, ExprId, Expression, ExpressionStatement,
    LiteralExpression, PrintStatement, ReturnStatement, Statement, VariableDeclarationStatement,
    WhileStatement,
};
use crate::parser::{Parser, SyntaxError};
use crate::resolver::{Locals, Resolver};
use crate::scanner::{Scanner, Token, TokenDiscriminant};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub struct Interpreter<'a> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: Locals,
    output_stream: Box<dyn Write + 'a>,
}

impl<'a> Interpreter<'a> {
    pub fn new<OutputStream>(output: OutputStream) -> Self
    where
        OutputStream: Write + 'a,
    {
        let globals = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define(
            "clock",
            LoxValue::NativeFunction(Rc::new(NativeFunction::clock())),
        );
        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: Locals::default(),
            output_stream: Box::new(output),
        }
    }

    /// Scan, parse, resolve and then execute a Lox program.
    ///
    /// It returns `Err` if anything went wrong along the way; the error's
    /// `Display` output is exactly what the driver is expected to report.
    /// Nothing is evaluated when a static error was found. The interpreter
    /// keeps its global environment and depth map afterwards, so a REPL can
    /// feed it one line at a time.
    pub fn execute_raw(&mut self, source: &str) -> Result<(), ExecuteError> {
        let tokens: Vec<Token> = Scanner::new(source).collect();
        let mut static_errors: Vec<SyntaxError> = tokens
            .iter()
            .filter_map(|t| {
                t.syntax_error_message()
                    .map(|message| SyntaxError::at_line(t.line(), message))
            })
            .collect();

        let statements = match Parser::parse(tokens.into_iter()) {
            Ok(statements) => statements,
            Err(parse_errors) => {
                static_errors.extend(parse_errors);
                return Err(ExecuteError::Static(static_errors));
            }
        };
        if !static_errors.is_empty() {
            return Err(ExecuteError::Static(static_errors));
        }

        match Resolver::new().resolve(&statements) {
            Ok(locals) => self.locals.extend(locals),
            Err(resolve_errors) => return Err(ExecuteError::Static(resolve_errors)),
        }

        self.batch_execute(&statements).map_err(ExecuteError::from)
    }

    /// Execute a series of statements.
    /// It exits as soon as a runtime error is encountered.
    pub fn batch_execute(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    /// Execute a single Lox statement.
    pub fn execute(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        self._execute(statement).map_err(|e| match e {
            RuntimeErrorOrReturn::RuntimeError(e) => e,
            // The resolver rejects top-level `return`s, so an unwind
            // escaping up here means we have a bug.
            RuntimeErrorOrReturn::Return(_) => RuntimeError::unexpected_return(),
        })
    }

    pub(super) fn _execute(&mut self, s: &Statement) -> Result<(), RuntimeErrorOrReturn> {
        match s {
            Statement::Expression(ExpressionStatement(e)) => {
                self.eval(e)?;
            }
            Statement::Print(PrintStatement(e)) => {
                let value = self.eval(e)?;
                writeln!(self.output_stream, "{value}").map_err(RuntimeError::failed_to_print)?;
                self.output_stream
                    .flush()
                    .map_err(RuntimeError::failed_to_flush)?;
            }
            Statement::VariableDeclaration(VariableDeclarationStatement {
                identifier,
                initializer,
            }) => {
                let value = match initializer {
                    Some(initializer) => self.eval(initializer)?,
                    None => LoxValue::Null,
                };
                self.environment
                    .borrow_mut()
                    .define(identifier.lexeme(), value);
            }
            Statement::FunctionDeclaration(declaration) => {
                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment
                    .borrow_mut()
                    .define(declaration.name.lexeme(), LoxValue::Function(Rc::new(function)));
            }
            Statement::ClassDeclaration(class) => self.execute_class_declaration(class)?,
            Statement::Block(BlockStatement(statements)) => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, Rc::new(RefCell::new(environment)))?;
            }
            Statement::IfElse(s) => {
                if self.eval(&s.condition)?.is_truthy() {
                    self._execute(&s.if_branch)?;
                } else if let Some(else_branch) = &s.else_branch {
                    self._execute(else_branch)?;
                }
            }
            Statement::While(WhileStatement { condition, body }) => {
                while self.eval(condition)?.is_truthy() {
                    self._execute(body)?;
                }
            }
            Statement::Return(ReturnStatement { value, .. }) => {
                let value = match value {
                    Some(value) => self.eval(value)?,
                    None => LoxValue::Null,
                };
                return Err(Return(value).into());
            }
        }
        Ok(())
    }

    fn execute_class_declaration(
        &mut self,
        class: &ClassDeclarationStatement,
    ) -> Result<(), RuntimeErrorOrReturn> {
        let superclass = match &class.superclass {
            Some(reference) => {
                let value = self.look_up_variable(&reference.identifier, reference.id)?;
                match value {
                    LoxValue::Class(superclass) => Some(superclass),
                    _ => {
                        return Err(RuntimeError::new(
                            reference.identifier.clone(),
                            "Superclass must be a class.",
                        )
                        .into())
                    }
                }
            }
            None => None,
        };

        // The name is defined up front (as nil) so methods resolve it, then
        // re-assigned once the class object exists.
        self.environment
            .borrow_mut()
            .define(class.name.lexeme(), LoxValue::Null);

        // Methods of a subclass close over one extra scope holding `super`.
        let method_closure = match &superclass {
            Some(superclass) => {
                let mut environment = Environment::with_enclosing(Rc::clone(&self.environment));
                environment.define("super", LoxValue::Class(Rc::clone(superclass)));
                Rc::new(RefCell::new(environment))
            }
            None => Rc::clone(&self.environment),
        };

        let mut methods = HashMap::new();
        for declaration in &class.methods {
            let is_initializer = declaration.name.lexeme() == "init";
            let method = LoxFunction::new(
                Rc::clone(declaration),
                Rc::clone(&method_closure),
                is_initializer,
            );
            methods.insert(declaration.name.lexeme().to_string(), Rc::new(method));
        }

        let class_value = LoxValue::Class(Rc::new(LoxClass::new(
            class.name.lexeme().to_string(),
            superclass,
            methods,
        )));
        self.environment.borrow_mut().assign(&class.name, class_value)?;
        Ok(())
    }

    /// Execute `statements` inside `environment`, restoring the previous
    /// environment on every exit path.
    pub(super) fn execute_block(
        &mut self,
        statements: &[Statement],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), RuntimeErrorOrReturn> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = statements
            .iter()
            .try_for_each(|statement| self._execute(statement));
        self.environment = previous;
        result
    }

    fn eval(&mut self, e: &Expression) -> Result<LoxValue, RuntimeErrorOrReturn> {
        match e {
            Expression::Binary(b) => {
                let left = self.eval(&b.left)?;
                let right = self.eval(&b.right)?;
                match b.operator.discriminant() {
                    TokenDiscriminant::Minus => {
                        num_op(left, right, &b.operator, |l, r| LoxValue::Number(l - r))
                    }
                    TokenDiscriminant::Plus => match (left, right) {
                        (LoxValue::Number(l), LoxValue::Number(r)) => Ok(LoxValue::Number(l + r)),
                        (LoxValue::String(l), LoxValue::String(r)) => Ok(LoxValue::String(l + &r)),
                        (_, _) => Err(RuntimeError::new(
                            b.operator.clone(),
                            "Operands must be two numbers or two strings.",
                        )
                        .into()),
                    },
                    TokenDiscriminant::Slash => {
                        // Division by zero is not an error: it follows IEEE-754
                        // and yields an infinity or a NaN.
                        num_op(left, right, &b.operator, |l, r| LoxValue::Number(l / r))
                    }
                    TokenDiscriminant::Star => {
                        num_op(left, right, &b.operator, |l, r| LoxValue::Number(l * r))
                    }
                    TokenDiscriminant::Greater => {
                        num_op(left, right, &b.operator, |l, r| LoxValue::Boolean(l > r))
                    }
                    TokenDiscriminant::GreaterEqual => {
                        num_op(left, right, &b.operator, |l, r| LoxValue::Boolean(l >= r))
                    }
                    TokenDiscriminant::Less => {
                        num_op(left, right, &b.operator, |l, r| LoxValue::Boolean(l < r))
                    }
                    TokenDiscriminant::LessEqual => {
                        num_op(left, right, &b.operator, |l, r| LoxValue::Boolean(l <= r))
                    }
                    TokenDiscriminant::EqualEqual => Ok(LoxValue::Boolean(left.is_equal(&right))),
                    TokenDiscriminant::BangEqual => Ok(LoxValue::Boolean(!left.is_equal(&right))),
                    _ => Err(RuntimeError::new(
                        b.operator.clone(),
                        "It is not a valid binary operator",
                    )
                    .into()),
                }
            }
            Expression::Logical(l) => {
                // Short-circuiting: the deciding operand is returned as-is,
                // not coerced to a boolean.
                let left = self.eval(&l.left)?;
                match l.operator.discriminant() {
                    TokenDiscriminant::Or if left.is_truthy() => Ok(left),
                    TokenDiscriminant::And if !left.is_truthy() => Ok(left),
                    TokenDiscriminant::Or | TokenDiscriminant::And => self.eval(&l.right),
                    _ => Err(RuntimeError::new(
                        l.operator.clone(),
                        "It is not a valid logical operator",
                    )
                    .into()),
                }
            }
            Expression::Unary(u) => {
                let value = self.eval(&u.operand)?;
                match u.operator.discriminant() {
                    TokenDiscriminant::Minus => match value {
                        LoxValue::Number(n) => Ok(LoxValue::Number(-n)),
                        _ => Err(
                            RuntimeError::new(u.operator.clone(), "Operand must be a number.")
                                .into(),
                        ),
                    },
                    TokenDiscriminant::Bang => Ok(LoxValue::Boolean(!value.is_truthy())),
                    _ => Err(RuntimeError::new(
                        u.operator.clone(),
                        "`!` and `-` are the only valid unary operators",
                    )
                    .into()),
                }
            }
            Expression::Literal(l) => Ok(match l {
                LiteralExpression::Boolean(b) => LoxValue::Boolean(*b),
                LiteralExpression::Null => LoxValue::Null,
                LiteralExpression::Number(n) => LoxValue::Number(*n),
                LiteralExpression::String(s) => LoxValue::String(s.clone()),
            }),
            Expression::Grouping(g) => self.eval(&g.0),
            Expression::VariableReference(v) => {
                Ok(self.look_up_variable(&v.identifier, v.id)?)
            }
            Expression::VariableAssignment(a) => {
                let value = self.eval(&a.value)?;
                match self.locals.get(a.id) {
                    Some(distance) => {
                        self.environment
                            .borrow_mut()
                            .assign_at(distance, &a.identifier, value.clone())
                    }
                    None => self
                        .globals
                        .borrow_mut()
                        .assign(&a.identifier, value.clone())?,
                }
                // An assignment is an expression; it evaluates to the
                // assigned value.
                Ok(value)
            }
            Expression::Call(c) => {
                let callee = self.eval(&c.callee)?;
                // All arguments are evaluated, left to right, before the
                // callee or the arity are looked at.
                let arguments = c
                    .arguments
                    .iter()
                    .map(|argument| self.eval(argument))
                    .collect::<Result<Vec<_>, _>>()?;

                let callable: &dyn LoxCallable = match &callee {
                    LoxValue::Function(function) => function.as_ref(),
                    LoxValue::NativeFunction(function) => function.as_ref(),
                    LoxValue::Class(class) => class,
                    _ => {
                        return Err(RuntimeError::new(
                            c.closing_parenthesis.clone(),
                            "Can only call functions and classes.",
                        )
                        .into())
                    }
                };
                if callable.arity() as usize != arguments.len() {
                    return Err(RuntimeError::new(
                        c.closing_parenthesis.clone(),
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            arguments.len()
                        ),
                    )
                    .into());
                }
                Ok(callable.call(self, arguments)?)
            }
            Expression::Get(g) => match self.eval(&g.object)? {
                LoxValue::Instance(instance) => Ok(LoxInstance::get(&instance, &g.name)?),
                _ => Err(
                    RuntimeError::new(g.name.clone(), "Only instances have properties.").into(),
                ),
            },
            Expression::Set(s) => match self.eval(&s.object)? {
                LoxValue::Instance(instance) => {
                    let value = self.eval(&s.value)?;
                    instance.borrow_mut().set(&s.name, value.clone());
                    Ok(value)
                }
                _ => Err(RuntimeError::new(s.name.clone(), "Only instances have fields.").into()),
            },
            Expression::This(t) => Ok(self.look_up_variable(&t.keyword, t.id)?),
            Expression::Super(s) => {
                let distance = self
                    .locals
                    .get(s.id)
                    .expect("`super` was not resolved. This is an interpreter bug.");
                let superclass = match self.environment.borrow().get_at(distance, "super") {
                    LoxValue::Class(superclass) => superclass,
                    _ => unreachable!("`super` did not resolve to a class. This is an interpreter bug."),
                };
                // `this` lives in the bound-method scope right inside the
                // `super` scope.
                let instance = match self.environment.borrow().get_at(distance - 1, "this") {
                    LoxValue::Instance(instance) => instance,
                    _ => unreachable!("`this` did not resolve to an instance. This is an interpreter bug."),
                };
                match superclass.find_method(s.method.lexeme()) {
                    Some(method) => Ok(LoxValue::Function(Rc::new(method.bind(instance)))),
                    None => Err(RuntimeError::new(
                        s.method.clone(),
                        format!("Undefined property '{}'.", s.method.lexeme()),
                    )
                    .into()),
                }
            }
        }
    }

    fn look_up_variable(&self, name: &Token, id: ExprId) -> Result<LoxValue, RuntimeError> {
        match self.locals.get(id) {
            Some(distance) => Ok(self.environment.borrow().get_at(distance, name.lexeme())),
            None => self.globals.borrow().get(name),
        }
    }
}

/// Short-hand for evaluating numerical operations.
fn num_op<F>(
    left: LoxValue,
    right: LoxValue,
    operator: &Token,
    operation: F,
) -> Result<LoxValue, RuntimeErrorOrReturn>
where
    F: Fn(f64, f64) -> LoxValue,
{
    match (left, right) {
        (LoxValue::Number(l), LoxValue::Number(r)) => Ok(operation(l, r)),
        (_, _) => Err(RuntimeError::operands_must_be_numbers(operator.clone()).into()),
    }
}

/// Everything that can go wrong while running a program, split by the exit
/// code the driver maps it to: static errors (scan, parse, resolve) and
/// runtime errors.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    Static(Vec<SyntaxError>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Debug, thiserror::Error)]
pub(super) enum RuntimeErrorOrReturn {
    #[error(transparent)]
    RuntimeError(#[from] RuntimeError),
    #[error(transparent)]
    Return(#[from] Return),
}

/// The unwind signal carrying a `return`'s value up to the function frame
/// that observes it. Never surfaces to a user.
#[derive(Debug, thiserror::Error)]
#[error("An early return was encountered")]
pub(super) struct Return(pub(super) LoxValue);

#[derive(Debug)]
pub struct RuntimeError {
    token: Option<Token>,
    message: String,
}

impl RuntimeError {
    pub(super) fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token: Some(token),
            message: message.into(),
        }
    }

    pub(super) fn operands_must_be_numbers(operator: Token) -> Self {
        Self::new(operator, "Operands must be numbers.")
    }

    pub(super) fn undefined_variable(name: &Token) -> Self {
        Self::new(
            name.clone(),
            format!("Undefined variable '{}'.", name.lexeme()),
        )
    }

    pub(super) fn undefined_property(name: &Token) -> Self {
        Self::new(
            name.clone(),
            format!("Undefined property '{}'.", name.lexeme()),
        )
    }

    pub(super) fn failed_to_print(e: std::io::Error) -> Self {
        Self {
            token: None,
            message: format!("Failed to execute a print statement.\n{}", e),
        }
    }

    pub(super) fn failed_to_flush(e: std::io::Error) -> Self {
        Self {
            token: None,
            message: format!("Failed to flush the output stream.\n{}", e),
        }
    }

    fn unexpected_return() -> Self {
        Self {
            token: None,
            message: "`return` was used in an illegal position".into(),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{}\n[line {}]", self.message, token.line()),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RuntimeError {}
