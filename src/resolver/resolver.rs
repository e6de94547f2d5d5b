use super::scope_stack::ScopeStack;
use super::Locals;
use crate::parser::ast::{
    BlockStatement, ClassDeclarationStatement, ExprId, Expression, ExpressionStatement,
    FunctionDeclarationStatement, PrintStatement, Statement,
};
use crate::parser::SyntaxError;
use crate::scanner::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionContext {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassContext {
    None,
    Class,
    Subclass,
}

/// The static pass between parsing and evaluation.
///
/// It computes the hop distance for every local variable reference and
/// reports the name-related errors that do not need a running program to be
/// detected: reading a variable inside its own initializer, duplicate local
/// declarations, misplaced `return`/`this`/`super`, self-inheritance.
pub struct Resolver {
    scopes: ScopeStack,
    locals: Locals,
    current_function: FunctionContext,
    current_class: ClassContext,
    errors: Vec<SyntaxError>,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
            locals: Locals::default(),
            current_function: FunctionContext::None,
            current_class: ClassContext::None,
            errors: Vec::new(),
        }
    }

    /// Resolve a program, returning its depth map.
    ///
    /// The pass keeps going when it finds an error so that a single run
    /// surfaces all of them; the depth map is only handed out when the
    /// program was found to be well-formed.
    pub fn resolve(mut self, statements: &[Statement]) -> Result<Locals, Vec<SyntaxError>> {
        self.resolve_statements(statements);
        if self.errors.is_empty() {
            Ok(self.locals)
        } else {
            Err(self.errors)
        }
    }

    fn resolve_statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.resolve_statement(statement);
        }
    }

    fn resolve_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Expression(ExpressionStatement(e)) => self.resolve_expression(e),
            Statement::Print(PrintStatement(e)) => self.resolve_expression(e),
            Statement::VariableDeclaration(v) => {
                self.declare(&v.identifier);
                if let Some(initializer) = &v.initializer {
                    self.resolve_expression(initializer);
                }
                self.scopes.define(v.identifier.lexeme());
            }
            Statement::FunctionDeclaration(f) => {
                // The name is defined before the body is resolved, so a
                // function can recursively refer to itself.
                self.declare(&f.name);
                self.scopes.define(f.name.lexeme());
                self.resolve_function(f, FunctionContext::Function);
            }
            Statement::ClassDeclaration(c) => self.resolve_class(c),
            Statement::Block(BlockStatement(statements)) => {
                let guard = self.scopes.enter_scope();
                self.resolve_statements(statements);
                self.scopes.exit_scope(guard);
            }
            Statement::IfElse(s) => {
                self.resolve_expression(&s.condition);
                self.resolve_statement(&s.if_branch);
                if let Some(else_branch) = &s.else_branch {
                    self.resolve_statement(else_branch);
                }
            }
            Statement::While(s) => {
                self.resolve_expression(&s.condition);
                self.resolve_statement(&s.body);
            }
            Statement::Return(r) => {
                if self.current_function == FunctionContext::None {
                    self.errors.push(SyntaxError::at_token(
                        &r.keyword,
                        "Can't return from top-level code.",
                    ));
                }
                if let Some(value) = &r.value {
                    if self.current_function == FunctionContext::Initializer {
                        self.errors.push(SyntaxError::at_token(
                            &r.keyword,
                            "Can't return a value from an initializer.",
                        ));
                    }
                    self.resolve_expression(value);
                }
            }
        }
    }

    fn resolve_class(&mut self, class: &ClassDeclarationStatement) {
        let enclosing_class = std::mem::replace(&mut self.current_class, ClassContext::Class);
        self.declare(&class.name);
        self.scopes.define(class.name.lexeme());

        if let Some(superclass) = &class.superclass {
            if superclass.identifier.lexeme() == class.name.lexeme() {
                self.errors.push(SyntaxError::at_token(
                    &superclass.identifier,
                    "A class can't inherit from itself.",
                ));
            }
            self.current_class = ClassContext::Subclass;
            self.resolve_local(superclass.id, &superclass.identifier);
        }

        // Methods of a subclass close over a scope holding `super`, and every
        // method body closes over a scope holding `this`; the interpreter
        // builds the matching environments when the class is declared and
        // when a method is bound.
        let super_guard = class.superclass.as_ref().map(|_| {
            let guard = self.scopes.enter_scope();
            self.scopes.define("super");
            guard
        });

        let this_guard = self.scopes.enter_scope();
        self.scopes.define("this");

        for method in &class.methods {
            let context = if method.name.lexeme() == "init" {
                FunctionContext::Initializer
            } else {
                FunctionContext::Method
            };
            self.resolve_function(method, context);
        }

        self.scopes.exit_scope(this_guard);
        if let Some(guard) = super_guard {
            self.scopes.exit_scope(guard);
        }
        self.current_class = enclosing_class;
    }

    fn resolve_function(
        &mut self,
        function: &FunctionDeclarationStatement,
        context: FunctionContext,
    ) {
        let enclosing_function = std::mem::replace(&mut self.current_function, context);
        let guard = self.scopes.enter_scope();
        for parameter in &function.parameters {
            self.declare(parameter);
            self.scopes.define(parameter.lexeme());
        }
        self.resolve_statements(&function.body);
        self.scopes.exit_scope(guard);
        self.current_function = enclosing_function;
    }

    fn resolve_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Binary(b) => {
                self.resolve_expression(&b.left);
                self.resolve_expression(&b.right);
            }
            Expression::Logical(l) => {
                self.resolve_expression(&l.left);
                self.resolve_expression(&l.right);
            }
            Expression::Unary(u) => self.resolve_expression(&u.operand),
            Expression::Literal(_) => {}
            Expression::Grouping(g) => self.resolve_expression(&g.0),
            Expression::VariableReference(v) => {
                if self.scopes.is_mid_initializer(v.identifier.lexeme()) {
                    self.errors.push(SyntaxError::at_token(
                        &v.identifier,
                        "Can't read local variable in its own initializer.",
                    ));
                }
                self.resolve_local(v.id, &v.identifier);
            }
            Expression::VariableAssignment(a) => {
                self.resolve_expression(&a.value);
                self.resolve_local(a.id, &a.identifier);
            }
            Expression::Call(c) => {
                self.resolve_expression(&c.callee);
                for argument in &c.arguments {
                    self.resolve_expression(argument);
                }
            }
            // Property names are looked up dynamically; only the object
            // expression is resolved.
            Expression::Get(g) => self.resolve_expression(&g.object),
            Expression::Set(s) => {
                self.resolve_expression(&s.value);
                self.resolve_expression(&s.object);
            }
            Expression::This(t) => {
                if self.current_class == ClassContext::None {
                    self.errors.push(SyntaxError::at_token(
                        &t.keyword,
                        "Can't use 'this' outside of a class.",
                    ));
                }
                self.resolve_local(t.id, &t.keyword);
            }
            Expression::Super(s) => {
                match self.current_class {
                    ClassContext::None => self.errors.push(SyntaxError::at_token(
                        &s.keyword,
                        "Can't use 'super' outside of a class.",
                    )),
                    ClassContext::Class => self.errors.push(SyntaxError::at_token(
                        &s.keyword,
                        "Can't use 'super' in a class with no superclass.",
                    )),
                    ClassContext::Subclass => {}
                }
                self.resolve_local(s.id, &s.keyword);
            }
        }
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.is_declared_locally(name.lexeme()) {
            self.errors.push(SyntaxError::at_token(
                name,
                "Already a variable with this name in this scope.",
            ));
        }
        self.scopes.declare(name.lexeme());
    }

    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        if let Some(depth) = self.scopes.depth_of(name.lexeme()) {
            self.locals.record(id, depth);
        }
        // No hit: the name is assumed to live in the global environment.
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
