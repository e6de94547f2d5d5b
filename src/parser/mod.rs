pub mod ast;

use crate::parser::ast::{
    BlockStatement, ClassDeclarationStatement, ExpressionStatement, FunctionDeclarationStatement,
    IfElseStatement, PrintStatement, ReturnStatement, Statement, VariableDeclarationStatement,
    VariableReferenceExpression, WhileStatement,
};
use crate::scanner::{Token, TokenDiscriminant};
use ast::{Expression, LiteralExpression};
use std::fmt::Write;
use std::iter::Peekable;
use std::rc::Rc;

/// A scan, parse or resolve error, displayed the way the driver reports it:
/// `[line N] Error at 'lexeme': message`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct SyntaxError {
    line: u32,
    location: String,
    message: String,
}

impl SyntaxError {
    pub(crate) fn at_token(token: &Token, message: impl Into<String>) -> Self {
        let location = match token.discriminant() {
            TokenDiscriminant::Eof => " at end".to_string(),
            _ => format!(" at '{}'", token.lexeme()),
        };
        Self {
            line: token.line(),
            location,
            message: message.into(),
        }
    }

    pub(crate) fn at_line(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            location: String::new(),
            message: message.into(),
        }
    }

    fn at_end(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            location: " at end".to_string(),
            message: message.into(),
        }
    }
}

pub struct Parser<TokenIter>
where
    TokenIter: Iterator<Item = Token>,
{
    tokens: Peekable<Source<TokenIter>>,
    errors: Vec<SyntaxError>,
    last_line: u32,
}

impl<TokenIter> Parser<TokenIter>
where
    TokenIter: Iterator<Item = Token>,
{
    /// Parse a token stream into a list of statements.
    ///
    /// The parser recovers from a malformed statement by discarding tokens up
    /// to the next likely statement boundary and carrying on, so one bad
    /// statement does not hide errors in the ones after it. If anything went
    /// wrong, all collected errors are returned and the statement list is
    /// discarded - the driver never evaluates a program that failed to parse.
    pub fn parse(tokens: TokenIter) -> Result<Vec<Statement>, Vec<SyntaxError>> {
        let mut parser = Self {
            tokens: Source(tokens).peekable(),
            errors: Vec::new(),
            last_line: 1,
        };

        let mut statements = vec![];
        while !parser.is_at_end() {
            match parser.declaration() {
                Ok(statement) => statements.push(statement),
                Err(e) => {
                    parser.errors.push(e);
                    parser.advance_until_recovery_point();
                }
            }
        }
        if parser.errors.is_empty() {
            Ok(statements)
        } else {
            Err(parser.errors)
        }
    }

    fn declaration(&mut self) -> Result<Statement, SyntaxError> {
        if self.advance_on_match(&[TokenDiscriminant::Class]).is_some() {
            self.class_declaration()
        } else if self.advance_on_match(&[TokenDiscriminant::Fun]).is_some() {
            self.function("function")
                .map(|f| Statement::FunctionDeclaration(Rc::new(f)))
        } else if self.advance_on_match(&[TokenDiscriminant::Var]).is_some() {
            let identifier = self.expect(TokenDiscriminant::Identifier, "Expect variable name.")?;
            let mut initializer = None;
            if self.advance_on_match(&[TokenDiscriminant::Equal]).is_some() {
                initializer = Some(self.expression()?);
            }
            self.expect(
                TokenDiscriminant::Semicolon,
                "Expect ';' after variable declaration.",
            )?;
            Ok(Statement::VariableDeclaration(
                VariableDeclarationStatement {
                    identifier,
                    initializer,
                },
            ))
        } else {
            self.statement()
        }
    }

    fn class_declaration(&mut self) -> Result<Statement, SyntaxError> {
        let name = self.expect(TokenDiscriminant::Identifier, "Expect class name.")?;

        let superclass = if self.advance_on_match(&[TokenDiscriminant::Less]).is_some() {
            let identifier =
                self.expect(TokenDiscriminant::Identifier, "Expect superclass name.")?;
            // The superclass is a plain variable reference, resolved and
            // evaluated like any other.
            Some(VariableReferenceExpression::new(identifier))
        } else {
            None
        };

        self.expect(TokenDiscriminant::LeftBrace, "Expect '{' before class body.")?;
        let mut methods = vec![];
        while !self.check(TokenDiscriminant::RightBrace) && !self.is_at_end() {
            methods.push(Rc::new(self.function("method")?));
        }
        self.expect(TokenDiscriminant::RightBrace, "Expect '}' after class body.")?;

        Ok(Statement::ClassDeclaration(ClassDeclarationStatement {
            name,
            superclass,
            methods,
        }))
    }

    fn function(&mut self, kind: &str) -> Result<FunctionDeclarationStatement, SyntaxError> {
        let name = self.expect(
            TokenDiscriminant::Identifier,
            format!("Expect {kind} name."),
        )?;
        self.expect(
            TokenDiscriminant::LeftParen,
            format!("Expect '(' after {kind} name."),
        )?;

        let mut parameters = vec![];
        if !self.check(TokenDiscriminant::RightParen) {
            loop {
                if parameters.len() >= 255 {
                    // Not fatal: record the error and keep parsing.
                    let e = self.error_at_current("Can't have more than 255 parameters.");
                    self.errors.push(e);
                }
                parameters.push(
                    self.expect(TokenDiscriminant::Identifier, "Expect parameter name.")?,
                );
                if self.advance_on_match(&[TokenDiscriminant::Comma]).is_none() {
                    break;
                }
            }
        }
        self.expect(
            TokenDiscriminant::RightParen,
            "Expect ')' after parameters.",
        )?;

        self.expect(
            TokenDiscriminant::LeftBrace,
            format!("Expect '{{' before {kind} body."),
        )?;
        let BlockStatement(body) = self.block_statement()?;

        Ok(FunctionDeclarationStatement {
            name,
            parameters,
            body,
        })
    }

    fn statement(&mut self) -> Result<Statement, SyntaxError> {
        if self.advance_on_match(&[TokenDiscriminant::Print]).is_some() {
            self.print_statement().map(Statement::Print)
        } else if self.advance_on_match(&[TokenDiscriminant::While]).is_some() {
            self.while_statement().map(Statement::While)
        } else if self.advance_on_match(&[TokenDiscriminant::For]).is_some() {
            self.for_statement()
        } else if self.advance_on_match(&[TokenDiscriminant::If]).is_some() {
            self.if_else_statement().map(Statement::IfElse)
        } else if let Some(keyword) = self.advance_on_match(&[TokenDiscriminant::Return]) {
            self.return_statement(keyword)
        } else if self
            .advance_on_match(&[TokenDiscriminant::LeftBrace])
            .is_some()
        {
            self.block_statement().map(Statement::Block)
        } else {
            self.expression_statement().map(Statement::Expression)
        }
    }

    fn for_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect(TokenDiscriminant::LeftParen, "Expect '(' after 'for'.")?;
        let initializer = if self
            .advance_on_match(&[TokenDiscriminant::Semicolon])
            .is_some()
        {
            None
        } else if self.check(TokenDiscriminant::Var) {
            Some(self.declaration()?)
        } else {
            Some(Statement::Expression(self.expression_statement()?))
        };
        let condition = if self.check(TokenDiscriminant::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(
            TokenDiscriminant::Semicolon,
            "Expect ';' after loop condition.",
        )?;
        let increment = if self.check(TokenDiscriminant::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(
            TokenDiscriminant::RightParen,
            "Expect ')' after for clauses.",
        )?;
        let mut body = self.statement()?;

        // De-sugaring the for loop into an equivalent while loop
        if let Some(increment) = increment {
            body = Statement::Block(BlockStatement(vec![
                body,
                Statement::Expression(ExpressionStatement(increment)),
            ]))
        }

        body = Statement::While(WhileStatement {
            condition: condition.unwrap_or_else(|| Expression::boolean(true)),
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Statement::Block(BlockStatement(vec![initializer, body]))
        }

        Ok(body)
    }

    fn block_statement(&mut self) -> Result<BlockStatement, SyntaxError> {
        let mut statements = vec![];

        while !self.check(TokenDiscriminant::RightBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        self.expect(TokenDiscriminant::RightBrace, "Expect '}' after block.")?;
        Ok(BlockStatement(statements))
    }

    fn while_statement(&mut self) -> Result<WhileStatement, SyntaxError> {
        self.expect(TokenDiscriminant::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.expect(TokenDiscriminant::RightParen, "Expect ')' after condition.")?;
        let body = self.statement()?;
        Ok(WhileStatement {
            condition,
            body: Box::new(body),
        })
    }

    fn if_else_statement(&mut self) -> Result<IfElseStatement, SyntaxError> {
        self.expect(TokenDiscriminant::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.expect(
            TokenDiscriminant::RightParen,
            "Expect ')' after if condition.",
        )?;
        let if_branch = self.statement()?;
        let mut else_branch = None;
        if self.advance_on_match(&[TokenDiscriminant::Else]).is_some() {
            else_branch = Some(Box::new(self.statement()?));
        }
        Ok(IfElseStatement {
            condition,
            if_branch: Box::new(if_branch),
            else_branch,
        })
    }

    fn return_statement(&mut self, keyword: Token) -> Result<Statement, SyntaxError> {
        let value = if self.check(TokenDiscriminant::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(
            TokenDiscriminant::Semicolon,
            "Expect ';' after return value.",
        )?;
        Ok(Statement::Return(ReturnStatement { keyword, value }))
    }

    fn print_statement(&mut self) -> Result<PrintStatement, SyntaxError> {
        let expr = self.expression()?;
        self.expect(TokenDiscriminant::Semicolon, "Expect ';' after value.")?;
        Ok(PrintStatement(expr))
    }

    fn expression_statement(&mut self) -> Result<ExpressionStatement, SyntaxError> {
        let expr = self.expression()?;
        self.expect(TokenDiscriminant::Semicolon, "Expect ';' after expression.")?;
        Ok(ExpressionStatement(expr))
    }

    fn expression(&mut self) -> Result<Expression, SyntaxError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expression, SyntaxError> {
        let expr = self.or()?;

        if let Some(equals) = self.advance_on_match(&[TokenDiscriminant::Equal]) {
            let value = self.assignment()?;
            match expr {
                Expression::VariableReference(variable) => {
                    Ok(Expression::variable_assignment(variable.identifier, value))
                }
                Expression::Get(get) => Ok(Expression::set(*get.object, get.name, value)),
                expr => {
                    // Not fatal: the right-hand side has been parsed, keep going.
                    self.errors
                        .push(SyntaxError::at_token(&equals, "Invalid assignment target."));
                    Ok(expr)
                }
            }
        } else {
            Ok(expr)
        }
    }

    fn or(&mut self) -> Result<Expression, SyntaxError> {
        let mut expr = self.and()?;

        while let Some(operator) = self.advance_on_match(&[TokenDiscriminant::Or]) {
            expr = Expression::logical(expr, operator, self.and()?);
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expression, SyntaxError> {
        let mut expr = self.equality()?;

        while let Some(operator) = self.advance_on_match(&[TokenDiscriminant::And]) {
            expr = Expression::logical(expr, operator, self.equality()?);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expression, SyntaxError> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.advance_on_match(&[
            TokenDiscriminant::BangEqual,
            TokenDiscriminant::EqualEqual,
        ]) {
            expr = Expression::binary(expr, operator, self.comparison()?);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expression, SyntaxError> {
        let mut expr = self.term()?;

        while let Some(operator) = self.advance_on_match(&[
            TokenDiscriminant::Greater,
            TokenDiscriminant::GreaterEqual,
            TokenDiscriminant::Less,
            TokenDiscriminant::LessEqual,
        ]) {
            expr = Expression::binary(expr, operator, self.term()?);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expression, SyntaxError> {
        let mut expr = self.factor()?;

        while let Some(operator) =
            self.advance_on_match(&[TokenDiscriminant::Minus, TokenDiscriminant::Plus])
        {
            expr = Expression::binary(expr, operator, self.factor()?);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expression, SyntaxError> {
        let mut expr = self.unary()?;

        while let Some(operator) =
            self.advance_on_match(&[TokenDiscriminant::Slash, TokenDiscriminant::Star])
        {
            expr = Expression::binary(expr, operator, self.unary()?);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expression, SyntaxError> {
        if let Some(operator) =
            self.advance_on_match(&[TokenDiscriminant::Bang, TokenDiscriminant::Minus])
        {
            Ok(Expression::unary(operator, self.unary()?))
        } else {
            self.call()
        }
    }

    fn call(&mut self) -> Result<Expression, SyntaxError> {
        let mut expr = self.primary()?;

        loop {
            if self
                .advance_on_match(&[TokenDiscriminant::LeftParen])
                .is_some()
            {
                expr = self.finish_call(expr)?;
            } else if self.advance_on_match(&[TokenDiscriminant::Dot]).is_some() {
                let name = self.expect(
                    TokenDiscriminant::Identifier,
                    "Expect property name after '.'.",
                )?;
                expr = Expression::get(expr, name);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expression) -> Result<Expression, SyntaxError> {
        let mut arguments = vec![];
        if !self.check(TokenDiscriminant::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    // Not fatal: record the error and keep parsing.
                    let e = self.error_at_current("Can't have more than 255 arguments.");
                    self.errors.push(e);
                }
                arguments.push(self.expression()?);
                if self.advance_on_match(&[TokenDiscriminant::Comma]).is_none() {
                    break;
                }
            }
        }
        let closing_parenthesis = self.expect(
            TokenDiscriminant::RightParen,
            "Expect ')' after arguments.",
        )?;
        Ok(Expression::call(callee, closing_parenthesis, arguments))
    }

    fn primary(&mut self) -> Result<Expression, SyntaxError> {
        if self.advance_on_match(&[TokenDiscriminant::True]).is_some() {
            Ok(Expression::boolean(true))
        } else if self.advance_on_match(&[TokenDiscriminant::False]).is_some() {
            Ok(Expression::boolean(false))
        } else if self.advance_on_match(&[TokenDiscriminant::Nil]).is_some() {
            Ok(Expression::null())
        } else if let Some(t) = self.advance_on_match(&[TokenDiscriminant::Number]) {
            // The discriminant matched, so the payload is there.
            let n = t.into_ty().number().unwrap();
            Ok(Expression::number(n))
        } else if let Some(t) = self.advance_on_match(&[TokenDiscriminant::String]) {
            let s = t.into_ty().string().unwrap();
            Ok(Expression::string(s))
        } else if let Some(t) = self.advance_on_match(&[TokenDiscriminant::Identifier]) {
            Ok(Expression::variable_reference(t))
        } else if let Some(keyword) = self.advance_on_match(&[TokenDiscriminant::This]) {
            Ok(Expression::this(keyword))
        } else if let Some(keyword) = self.advance_on_match(&[TokenDiscriminant::Super]) {
            self.expect(TokenDiscriminant::Dot, "Expect '.' after 'super'.")?;
            let method = self.expect(
                TokenDiscriminant::Identifier,
                "Expect superclass method name.",
            )?;
            Ok(Expression::super_access(keyword, method))
        } else if self
            .advance_on_match(&[TokenDiscriminant::LeftParen])
            .is_some()
        {
            let expr = self.expression()?;
            self.expect(
                TokenDiscriminant::RightParen,
                "Expect ')' after expression.",
            )?;
            Ok(Expression::grouping(expr))
        } else {
            Err(self.error_at_current("Expect expression."))
        }
    }

    fn advance_on_match(&mut self, token_types: &[TokenDiscriminant]) -> Option<Token> {
        let upcoming = self.tokens.peek()?;
        if token_types.contains(&upcoming.discriminant()) {
            let token = self.tokens.next()?;
            self.last_line = token.line();
            return Some(token);
        }
        None
    }

    fn advance_until_recovery_point(&mut self) {
        // Using a closure that returns `Option` to be able to use the `?` operator.
        // Looking forward to try blocks.
        let mut recover = || -> Option<()> {
            loop {
                let current = self.tokens.next()?;
                if current.discriminant() == TokenDiscriminant::Semicolon {
                    break None;
                }
                let upcoming = self.tokens.peek()?;
                match upcoming.discriminant() {
                    TokenDiscriminant::Class
                    | TokenDiscriminant::Fun
                    | TokenDiscriminant::Var
                    | TokenDiscriminant::For
                    | TokenDiscriminant::If
                    | TokenDiscriminant::While
                    | TokenDiscriminant::Print
                    | TokenDiscriminant::Return
                    | TokenDiscriminant::Eof => {
                        break None;
                    }
                    _ => {}
                }
            }
        };
        let _ = recover();
    }

    fn expect(
        &mut self,
        token_type: TokenDiscriminant,
        message: impl Into<String>,
    ) -> Result<Token, SyntaxError> {
        match self.advance_on_match(&[token_type]) {
            Some(t) => Ok(t),
            None => Err(self.error_at_current(message)),
        }
    }

    fn error_at_current(&mut self, message: impl Into<String>) -> SyntaxError {
        match self.tokens.peek() {
            Some(t) => SyntaxError::at_token(t, message),
            None => SyntaxError::at_end(self.last_line, message),
        }
    }

    fn check(&mut self, token_type: TokenDiscriminant) -> bool {
        self.tokens
            .peek()
            .map(|t| t.discriminant() == token_type)
            .unwrap_or(false)
    }

    fn is_at_end(&mut self) -> bool {
        match self.tokens.peek() {
            None => true,
            Some(t) => t.discriminant() == TokenDiscriminant::Eof,
        }
    }
}

/// Our parser does not care about trivia tokens, and lexical error tokens
/// have already been reported by the driver before parsing starts.
/// We give `Source` to our parser instead of the raw token stream: `Source`
/// wraps the underlying token stream and skips both, making them invisible
/// to the parser.
struct Source<TokenIter>(TokenIter)
where
    TokenIter: Iterator<Item = Token>;

impl<TokenIter> Iterator for Source<TokenIter>
where
    TokenIter: Iterator<Item = Token>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.0.next() {
                None => break None,
                Some(t)
                    if matches!(
                        t.discriminant(),
                        TokenDiscriminant::Trivia | TokenDiscriminant::SyntaxError
                    ) =>
                {
                    continue
                }
                Some(t) => break Some(t),
            }
        }
    }
}

#[allow(unused)]
pub fn display_ast(s: &Statement) -> Result<String, std::fmt::Error> {
    let mut buffer = String::new();
    _display_statement(&mut buffer, s, 0)?;
    Ok(buffer)
}

fn _display_statement(w: &mut impl Write, s: &Statement, depth: u8) -> Result<(), std::fmt::Error> {
    write!(w, "{}", " ".repeat(depth as usize))?;
    match s {
        Statement::Expression(ExpressionStatement(e)) => {
            writeln!(w, "Expression")?;
            _display_expression(w, e, depth + 1)?;
        }
        Statement::Print(PrintStatement(e)) => {
            writeln!(w, "Print")?;
            _display_expression(w, e, depth + 1)?;
        }
        Statement::VariableDeclaration(VariableDeclarationStatement {
            identifier,
            initializer,
        }) => {
            writeln!(w, "Variable Declaration")?;
            _display_token(w, identifier, depth + 1)?;
            if let Some(e) = initializer {
                _display_expression(w, e, depth + 1)?;
            }
        }
        Statement::Block(BlockStatement(statements)) => {
            writeln!(w, "Block")?;
            for statement in statements {
                _display_statement(w, statement, depth + 1)?;
            }
        }
        Statement::IfElse(IfElseStatement {
            condition,
            if_branch,
            else_branch,
        }) => {
            writeln!(w, "IfElse")?;
            _display_expression(w, condition, depth + 1)?;
            _display_statement(w, if_branch, depth + 1)?;
            if let Some(else_branch) = else_branch {
                _display_statement(w, else_branch, depth + 1)?;
            }
        }
        Statement::While(WhileStatement { condition, body }) => {
            writeln!(w, "While")?;
            _display_expression(w, condition, depth + 1)?;
            _display_statement(w, body, depth + 1)?;
        }
        Statement::FunctionDeclaration(declaration) => {
            writeln!(w, "Function Declaration")?;
            _display_function(w, declaration, depth + 1)?;
        }
        Statement::ClassDeclaration(ClassDeclarationStatement {
            name,
            superclass,
            methods,
        }) => {
            writeln!(w, "Class Declaration")?;
            _display_token(w, name, depth + 1)?;
            if let Some(VariableReferenceExpression { identifier, .. }) = superclass {
                _display_string(w, "Superclass", depth + 1)?;
                _display_token(w, identifier, depth + 2)?;
            }
            _display_string(w, "Methods", depth + 1)?;
            for method in methods {
                _display_function(w, method, depth + 2)?;
            }
        }
        Statement::Return(ReturnStatement { value, .. }) => {
            writeln!(w, "Return")?;
            if let Some(value) = value {
                _display_expression(w, value, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn _display_function(
    w: &mut impl Write,
    f: &FunctionDeclarationStatement,
    depth: u8,
) -> Result<(), std::fmt::Error> {
    _display_token(w, &f.name, depth)?;
    _display_string(w, "Parameters", depth)?;
    for parameter in &f.parameters {
        _display_token(w, parameter, depth + 1)?;
    }
    _display_string(w, "Body", depth)?;
    for s in &f.body {
        _display_statement(w, s, depth + 1)?;
    }
    Ok(())
}

fn _display_expression(
    w: &mut impl Write,
    e: &Expression,
    depth: u8,
) -> Result<(), std::fmt::Error> {
    write!(w, "{}", " ".repeat(depth as usize))?;
    match e {
        Expression::Binary(b) => {
            writeln!(w, "Binary")?;
            _display_expression(w, &b.left, depth + 1)?;
            _display_token(w, &b.operator, depth + 1)?;
            _display_expression(w, &b.right, depth + 1)?;
        }
        Expression::Logical(l) => {
            writeln!(w, "Logical")?;
            _display_expression(w, &l.left, depth + 1)?;
            _display_token(w, &l.operator, depth + 1)?;
            _display_expression(w, &l.right, depth + 1)?;
        }
        Expression::Unary(u) => {
            writeln!(w, "Unary")?;
            _display_token(w, &u.operator, depth + 1)?;
            _display_expression(w, &u.operand, depth + 1)?;
        }
        Expression::Literal(l) => {
            writeln!(w, "Literal")?;
            write!(w, "{}", " ".repeat(depth as usize + 1))?;
            match l {
                LiteralExpression::Null => writeln!(w, "Nil")?,
                LiteralExpression::String(s) => writeln!(w, "String \"{}\"", s)?,
                LiteralExpression::Number(n) => writeln!(w, "Number {}", n)?,
                LiteralExpression::Boolean(b) => {
                    writeln!(w, "{}", if *b { "True" } else { "False" })?
                }
            }
        }
        Expression::Grouping(g) => {
            writeln!(w, "Grouping")?;
            _display_expression(w, &g.0, depth + 1)?;
        }
        Expression::VariableReference(VariableReferenceExpression { identifier, .. }) => {
            writeln!(w, "Variable Reference")?;
            _display_token(w, identifier, depth + 1)?;
        }
        Expression::VariableAssignment(a) => {
            writeln!(w, "Variable Assignment")?;
            _display_token(w, &a.identifier, depth + 1)?;
            _display_expression(w, &a.value, depth + 1)?;
        }
        Expression::Call(c) => {
            writeln!(w, "Call")?;
            _display_expression(w, &c.callee, depth + 1)?;
            _display_string(w, "Arguments", depth + 1)?;
            for argument in &c.arguments {
                _display_expression(w, argument, depth + 2)?;
            }
        }
        Expression::Get(g) => {
            writeln!(w, "Get")?;
            _display_expression(w, &g.object, depth + 1)?;
            _display_token(w, &g.name, depth + 1)?;
        }
        Expression::Set(s) => {
            writeln!(w, "Set")?;
            _display_expression(w, &s.object, depth + 1)?;
            _display_token(w, &s.name, depth + 1)?;
            _display_expression(w, &s.value, depth + 1)?;
        }
        Expression::This(_) => {
            writeln!(w, "This")?;
        }
        Expression::Super(s) => {
            writeln!(w, "Super")?;
            _display_token(w, &s.method, depth + 1)?;
        }
    }
    Ok(())
}

fn _display_token(w: &mut impl Write, t: &Token, depth: u8) -> std::fmt::Result {
    write!(w, "{}", " ".repeat(depth as usize))?;
    writeln!(w, "{:?} '{}'", t.discriminant(), t.lexeme())
}

fn _display_string(w: &mut impl Write, s: &str, depth: u8) -> std::fmt::Result {
    write!(w, "{}", " ".repeat(depth as usize))?;
    writeln!(w, "{}", s)
}
