// ABOUTME: Recursive-descent parser turning tokens into an AST

use std::rc::Rc;

use crate::ast::{Expr, FunctionDecl, Literal, NodeId, Stmt};
use crate::error::{Diagnostics, ParseError};
use crate::token::{Token, TokenKind};

const MAX_ARGS: usize = 255;

/// Precedence-climbing recursive-descent parser. Each binary-operator
/// level is its own method, from `comma` (lowest) down to `primary`
/// (highest), mirroring the grammar in spec.md section 2.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_id: NodeId,
}

type ExprResult = Result<Expr, ParseError>;
type StmtResult = Result<Stmt, ParseError>;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0, next_id: 0 }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn parse(mut self, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            match self.declaration(diagnostics) {
                Ok(stmt) => stmts.push(stmt),
                Err(ParseError) => self.synchronize(),
            }
        }
        stmts
    }

    // --- token stream plumbing ---

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn match_kind(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str, diagnostics: &mut Diagnostics) -> Result<&Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let line = self.peek().line;
        diagnostics.error(line, message);
        Err(ParseError)
    }

    /// Discards tokens until a likely statement boundary, so one syntax
    /// error doesn't cascade into a flood of spurious follow-on errors.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // --- declarations ---

    fn declaration(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        if self.match_kind(&[TokenKind::Class]) {
            return self.class_declaration(diagnostics);
        }
        if self.check(TokenKind::Fun) && self.check_next(TokenKind::Identifier) {
            self.advance();
            let name = self
                .consume(TokenKind::Identifier, "Expect function name.", diagnostics)?
                .clone();
            if !self.check(TokenKind::LeftParen) {
                diagnostics.error(name.line, "Getters may only exist within a class.");
                return Err(ParseError);
            }
            return self.finish_function(name, "function", diagnostics).map(Stmt::Function);
        }
        if self.match_kind(&[TokenKind::Var]) {
            return self.var_declaration(diagnostics);
        }
        self.statement(diagnostics)
    }

    fn check_next(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.tokens
            .get(self.current + 1)
            .map(|t| t.kind == kind)
            .unwrap_or(false)
    }

    fn class_declaration(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        let name = self.consume(TokenKind::Identifier, "Expect class name.", diagnostics)?.clone();

        let superclass = if self.match_kind(&[TokenKind::Less]) {
            let super_name = self
                .consume(TokenKind::Identifier, "Expect superclass name.", diagnostics)?
                .clone();
            Some(Expr::Variable { id: self.fresh_id(), name: super_name })
        } else {
            None
        };

        self.consume(TokenKind::LeftBrace, "Expect '{' before class body.", diagnostics)?;

        let mut methods = Vec::new();
        let mut static_methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if self.match_kind(&[TokenKind::Static]) {
                static_methods.push(self.function_declaration("method", diagnostics)?);
            } else {
                methods.push(self.method(diagnostics)?);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after class body.", diagnostics)?;

        Ok(Stmt::Class { name, superclass, methods, static_methods })
    }

    /// A method without a parameter list at all (no parens) is a getter;
    /// everything else goes through the ordinary function-declaration path.
    fn method(&mut self, diagnostics: &mut Diagnostics) -> Result<Rc<FunctionDecl>, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect method name.", diagnostics)?.clone();
        if self.check(TokenKind::LeftBrace) {
            self.consume(TokenKind::LeftBrace, "Expect '{' before getter body.", diagnostics)?;
            let body = self.block(diagnostics)?;
            return Ok(Rc::new(FunctionDecl { name, params: None, body: Rc::new(body) }));
        }
        self.finish_function(name, "method", diagnostics)
    }

    fn function_declaration(&mut self, kind: &str, diagnostics: &mut Diagnostics) -> Result<Rc<FunctionDecl>, ParseError> {
        let name = self
            .consume(TokenKind::Identifier, &format!("Expect {kind} name."), diagnostics)?
            .clone();
        self.finish_function(name, kind, diagnostics)
    }

    fn finish_function(&mut self, name: Token, kind: &str, diagnostics: &mut Diagnostics) -> Result<Rc<FunctionDecl>, ParseError> {
        self.consume(TokenKind::LeftParen, &format!("Expect '(' after {kind} name."), diagnostics)?;
        let params = self.parameter_list(diagnostics)?;
        self.consume(TokenKind::LeftBrace, &format!("Expect '{{' before {kind} body."), diagnostics)?;
        let body = self.block(diagnostics)?;
        Ok(Rc::new(FunctionDecl { name, params: Some(params), body: Rc::new(body) }))
    }

    fn parameter_list(&mut self, diagnostics: &mut Diagnostics) -> Result<Vec<Token>, ParseError> {
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    diagnostics.error(self.peek().line, "Can't have more than 255 parameters.");
                }
                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.", diagnostics)?.clone());
                if !self.match_kind(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.", diagnostics)?;
        Ok(params)
    }

    fn var_declaration(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.", diagnostics)?.clone();
        let init = if self.match_kind(&[TokenKind::Equal]) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.", diagnostics)?;
        Ok(Stmt::Var { name, init })
    }

    // --- statements ---

    fn statement(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        if self.match_kind(&[TokenKind::Print]) {
            return self.print_statement(diagnostics);
        }
        if self.match_kind(&[TokenKind::LeftBrace]) {
            return Ok(Stmt::Block(self.block(diagnostics)?));
        }
        if self.match_kind(&[TokenKind::If]) {
            return self.if_statement(diagnostics);
        }
        if self.match_kind(&[TokenKind::While]) {
            return self.while_statement(diagnostics);
        }
        if self.match_kind(&[TokenKind::For]) {
            return self.for_statement(diagnostics);
        }
        if let Some(token) = self.match_and_clone(TokenKind::Break) {
            self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.", diagnostics)?;
            return Ok(Stmt::Break(token));
        }
        if let Some(token) = self.match_and_clone(TokenKind::Continue) {
            self.consume(TokenKind::Semicolon, "Expect ';' after 'continue'.", diagnostics)?;
            return Ok(Stmt::Continue(token));
        }
        if let Some(token) = self.match_and_clone(TokenKind::Return) {
            return self.return_statement(token, diagnostics);
        }
        self.expression_statement(diagnostics)
    }

    fn match_and_clone(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    fn print_statement(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        let value = self.expression(diagnostics)?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.", diagnostics)?;
        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self, keyword: Token, diagnostics: &mut Diagnostics) -> StmtResult {
        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.", diagnostics)?;
        Ok(Stmt::Return { keyword, value })
    }

    fn block(&mut self, diagnostics: &mut Diagnostics) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            match self.declaration(diagnostics) {
                Ok(stmt) => stmts.push(stmt),
                Err(ParseError) => self.synchronize(),
            }
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.", diagnostics)?;
        Ok(stmts)
    }

    fn if_statement(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.", diagnostics)?;
        let cond = self.expression(diagnostics)?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.", diagnostics)?;
        let then_branch = Box::new(self.statement(diagnostics)?);
        let else_branch = if self.match_kind(&[TokenKind::Else]) {
            Some(Box::new(self.statement(diagnostics)?))
        } else {
            None
        };
        Ok(Stmt::If { cond, then_branch, else_branch })
    }

    fn while_statement(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.", diagnostics)?;
        let cond = self.expression(diagnostics)?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.", diagnostics)?;
        let body = Box::new(self.statement(diagnostics)?);
        Ok(Stmt::Loop { init: None, cond, update: None, body })
    }

    /// Desugars `for` into the shared `Loop` statement: the update
    /// expression, if present, is inlined into a condition-and-update list
    /// the evaluator runs after every iteration of the body.
    fn for_statement(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.", diagnostics)?;

        let init = if self.match_kind(&[TokenKind::Semicolon]) {
            None
        } else if self.match_kind(&[TokenKind::Var]) {
            Some(Box::new(self.var_declaration(diagnostics)?))
        } else {
            Some(Box::new(self.expression_statement(diagnostics)?))
        };

        let cond = if !self.check(TokenKind::Semicolon) {
            self.expression(diagnostics)?
        } else {
            Expr::Literal(Literal::Bool(true))
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.", diagnostics)?;

        let update = if !self.check(TokenKind::RightParen) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.", diagnostics)?;

        let body = Box::new(self.statement(diagnostics)?);
        Ok(Stmt::Loop { init, cond, update, body })
    }

    fn expression_statement(&mut self, diagnostics: &mut Diagnostics) -> StmtResult {
        let expr = self.expression(diagnostics)?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.", diagnostics)?;
        Ok(Stmt::Expression(expr))
    }

    // --- expressions, lowest to highest precedence ---

    fn expression(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        self.comma(diagnostics)
    }

    fn comma(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        let first = self.assignment(diagnostics)?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }
        let mut exprs = vec![first];
        while self.match_kind(&[TokenKind::Comma]) {
            exprs.push(self.assignment(diagnostics)?);
        }
        Ok(Expr::Comma(exprs))
    }

    fn assignment(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        let expr = self.or(diagnostics)?;

        if self.match_kind(&[TokenKind::Equal]) {
            let equals_line = self.previous().line;
            let value = Box::new(self.assignment(diagnostics)?);
            return match expr {
                Expr::Variable { name, .. } => Ok(Expr::Assign { id: self.fresh_id(), name, value }),
                Expr::Get { object, name } => Ok(Expr::Set { object, name, value }),
                _ => {
                    diagnostics.error(equals_line, "Invalid assignment target.");
                    Err(ParseError)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        let mut expr = self.and(diagnostics)?;
        while self.check(TokenKind::Or) {
            let op = self.advance().clone();
            let right = Box::new(self.and(diagnostics)?);
            expr = Expr::Logical { left: Box::new(expr), op, right };
        }
        Ok(expr)
    }

    fn and(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        let mut expr = self.equality(diagnostics)?;
        while self.check(TokenKind::And) {
            let op = self.advance().clone();
            let right = Box::new(self.equality(diagnostics)?);
            expr = Expr::Logical { left: Box::new(expr), op, right };
        }
        Ok(expr)
    }

    fn equality(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        self.binary_level(Self::comparison, &[TokenKind::BangEqual, TokenKind::EqualEqual], diagnostics)
    }

    fn comparison(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        self.binary_level(
            Self::term,
            &[TokenKind::Greater, TokenKind::GreaterEqual, TokenKind::Less, TokenKind::LessEqual],
            diagnostics,
        )
    }

    fn term(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        self.binary_level(Self::factor, &[TokenKind::Plus, TokenKind::Minus], diagnostics)
    }

    fn factor(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        self.binary_level(Self::power, &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent], diagnostics)
    }

    /// `**` is right-associative, unlike every other binary operator, so
    /// it gets its own recursive (rather than iterative) method.
    fn power(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        let left = self.unary(diagnostics)?;
        if self.match_kind(&[TokenKind::Star2]) {
            let op = self.previous().clone();
            let right = Box::new(self.power(diagnostics)?);
            return Ok(Expr::Binary { left: Box::new(left), op, right });
        }
        Ok(left)
    }

    fn binary_level(
        &mut self,
        mut next: impl FnMut(&mut Self, &mut Diagnostics) -> ExprResult,
        kinds: &[TokenKind],
        diagnostics: &mut Diagnostics,
    ) -> ExprResult {
        let mut expr = next(self, diagnostics)?;
        while self.match_kind(kinds) {
            let op = self.previous().clone();
            let right = Box::new(next(self, diagnostics)?);
            expr = Expr::Binary { left: Box::new(expr), op, right };
        }
        Ok(expr)
    }

    fn unary(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        if self.match_kind(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = self.previous().clone();
            let right = Box::new(self.unary(diagnostics)?);
            return Ok(Expr::Unary { op, right });
        }
        if self.match_kind(&[TokenKind::Delete]) {
            let target = self.unary(diagnostics)?;
            return match target {
                Expr::Get { object, name } => Ok(Expr::Delete { object, name }),
                _ => {
                    diagnostics.error(self.previous().line, "Can only delete a property.");
                    Err(ParseError)
                }
            };
        }
        self.call(diagnostics)
    }

    fn call(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        let mut expr = self.primary(diagnostics)?;
        loop {
            if self.match_kind(&[TokenKind::LeftParen]) {
                expr = self.finish_call(expr, diagnostics)?;
            } else if self.match_kind(&[TokenKind::Dot]) {
                let name = self
                    .consume(TokenKind::Identifier, "Expect property name after '.'.", diagnostics)?
                    .clone();
                expr = Expr::Get { object: Box::new(expr), name };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr, diagnostics: &mut Diagnostics) -> ExprResult {
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if args.len() >= MAX_ARGS {
                    diagnostics.error(self.peek().line, "Can't have more than 255 arguments.");
                }
                args.push(self.assignment(diagnostics)?);
                if !self.match_kind(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.", diagnostics)?.clone();
        Ok(Expr::Call { callee: Box::new(callee), paren, args })
    }

    fn primary(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        if self.match_kind(&[TokenKind::False]) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if self.match_kind(&[TokenKind::True]) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if self.match_kind(&[TokenKind::Nil]) {
            return Ok(Expr::Literal(Literal::Nil));
        }
        if self.check(TokenKind::Number) {
            let lit = self.advance().literal.clone();
            let crate::token::Literal::Number(n) = lit else { unreachable!() };
            return Ok(Expr::Literal(Literal::Number(n)));
        }
        if self.check(TokenKind::String) {
            let lit = self.advance().literal.clone();
            let crate::token::Literal::Str(s) = lit else { unreachable!() };
            return Ok(Expr::Literal(Literal::Str(s)));
        }
        if self.match_kind(&[TokenKind::Super]) {
            let keyword = self.previous().clone();
            self.consume(TokenKind::Dot, "Expect '.' after 'super'.", diagnostics)?;
            let method = self
                .consume(TokenKind::Identifier, "Expect superclass method name.", diagnostics)?
                .clone();
            return Ok(Expr::Super { id: self.fresh_id(), keyword, method });
        }
        if self.match_kind(&[TokenKind::This]) {
            return Ok(Expr::This { id: self.fresh_id(), keyword: self.previous().clone() });
        }
        if self.check(TokenKind::Identifier) {
            let name = self.advance().clone();
            return Ok(Expr::Variable { id: self.fresh_id(), name });
        }
        if self.match_kind(&[TokenKind::Fun]) {
            return self.function_expression(diagnostics);
        }
        if self.match_kind(&[TokenKind::LeftParen]) {
            let expr = self.expression(diagnostics)?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.", diagnostics)?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        let line = self.peek().line;
        diagnostics.error(line, "Expect expression.");
        Err(ParseError)
    }

    fn function_expression(&mut self, diagnostics: &mut Diagnostics) -> ExprResult {
        let name = if self.check(TokenKind::Identifier) {
            Some(self.advance().clone())
        } else {
            None
        };
        self.consume(TokenKind::LeftParen, "Expect '(' after 'fun'.", diagnostics)?;
        let params = self.parameter_list(diagnostics)?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.", diagnostics)?;
        let body = Rc::new(self.block(diagnostics)?);
        Ok(Expr::Function { name, params, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_source(source: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Lexer::new(source).scan_tokens(&mut diagnostics);
        let stmts = Parser::new(tokens).parse(&mut diagnostics);
        (stmts, diagnostics)
    }

    #[test]
    fn parses_var_declaration_with_initializer() {
        let (stmts, diagnostics) = parse_source("var x = 1 + 2;");
        assert!(!diagnostics.had_error());
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0], Stmt::Var { .. }));
    }

    #[test]
    fn power_operator_is_right_associative() {
        // 2 ** 3 ** 2 should parse as 2 ** (3 ** 2), i.e. the right side
        // of the outer Binary is itself a Binary, not a flat chain.
        let (stmts, diagnostics) = parse_source("2 ** 3 ** 2;");
        assert!(!diagnostics.had_error());
        match &stmts[0] {
            Stmt::Expression(Expr::Binary { right, .. }) => {
                assert!(matches!(**right, Expr::Binary { .. }));
            }
            _ => panic!("expected a binary expression statement"),
        }
    }

    #[test]
    fn for_loop_desugars_to_loop_statement() {
        let (stmts, diagnostics) = parse_source("for (var i = 0; i < 3; i = i + 1) print i;");
        assert!(!diagnostics.had_error());
        assert!(matches!(stmts[0], Stmt::Loop { .. }));
    }

    #[test]
    fn class_with_superclass_and_static_method() {
        let (stmts, diagnostics) = parse_source(
            "class Animal { speak() { print \"...\"; } }\n\
             class Dog < Animal { static create() { return Dog(); } }",
        );
        assert!(!diagnostics.had_error());
        match &stmts[1] {
            Stmt::Class { superclass, static_methods, .. } => {
                assert!(superclass.is_some());
                assert_eq!(static_methods.len(), 1);
            }
            _ => panic!("expected a class declaration"),
        }
    }

    #[test]
    fn getter_has_no_parameter_list() {
        let (stmts, diagnostics) = parse_source("class Circle { area { return 1; } }");
        assert!(!diagnostics.had_error());
        match &stmts[0] {
            Stmt::Class { methods, .. } => assert!(methods[0].params.is_none()),
            _ => panic!("expected a class declaration"),
        }
    }

    #[test]
    fn top_level_getter_without_parens_is_rejected() {
        let (_, diagnostics) = parse_source("fun area { return 1; }");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn delete_only_applies_to_a_property() {
        let (_, diagnostics) = parse_source("delete 1;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn invalid_assignment_target_is_reported() {
        let (_, diagnostics) = parse_source("1 = 2;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn comma_operator_groups_into_a_single_expression() {
        let (stmts, diagnostics) = parse_source("1, 2, 3;");
        assert!(!diagnostics.had_error());
        match &stmts[0] {
            Stmt::Expression(Expr::Comma(exprs)) => assert_eq!(exprs.len(), 3),
            _ => panic!("expected a comma expression"),
        }
    }

    #[test]
    fn more_than_255_parameters_is_diagnosed() {
        let params: Vec<String> = (0..260).map(|i| format!("p{i}")).collect();
        let source = format!("fun f({}) {{ return 0; }}", params.join(", "));
        let (_, diagnostics) = parse_source(&source);
        assert!(diagnostics.had_error());
    }
}
