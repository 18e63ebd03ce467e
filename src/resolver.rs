// ABOUTME: Static resolution pass computing lexical scope depths

use std::collections::HashMap;

use crate::ast::{Expr, FunctionDecl, NodeId, Stmt};
use crate::error::Diagnostics;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
    Getter,
    StaticMethod,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

struct VarInfo {
    token: Token,
    defined: bool,
    used: bool,
}

/// Walks the AST once between parsing and evaluation, assigning every
/// `Variable`/`Assign`/`This`/`Super` node a scope depth in `locals`. A
/// node absent from the returned map is a global, resolved by name at
/// runtime instead.
pub struct Resolver<'a> {
    scopes: Vec<HashMap<String, VarInfo>>,
    locals: HashMap<NodeId, usize>,
    diagnostics: &'a mut Diagnostics,
    current_function: FunctionType,
    current_class: ClassType,
    loop_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn resolve(stmts: &[Stmt], diagnostics: &'a mut Diagnostics) -> HashMap<NodeId, usize> {
        let mut resolver = Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            diagnostics,
            current_function: FunctionType::None,
            current_class: ClassType::None,
            loop_depth: 0,
        };
        resolver.resolve_stmts(stmts);
        resolver.locals
    }

    fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            for (name, info) in scope {
                if !info.used && name != "this" && name != "super" {
                    self.diagnostics
                        .warning(info.token.line, &format!("Variable '{name}' is never used."));
                }
            }
        }
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        if scope.contains_key(&name.lexeme) {
            self.diagnostics.error(
                name.line,
                &format!("Already a variable named '{}' in this scope.", name.lexeme),
            );
        }
        scope.insert(
            name.lexeme.clone(),
            VarInfo { token: name.clone(), defined: false, used: false },
        );
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        if let Some(info) = scope.get_mut(&name.lexeme) {
            info.defined = true;
        }
    }

    /// Used for synthetic bindings (`this`, `super`) that are always
    /// immediately defined and never warned about even if unused.
    fn declare_and_define(&mut self, name: &str, line: usize) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(
            name.to_string(),
            VarInfo {
                token: Token::new(crate::token::TokenKind::Identifier, name, crate::token::Literal::None, line),
                defined: true,
                used: true,
            },
        );
    }

    fn resolve_local(&mut self, id: NodeId, name: &str) {
        for (depth, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(info) = scope.get_mut(name) {
                info.used = true;
                self.locals.insert(id, depth);
                return;
            }
        }
        // Not found in any local scope: treated as a global.
    }

    fn resolve_function(&mut self, decl: &FunctionDecl, ftype: FunctionType) {
        let enclosing = self.current_function;
        self.current_function = ftype;
        self.begin_scope();
        if let Some(params) = &decl.params {
            for param in params {
                self.declare(param);
                self.define(param);
            }
        }
        self.resolve_stmts(&decl.body);
        self.end_scope();
        self.current_function = enclosing;
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.resolve_expr(expr),
            Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::Var { name, init } => {
                self.declare(name);
                if let Some(init) = init {
                    self.resolve_expr(init);
                }
                self.define(name);
            }
            Stmt::Block(stmts) => {
                self.begin_scope();
                self.resolve_stmts(stmts);
                self.end_scope();
            }
            Stmt::If { cond, then_branch, else_branch } => {
                self.resolve_expr(cond);
                self.resolve_stmt(then_branch);
                if let Some(branch) = else_branch {
                    self.resolve_stmt(branch);
                }
            }
            Stmt::Loop { init, cond, update, body } => {
                self.begin_scope();
                if let Some(init) = init {
                    self.resolve_stmt(init);
                }
                self.resolve_expr(cond);
                if let Some(update) = update {
                    self.resolve_expr(update);
                }
                self.loop_depth += 1;
                self.resolve_stmt(body);
                self.loop_depth -= 1;
                self.end_scope();
            }
            Stmt::Break(token) => {
                if self.loop_depth == 0 {
                    self.diagnostics.error(token.line, "Can't use 'break' outside of a loop.");
                }
            }
            Stmt::Continue(token) => {
                if self.loop_depth == 0 {
                    self.diagnostics.error(token.line, "Can't use 'continue' outside of a loop.");
                }
            }
            Stmt::Function(decl) => {
                self.declare(&decl.name);
                self.define(&decl.name);
                self.resolve_function(decl, FunctionType::Function);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.diagnostics.error(keyword.line, "Can't return from top-level code.");
                }
                if let Some(value) = value {
                    if self.current_function == FunctionType::Initializer {
                        self.diagnostics
                            .error(keyword.line, "Can't return a value from an initializer.");
                    }
                    self.resolve_expr(value);
                }
            }
            Stmt::Class { name, superclass, methods, static_methods } => {
                let enclosing_class = self.current_class;
                self.current_class = ClassType::Class;
                self.declare(name);
                self.define(name);

                if let Some(Expr::Variable { name: super_name, .. }) = superclass {
                    if super_name.lexeme == name.lexeme {
                        self.diagnostics.error(super_name.line, "A class can't inherit from itself.");
                    }
                    self.current_class = ClassType::Subclass;
                    self.resolve_expr(superclass.as_ref().unwrap());
                    self.begin_scope();
                    self.declare_and_define("super", name.line);
                }

                self.begin_scope();
                self.declare_and_define("this", name.line);
                for method in methods {
                    let ftype = match method.name.lexeme.as_str() {
                        "init" => FunctionType::Initializer,
                        _ if method.params.is_none() => FunctionType::Getter,
                        _ => FunctionType::Method,
                    };
                    self.resolve_function(method, ftype);
                }
                self.end_scope();

                for method in static_methods {
                    self.resolve_function(method, FunctionType::StaticMethod);
                }

                if superclass.is_some() {
                    self.end_scope();
                }
                self.current_class = enclosing_class;
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Unary { right, .. } => self.resolve_expr(right),
            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Grouping(inner) => self.resolve_expr(inner),
            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if matches!(scope.get(&name.lexeme), Some(info) if !info.defined) {
                        self.diagnostics.error(
                            name.line,
                            "Can't read local variable in its own initializer.",
                        );
                    }
                }
                self.resolve_local(*id, &name.lexeme);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, &name.lexeme);
            }
            Expr::Call { callee, args, .. } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
            Expr::Function { params, body, .. } => {
                let enclosing = self.current_function;
                self.current_function = FunctionType::Function;
                self.begin_scope();
                for param in params {
                    self.declare(param);
                    self.define(param);
                }
                self.resolve_stmts(body);
                self.end_scope();
                self.current_function = enclosing;
            }
            Expr::Get { object, .. } => self.resolve_expr(object),
            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }
            Expr::Delete { object, .. } => self.resolve_expr(object),
            Expr::This { id, keyword } => {
                if self.current_class == ClassType::None {
                    self.diagnostics.error(keyword.line, "Can't use 'this' outside of a class.");
                } else if self.current_function == FunctionType::StaticMethod {
                    self.diagnostics.error(keyword.line, "Can't use 'this' in a static method.");
                } else {
                    self.resolve_local(*id, "this");
                }
            }
            Expr::Super { id, keyword, .. } => {
                if self.current_class == ClassType::None {
                    self.diagnostics.error(keyword.line, "Can't use 'super' outside of a class.");
                } else if self.current_class != ClassType::Subclass {
                    self.diagnostics
                        .error(keyword.line, "Can't use 'super' in a class with no superclass.");
                } else {
                    self.resolve_local(*id, "super");
                }
            }
            Expr::Comma(exprs) => {
                for expr in exprs {
                    self.resolve_expr(expr);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn resolve_source(source: &str) -> (HashMap<NodeId, usize>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Lexer::new(source).scan_tokens(&mut diagnostics);
        let stmts = Parser::new(tokens).parse(&mut diagnostics);
        let locals = Resolver::resolve(&stmts, &mut diagnostics);
        (locals, diagnostics)
    }

    #[test]
    fn top_level_return_is_an_error() {
        let (_, diagnostics) = resolve_source("return 1;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn break_outside_loop_is_an_error() {
        let (_, diagnostics) = resolve_source("break;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn this_outside_class_is_an_error() {
        let (_, diagnostics) = resolve_source("print this;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn self_referential_initializer_is_an_error() {
        let (_, diagnostics) = resolve_source("{ var a = a; }");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn closure_over_outer_local_resolves_to_nonzero_depth() {
        let (locals, diagnostics) = resolve_source(
            "{ var a = 1; fun f() { print a; } }",
        );
        assert!(!diagnostics.had_error());
        assert!(locals.values().any(|&depth| depth > 0));
    }

    #[test]
    fn unused_local_produces_a_warning_not_an_error() {
        let (_, diagnostics) = resolve_source("{ var unused = 1; }");
        assert!(!diagnostics.had_error());
    }
}
