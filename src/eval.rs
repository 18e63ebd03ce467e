// ABOUTME: Tree-walking evaluator: executes statements and produces values

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use crate::ast::{Expr, FunctionDecl, Literal, NodeId, Stmt};
use crate::class::{LoxClass, LoxFunction, LoxInstance};
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::native::register_globals;
use crate::token::{Token, TokenKind};
use crate::value::{Callable, Value};

/// Result of executing one statement: either control fell through normally,
/// or one of the three escape mechanisms is unwinding. Standing in for the
/// host-exception approach other implementations of this pipeline use (see
/// the module-level note in `error.rs`), propagated explicitly up through
/// `execute_stmt`/`execute_block` instead.
enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Stateful tree walker holding the current environment pointer and the
/// resolver's depth map. One `Interpreter` persists across REPL chunks so
/// that globals accumulate; `locals` is replaced wholesale by the driver
/// after each chunk's resolve pass.
pub struct Interpreter {
    globals: Rc<Environment>,
    env: Rc<Environment>,
    locals: HashMap<NodeId, usize>,
    call_stack: Vec<String>,
    stdout: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(locals: HashMap<NodeId, usize>) -> Self {
        Self::with_writer(locals, Box::new(io::stdout()))
    }

    pub fn with_writer(locals: HashMap<NodeId, usize>, writer: Box<dyn Write>) -> Self {
        let globals = Environment::new_global();
        register_globals(&globals);
        Interpreter {
            env: Rc::clone(&globals),
            globals,
            locals,
            call_stack: Vec::new(),
            stdout: writer,
        }
    }

    pub fn globals(&self) -> &Rc<Environment> {
        &self.globals
    }

    /// Swaps in a fresh depth map computed for the next chunk of REPL
    /// input. Node IDs are chunk-local (the parser restarts its counter
    /// each chunk), so the old map would be meaningless here anyway.
    pub fn set_locals(&mut self, locals: HashMap<NodeId, usize>) {
        self.locals = locals;
    }

    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            match self.execute_stmt(stmt)? {
                Flow::Normal => {}
                _ => unreachable!("break/continue/return escaped top-level execution"),
            }
        }
        Ok(())
    }

    // --- statements ---

    fn execute_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                let _ = writeln!(self.stdout, "{value}");
                Ok(Flow::Normal)
            }
            Stmt::Var { name, init } => {
                let value = match init {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };
                self.env.define(name.lexeme.clone(), value);
                Ok(Flow::Normal)
            }
            Stmt::Block(stmts) => {
                let scope = Environment::new_enclosed(&self.env);
                self.execute_block(stmts, scope)
            }
            Stmt::If { cond, then_branch, else_branch } => {
                if self.evaluate(cond)?.is_truthy() {
                    self.execute_stmt(then_branch)
                } else if let Some(branch) = else_branch {
                    self.execute_stmt(branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::Loop { init, cond, update, body } => self.execute_loop(init, cond, update, body),
            Stmt::Break(_) => Ok(Flow::Break),
            Stmt::Continue(_) => Ok(Flow::Continue),
            Stmt::Function(decl) => {
                let func = Rc::new(LoxFunction::new(Rc::clone(decl), Rc::clone(&self.env), false));
                self.env
                    .define(decl.name.lexeme.clone(), Some(Value::Callable(Callable::Function(func))));
                Ok(Flow::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Class { name, superclass, methods, static_methods } => {
                self.execute_class(name, superclass, methods, static_methods)
            }
        }
    }

    /// A single scope for the whole loop, not recreated per iteration and
    /// not fused into the body's own scope -- see the loop-scoping design
    /// note this follows.
    fn execute_loop(
        &mut self,
        init: &Option<Box<Stmt>>,
        cond: &Expr,
        update: &Option<Expr>,
        body: &Stmt,
    ) -> Result<Flow, RuntimeError> {
        let loop_env = Environment::new_enclosed(&self.env);
        let saved = std::mem::replace(&mut self.env, loop_env);
        let result = (|| -> Result<Flow, RuntimeError> {
            if let Some(init) = init {
                self.execute_stmt(init)?;
            }
            while self.evaluate(cond)?.is_truthy() {
                match self.execute_stmt(body)? {
                    Flow::Break => break,
                    Flow::Return(v) => return Ok(Flow::Return(v)),
                    Flow::Normal | Flow::Continue => {}
                }
                // Runs on normal iteration end and on `continue` alike;
                // only `break` skips it.
                if let Some(update) = update {
                    self.evaluate(update)?;
                }
            }
            Ok(Flow::Normal)
        })();
        self.env = saved;
        result
    }

    fn execute_block(&mut self, stmts: &[Stmt], scope: Rc<Environment>) -> Result<Flow, RuntimeError> {
        let saved = std::mem::replace(&mut self.env, scope);
        let result = self.execute_stmts(stmts);
        self.env = saved;
        result
    }

    fn execute_stmts(&mut self, stmts: &[Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in stmts {
            match self.execute_stmt(stmt)? {
                Flow::Normal => {}
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal)
    }

    /// Two-phase class evaluation: the name is bound to `nil` before the
    /// class object exists (so a method can reference its own class by
    /// name), then reassigned once the class object is built.
    fn execute_class(
        &mut self,
        name: &Token,
        superclass: &Option<Expr>,
        methods: &[Rc<FunctionDecl>],
        static_methods: &[Rc<FunctionDecl>],
    ) -> Result<Flow, RuntimeError> {
        let super_class = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Callable(Callable::Class(c)) => Some(c),
                _ => return Err(RuntimeError::new(name.line, "Superclass must be a class")),
            },
            None => None,
        };

        self.env.define(name.lexeme.clone(), Some(Value::Nil));

        let methods_env = match &super_class {
            Some(sc) => {
                let scope = Environment::new_enclosed(&self.env);
                scope.define("super", Some(Value::Callable(Callable::Class(Rc::clone(sc)))));
                scope
            }
            None => Rc::clone(&self.env),
        };

        let mut method_map = HashMap::new();
        for method in methods {
            let is_initializer = method.name.lexeme == "init";
            let func = Rc::new(LoxFunction::new(Rc::clone(method), Rc::clone(&methods_env), is_initializer));
            method_map.insert(method.name.lexeme.clone(), func);
        }

        let mut static_map = HashMap::new();
        for method in static_methods {
            let func = Rc::new(LoxFunction::new(Rc::clone(method), Rc::clone(&methods_env), false));
            static_map.insert(method.name.lexeme.clone(), func);
        }

        let class = Rc::new(LoxClass::new(name.lexeme.clone(), super_class, method_map, static_map));
        self.env
            .assign(&name.lexeme, Value::Callable(Callable::Class(class)))
            .expect("class name was just defined in this scope");
        Ok(Flow::Normal)
    }

    // --- expressions ---

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit) => Ok(match lit {
                Literal::Nil => Value::Nil,
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Number(n) => Value::Number(*n),
                Literal::Str(s) => Value::string(s.clone()),
            }),
            Expr::Unary { op, right } => self.evaluate_unary(op, right),
            Expr::Binary { left, op, right } => self.evaluate_binary(left, op, right),
            Expr::Logical { left, op, right } => self.evaluate_logical(left, op, right),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable { id, name } => self.look_up_variable(*id, &name.lexeme, name.line),
            Expr::Assign { id, name, value } => self.evaluate_assign(*id, name, value),
            Expr::Call { callee, paren, args } => self.evaluate_call(callee, paren, args),
            Expr::Function { name, params, body } => Ok(self.evaluate_function_literal(name, params, body)),
            Expr::Get { object, name } => {
                let obj = self.evaluate(object)?;
                self.get_property(&obj, name)
            }
            Expr::Set { object, name, value } => self.evaluate_set(object, name, value),
            Expr::Delete { object, name } => self.evaluate_delete(object, name),
            Expr::This { id, keyword } => self.look_up_variable(*id, "this", keyword.line),
            Expr::Super { id, keyword, method } => self.evaluate_super(*id, keyword, method),
            Expr::Comma(exprs) => {
                let mut result = Value::Nil;
                for expr in exprs {
                    result = self.evaluate(expr)?;
                }
                Ok(result)
            }
        }
    }

    fn evaluate_unary(&mut self, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let right = self.evaluate(right)?;
        match op.kind {
            TokenKind::Minus => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::new(op.line, "Operand must be a number")),
            },
            TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
            _ => unreachable!("parser only produces '!'/'-' unary operators"),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        match op.kind {
            TokenKind::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
                _ => Err(RuntimeError::new(op.line, "Operands must both be a number or a string")),
            },
            TokenKind::Minus => self.numeric(left, right, op.line, |a, b| a - b),
            TokenKind::Star => self.numeric(left, right, op.line, |a, b| a * b),
            TokenKind::Slash => self.numeric(left, right, op.line, |a, b| a / b),
            TokenKind::Percent => self.numeric(left, right, op.line, |a, b| a % b),
            TokenKind::Star2 => self.numeric(left, right, op.line, f64::powf),
            TokenKind::Greater => self.compare(left, right, op.line, |a, b| a > b),
            TokenKind::GreaterEqual => self.compare(left, right, op.line, |a, b| a >= b),
            TokenKind::Less => self.compare(left, right, op.line, |a, b| a < b),
            TokenKind::LessEqual => self.compare(left, right, op.line, |a, b| a <= b),
            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),
            _ => unreachable!("parser only produces recognized binary operators"),
        }
    }

    fn numeric(&self, left: Value, right: Value, line: usize, f: impl Fn(f64, f64) -> f64) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(a, b))),
            _ => Err(RuntimeError::new(line, "Operand must be a number")),
        }
    }

    fn compare(&self, left: Value, right: Value, line: usize, f: impl Fn(f64, f64) -> bool) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(f(a, b))),
            _ => Err(RuntimeError::new(line, "Operand must be a number")),
        }
    }

    fn evaluate_logical(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;
        match op.kind {
            TokenKind::Or if left.is_truthy() => Ok(left),
            TokenKind::Or => self.evaluate(right),
            TokenKind::And if !left.is_truthy() => Ok(left),
            TokenKind::And => self.evaluate(right),
            _ => unreachable!("parser only produces 'and'/'or' logical operators"),
        }
    }

    fn look_up_variable(&self, id: NodeId, name: &str, line: usize) -> Result<Value, RuntimeError> {
        match self.locals.get(&id) {
            Some(&depth) => self.env.get_at(depth, name).map_err(|m| RuntimeError::new(line, m)),
            None => self.globals.get(name).map_err(|m| RuntimeError::new(line, m)),
        }
    }

    fn evaluate_assign(&mut self, id: NodeId, name: &Token, value: &Expr) -> Result<Value, RuntimeError> {
        let value = self.evaluate(value)?;
        match self.locals.get(&id) {
            Some(&depth) => {
                self.env.assign_at(depth, &name.lexeme, value.clone());
            }
            None => {
                self.globals
                    .assign(&name.lexeme, value.clone())
                    .map_err(|m| RuntimeError::new(name.line, m))?;
            }
        }
        Ok(value)
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, args: &[Expr]) -> Result<Value, RuntimeError> {
        let callee = self.evaluate(callee)?;
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate(arg)?);
        }
        self.call(callee, arg_values, paren.line)
    }

    fn call(&mut self, callee: Value, args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
        match callee {
            Value::Callable(Callable::Native(native)) => {
                if args.len() != native.arity {
                    return Err(RuntimeError::new(line, format!("Expected {} args but got {}", native.arity, args.len())));
                }
                native.call(&args).map_err(|m| RuntimeError::new(line, m))
            }
            Value::Callable(Callable::Function(func)) => {
                if args.len() != func.arity() {
                    return Err(RuntimeError::new(line, format!("Expected {} args but got {}", func.arity(), args.len())));
                }
                self.call_function(&func, args)
            }
            Value::Callable(Callable::Class(class)) => {
                if args.len() != class.arity() {
                    return Err(RuntimeError::new(line, format!("Expected {} args but got {}", class.arity(), args.len())));
                }
                let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(&class))));
                if let Some(init) = class.find_method("init") {
                    let bound = init.bind(Rc::clone(&instance));
                    self.call_function(&bound, args)?;
                }
                Ok(Value::Instance(instance))
            }
            _ => Err(RuntimeError::new(line, "Value is not callable")),
        }
    }

    fn call_function(&mut self, func: &Rc<LoxFunction>, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let call_env = Environment::new_enclosed(&func.closure);
        if let Some(params) = &func.decl.params {
            for (param, arg) in params.iter().zip(args) {
                call_env.define(param.lexeme.clone(), Some(arg));
            }
        }

        let saved = std::mem::replace(&mut self.env, call_env);
        self.call_stack.push(func.decl.name.lexeme.clone());
        let result = self.execute_stmts(&func.decl.body);
        self.call_stack.pop();
        self.env = saved;

        match result {
            Ok(Flow::Return(value)) => Ok(self.initializer_result(func, value)),
            Ok(_) => Ok(self.initializer_result(func, Value::Nil)),
            Err(err) => Err(err.with_frame(format!("in {}", func.decl.name.lexeme))),
        }
    }

    /// An `init` method's result is always the bound instance, regardless
    /// of what its body returned -- `this` lives in the method's own
    /// closure (the environment `bind` built), found there by name.
    fn initializer_result(&self, func: &Rc<LoxFunction>, fallback: Value) -> Value {
        if func.is_initializer {
            func.closure.get("this").unwrap_or(fallback)
        } else {
            fallback
        }
    }

    fn evaluate_function_literal(&mut self, name: &Option<Token>, params: &[Token], body: &Rc<Vec<Stmt>>) -> Value {
        let name_token = match name {
            Some(t) => t.clone(),
            None => Token::new(TokenKind::Identifier, "", crate::token::Literal::None, 0),
        };
        let decl = Rc::new(FunctionDecl {
            name: name_token,
            params: Some(params.to_vec()),
            body: Rc::clone(body),
        });
        let func = Rc::new(LoxFunction::new(decl, Rc::clone(&self.env), false));
        Value::Callable(Callable::Function(func))
    }

    fn get_property(&mut self, obj: &Value, name: &Token) -> Result<Value, RuntimeError> {
        match obj {
            Value::Instance(instance) => {
                if let Some(field) = instance.borrow().get_field(&name.lexeme) {
                    return Ok(field);
                }
                let method = instance.borrow().class.find_method(&name.lexeme);
                match method {
                    Some(method) => {
                        let bound = method.bind(Rc::clone(instance));
                        if bound.is_getter() {
                            self.call_function(&bound, vec![])
                        } else {
                            Ok(Value::Callable(Callable::Function(bound)))
                        }
                    }
                    None => Err(RuntimeError::new(name.line, format!("Undefined property '{}'", name.lexeme))),
                }
            }
            Value::Callable(Callable::Class(class)) => {
                class.get_static(&name.lexeme).map_err(|m| RuntimeError::new(name.line, m))
            }
            _ => Err(RuntimeError::new(name.line, "Value is not a class instance")),
        }
    }

    fn evaluate_set(&mut self, object: &Expr, name: &Token, value: &Expr) -> Result<Value, RuntimeError> {
        let object = self.evaluate(object)?;
        let value = self.evaluate(value)?;
        match &object {
            Value::Instance(instance) => {
                instance.borrow_mut().set_field(name.lexeme.clone(), value.clone());
                Ok(value)
            }
            Value::Callable(Callable::Class(class)) => {
                class.set_static(&name.lexeme, value.clone());
                Ok(value)
            }
            _ => Err(RuntimeError::new(name.line, "Value is not a class instance")),
        }
    }

    fn evaluate_delete(&mut self, object: &Expr, name: &Token) -> Result<Value, RuntimeError> {
        let object = self.evaluate(object)?;
        match &object {
            Value::Instance(instance) => Ok(Value::Bool(instance.borrow_mut().delete_field(&name.lexeme))),
            Value::Callable(Callable::Class(class)) => Ok(Value::Bool(class.delete_static(&name.lexeme))),
            _ => Err(RuntimeError::new(name.line, "Value is not a class instance")),
        }
    }

    /// `super.member`'s recorded depth locates the `super` frame; the
    /// instance lives one hop closer in (depth - 1), the frame `bind`
    /// would have added. If that slot is absent, we're in a static method
    /// (no `this` was ever bound) and fall back to a static lookup.
    fn evaluate_super(&mut self, id: NodeId, keyword: &Token, method: &Token) -> Result<Value, RuntimeError> {
        let depth = *self
            .locals
            .get(&id)
            .expect("resolver always assigns 'super' a depth where it is legal to use");
        let superclass = match self.env.get_unchecked_at(depth, "super") {
            Some(Value::Callable(Callable::Class(c))) => c,
            _ => unreachable!("resolver guarantees 'super' is bound at its recorded depth"),
        };

        match self.env.get_unchecked_at(depth - 1, "this") {
            Some(Value::Instance(instance)) => match superclass.find_method(&method.lexeme) {
                Some(m) => Ok(Value::Callable(Callable::Function(m.bind(instance)))),
                None => Err(RuntimeError::new(
                    keyword.line,
                    format!("Undefined property '{}'", method.lexeme),
                )),
            },
            _ => superclass
                .get_static(&method.lexeme)
                .map_err(|m| RuntimeError::new(keyword.line, m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Diagnostics;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use std::cell::RefCell as StdRefCell;

    #[derive(Clone)]
    struct SharedBuf(Rc<StdRefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(source: &str) -> (String, Result<(), RuntimeError>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Lexer::new(source).scan_tokens(&mut diagnostics);
        let stmts = Parser::new(tokens).parse(&mut diagnostics);
        assert!(!diagnostics.had_error(), "unexpected parse errors");
        let locals = Resolver::resolve(&stmts, &mut diagnostics);
        assert!(!diagnostics.had_error(), "unexpected resolve errors");

        let buf = Rc::new(StdRefCell::new(Vec::new()));
        let mut interpreter = Interpreter::with_writer(locals, Box::new(SharedBuf(Rc::clone(&buf))));
        let result = interpreter.interpret(&stmts);
        let output = String::from_utf8(buf.borrow().clone()).unwrap();
        (output, result)
    }

    #[test]
    fn closures_retain_their_captures() {
        let (output, result) = run(
            "fun make() { var i = 0; fun inc() { i = i + 1; return i; } return inc; }\n\
             var c = make(); print c(); print c(); print c();",
        );
        assert!(result.is_ok());
        assert_eq!(output, "1\n2\n3\n");
    }

    #[test]
    fn getter_is_invoked_without_a_call() {
        let (output, result) = run(
            "class A { init() { this.v = 5; } large { return this.v > 10; } }\n\
             var a = A(); print a.large; a.v = 20; print a.large;",
        );
        assert!(result.is_ok());
        assert_eq!(output, "false\ntrue\n");
    }

    #[test]
    fn super_dispatch_works_across_static_methods() {
        let (output, result) = run(
            "class A { static test() { print \"test\"; } }\n\
             class B < A { static test() { super.test(); } }\n\
             B.test();",
        );
        assert!(result.is_ok());
        assert_eq!(output, "test\n");
    }

    #[test]
    fn for_loop_continue_still_runs_the_update() {
        let (output, result) = run(
            "for (var i = 0; i < 5; i = i + 1) { if (i == 2) continue; if (i == 4) break; print i; }",
        );
        assert!(result.is_ok());
        assert_eq!(output, "0\n1\n3\n");
    }

    #[test]
    fn delete_returns_a_boolean_and_removes_the_field() {
        let (output, result) = run("class O {} var o = O(); o.a = 10; print o.a; print delete o.a;");
        assert!(result.is_ok());
        assert_eq!(output, "10\ntrue\n");

        let (_, result) = run("class O {} var o = O(); delete o.a; print o.a;");
        let err = result.unwrap_err();
        assert_eq!(err.message, "Undefined property 'a'");
    }

    #[test]
    fn init_always_returns_the_constructed_instance() {
        let (_, result) = run("class A { init() { return; } } print A();");
        assert!(result.is_ok());
    }

    #[test]
    fn comma_expression_value_is_the_rightmost_operand() {
        let (output, _) = run("print (1, 2, 3);");
        assert_eq!(output, "3\n");
    }

    #[test]
    fn short_circuit_or_returns_the_operand_not_a_boolean() {
        let (output, _) = run("print nil or \"fallback\";");
        assert_eq!(output, "fallback\n");
    }

    #[test]
    fn mismatched_addition_operands_report_the_exact_message() {
        let (_, result) = run("print \"a\" + 1;");
        assert_eq!(result.unwrap_err().message, "Operands must both be a number or a string");
    }

    #[test]
    fn unary_minus_on_a_string_reports_operand_must_be_a_number() {
        let (_, result) = run("print -\"x\";");
        assert_eq!(result.unwrap_err().message, "Operand must be a number");
    }

    #[test]
    fn calling_with_the_wrong_number_of_args_is_reported() {
        let (_, result) = run("fun f(a, b) { return a + b; } f(1);");
        assert_eq!(result.unwrap_err().message, "Expected 2 args but got 1");
    }

    #[test]
    fn calling_a_non_callable_value_is_reported() {
        let (_, result) = run("var x = 1; x();");
        assert_eq!(result.unwrap_err().message, "Value is not callable");
    }

    #[test]
    fn inheritance_from_a_non_class_is_reported() {
        let (_, result) = run("var NotAClass = 1; class Sub < NotAClass {}");
        assert_eq!(result.unwrap_err().message, "Superclass must be a class");
    }

    #[test]
    fn inherited_methods_are_reachable_through_the_superclass_chain() {
        let (output, result) = run(
            "class Animal { speak() { print \"...\"; } }\n\
             class Dog < Animal {}\n\
             Dog().speak();",
        );
        assert!(result.is_ok());
        assert_eq!(output, "...\n");
    }
}
