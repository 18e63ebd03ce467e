// ABOUTME: Runtime representation of Lox functions, classes, and instances

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::env::Environment;
use crate::value::{Callable, Value};

/// A user-defined function or method, closed over its defining
/// environment. `is_initializer` marks `init` methods: calling one always
/// yields `this`, even if the body has a bare `return;`.
pub struct LoxFunction {
    pub decl: Rc<FunctionDecl>,
    pub closure: Rc<Environment>,
    pub is_initializer: bool,
}

impl LoxFunction {
    pub fn new(decl: Rc<FunctionDecl>, closure: Rc<Environment>, is_initializer: bool) -> Self {
        LoxFunction { decl, closure, is_initializer }
    }

    pub fn arity(&self) -> usize {
        self.decl.params.as_ref().map_or(0, |p| p.len())
    }

    /// A method declared with no parameter list at all (`fun area { ... }`)
    /// is a getter: accessed without a call, not invoked like a method.
    pub fn is_getter(&self) -> bool {
        self.decl.params.is_none()
    }

    /// Produces a fresh copy of this method whose closure wraps the
    /// original closure with one more scope binding `this` to `instance`.
    /// Each property access rebinds, so two accesses of the same method on
    /// the same instance yield distinct (but behaviorally identical)
    /// `LoxFunction`s -- cheap, since the environment chain is shared via
    /// `Rc`.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> Rc<LoxFunction> {
        let env = Environment::new_enclosed(&self.closure);
        env.define("this", Some(Value::Instance(instance)));
        Rc::new(LoxFunction {
            decl: Rc::clone(&self.decl),
            closure: env,
            is_initializer: self.is_initializer,
        })
    }
}

/// A class declaration. Per spec.md, a class is itself a kind of
/// instance: static methods and class-level fields live in `statics`,
/// addressed the same way an instance's fields are.
pub struct LoxClass {
    pub name: String,
    pub superclass: Option<Rc<LoxClass>>,
    pub methods: HashMap<String, Rc<LoxFunction>>,
    statics: RefCell<HashMap<String, Value>>,
}

impl LoxClass {
    pub fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
        static_methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        let statics = static_methods
            .into_iter()
            .map(|(name, f)| (name, Value::Callable(Callable::Function(f))))
            .collect();
        LoxClass {
            name,
            superclass,
            methods,
            statics: RefCell::new(statics),
        }
    }

    /// Looks up an instance method, walking the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        if let Some(m) = self.methods.get(name) {
            return Some(Rc::clone(m));
        }
        self.superclass.as_ref().and_then(|sc| sc.find_method(name))
    }

    /// A class's arity is its `init` method's arity, or zero if it has
    /// none.
    pub fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |f| f.arity())
    }

    pub fn get_static(&self, name: &str) -> Result<Value, String> {
        if let Some(v) = self.statics.borrow().get(name) {
            return Ok(v.clone());
        }
        if let Some(sc) = &self.superclass {
            return sc.get_static(name);
        }
        Err(format!("Undefined property '{name}'"))
    }

    pub fn set_static(&self, name: &str, value: Value) {
        self.statics.borrow_mut().insert(name.to_string(), value);
    }

    /// Delete never raises a runtime error -- it reports whether there was
    /// anything to remove. A later `get` of the same name is what raises
    /// "Undefined property".
    pub fn delete_static(&self, name: &str) -> bool {
        self.statics.borrow_mut().remove(name).is_some()
    }

    /// All method names reachable from this class, own methods shadowing
    /// the superclass chain's, `init` excluded. Used by the instance
    /// stringify rule.
    pub fn all_method_names(&self) -> std::collections::BTreeSet<String> {
        let mut names: std::collections::BTreeSet<String> =
            self.superclass.as_ref().map_or_else(Default::default, |sc| sc.all_method_names());
        names.extend(self.methods.keys().cloned());
        names.remove("init");
        names
    }
}

/// A live instance of a class: a class pointer plus an open field bag.
/// Fields and methods share one namespace at lookup time -- `get_field`
/// is consulted first by the evaluator, then `class.find_method`.
pub struct LoxInstance {
    pub class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        LoxInstance { class, fields: HashMap::new() }
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn delete_field(&mut self, name: &str) -> bool {
        self.fields.remove(name).is_some()
    }

    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }
}
