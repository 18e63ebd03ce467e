// ABOUTME: Lexical environments forming the scope chain for variable lookup

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// A single lexical scope. Scopes form a chain via `enclosing`; closures
/// capture a scope by holding an `Rc` to it, which is what keeps a
/// function's defining environment alive after the block that created it
/// has returned.
///
/// A binding maps to `None` when it has been declared but not yet
/// initialized (`var x;` before its initializer runs) -- distinct from a
/// binding holding `Value::Nil`.
pub struct Environment {
    values: RefCell<HashMap<String, Option<Value>>>,
    pub enclosing: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new_global() -> Rc<Self> {
        Rc::new(Environment {
            values: RefCell::new(HashMap::new()),
            enclosing: None,
        })
    }

    pub fn new_enclosed(enclosing: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            values: RefCell::new(HashMap::new()),
            enclosing: Some(Rc::clone(enclosing)),
        })
    }

    /// Declares `name` in this scope, overwriting any existing binding of
    /// the same name (shadowing within a block is legal; redeclaration is
    /// a resolver-level warning, not an environment-level error).
    pub fn define(&self, name: impl Into<String>, value: Option<Value>) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Name-based lookup, walking the chain. Used only for globals, which
    /// the resolver never assigns a scope depth to.
    pub fn get(&self, name: &str) -> Result<Value, String> {
        if let Some(slot) = self.values.borrow().get(name) {
            return match slot {
                Some(v) => Ok(v.clone()),
                None => Err(format!("Uninitialized variable '{name}'")),
            };
        }
        match &self.enclosing {
            Some(parent) => parent.get(name),
            None => Err(format!("Undefined variable '{name}'")),
        }
    }

    pub fn assign(&self, name: &str, value: Value) -> Result<(), String> {
        if self.values.borrow().contains_key(name) {
            self.values.borrow_mut().insert(name.to_string(), Some(value));
            return Ok(());
        }
        match &self.enclosing {
            Some(parent) => parent.assign(name, value),
            None => Err(format!("Undefined variable '{name}'")),
        }
    }

    /// Walks `depth` parents up from `env`. Panics if the chain runs out --
    /// that can only happen if the resolver computed a depth that doesn't
    /// match the environment chain actually built at runtime, which is a
    /// bug in the resolver, not a user-facing error.
    fn ancestor(env: &Rc<Environment>, depth: usize) -> Rc<Environment> {
        let mut current = Rc::clone(env);
        for _ in 0..depth {
            let next = current
                .enclosing
                .as_ref()
                .expect("resolver computed a depth deeper than the environment chain")
                .clone();
            current = next;
        }
        current
    }

    /// Depth-addressed lookup for a local resolved by the resolver. Still
    /// distinguishes an uninitialized slot from one holding `nil`.
    pub fn get_at(self: &Rc<Self>, depth: usize, name: &str) -> Result<Value, String> {
        let target = Environment::ancestor(self, depth);
        let slot = target.values.borrow();
        match slot.get(name) {
            Some(Some(v)) => Ok(v.clone()),
            Some(None) => Err(format!("Uninitialized variable '{name}'")),
            None => unreachable!("resolver resolved '{name}' to a slot that does not exist"),
        }
    }

    /// Like `get_at`, but returns `None` instead of erroring when the slot
    /// is absent at this depth. `super` dispatch uses this to detect a
    /// static-method context, where no `this` is bound, and fall back to a
    /// static member lookup instead of panicking or raising a user error.
    pub fn get_unchecked_at(self: &Rc<Self>, depth: usize, name: &str) -> Option<Value> {
        let target = Environment::ancestor(self, depth);
        let slot = target.values.borrow();
        slot.get(name).and_then(|v| v.clone())
    }

    pub fn assign_at(self: &Rc<Self>, depth: usize, name: &str, value: Value) {
        let target = Environment::ancestor(self, depth);
        target.values.borrow_mut().insert(name.to_string(), Some(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadowing_in_nested_scope_does_not_touch_outer() {
        let global = Environment::new_global();
        global.define("x", Some(Value::Number(1.0)));
        let inner = Environment::new_enclosed(&global);
        inner.define("x", Some(Value::Number(2.0)));
        assert_eq!(inner.get("x").unwrap(), Value::Number(2.0));
        assert_eq!(global.get("x").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn assign_walks_up_to_the_defining_scope() {
        let global = Environment::new_global();
        global.define("x", Some(Value::Number(1.0)));
        let inner = Environment::new_enclosed(&global);
        inner.assign("x", Value::Number(9.0)).unwrap();
        assert_eq!(global.get("x").unwrap(), Value::Number(9.0));
    }

    #[test]
    fn uninitialized_slot_errors_distinctly_from_nil() {
        let global = Environment::new_global();
        global.define("x", None);
        assert!(global.get("x").is_err());
        global.define("y", Some(Value::Nil));
        assert_eq!(global.get("y").unwrap(), Value::Nil);
    }

    #[test]
    fn undefined_and_uninitialized_report_distinct_messages() {
        let global = Environment::new_global();
        global.define("declared", None);
        assert_eq!(global.get("declared").unwrap_err(), "Uninitialized variable 'declared'");
        assert_eq!(global.get("missing").unwrap_err(), "Undefined variable 'missing'");
    }

    #[test]
    fn get_unchecked_at_returns_none_when_absent() {
        let global = Environment::new_global();
        let inner = Environment::new_enclosed(&global);
        inner.define("this", None);
        assert_eq!(inner.get_unchecked_at(0, "this"), None);
        inner.define("this", Some(Value::Number(1.0)));
        assert_eq!(inner.get_unchecked_at(0, "this"), Some(Value::Number(1.0)));
    }

    #[test]
    fn get_at_reaches_the_correct_ancestor() {
        let global = Environment::new_global();
        global.define("x", Some(Value::Number(1.0)));
        let a = Environment::new_enclosed(&global);
        let b = Environment::new_enclosed(&a);
        b.define("x", Some(Value::Number(2.0)));
        assert_eq!(b.get_at(0, "x").unwrap(), Value::Number(2.0));
        assert_eq!(b.get_at(2, "x").unwrap(), Value::Number(1.0));
    }
}
