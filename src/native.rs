// ABOUTME: Native (host-implemented) functions exposed to Lox programs

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::env::Environment;
use crate::value::{Callable, Value};

/// A function implemented in Rust rather than Lox. Plain `fn` pointers,
/// not `Box<dyn Fn>`, mirroring the interpreter's original built-in
/// representation -- none of the embedding surface here needs to close
/// over interpreter state, so the simpler representation is preferred.
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: fn(&[Value]) -> Result<Value, String>,
}

impl NativeFunction {
    pub fn new(name: &str, arity: usize, func: fn(&[Value]) -> Result<Value, String>) -> Rc<Self> {
        Rc::new(NativeFunction { name: name.to_string(), arity, func })
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        (self.func)(args)
    }
}

/// Registers the embedding API's default globals: `type`, `time`, and
/// `str`. An embedder wanting a different surface can skip this call and
/// register its own `NativeFunction`s directly into the globals
/// environment instead.
pub fn register_globals(globals: &Rc<Environment>) {
    let fns: [(&str, usize, fn(&[Value]) -> Result<Value, String>); 3] = [
        ("type", 1, native_type),
        ("time", 0, native_time),
        ("str", 1, native_str),
    ];
    for (name, arity, func) in fns {
        let native = NativeFunction::new(name, arity, func);
        globals.define(name, Some(Value::Callable(Callable::Native(native))));
    }
}

/// Milliseconds since the Unix epoch, as a Lox number.
fn native_time(_args: &[Value]) -> Result<Value, String> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| "system clock is before the Unix epoch".to_string())?;
    Ok(Value::Number(elapsed.as_millis() as f64))
}

fn native_type(args: &[Value]) -> Result<Value, String> {
    Ok(Value::string(args[0].type_name()))
}

fn native_str(args: &[Value]) -> Result<Value, String> {
    Ok(Value::string(args[0].to_string()))
}
