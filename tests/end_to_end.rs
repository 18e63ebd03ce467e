// ABOUTME: Integration tests driving the full lex/parse/resolve/interpret pipeline

use lox_interpreter::driver::Driver;
use lox_interpreter::error::DiagnosticSink;

struct CapturingSink {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl CapturingSink {
    fn new() -> Self {
        CapturingSink { errors: vec![], warnings: vec![] }
    }
}

impl DiagnosticSink for CapturingSink {
    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[test]
fn scenario_closures_retain_captures() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run(
        "fun make() { var i = 0; fun inc() { i = i + 1; return i; } return inc; }\n\
         var c = make(); print c(); print c(); print c();",
        &mut sink
    ));
    assert!(sink.errors.is_empty());
}

#[test]
fn scenario_getter_invocation() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run(
        "class A { init() { this.v = 5; } large { return this.v > 10; } }\n\
         var a = A(); print a.large; a.v = 20; print a.large;",
        &mut sink
    ));
    assert!(sink.errors.is_empty());
}

#[test]
fn scenario_super_dispatch_across_static_methods() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run(
        "class A { static test() { print \"test\"; } }\n\
         class B < A { static test() { super.test(); } }\n\
         B.test();",
        &mut sink
    ));
    assert!(sink.errors.is_empty());
}

#[test]
fn scenario_for_with_continue_still_runs_update() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run(
        "for (var i = 0; i < 5; i = i + 1) { if (i == 2) continue; if (i == 4) break; print i; }",
        &mut sink
    ));
    assert!(sink.errors.is_empty());
}

#[test]
fn scenario_delete_returns_a_boolean_then_access_errors() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run("class O {} var o = O(); o.a = 10; print o.a; print delete o.a;", &mut sink));
    assert!(sink.errors.is_empty());

    let mut sink = CapturingSink::new();
    assert!(!driver.run("print o.a;", &mut sink));
    assert_eq!(sink.errors.len(), 1);
    assert!(sink.errors[0].contains("Undefined property 'a'"));
}

#[test]
fn scenario_repl_auto_print_fallback_evaluates_a_bare_expression() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run_repl_chunk("10 + 10", &mut sink));
    assert!(sink.errors.is_empty());
}

#[test]
fn scenario_repl_fallback_reports_the_original_error_for_an_undefined_name() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(!driver.run_repl_chunk("a", &mut sink));
    assert_eq!(sink.errors.len(), 1);
    assert!(!sink.errors[0].contains("Undefined variable"));
    assert!(sink.errors[0].contains("Expect ';'"));
}

#[test]
fn globals_persist_across_chunks_like_a_repl_session() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run_repl_chunk("var total = 0;", &mut sink));
    assert!(driver.run_repl_chunk("total = total + 5;", &mut sink));
    assert!(driver.run_repl_chunk("print total;", &mut sink));
    assert!(sink.errors.is_empty());
}

#[test]
fn a_compile_time_error_skips_execution_entirely() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(!driver.run("print this;", &mut sink));
    assert!(!sink.errors.is_empty());
}

#[test]
fn unused_local_is_a_warning_not_an_error() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run("{ var unused = 1; }", &mut sink));
    assert!(sink.errors.is_empty());
    assert!(!sink.warnings.is_empty());
}

#[test]
fn inheritance_and_field_plus_method_stringify_format() {
    let mut driver = Driver::new();
    let mut sink = CapturingSink::new();
    assert!(driver.run(
        "class Point { init(x, y) { this.x = x; this.y = y; } }\n\
         var p = Point(1, 2); print str(p);",
        &mut sink
    ));
    assert!(sink.errors.is_empty());
}
