// ABOUTME: Orchestrates lex -> parse -> resolve -> interpret for one chunk of source

use crate::error::{DiagnosticSink, Diagnostics};
use crate::eval::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::resolver::Resolver;

/// Drives one chunk of source text through the full pipeline, short-circuiting
/// at the first stage that reports an error. Reused across both file-mode
/// (one chunk) and REPL-mode (one chunk per line/paste) execution.
pub struct Driver {
    interpreter: Interpreter,
}

impl Driver {
    pub fn new() -> Self {
        Driver { interpreter: Interpreter::new(Default::default()) }
    }

    /// Runs `source`, flushing accumulated diagnostics to `sink` regardless
    /// of outcome. Returns whether the chunk ran without error.
    pub fn run(&mut self, source: &str, sink: &mut dyn DiagnosticSink) -> bool {
        let ok = self.run_chunk(source, sink);
        ok
    }

    /// Like `run`, but implements the REPL auto-print fallback from spec.md
    /// #4.6: if the raw input fails to parse and doesn't already end with
    /// `;` or `}`, retry wrapped as `print <input>;`. A retry failure
    /// reports the *original* errors, not the retry's.
    pub fn run_repl_chunk(&mut self, source: &str, sink: &mut dyn DiagnosticSink) -> bool {
        let trimmed = source.trim_end();
        if trimmed.ends_with(';') || trimmed.ends_with('}') {
            return self.run_chunk(source, sink);
        }

        let mut probe = Diagnostics::new();
        let tokens = Lexer::new(source).scan_tokens(&mut probe);
        Parser::new(tokens).parse(&mut probe);

        if !probe.had_error() {
            return self.run_chunk(source, sink);
        }

        let wrapped = format!("print {source};");
        let mut retry_diagnostics = Diagnostics::new();
        let tokens = Lexer::new(&wrapped).scan_tokens(&mut retry_diagnostics);
        let stmts = Parser::new(tokens).parse(&mut retry_diagnostics);

        if retry_diagnostics.had_error() {
            probe.flush(sink);
            return false;
        }

        let locals = Resolver::resolve(&stmts, &mut retry_diagnostics);
        if retry_diagnostics.had_error() {
            probe.flush(sink);
            return false;
        }

        self.interpreter.set_locals(locals);
        match self.interpreter.interpret(&stmts) {
            Ok(()) => {
                retry_diagnostics.flush(sink);
                true
            }
            Err(_) => {
                // The wrapped form's own runtime error is discarded in
                // favor of the raw input's original diagnostics.
                probe.flush(sink);
                false
            }
        }
    }

    fn run_chunk(&mut self, source: &str, sink: &mut dyn DiagnosticSink) -> bool {
        let mut diagnostics = Diagnostics::new();
        let tokens = Lexer::new(source).scan_tokens(&mut diagnostics);
        let stmts = Parser::new(tokens).parse(&mut diagnostics);
        self.run_resolved(stmts, &mut diagnostics, sink)
    }

    fn run_resolved(
        &mut self,
        stmts: Vec<crate::ast::Stmt>,
        diagnostics: &mut Diagnostics,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        if diagnostics.had_error() {
            diagnostics.flush(sink);
            return false;
        }

        let locals = Resolver::resolve(&stmts, diagnostics);
        if diagnostics.had_error() {
            diagnostics.flush(sink);
            return false;
        }

        self.interpreter.set_locals(locals);
        let ok = match self.interpreter.interpret(&stmts) {
            Ok(()) => true,
            Err(err) => {
                diagnostics.runtime_error(&err);
                false
            }
        };
        diagnostics.flush(sink);
        ok
    }
}

impl Default for Driver {
    fn default() -> Self {
        Driver::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CapturingSink {
        errors: Vec<String>,
    }

    impl DiagnosticSink for CapturingSink {
        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
        fn warning(&mut self, _message: &str) {}
    }

    #[test]
    fn file_mode_runs_a_complete_program() {
        let mut driver = Driver::new();
        let mut sink = CapturingSink { errors: vec![] };
        assert!(driver.run("print 1 + 1;", &mut sink));
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn a_later_chunk_sees_globals_from_an_earlier_one() {
        let mut driver = Driver::new();
        let mut sink = CapturingSink { errors: vec![] };
        assert!(driver.run("var x = 10;", &mut sink));
        assert!(driver.run("print x;", &mut sink));
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn repl_auto_print_fallback_wraps_a_bare_expression() {
        let mut driver = Driver::new();
        let mut sink = CapturingSink { errors: vec![] };
        assert!(driver.run_repl_chunk("10 + 10", &mut sink));
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn repl_fallback_reports_the_original_error_on_retry_failure() {
        // "a" fails to parse raw (missing ';'); the wrapped retry `print a;`
        // parses but fails at runtime (undefined variable) -- the original
        // parse error is what should surface, not the wrapped runtime error.
        let mut driver = Driver::new();
        let mut sink = CapturingSink { errors: vec![] };
        assert!(!driver.run_repl_chunk("a", &mut sink));
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.errors[0].contains("Expect ';' after expression"));
    }

    #[test]
    fn a_statement_already_ending_in_semicolon_is_never_wrapped() {
        let mut driver = Driver::new();
        let mut sink = CapturingSink { errors: vec![] };
        assert!(!driver.run_repl_chunk("undefined_name;", &mut sink));
        assert!(sink.errors[0].contains("Undefined variable 'undefined_name'"));
    }
}
