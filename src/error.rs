// ABOUTME: Diagnostics accumulation and runtime error types

use std::fmt;
use thiserror::Error;

/// Zero-sized sentinel thrown internally by the parser to unwind to the
/// nearest statement boundary; the actual message has already been pushed
/// to `Diagnostics` at the point the sentinel is raised.
#[derive(Debug, Clone, Copy)]
pub struct ParseError;

/// A runtime error carrying source position and an optional call-stack
/// trail, used for the format in spec.md #7: "[line N] <stack> truncated
/// to the top three frames."
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct RuntimeError {
    pub line: usize,
    pub message: String,
    pub stack: Vec<String>,
}

impl RuntimeError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        RuntimeError {
            line,
            message: message.into(),
            stack: Vec::new(),
        }
    }

    /// Records one more enclosing call frame as the error unwinds through
    /// a function call boundary.
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

/// A sink diagnostics are flushed to. The embedder may supply its own;
/// `StdSink` is the default (stderr for errors, stderr prefixed `Warning:`
/// for warnings).
pub trait DiagnosticSink {
    fn error(&mut self, message: &str);
    fn warning(&mut self, message: &str);
}

#[derive(Default)]
pub struct StdSink;

impl DiagnosticSink for StdSink {
    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn warning(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

enum Diagnostic {
    Error(String),
    Warning(String),
}

/// Accumulating diagnostics context shared across lex/parse/resolve/eval.
/// Stages downstream of a reported error are skipped by the driver (see
/// `driver.rs`), except in the REPL's auto-print fallback.
#[derive(Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
    had_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn error(&mut self, line: usize, message: &str) {
        self.had_error = true;
        self.messages
            .push(Diagnostic::Error(format!("[line {line}]: {message}")));
    }

    pub fn warning(&mut self, line: usize, message: &str) {
        self.messages
            .push(Diagnostic::Warning(format!("[line {line}] Warning: {message}")));
    }

    pub fn runtime_error(&mut self, err: &RuntimeError) {
        self.had_error = true;
        if err.stack.is_empty() {
            self.messages
                .push(Diagnostic::Error(format!("[line {}]: {}", err.line, err.message)));
        } else {
            let mut frames = vec![err.message.clone()];
            frames.extend(err.stack.iter().take(2).cloned());
            self.messages
                .push(Diagnostic::Error(format!("[line {}] {}", err.line, frames.join(" <- "))));
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Sends every accumulated message to `sink` and clears the buffer,
    /// but leaves `had_error` untouched -- the driver reads it right after
    /// a stage, before flushing.
    pub fn flush(&mut self, sink: &mut dyn DiagnosticSink) {
        for message in self.messages.drain(..) {
            match message {
                Diagnostic::Error(m) => sink.error(&m),
                Diagnostic::Warning(m) => sink.warning(&m),
            }
        }
    }

    /// Resets the error flag and drops any unflushed messages, readying the
    /// context for the next REPL chunk.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.had_error = false;
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("had_error", &self.had_error)
            .field("pending", &self.messages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CapturingSink {
        errors: Vec<String>,
        warnings: Vec<String>,
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
    fn error_sets_had_error_and_formats_line() {
        let mut d = Diagnostics::new();
        d.error(3, "Unexpected character");
        assert!(d.had_error());
        let mut sink = CapturingSink { errors: vec![], warnings: vec![] };
        d.flush(&mut sink);
        assert_eq!(sink.errors, vec!["[line 3]: Unexpected character"]);
    }

    #[test]
    fn warning_does_not_set_had_error() {
        let mut d = Diagnostics::new();
        d.warning(1, "unused variable 'x'");
        assert!(!d.had_error());
    }

    #[test]
    fn reset_clears_error_flag() {
        let mut d = Diagnostics::new();
        d.error(1, "boom");
        d.reset();
        assert!(!d.had_error());
    }

    #[test]
    fn runtime_error_with_frames_truncates_to_three() {
        let mut d = Diagnostics::new();
        let err = RuntimeError::new(5, "Undefined property 'x'")
            .with_frame("in fn a")
            .with_frame("in fn b")
            .with_frame("in fn c");
        d.runtime_error(&err);
        let mut sink = CapturingSink { errors: vec![], warnings: vec![] };
        d.flush(&mut sink);
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.errors[0].contains("Undefined property 'x'"));
        assert!(sink.errors[0].contains("in fn a"));
        assert!(sink.errors[0].contains("in fn b"));
        assert!(!sink.errors[0].contains("in fn c"));
    }
}
