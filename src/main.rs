mod ast;
mod class;
mod config;
mod driver;
mod env;
mod error;
mod eval;
mod highlighter;
mod lexer;
mod native;
mod parser;
mod resolver;
mod token;
mod value;

use clap::Parser;
use config::{PROMPT, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use driver::Driver;
use error::StdSink;
use highlighter::LoxHelper;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::process::ExitCode;

/// A tree-walking interpreter for Lox.
#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking interpreter for the Lox language")]
struct CliArgs {
    /// Script file to execute. If omitted, starts the REPL.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match args.file {
        Some(path) => run_file(&path),
        None => {
            run_repl();
            ExitCode::SUCCESS
        }
    }
}

/// Reads `path` as UTF-8, runs it as a single chunk, and exits non-zero if
/// any stage reported an error.
fn run_file(path: &PathBuf) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Cannot read script file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut driver = Driver::new();
    let mut sink = StdSink;
    if driver.run(&source, &mut sink) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Interactive read-eval-print loop. Each line is its own chunk, going
/// through the REPL auto-print fallback (see driver.rs).
fn run_repl() {
    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    let mut driver = Driver::new();
    let mut sink = StdSink;

    let config = Config::builder().auto_add_history(true).build();
    let mut rl = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {e}");
            return;
        }
    };
    rl.set_helper(Some(LoxHelper::new()));

    let history_file = ".lox_history";
    let _ = rl.load_history(history_file);

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if line.trim() == "exit" {
                    break;
                }
                driver.run_repl_chunk(&line, &mut sink);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
}
