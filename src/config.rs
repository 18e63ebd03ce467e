// ABOUTME: Version info and REPL welcome banner

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "Lox Interpreter v0.1.0";
pub const WELCOME_SUBTITLE: &str = "A tree-walking interpreter for the Lox language";
pub const PROMPT: &str = "> ";
