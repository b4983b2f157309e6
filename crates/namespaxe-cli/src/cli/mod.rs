//! Command-line surface: argument parsing, dispatch, prompting and tables.

pub mod args;
pub mod commands;
pub mod output;
pub mod prompt;

pub use args::Args;
pub use commands::run;
pub use prompt::TerminalPrompt;
