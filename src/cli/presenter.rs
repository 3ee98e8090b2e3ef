//! CLI presenter for output formatting
//!
//! Status lines go to stderr so stdout only ever carries the picked color.

use colored::*;

/// Presenter for CLI output formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    verbose: bool,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug lines
    pub fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose }
    }

    /// Whether debug lines are printed
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a debug message to stderr, only in verbose mode
    pub fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "·".dimmed(), message.dimmed());
        }
    }

    /// Output text to stdout (the picked color)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}
