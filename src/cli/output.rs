//! Colored output helpers for CLI subcommands.
//!
//! Only used outside the TUI (init, config); once the UI is running all
//! feedback goes through the status line instead.

use owo_colors::OwoColorize;

/// Output style configuration.
pub struct Output {
    /// Whether to use colored output.
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled.
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled.
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the askdocs banner.
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n{} {}\n",
                "askdocs".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\naskdocs v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("{} {}", "✓".green().bold(), message);
        } else {
            println!("[ok] {}", message);
        }
    }

    /// Print an informational message.
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("{} {}", "·".cyan(), message);
        } else {
            println!("[..] {}", message);
        }
    }

    /// Print a warning message.
    pub fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "!".yellow().bold(), message);
        } else {
            eprintln!("[warn] {}", message);
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "✗".red().bold(), message);
        } else {
            eprintln!("[error] {}", message);
        }
    }
}
