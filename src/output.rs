//! User-facing status messages on stderr
//!
//! Download notices and fatal errors go to stderr so that stdout carries
//! nothing but the search report, which keeps `atk -s foo > out.txt` clean.

use crossterm::tty::IsTty;
use owo_colors::OwoColorize;

/// Whether stdout should get ANSI colors
///
/// Disabled by `--plain`, by a non-empty `NO_COLOR`, or when stdout is not a terminal.
pub fn colors_enabled(plain: bool) -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    !plain && !no_color && std::io::stdout().is_tty()
}

/// Whether a progress bar on stderr would be visible to someone
pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_tty()
}

/// Print a yellow notice for input that was accepted but has no effect
pub fn warn(message: &str) {
    eprintln!("\n{}\n", message.yellow());
}

/// Print a red error, padded by blank lines
///
/// ```ignore
/// output::error("Error: failed to retrieve dataset from attack.json");
/// ```
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}

/// Print a plain notice such as "File attack.json not found. Downloading."
pub fn info(message: &str) {
    eprintln!("{}", message);
}
