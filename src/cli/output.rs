//! Shared CLI output helpers.
//!
//! Status lines go to stdout, problems to stderr. Entry contents and
//! listings are written raw by their commands, never through here.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: entry names, hints
//! - Dimmed: secondary info

use std::fmt::Display;

use console::style;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark.
///
/// Example: `✓ added mail/work`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print the single-line error report to stderr.
///
/// Example: `error: entry 'x' not found.`
pub fn error(msg: &str) {
    let msg = msg.trim_end_matches('.');
    if colors_enabled() {
        eprintln!("{} {}.", style("error:").red().bold(), msg);
    } else {
        eprintln!("error: {}.", msg);
    }
}

/// Print a warning message to stderr.
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("⚠").yellow(), msg);
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// Print a hint message.
///
/// Example: `→ strongbox add mail/work`
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        println!("→ {}", msg);
    }
}

/// Print a key-value pair (label dimmed, value bold).
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Format an entry name in cyan.
pub fn name(n: &str) -> String {
    if colors_enabled() {
        style(n).cyan().to_string()
    } else {
        n.to_string()
    }
}

/// Print a dimmed/secondary message.
///
/// Example: `no entries stored`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}
