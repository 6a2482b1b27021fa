//! Rendering primitives shared by the command handlers.
//!
//! Each command owns the shape of its table, plain, and structured
//! forms; this module keeps only what is format-agnostic: the color
//! decision, serde-backed JSON/YAML encoding, the tabled style, and
//! quiet-aware printing. A serde failure degrades to an error string in
//! the requested syntax rather than aborting the command.

use std::io::{self, IsTerminal, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::ColorMode;

/// Whether terminal colors apply under the given mode.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Rounded-border table over pre-shaped rows.
pub fn table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// JSON encoding; `compact` selects the single-line form.
pub fn json<T: serde::Serialize + ?Sized>(value: &T, compact: bool) -> String {
    let encoded = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    encoded.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

/// YAML encoding.
pub fn yaml<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_yaml::to_string(value).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}

/// Write rendered output to stdout unless quiet or empty.
pub fn print(out: &str, quiet: bool) {
    if quiet || out.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{out}");
}
