//! Colored diagnostics and cargo-style status output. Colors are
//! decided once from `--color`/`CABIN_TERM_COLOR` and threaded through
//! as a plain enum rather than a global mutable static.

use std::fmt;
use std::io::IsTerminal;

use anstream::eprintln;
use anstyle::{AnsiColor, Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// `--color` wins; otherwise `CABIN_TERM_COLOR`; otherwise `auto`.
    pub fn resolve(flag: Option<&str>) -> Self {
        if let Some(flag) = flag.and_then(Self::parse) {
            return flag;
        }
        std::env::var("CABIN_TERM_COLOR")
            .ok()
            .and_then(|v| Self::parse(&v))
            .unwrap_or(ColorMode::Auto)
    }

    fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => anstream::stderr().is_terminal(),
        }
    }
}

fn paint(mode: ColorMode, style: Style, text: &str) -> String {
    if mode.enabled() {
        format!("{style}{text}{style:#}")
    } else {
        text.to_string()
    }
}

const RED_BOLD: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold();
const YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const GREEN_BOLD: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold();

/// Prints a red `Error: ...` line, then a yellow `Caused by: ...` line
/// for every link in the error's `source()` chain.
pub fn report_error(mode: ColorMode, err: &anyhow::Error) {
    eprintln!("{} {err}", paint(mode, RED_BOLD, "Error:"));
    let mut cause = err.source();
    while let Some(source) = cause {
        eprintln!("{} {source}", paint(mode, YELLOW, "Caused by:"));
        cause = source.source();
    }
}

/// Suggestion line appended after an unknown-argument error.
pub fn tip(mode: ColorMode, candidate: &str) {
    eprintln!("{} did you mean '{candidate}'?", paint(mode, YELLOW, "Tip:"));
}

/// A cargo-style right-aligned status header, e.g. `   Compiling` or
/// `    Finished`, padded so the verb column lines up regardless of
/// the verb's length.
fn status(mode: ColorMode, verb: &str, message: impl fmt::Display) {
    let padded = format!("{verb:>12}");
    eprintln!("{} {message}", paint(mode, GREEN_BOLD, &padded));
}

pub fn compiling(mode: ColorMode, pkg_name: &str, version: &str, root: &std::path::Path) {
    status(mode, "Compiling", format!("{pkg_name} v{version} ({})", root.display()));
}

pub fn finished(mode: ColorMode, profile_label: &str, qualifiers: &str, elapsed_secs: f64) {
    status(
        mode,
        "Finished",
        format!("`{profile_label}` profile [{qualifiers}] target(s) in {elapsed_secs:.2}s"),
    );
}

pub fn created(mode: ColorMode, kind: &str, name: &str) {
    status(mode, "Created", format!("{kind} `{name}` package"));
}

pub fn removed(mode: ColorMode, names: &[String], path: &std::path::Path) {
    status(mode, "Removed", format!("{} from {}", names.join(", "), path.display()));
}

pub fn added(mode: ColorMode, names: &[String], path: &std::path::Path) {
    status(mode, "Added", format!("{} to {}", names.join(", "), path.display()));
}

pub fn warning(mode: ColorMode, message: impl fmt::Display) {
    eprintln!("{} {message}", paint(mode, YELLOW, "Warning:"));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn color_mode_resolves_env_fallback() {
        assert_eq!(ColorMode::resolve(Some("always")), ColorMode::Always);
        assert_eq!(ColorMode::resolve(None), ColorMode::Auto);
    }
}
