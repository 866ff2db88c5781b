//! Centralized UI formatting and color utilities
//!
//! The library itself never prints; these helpers are for the CLI wrapper.

use colored::{ColoredString, Colorize};

use crate::model::{PackageReference, TargetKind};

/// Environment variable that silences progress output.
pub const QUIET_ENV: &str = "SHARPGRAPH_QUIET";

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var(QUIET_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Icon for a target kind.
pub fn target_icon(kind: TargetKind) -> ColoredString {
    match kind {
        TargetKind::Solution => "◆".cyan(),
        TargetKind::Project => "◇".cyan(),
    }
}

/// A package reference, with pre-release versions highlighted.
pub fn reference(r: &PackageReference) -> String {
    match r.version() {
        Some(v) if r.is_prerelease() => format!("{} {}", r.name(), v.yellow()),
        Some(v) => format!("{} {}", r.name(), v.dimmed()),
        None => format!("{} {}", r.name(), "(no version)".dimmed()),
    }
}

/// Color scheme for status-related text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Cyan for identifiers (project paths, stages)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Common text formatting patterns
pub mod format {
    use std::time::Duration;

    /// Singular or plural noun for a count
    pub fn count(n: usize, noun: &str) -> String {
        if n == 1 {
            format!("1 {}", noun)
        } else {
            format!("{} {}s", n, noun)
        }
    }

    /// Format a duration as seconds with one decimal, or milliseconds
    pub fn elapsed(duration: Duration) -> String {
        let ms = duration.as_millis();
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
