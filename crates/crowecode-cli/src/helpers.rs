//! Shared CLI helpers — path expansion, output printing, banner.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crowecode_core::types::AnalysisReport;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Guess a fence language tag from a file extension.
pub fn language_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("rs") => "rust",
        Some("py") => "python",
        Some("ts") | Some("tsx") => "typescript",
        Some("js") | Some("jsx") | Some("mjs") => "javascript",
        Some("go") => "go",
        Some("java") => "java",
        Some("c") | Some("h") => "c",
        Some("cc") | Some("cpp") | Some("hpp") => "cpp",
        Some("rb") => "ruby",
        Some("sh") => "bash",
        Some("sql") => "sql",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("yaml") | Some("yml") => "yaml",
        _ => "text",
    }
}

/// Print a chat reply to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "◆ CroweCode".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print an analysis report section by section, skipping empty ones.
pub fn print_report(report: &AnalysisReport) {
    println!();
    println!("{}", "◆ CroweCode Analysis".cyan().bold());

    let sections = [
        ("Completion", &report.completion),
        ("Refactoring", &report.refactoring),
        ("Optimization", &report.optimization),
        ("Documentation", &report.documentation),
    ];
    for (title, body) in sections {
        if !body.is_empty() {
            println!();
            println!("{}", title.bold());
            println!("{body}");
        }
    }

    if !report.fixes.is_empty() {
        println!();
        println!("{}", "Fixes".bold());
        for (i, fix) in report.fixes.iter().enumerate() {
            println!(
                "  {}. {} {}",
                i + 1,
                fix.title,
                format!("({:.0}%)", fix.confidence * 100.0).dimmed()
            );
            if !fix.description.is_empty() {
                println!("     {}", fix.description);
            }
        }
    }
    println!();
}

/// Print the banner shown when the server starts.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "◆ CroweCode Intelligence".cyan().bold(), version.dimmed());
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_home() {
        let result = expand_tilde("~/foo/bar");
        assert!(result.ends_with("foo/bar"));
        assert!(!result.starts_with("~"));
    }

    #[test]
    fn expand_tilde_no_tilde() {
        let result = expand_tilde("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn expand_tilde_relative() {
        let result = expand_tilde("relative/path");
        assert_eq!(result, PathBuf::from("relative/path"));
    }

    #[test]
    fn language_from_extension() {
        assert_eq!(language_for_path(Path::new("src/main.rs")), "rust");
        assert_eq!(language_for_path(Path::new("app/Page.TSX")), "typescript");
        assert_eq!(language_for_path(Path::new("Makefile")), "text");
    }
}
