//! Lint: keep rendered buttons clickable.
//!
//! Every `[Label]`-style button drawn by a render module must have a click
//! target registered in the same file (`add_click_target` / `add_row_target`),
//! otherwise it works with the keyboard but not with taps on mobile.
//!
//! A second pass checks that every action ID constant declared in an
//! `actions.rs` is actually referenced somewhere else in the tree, so stale
//! IDs do not linger after a screen changes.

use std::fs;
use std::path::{Path, PathBuf};

/// A line renders bracket-button text when a string literal opens with
/// `" ["` (the shared button label shape). Array indexing like `chunks[0]`
/// does not match.
fn renders_bracket_button(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with("//") {
        return false;
    }
    line.contains("\" [") || line.contains("\"[")
}

fn registers_click_targets(source: &str) -> bool {
    source.contains("add_click_target(") || source.contains("add_row_target(")
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            out.push(path);
        }
    }
}

#[test]
fn bracket_buttons_are_registered_as_click_targets() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    rust_files(&src, &mut files);

    let mut violations = Vec::new();
    for path in files {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !(name == "render.rs" || name == "widgets.rs") {
            continue;
        }
        let Ok(source) = fs::read_to_string(&path) else {
            continue;
        };
        if registers_click_targets(&source) {
            continue;
        }
        for (i, line) in source.lines().enumerate() {
            if renders_bracket_button(line) {
                violations.push(format!("{}:{}: {}", path.display(), i + 1, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "bracket-button text rendered without any click registration in the same file:\n{}",
        violations.join("\n")
    );
}

#[test]
fn every_action_id_constant_is_referenced() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    rust_files(&src, &mut files);

    let mut constants = Vec::new();
    let mut other_sources = String::new();
    for path in &files {
        let Ok(source) = fs::read_to_string(path) else {
            continue;
        };
        if path.file_name().map(|n| n == "actions.rs").unwrap_or(false) {
            for line in source.lines() {
                if let Some(rest) = line.trim().strip_prefix("pub const ") {
                    if let Some(name) = rest.split(':').next() {
                        constants.push(name.trim().to_string());
                    }
                }
            }
        } else {
            other_sources.push_str(&source);
        }
    }

    assert!(!constants.is_empty(), "no action constants found under src/");

    let unused: Vec<_> = constants
        .iter()
        .filter(|name| !other_sources.contains(name.as_str()))
        .collect();
    assert!(
        unused.is_empty(),
        "action ID constants never referenced outside actions.rs: {unused:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_button_literals() {
        assert!(renders_bracket_button(r#"let prev_label = " [Prev] ";"#));
        assert!(renders_bracket_button(r#"let text = format!(" [{label}] ");"#));
    }

    #[test]
    fn ignores_indexing_and_comments() {
        assert!(!renders_bracket_button("render(f, chunks[0], &mut cs);"));
        assert!(!renders_bracket_button(r#"// " [Prev] " is drawn here"#));
    }
}
