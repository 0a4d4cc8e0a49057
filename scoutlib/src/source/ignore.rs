//! The ignore policy shared by every traversal.
//!
//! Directories holding VCS metadata, build output, dependency caches and
//! virtual environments are never looked at, nor is anything hidden behind a
//! leading dot. Lock files are skipped by name.

use std::path::{Component, Path};

/// Directory names excluded from all traversal.
pub const IGNORE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    ".next",
    "dist",
    "build",
    ".venv",
    "venv",
    "env",
    ".env",
    "coverage",
    ".nyc_output",
    ".pytest_cache",
    ".mypy_cache",
    "vendor",
    "target",
];

/// File names excluded from all traversal.
pub const IGNORE_FILES: &[&str] = &[
    ".DS_Store",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "poetry.lock",
    "composer.lock",
];

/// Check whether a single path component hides everything beneath it.
pub fn is_ignored_component(name: &str) -> bool {
    name.starts_with('.') || IGNORE_DIRS.contains(&name)
}

/// Decide whether a path is excluded from analysis.
///
/// Callers pass paths relative to the scan root, so that a root living
/// under a dot-directory (e.g. `~/.cache/project`) is still scanned.
pub fn should_ignore(path: &Path) -> bool {
    let ignored_component = path.components().any(|component| match component {
        Component::Normal(name) => is_ignored_component(&name.to_string_lossy()),
        _ => false,
    });
    if ignored_component {
        return true;
    }

    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| IGNORE_FILES.contains(&name))
}
