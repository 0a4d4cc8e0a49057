//! File filtering by extension and glob pattern.
//!
//! The ignore policy decides what is never looked at; this module narrows
//! what remains to the files a caller asked for.

use std::path::Path;

use glob::Pattern;

use crate::error::ScoutError;
use crate::Result;

/// Normalize an extension to its lower-cased, leading-dot form.
///
/// `"TS"`, `"ts"` and `".ts"` all become `".ts"`. Empty input stays empty.
pub fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(".{}", trimmed.to_lowercase())
    }
}

/// Lower-cased extension of a path including the leading dot, or an empty
/// string for extensionless files.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Render a relative path with `/` separators regardless of platform.
pub fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Allowed extensions in normalized form (if empty, allow all)
    pub extensions: Vec<String>,
    /// Glob patterns to exclude, matched against root-relative paths
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (allows every file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given extensions. Each is normalized; blanks are dropped.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let normalized = normalize_extension(ext.as_ref());
            if !normalized.is_empty() && !self.extensions.contains(&normalized) {
                self.extensions.push(normalized);
            }
        }
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| ScoutError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check whether the extension filter admits this path.
    pub fn allows_extension(&self, path: &Path) -> bool {
        self.extensions.is_empty() || self.extensions.contains(&extension_of(path))
    }

    /// Check whether a relative path is excluded by a glob pattern.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let path_str = display_path(relative);
        self.exclude.iter().any(|pattern| pattern.matches(&path_str))
    }
}
