//! Line scanning and match classification.
//!
//! Every line that contains the search token (case-insensitively) becomes a
//! [`MatchRecord`]. Its kind comes from an ordered list of regex rules:
//! definition signatures first, then import signatures, falling back to
//! usage. This is a line heuristic, not a parser; misclassifications are
//! expected.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ScoutError;
use crate::source::filter::FilterConfig;
use crate::Result;

/// Maximum characters of line text kept in a record.
pub const MAX_LINE_CHARS: usize = 200;

/// How many leading bytes are inspected for NUL when sniffing binaries.
const BINARY_SNIFF_LEN: usize = 8192;

/// Definition signatures. `{T}` is replaced with the escaped token.
const DEFINITION_PATTERNS: &[&str] = &[
    r"function\s+{T}\s*\(",
    r"(const|let|var)\s+{T}\s*=",
    r"class\s+{T}",
    r"interface\s+{T}",
    r"type\s+{T}\s*=",
    r"def\s+{T}\s*\(",
    r"async\s+def\s+{T}\s*\(",
    r"\bfn\s+{T}\s*[(<]",
    r"\b(struct|enum|trait)\s+{T}",
    r"\bfunc\s+(\([^)]*\)\s*)?{T}\s*[(\[]",
];

/// Import signatures. `{T}` is replaced with the escaped token.
const IMPORT_PATTERNS: &[&str] = &[
    r"import.*{T}.*from",
    r"from\s+\S+\s+import.*{T}",
    r#"require\(['"].*{T}"#,
    r"^\s*(pub(\([^)]*\))?\s+)?use\s+[\w:{}, *]*{T}[\w:{}, *]*;",
];

/// How a matching line uses the token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Definition,
    Import,
    Usage,
}

impl MatchKind {
    /// Kinds in presentation order.
    pub const ALL: [MatchKind; 3] = [MatchKind::Definition, MatchKind::Import, MatchKind::Usage];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Definition => "definition",
            MatchKind::Import => "import",
            MatchKind::Usage => "usage",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located occurrence of the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// File path relative to the scan root, `/`-separated
    pub file: String,
    /// 1-based line number
    pub line_num: usize,
    /// Trimmed line text, at most [`MAX_LINE_CHARS`] characters
    pub line: String,
    pub match_type: MatchKind,
}

/// Outcome of reading a file for scanning.
///
/// Anything other than `Text` scans as "no matches".
#[derive(Debug)]
pub enum FileContent {
    Text(String),
    Binary,
    Unreadable(io::Error),
}

impl FileContent {
    /// Read a file permissively: invalid UTF-8 is replaced, never an error.
    pub fn read(path: &Path) -> Self {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => return FileContent::Unreadable(err),
        };

        let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
        if sniff.contains(&0) {
            return FileContent::Binary;
        }

        let text = String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).into_owned());
        FileContent::Text(text)
    }
}

/// Compiled classification rules for one search token.
#[derive(Debug, Clone)]
pub struct MatchRules {
    token: String,
    token_lower: String,
    rules: Vec<(Regex, MatchKind)>,
}

impl MatchRules {
    /// Compile the rule list for `token`.
    ///
    /// Empty and whitespace-only tokens are rejected: they would match every
    /// line of every file.
    pub fn new(token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(ScoutError::EmptyToken);
        }

        let escaped = regex::escape(token);
        let definitions = DEFINITION_PATTERNS
            .iter()
            .map(|p| (p, MatchKind::Definition));
        let imports = IMPORT_PATTERNS.iter().map(|p| (p, MatchKind::Import));

        let rules = definitions
            .chain(imports)
            .map(|(pattern, kind)| {
                let source = pattern.replace("{T}", &escaped);
                RegexBuilder::new(&source)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, kind))
                    .map_err(|e| ScoutError::InvalidPattern {
                        pattern: token.to_string(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            token: token.to_string(),
            token_lower: token.to_lowercase(),
            rules,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether a line contains the token, ignoring case.
    pub fn matches(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.token_lower)
    }

    /// Kind of a line already known to contain the token. First rule wins.
    pub fn classify_line(&self, line: &str) -> MatchKind {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(line))
            .map(|(_, kind)| *kind)
            .unwrap_or(MatchKind::Usage)
    }

    /// Scan text content, labelling records with `file`.
    pub fn scan_text(&self, file: &str, content: &str) -> Vec<MatchRecord> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| self.matches(line))
            .map(|(idx, line)| MatchRecord {
                file: file.to_string(),
                line_num: idx + 1,
                line: clip_line(line),
                match_type: self.classify_line(line),
            })
            .collect()
    }
}

/// Trim a line and cap it at [`MAX_LINE_CHARS`] characters.
pub fn clip_line(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= MAX_LINE_CHARS {
        return trimmed.to_string();
    }
    let clipped: String = trimmed.chars().take(MAX_LINE_CHARS).collect();
    clipped.trim_end().to_string()
}

/// Scan one file, labelling records with its path as given.
///
/// Files rejected by the extension filter are not read. Unreadable and
/// binary files produce no records.
pub fn scan_file(path: &Path, rules: &MatchRules, filter: &FilterConfig) -> Vec<MatchRecord> {
    scan_file_as(path, &path.to_string_lossy(), rules, filter)
}

/// Scan one file, labelling records with `label` (usually a root-relative path).
pub fn scan_file_as(
    path: &Path,
    label: &str,
    rules: &MatchRules,
    filter: &FilterConfig,
) -> Vec<MatchRecord> {
    if !filter.allows_extension(path) {
        return Vec::new();
    }

    match FileContent::read(path) {
        FileContent::Text(text) => {
            trace!(file = label, "scanning");
            rules.scan_text(label, &text)
        }
        FileContent::Binary => {
            debug!(file = label, "skipping binary file");
            Vec::new()
        }
        FileContent::Unreadable(err) => {
            debug!(file = label, error = %err, "skipping unreadable file");
            Vec::new()
        }
    }
}
