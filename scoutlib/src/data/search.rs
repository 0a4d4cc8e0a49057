//! Pattern search across a tree.
//!
//! Walks every eligible file, scans it for the token, and files each match
//! under its kind. The buckets keep discovery order, which is stable because
//! the walker visits entries in sorted order; presentation sorting and caps
//! belong to the digest layer and never touch the buckets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::source::filter::{display_path, FilterConfig};
use crate::source::walker::{resolve_root, TreeWalker};
use crate::Result;

use super::scanner::{scan_file_as, MatchKind, MatchRecord, MatchRules};

/// Options for searching a tree.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Extension allow-list and glob excludes
    pub filter: FilterConfig,
}

impl SearchOptions {
    /// Create new default options (all extensions, no excludes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the search to these extensions (`"ts"`, `".py"`, ...).
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter = self.filter.extensions(extensions);
        self
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}

/// Matches of one search, bucketed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "definition")]
    pub definitions: Vec<MatchRecord>,
    #[serde(rename = "import")]
    pub imports: Vec<MatchRecord>,
    #[serde(rename = "usage")]
    pub usages: Vec<MatchRecord>,
}

impl SearchResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of one kind, in discovery order.
    pub fn bucket(&self, kind: MatchKind) -> &[MatchRecord] {
        match kind {
            MatchKind::Definition => &self.definitions,
            MatchKind::Import => &self.imports,
            MatchKind::Usage => &self.usages,
        }
    }

    /// File a record under its kind.
    pub fn push(&mut self, record: MatchRecord) {
        let bucket = match record.match_type {
            MatchKind::Definition => &mut self.definitions,
            MatchKind::Import => &mut self.imports,
            MatchKind::Usage => &mut self.usages,
        };
        bucket.push(record);
    }

    /// Records of one kind ordered by file path. The sort is stable, so
    /// records from the same file stay in line order.
    pub fn sorted(&self, kind: MatchKind) -> Vec<&MatchRecord> {
        let mut records: Vec<&MatchRecord> = self.bucket(kind).iter().collect();
        records.sort_by(|a, b| a.file.cmp(&b.file));
        records
    }

    /// Total number of matches across all kinds.
    pub fn total(&self) -> usize {
        self.definitions.len() + self.imports.len() + self.usages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Extend<MatchRecord> for SearchResult {
    fn extend<I: IntoIterator<Item = MatchRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

/// Search the tree rooted at `path` for `token`.
///
/// Fails when the token is blank or the root does not exist; files that
/// cannot be read simply contribute nothing. A root that is a single file
/// is searched on its own.
///
/// # Example
///
/// ```rust,ignore
/// use scoutlib::{search, SearchOptions};
///
/// let result = search(".", "render", SearchOptions::new().extensions(["ts", "tsx"]))?;
/// for def in result.sorted(scoutlib::MatchKind::Definition) {
///     println!("{}:{}", def.file, def.line_num);
/// }
/// ```
pub fn search(
    path: impl AsRef<Path>,
    token: &str,
    options: SearchOptions,
) -> Result<SearchResult> {
    let rules = MatchRules::new(token)?;
    let root = resolve_root(path.as_ref())?;
    let filter = &options.filter;
    debug!(root = %root.display(), token, "searching");

    let mut result = SearchResult::new();

    if root.is_file() {
        let label = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string_lossy().into_owned());
        result.extend(scan_file_as(&root, &label, &rules, filter));
        return Ok(result);
    }

    let mut files_scanned = 0usize;
    for entry in TreeWalker::new(&root).walk() {
        if !entry.is_file() || filter.is_excluded(&entry.relative) {
            continue;
        }
        files_scanned += 1;
        let label = display_path(&entry.relative);
        result.extend(scan_file_as(&entry.path, &label, &rules, filter));
    }

    debug!(files_scanned, matches = result.total(), "search complete");

    Ok(result)
}
