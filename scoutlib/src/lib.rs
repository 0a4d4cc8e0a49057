//! # scoutlib
//!
//! Fast orientation inside an unfamiliar source tree: a structural survey
//! and a heuristic definition/import/usage search.
//!
//! ## Overview
//!
//! The library is organized as a small pipeline:
//!
//! 1. **Source** ([`source`]): ignore policy, extension/glob filters, sorted traversal
//! 2. **Data** ([`data`]): file classification, surveys, line scanning, search
//! 3. **Output** ([`output`]): bounded markdown digests of the results
//!
//! A survey classifies every file into exactly one [`Category`]
//! (`test`, `source`, `config`, `style`, `markup`, `docs`, `other`), counts
//! files per category and extension, picks out key files and the package
//! descriptor, and records a two-level directory skeleton.
//!
//! A search finds every line containing a literal token and labels it a
//! definition, an import or a usage using ordered regex rules. It is a
//! line heuristic, not a parser: no ASTs, no symbol resolution.
//!
//! Directories such as `.git`, `node_modules` and `target`, anything hidden
//! behind a leading dot, and lock files are never looked at.
//!
//! ## Example
//!
//! ```rust
//! use scoutlib::{search, survey, Category, SearchOptions, SurveyOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("src")).unwrap();
//! fs::write(dir.path().join("src/app.ts"), "export function render() {}\n").unwrap();
//! fs::write(dir.path().join("src/app.test.ts"), "render()\n").unwrap();
//! fs::write(dir.path().join("README.md"), "# App\n").unwrap();
//!
//! let overview = survey(dir.path(), SurveyOptions::new()).unwrap();
//! assert_eq!(overview.stats.total_files, 3);
//! assert_eq!(overview.stats.category_count(Category::Test), 1);
//!
//! let hits = search(dir.path(), "render", SearchOptions::new()).unwrap();
//! assert_eq!(hits.definitions[0].file, "src/app.ts");
//! assert_eq!(hits.usages[0].file, "src/app.test.ts");
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod source;

pub use data::{
    classify, scan_file, search, survey, Category, MatchKind, MatchRecord, MatchRules,
    PackageInfo, SearchOptions, SearchResult, Skeleton, SurveyOptions, SurveyResult, SurveyStats,
};
pub use error::ScoutError;
pub use output::{search_digest, survey_digest, SearchDigest, SurveyDigest};
pub use source::{should_ignore, FilterConfig};

/// Result type for scoutlib operations
pub type Result<T> = std::result::Result<T, ScoutError>;
