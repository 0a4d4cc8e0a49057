//! Data collection: classify files and collect results.
//!
//! This module handles the second stage of the pipeline - turning the
//! entries found by [`crate::source`] into results. It provides:
//!
//! - **Classification**: One [`Category`] per file, tests first
//! - **Survey**: Counts, key files, package descriptor and skeleton (`survey`)
//! - **Scanning**: Per-line definition/import/usage heuristics (`MatchRules`)
//! - **Search**: Tree-wide token search bucketed by kind (`search`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use scoutlib::data::{search, survey, SearchOptions, SurveyOptions};
//!
//! let overview = survey(".", SurveyOptions::new())?;
//! println!("{} files", overview.stats.total_files);
//!
//! let hits = search(".", "render", SearchOptions::new())?;
//! println!("{} definitions", hits.definitions.len());
//! ```

pub mod classify;
pub mod scanner;
pub mod search;
pub mod survey;

pub use classify::{classify, is_test_path, Category};
pub use scanner::{
    clip_line, scan_file, scan_file_as, FileContent, MatchKind, MatchRecord, MatchRules,
    MAX_LINE_CHARS,
};
pub use search::{search, SearchOptions, SearchResult};
pub use survey::{
    detect_package, is_key_file, survey, PackageInfo, Skeleton, SurveyOptions, SurveyResult,
    SurveyStats, MAX_ROOT_DIRS, MAX_SUBDIRS, PACKAGE_DESCRIPTORS,
};
