//! Output formatting: present results as digests.
//!
//! This module handles the final stage of the pipeline - turning survey and
//! search results into bounded, human-readable markdown. It provides:
//!
//! - **SurveyDigest**: Overview, category and extension rankings, skeleton, key files
//! - **SearchDigest**: Matches per kind, sorted by file and capped
//!
//! Digests are a pure presentation layer. All ordering and truncation is
//! decided when a digest is built; results themselves are never modified.
//!
//! ## Example
//!
//! ```rust,ignore
//! use scoutlib::output::SearchDigest;
//!
//! let digest = SearchDigest::from_search(&result, "render");
//! println!("{}", digest);
//! ```

pub mod digest;

pub use digest::{
    display_cap, search_digest, survey_digest, CountRow, DirRow, MatchLine, MatchSection,
    SearchDigest, SurveyDigest, DISPLAY_LINE_CHARS, SUBDIRS_SHOWN, TOP_EXTENSIONS,
};
