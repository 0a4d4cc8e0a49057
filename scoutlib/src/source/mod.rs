//! Source discovery: find files to analyze.
//!
//! This module handles the first stage of the pipeline - deciding which
//! entries of a tree are looked at. It provides:
//!
//! - **Ignore policy**: VCS metadata, build output, caches, hidden entries, lock files
//! - **File filtering**: Extension allow-lists and glob excludes
//! - **Walking**: Sorted, ignore-aware traversal
//!
//! ## Example
//!
//! ```rust,ignore
//! use scoutlib::source::{FilterConfig, TreeWalker};
//!
//! let filter = FilterConfig::new().extensions(["ts", "tsx"]);
//! for entry in TreeWalker::new("/path/to/repo").walk() {
//!     if entry.is_file() && filter.allows_extension(&entry.relative) {
//!         println!("{}", entry.relative.display());
//!     }
//! }
//! ```

pub mod filter;
pub mod ignore;
pub mod walker;

pub use filter::{display_path, extension_of, normalize_extension, FilterConfig};
pub use ignore::{should_ignore, IGNORE_DIRS, IGNORE_FILES};
pub use walker::{resolve_root, EntryKind, FileEntry, TreeWalker};
