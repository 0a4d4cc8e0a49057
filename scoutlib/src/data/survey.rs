//! Structural survey of a source tree.
//!
//! A survey walks the tree once and reports how many files of each kind
//! it holds, which files identify the project, and a shallow directory
//! skeleton. The skeleton and key files are sorted before they are capped,
//! so the same tree always produces the same survey.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::source::filter::{display_path, FilterConfig};
use crate::source::walker::{resolve_root, FileEntry, TreeWalker};
use crate::Result;

use super::classify::{classify, Category};

/// Maximum number of root-level directories in the skeleton.
pub const MAX_ROOT_DIRS: usize = 20;
/// Maximum number of subdirectories listed under each root-level directory.
pub const MAX_SUBDIRS: usize = 15;

/// Package descriptors probed at the root, in priority order, with the
/// ecosystem each one implies.
pub const PACKAGE_DESCRIPTORS: &[(&str, &str)] = &[
    ("package.json", "node"),
    ("Cargo.toml", "rust"),
    ("pyproject.toml", "python"),
    ("requirements.txt", "python"),
    ("go.mod", "go"),
    ("composer.json", "php"),
];

const README_NAMES: &[&str] = &["readme.md", "readme.txt", "readme"];
const INSTRUCTION_NAMES: &[&str] = &["claude.md", ".claude.md"];
const CONFIG_SUFFIXES: &[&str] = &["config.ts", "config.js"];

/// Options for surveying a tree.
#[derive(Debug, Clone, Default)]
pub struct SurveyOptions {
    /// File filter; only its glob excludes apply to a survey
    pub filter: FilterConfig,
}

impl SurveyOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}

/// File and directory tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyStats {
    pub total_files: usize,
    pub total_dirs: usize,
    /// File count per category; categories with no files are absent
    pub by_category: BTreeMap<Category, usize>,
    /// File count per lower-cased extension, `""` for extensionless files
    pub by_extension: BTreeMap<String, usize>,
}

impl SurveyStats {
    /// Number of files in a category.
    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    /// Number of files with an extension (normalized form, e.g. `".rs"`).
    pub fn extension_count(&self, extension: &str) -> usize {
        self.by_extension.get(extension).copied().unwrap_or(0)
    }

    fn add_file(&mut self, category: Category, extension: &str) {
        self.total_files += 1;
        *self.by_category.entry(category).or_insert(0) += 1;
        *self.by_extension.entry(extension.to_string()).or_insert(0) += 1;
    }
}

/// Two-level directory skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skeleton {
    /// Root-level directory names, sorted, at most [`MAX_ROOT_DIRS`]
    pub root_dirs: Vec<String>,
    /// Immediate subdirectory names of each listed root directory,
    /// sorted, at most [`MAX_SUBDIRS`] each
    pub second_level: BTreeMap<String, Vec<String>>,
}

impl Skeleton {
    /// Build a skeleton from unsorted root-level names and
    /// `(parent, child)` pairs one level down.
    pub fn build(mut root_dirs: Vec<String>, subdirs: Vec<(String, String)>) -> Self {
        root_dirs.sort();
        root_dirs.dedup();
        root_dirs.truncate(MAX_ROOT_DIRS);

        let mut second_level: BTreeMap<String, Vec<String>> = root_dirs
            .iter()
            .map(|dir| (dir.clone(), Vec::new()))
            .collect();

        for (parent, child) in subdirs {
            if let Some(children) = second_level.get_mut(&parent) {
                children.push(child);
            }
        }

        for children in second_level.values_mut() {
            children.sort();
            children.dedup();
            children.truncate(MAX_SUBDIRS);
        }

        Self {
            root_dirs,
            second_level,
        }
    }

    /// Subdirectories recorded for a root-level directory.
    pub fn subdirs(&self, root_dir: &str) -> &[String] {
        self.second_level
            .get(root_dir)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The project descriptor found at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Descriptor file name, e.g. `Cargo.toml`
    #[serde(rename = "type")]
    pub kind: String,
    /// Path relative to the root
    pub path: String,
    /// Ecosystem implied by the descriptor, e.g. `rust`
    pub ecosystem: String,
}

/// Result of surveying a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResult {
    /// Canonical absolute root
    pub root: PathBuf,
    pub stats: SurveyStats,
    pub structure: Skeleton,
    /// Project-identifying files at depth <= 1, package descriptor first
    pub key_files: Vec<String>,
    pub package_info: Option<PackageInfo>,
}

/// Survey the tree rooted at `path`.
///
/// Fails only when the root does not exist. Entries that cannot be read
/// during the walk are skipped.
///
/// # Example
///
/// ```rust,ignore
/// use scoutlib::{survey, SurveyOptions};
///
/// let result = survey(".", SurveyOptions::new())?;
/// println!("{} files in {} directories", result.stats.total_files, result.stats.total_dirs);
/// ```
pub fn survey(path: impl AsRef<Path>, options: SurveyOptions) -> Result<SurveyResult> {
    let root = resolve_root(path.as_ref())?;
    debug!(root = %root.display(), "surveying");

    let mut key_files = Vec::new();
    let package_info = detect_package(&root);
    if let Some(info) = &package_info {
        key_files.push(info.path.clone());
    }

    let mut stats = SurveyStats::default();
    let mut root_dirs = Vec::new();
    let mut subdirs = Vec::new();

    for entry in TreeWalker::new(&root).walk() {
        if entry.is_dir() {
            stats.total_dirs += 1;
            record_dir(&entry, &mut root_dirs, &mut subdirs);
            continue;
        }

        if options.filter.is_excluded(&entry.relative) {
            continue;
        }

        stats.add_file(classify(&entry.relative), &entry.extension);

        if entry.depth <= 1 && is_key_file(&entry.file_name()) {
            let rel = display_path(&entry.relative);
            if !key_files.contains(&rel) {
                key_files.push(rel);
            }
        }
    }

    debug!(
        files = stats.total_files,
        dirs = stats.total_dirs,
        "survey complete"
    );

    Ok(SurveyResult {
        root,
        stats,
        structure: Skeleton::build(root_dirs, subdirs),
        key_files,
        package_info,
    })
}

/// Probe the root for the first known package descriptor.
pub fn detect_package(root: &Path) -> Option<PackageInfo> {
    PACKAGE_DESCRIPTORS
        .iter()
        .find(|(name, _)| root.join(name).is_file())
        .map(|(name, ecosystem)| PackageInfo {
            kind: name.to_string(),
            path: name.to_string(),
            ecosystem: ecosystem.to_string(),
        })
}

/// Whether a shallow file name marks a project-identifying file.
pub fn is_key_file(name: &str) -> bool {
    let name = name.to_lowercase();
    README_NAMES.contains(&name.as_str())
        || INSTRUCTION_NAMES.contains(&name.as_str())
        || name.starts_with("config")
        || CONFIG_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

fn record_dir(
    entry: &FileEntry,
    root_dirs: &mut Vec<String>,
    subdirs: &mut Vec<(String, String)>,
) {
    match entry.depth {
        0 => root_dirs.push(entry.file_name()),
        1 => {
            let parent = entry
                .relative
                .components()
                .next()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .unwrap_or_default();
            subdirs.push((parent, entry.file_name()));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_survey_nonexistent_root() {
        let result = survey("/nonexistent/path/for/survey", SurveyOptions::new());

        assert!(matches!(result, Err(ScoutError::PathNotFound(_))));
    }

    #[test]
    fn test_survey_end_to_end() {
        let temp = tempdir().unwrap();
        write(temp.path(), "src/app.ts", "export function render() {}\n");
        write(temp.path(), "src/app.test.ts", "render()\n");
        write(temp.path(), "README.md", "# App\n");

        let result = survey(temp.path(), SurveyOptions::new()).unwrap();

        assert_eq!(result.stats.total_files, 3);
        assert_eq!(result.stats.total_dirs, 1);
        assert_eq!(result.stats.category_count(Category::Source), 1);
        assert_eq!(result.stats.category_count(Category::Test), 1);
        assert_eq!(result.stats.category_count(Category::Docs), 1);
        assert_eq!(result.stats.by_category.len(), 3);
        assert_eq!(result.stats.extension_count(".ts"), 2);
        assert_eq!(result.stats.extension_count(".md"), 1);
        assert!(result.key_files.contains(&"README.md".to_string()));
        assert!(result.package_info.is_none());
        assert_eq!(result.structure.root_dirs, vec!["src"]);
        assert!(result.root.is_absolute());
    }

    #[test]
    fn test_survey_ignores_and_counts_add_up() {
        let temp = tempdir().unwrap();
        write(temp.path(), "src/lib.rs", "");
        write(temp.path(), "src/style.css", "");
        write(temp.path(), "index.html", "");
        write(temp.path(), "Makefile", "");
        write(temp.path(), "tests/it.rs", "");
        // Ignorable entries
        write(temp.path(), "target/debug/out.rs", "");
        write(temp.path(), "node_modules/pkg/index.js", "");
        write(temp.path(), ".github/workflows/ci.yml", "");
        write(temp.path(), "Cargo.lock", "");
        write(temp.path(), "src/.DS_Store", "");

        let result = survey(temp.path(), SurveyOptions::new()).unwrap();

        assert_eq!(result.stats.total_files, 5);
        assert_eq!(result.stats.total_dirs, 2);
        let category_sum: usize = result.stats.by_category.values().sum();
        let extension_sum: usize = result.stats.by_extension.values().sum();
        assert_eq!(category_sum, 5);
        assert_eq!(extension_sum, 5);
        assert_eq!(result.stats.extension_count(""), 1);
        assert_eq!(result.stats.category_count(Category::Other), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_survey_skips_unreadable_entries() {
        let temp = tempdir().unwrap();
        write(temp.path(), "src/app.ts", "");
        std::os::unix::fs::symlink(temp.path().join("missing.ts"), temp.path().join("src/dead.ts"))
            .unwrap();
        let _ = std::process::Command::new("mkfifo")
            .arg(temp.path().join("src/queue.ts"))
            .status();

        let result = survey(temp.path(), SurveyOptions::new()).unwrap();

        assert_eq!(result.stats.total_files, 1);
        assert_eq!(result.stats.extension_count(".ts"), 1);
        assert_eq!(result.stats.total_dirs, 1);
    }

    #[test]
    fn test_survey_detects_first_package_descriptor() {
        let temp = tempdir().unwrap();
        write(temp.path(), "pyproject.toml", "[project]\n");
        write(temp.path(), "Cargo.toml", "[package]\n");
        write(temp.path(), "requirements.txt", "");

        let result = survey(temp.path(), SurveyOptions::new()).unwrap();
        let info = result.package_info.unwrap();

        assert_eq!(info.kind, "Cargo.toml");
        assert_eq!(info.path, "Cargo.toml");
        assert_eq!(info.ecosystem, "rust");
        assert_eq!(result.key_files[0], "Cargo.toml");
    }

    #[test]
    fn test_survey_key_files_are_shallow() {
        let temp = tempdir().unwrap();
        write(temp.path(), "readme", "");
        write(temp.path(), "CLAUDE.md", "");
        write(temp.path(), "config.yaml", "");
        write(temp.path(), "web/vite.config.ts", "");
        write(temp.path(), "web/README.md", "");
        write(temp.path(), "web/deep/README.md", "");
        write(temp.path(), "notes.md", "");

        let result = survey(temp.path(), SurveyOptions::new()).unwrap();

        assert_eq!(
            result.key_files,
            vec![
                "CLAUDE.md",
                "config.yaml",
                "readme",
                "web/README.md",
                "web/vite.config.ts",
            ]
        );
    }

    #[test]
    fn test_skeleton_is_sorted_and_capped() {
        let temp = tempdir().unwrap();
        for i in 0..25 {
            fs::create_dir_all(temp.path().join(format!("dir{:02}", 24 - i))).unwrap();
        }
        for i in 0..18 {
            fs::create_dir_all(temp.path().join(format!("dir00/sub{:02}", 17 - i))).unwrap();
        }

        let first = survey(temp.path(), SurveyOptions::new()).unwrap();
        let second = survey(temp.path(), SurveyOptions::new()).unwrap();

        let skeleton = &first.structure;
        assert_eq!(skeleton.root_dirs.len(), MAX_ROOT_DIRS);
        assert_eq!(skeleton.root_dirs[0], "dir00");
        assert_eq!(skeleton.root_dirs[19], "dir19");
        let subs = skeleton.subdirs("dir00");
        assert_eq!(subs.len(), MAX_SUBDIRS);
        assert_eq!(subs[0], "sub00");
        assert_eq!(subs[14], "sub14");
        assert!(skeleton.subdirs("dir24").is_empty());
        assert_eq!(first.stats.total_dirs, 25 + 18);
        assert_eq!(first, second);
    }

    #[test]
    fn test_skeleton_build_from_unsorted_input() {
        let skeleton = Skeleton::build(
            vec!["web".into(), "api".into()],
            vec![
                ("web".into(), "src".into()),
                ("web".into(), "public".into()),
                ("orphan".into(), "x".into()),
            ],
        );

        assert_eq!(skeleton.root_dirs, vec!["api", "web"]);
        assert_eq!(skeleton.subdirs("web"), ["public", "src"]);
        assert!(skeleton.subdirs("api").is_empty());
        assert!(!skeleton.second_level.contains_key("orphan"));
    }

    #[test]
    fn test_survey_exclude_globs() {
        let temp = tempdir().unwrap();
        write(temp.path(), "src/app.ts", "");
        write(temp.path(), "generated/api.ts", "");

        let filter = FilterConfig::new().exclude("generated/**").unwrap();
        let result = survey(temp.path(), SurveyOptions::new().filter(filter)).unwrap();

        assert_eq!(result.stats.total_files, 1);
        assert_eq!(result.stats.total_dirs, 2);
    }

    #[test]
    fn test_is_key_file() {
        assert!(is_key_file("README.md"));
        assert!(is_key_file("Readme"));
        assert!(is_key_file("claude.md"));
        assert!(is_key_file("configuration.toml"));
        assert!(is_key_file("next.config.js"));
        assert!(!is_key_file("README.rst"));
        assert!(!is_key_file("app.config.json"));
    }

    #[test]
    fn test_survey_result_serializes() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", "{}");
        write(temp.path(), "src/index.js", "");

        let result = survey(temp.path(), SurveyOptions::new()).unwrap();
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["stats"]["total_files"], 2);
        assert_eq!(value["stats"]["by_category"]["source"], 1);
        assert_eq!(value["stats"]["by_category"]["config"], 1);
        assert_eq!(value["package_info"]["type"], "package.json");
        assert_eq!(value["structure"]["root_dirs"][0], "src");
    }
}
