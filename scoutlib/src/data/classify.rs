//! File classification by name, location and extension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use crate::source::filter::extension_of;

/// The category a file belongs to. Every file gets exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Test,
    Source,
    Config,
    Style,
    Markup,
    Docs,
    Other,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Test,
        Category::Source,
        Category::Config,
        Category::Style,
        Category::Markup,
        Category::Docs,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Test => "test",
            Category::Source => "source",
            Category::Config => "config",
            Category::Style => "style",
            Category::Markup => "markup",
            Category::Docs => "docs",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Extension table. `test` is absent: it is decided by name and location.
const EXTENSION_CATEGORIES: &[(Category, &[&str])] = &[
    (
        Category::Source,
        &[
            ".ts", ".tsx", ".js", ".jsx", ".py", ".go", ".rs", ".java", ".rb", ".php",
        ],
    ),
    (
        Category::Config,
        &[".json", ".yaml", ".yml", ".toml", ".ini", ".env"],
    ),
    (Category::Style, &[".css", ".scss", ".sass", ".less"]),
    (Category::Markup, &[".html", ".htm", ".xml", ".svg"]),
    (Category::Docs, &[".md", ".mdx", ".rst", ".txt"]),
];

/// Whether a file looks like a test by its name or location.
///
/// The file name is checked for `test`/`spec` substrings; the parent
/// directories for a segment that is exactly `test` or `tests`.
pub fn is_test_path(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.contains("test") || name.contains("spec") {
        return true;
    }

    path.parent().is_some_and(|parent| {
        parent.components().any(|c| match c {
            Component::Normal(dir) => {
                let dir = dir.to_string_lossy().to_lowercase();
                dir == "test" || dir == "tests"
            }
            _ => false,
        })
    })
}

/// Classify a path relative to the scan root.
///
/// Test detection always wins over the extension table, so
/// `test_settings.json` is a test, not config.
pub fn classify(path: &Path) -> Category {
    if is_test_path(path) {
        return Category::Test;
    }

    let ext = extension_of(path);
    EXTENSION_CATEGORIES
        .iter()
        .find(|(_, extensions)| extensions.contains(&ext.as_str()))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify(Path::new("src/app.ts")), Category::Source);
        assert_eq!(classify(Path::new("lib/main.RS")), Category::Source);
        assert_eq!(classify(Path::new("config.yaml")), Category::Config);
        assert_eq!(classify(Path::new("styles/site.scss")), Category::Style);
        assert_eq!(classify(Path::new("public/index.html")), Category::Markup);
        assert_eq!(classify(Path::new("README.md")), Category::Docs);
        assert_eq!(classify(Path::new("LICENSE")), Category::Other);
        assert_eq!(classify(Path::new("image.png")), Category::Other);
    }

    #[test]
    fn test_test_detection_by_name() {
        assert_eq!(classify(Path::new("src/app.test.ts")), Category::Test);
        assert_eq!(classify(Path::new("src/app.spec.js")), Category::Test);
        assert_eq!(classify(Path::new("test_utils.py")), Category::Test);
        assert_eq!(classify(Path::new("docs/Testing.md")), Category::Test);
    }

    #[test]
    fn test_test_detection_by_directory() {
        assert_eq!(classify(Path::new("tests/integration.rs")), Category::Test);
        assert_eq!(classify(Path::new("pkg/test/helpers.go")), Category::Test);
        assert_eq!(classify(Path::new("TESTS/data.json")), Category::Test);
        // Only exact segments count for directories
        assert_eq!(classify(Path::new("contest/entry.py")), Category::Source);
    }

    #[test]
    fn test_test_rule_dominates_extension() {
        assert_eq!(classify(Path::new("test_settings.json")), Category::Test);
        assert_eq!(classify(Path::new("src/test/config.json")), Category::Test);
        assert_eq!(classify(Path::new("styles/spec.css")), Category::Test);
    }

    #[test]
    fn test_every_path_gets_a_known_category() {
        let paths = ["a", "a.b", "x/y/z.toml", "weird.name.tar.gz", "Makefile"];
        for path in paths {
            assert!(Category::ALL.contains(&classify(Path::new(path))));
        }
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("DOCS".parse::<Category>().unwrap(), Category::Docs);
        assert!("binary".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Markup).unwrap();
        assert_eq!(json, "\"markup\"");
    }
}
