//! Human-readable digests of survey and search results.
//!
//! A digest is presentation-ready: every ordering and cap has already been
//! applied, and `Display` only lays the fields out as markdown. Building a
//! digest never mutates the result it was built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::scanner::MatchKind;
use crate::data::search::SearchResult;
use crate::data::survey::SurveyResult;

/// Extensions listed in a survey digest.
pub const TOP_EXTENSIONS: usize = 10;
/// Subdirectories listed under each root directory in a survey digest.
pub const SUBDIRS_SHOWN: usize = 5;
/// Characters of line text shown per match in a search digest.
pub const DISPLAY_LINE_CHARS: usize = 100;

/// How many matches of a kind a search digest shows.
pub fn display_cap(kind: MatchKind) -> usize {
    match kind {
        MatchKind::Definition => 15,
        MatchKind::Import => 10,
        MatchKind::Usage => 20,
    }
}

/// A labelled count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

/// A root-level directory with the subdirectories shown beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirRow {
    pub name: String,
    /// Number of subdirectories recorded in the skeleton
    pub subdir_count: usize,
    /// First [`SUBDIRS_SHOWN`] of them
    pub shown: Vec<String>,
    /// Subdirectories left out
    pub hidden: usize,
}

/// Presentation-ready survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDigest {
    pub root: String,
    pub total_files: usize,
    pub total_dirs: usize,
    pub project_type: Option<String>,
    /// Categories by descending count
    pub categories: Vec<CountRow>,
    /// Top extensions by descending count; `(no ext)` for extensionless files
    pub extensions: Vec<CountRow>,
    pub directories: Vec<DirRow>,
    pub key_files: Vec<String>,
}

impl SurveyDigest {
    pub fn from_survey(result: &SurveyResult) -> Self {
        let categories = by_descending_count(
            result
                .stats
                .by_category
                .iter()
                .map(|(category, count)| (category.to_string(), *count)),
        );

        let mut extensions = by_descending_count(result.stats.by_extension.iter().map(
            |(ext, count)| {
                let label = if ext.is_empty() {
                    "(no ext)".to_string()
                } else {
                    ext.clone()
                };
                (label, *count)
            },
        ));
        extensions.truncate(TOP_EXTENSIONS);

        let directories = result
            .structure
            .root_dirs
            .iter()
            .map(|name| {
                let subdirs = result.structure.subdirs(name);
                let shown: Vec<String> = subdirs.iter().take(SUBDIRS_SHOWN).cloned().collect();
                DirRow {
                    name: name.clone(),
                    subdir_count: subdirs.len(),
                    hidden: subdirs.len() - shown.len(),
                    shown,
                }
            })
            .collect();

        Self {
            root: result.root.display().to_string(),
            total_files: result.stats.total_files,
            total_dirs: result.stats.total_dirs,
            project_type: result.package_info.as_ref().map(|p| p.kind.clone()),
            categories,
            extensions,
            directories,
            key_files: result.key_files.clone(),
        }
    }
}

impl fmt::Display for SurveyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Codebase Analysis: {}", self.root)?;
        writeln!(f)?;
        writeln!(f, "## Overview")?;
        writeln!(f, "- **Files:** {}", self.total_files)?;
        writeln!(f, "- **Directories:** {}", self.total_dirs)?;
        if let Some(project_type) = &self.project_type {
            writeln!(f, "- **Project Type:** {}", project_type)?;
        }

        writeln!(f)?;
        writeln!(f, "## File Distribution")?;
        for row in &self.categories {
            writeln!(f, "- {}: {}", row.label, row.count)?;
        }

        writeln!(f)?;
        writeln!(f, "## Top Extensions")?;
        for row in &self.extensions {
            writeln!(f, "- {}: {}", row.label, row.count)?;
        }

        writeln!(f)?;
        write!(f, "## Directory Structure")?;
        for dir in &self.directories {
            writeln!(f)?;
            if dir.subdir_count == 0 {
                write!(f, "- {}/", dir.name)?;
                continue;
            }
            write!(f, "- **{}/** ({} subdirs)", dir.name, dir.subdir_count)?;
            for sub in &dir.shown {
                write!(f, "\n  - {}/", sub)?;
            }
            if dir.hidden > 0 {
                write!(f, "\n  - ... and {} more", dir.hidden)?;
            }
        }

        if !self.key_files.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "## Key Files")?;
            for file in &self.key_files {
                write!(f, "\n- {}", file)?;
            }
        }

        Ok(())
    }
}

/// One displayed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLine {
    pub file: String,
    pub line_num: usize,
    /// Line text cut to [`DISPLAY_LINE_CHARS`] characters
    pub text: String,
}

/// The displayed slice of one match kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSection {
    pub kind: MatchKind,
    /// Heading, e.g. `Definitions`
    pub title: String,
    /// Number of matches of this kind in the result
    pub found: usize,
    /// Matches sorted by file, capped by [`display_cap`]
    pub shown: Vec<MatchLine>,
    /// Matches left out by the cap
    pub hidden: usize,
}

fn section_title(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Definition => "Definitions",
        MatchKind::Import => "Imports",
        MatchKind::Usage => "Usages",
    }
}

/// Presentation-ready search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDigest {
    pub pattern: String,
    /// Non-empty kinds in presentation order: definitions, imports, usages
    pub sections: Vec<MatchSection>,
    pub total: usize,
}

impl SearchDigest {
    pub fn from_search(result: &SearchResult, pattern: &str) -> Self {
        let sections = MatchKind::ALL
            .into_iter()
            .filter(|kind| !result.bucket(*kind).is_empty())
            .map(|kind| {
                let found = result.bucket(kind).len();
                let shown: Vec<MatchLine> = result
                    .sorted(kind)
                    .into_iter()
                    .take(display_cap(kind))
                    .map(|record| MatchLine {
                        file: record.file.clone(),
                        line_num: record.line_num,
                        text: record.line.chars().take(DISPLAY_LINE_CHARS).collect(),
                    })
                    .collect();
                MatchSection {
                    kind,
                    title: section_title(kind).to_string(),
                    found,
                    hidden: found - shown.len(),
                    shown,
                }
            })
            .collect();

        Self {
            pattern: pattern.to_string(),
            sections,
            total: result.total(),
        }
    }
}

impl fmt::Display for SearchDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "No matches found for \"{}\"", self.pattern);
        }

        writeln!(f, "## Search Results: \"{}\"", self.pattern)?;
        writeln!(f)?;
        for section in &self.sections {
            writeln!(f, "### {} ({} found)", section.title, section.found)?;
            for line in &section.shown {
                writeln!(f, "- `{}:{}` - `{}`", line.file, line.line_num, line.text)?;
            }
            if section.hidden > 0 {
                writeln!(f, "- ... and {} more", section.hidden)?;
            }
            writeln!(f)?;
        }
        write!(f, "**Total:** {} matches", self.total)
    }
}

/// Render a survey as a markdown digest.
pub fn survey_digest(result: &SurveyResult) -> String {
    SurveyDigest::from_survey(result).to_string()
}

/// Render a search as a markdown digest.
pub fn search_digest(result: &SearchResult, pattern: &str) -> String {
    SearchDigest::from_search(result, pattern).to_string()
}

/// Sort by descending count, ties by label.
fn by_descending_count(rows: impl Iterator<Item = (String, usize)>) -> Vec<CountRow> {
    let mut rows: Vec<CountRow> = rows
        .map(|(label, count)| CountRow { label, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    rows
}
