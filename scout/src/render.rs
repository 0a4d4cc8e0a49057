//! Template rendering for CLI output using outstanding

use console::style;
use outstanding::{render_auto, render_with_output, Theme};
use scoutlib::{SearchDigest, SearchResult, SurveyDigest, SurveyResult};

/// Include templates at compile time
const SURVEY_TEMPLATE: &str = include_str!("../templates/survey.jinja");
const SEARCH_TEMPLATE: &str = include_str!("../templates/search.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

fn create_theme() -> Theme {
    Theme::new()
}

/// Render a survey: the full result as JSON, or the markdown digest.
pub fn render_survey(result: &SurveyResult, output_mode: OutputMode) -> anyhow::Result<String> {
    let theme = create_theme();
    if output_mode.is_structured() {
        return Ok(render_auto(SURVEY_TEMPLATE, result, &theme, output_mode)?);
    }

    let digest = SurveyDigest::from_survey(result);
    Ok(render_with_output(
        SURVEY_TEMPLATE,
        &digest,
        &theme,
        output_mode,
    )?)
}

/// Render a search: the three buckets as JSON, or the markdown digest.
pub fn render_search(
    result: &SearchResult,
    pattern: &str,
    output_mode: OutputMode,
) -> anyhow::Result<String> {
    let theme = create_theme();
    if output_mode.is_structured() {
        return Ok(render_auto(SEARCH_TEMPLATE, result, &theme, output_mode)?);
    }

    let digest = SearchDigest::from_search(result, pattern);
    Ok(render_with_output(
        SEARCH_TEMPLATE,
        &digest,
        &theme,
        output_mode,
    )?)
}

/// Report a failure. JSON mode writes an error object to stdout, text
/// mode writes to stderr.
pub fn report_error(err: &anyhow::Error, output_mode: OutputMode) {
    if output_mode.is_structured() {
        let payload = serde_json::json!({ "error": format!("{:#}", err) });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("{} {:#}", style("Error:").red().bold().for_stderr(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoutlib::{search_digest, survey_digest, MatchKind, MatchRecord, PackageInfo, Skeleton};
    use scoutlib::{Category, SurveyStats};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn record(file: &str, line_num: usize, line: &str, kind: MatchKind) -> MatchRecord {
        MatchRecord {
            file: file.into(),
            line_num,
            line: line.into(),
            match_type: kind,
        }
    }

    fn sample_survey() -> SurveyResult {
        let mut by_category = BTreeMap::new();
        by_category.insert(Category::Source, 2);
        by_category.insert(Category::Docs, 1);
        let mut by_extension = BTreeMap::new();
        by_extension.insert(".ts".to_string(), 2);
        by_extension.insert(".md".to_string(), 1);
        let subdirs = (0..7)
            .map(|i| ("src".to_string(), format!("mod{}", i)))
            .collect();

        SurveyResult {
            root: PathBuf::from("/work/app"),
            stats: SurveyStats {
                total_files: 3,
                total_dirs: 9,
                by_category,
                by_extension,
            },
            structure: Skeleton::build(vec!["src".into(), "docs".into()], subdirs),
            key_files: vec!["package.json".into(), "README.md".into()],
            package_info: Some(PackageInfo {
                kind: "package.json".into(),
                path: "package.json".into(),
                ecosystem: "node".into(),
            }),
        }
    }

    #[test]
    fn test_render_survey_text() {
        let result = sample_survey();

        let text = render_survey(&result, OutputMode::Text).unwrap();

        assert!(text.starts_with("# Codebase Analysis: /work/app\n"));
        assert!(text.contains("- **Project Type:** package.json\n"));
        assert!(text.contains("- source: 2\n"));
        assert!(text.contains("- docs/\n"));
        assert!(text.contains("- **src/** (7 subdirs)\n  - mod0/\n"));
        assert!(text.contains("  - mod4/\n  - ... and 2 more\n"));
        assert!(text.trim_end().ends_with("## Key Files\n- package.json\n- README.md"));
        // same layout as the library digest
        assert_eq!(text.trim_end(), survey_digest(&result).trim_end());
    }

    #[test]
    fn test_render_survey_json() {
        let json = render_survey(&sample_survey(), OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["stats"]["total_files"], 3);
        assert_eq!(value["package_info"]["ecosystem"], "node");
    }

    #[test]
    fn test_render_search_modes() {
        let mut result = SearchResult::new();
        result.push(record("a.py", 2, "def go():", MatchKind::Definition));
        result.push(record("b.py", 7, "go()", MatchKind::Usage));

        let text = render_search(&result, "go", OutputMode::Text).unwrap();
        let json = render_search(&result, "go", OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(text.starts_with("## Search Results: \"go\"\n"));
        assert!(text.contains("### Definitions (1 found)\n- `a.py:2` - `def go():`"));
        assert!(text.contains("### Usages (1 found)\n- `b.py:7` - `go()`"));
        assert!(!text.contains("### Imports"));
        assert!(text.trim_end().ends_with("**Total:** 2 matches"));
        assert_eq!(text.trim_end(), search_digest(&result, "go").trim_end());
        assert_eq!(value["definition"][0]["line_num"], 2);
    }

    #[test]
    fn test_render_search_truncates_sections() {
        let mut result = SearchResult::new();
        for i in 0..12 {
            result.push(record("lib.ts", i + 1, "import { go } from 'x'", MatchKind::Import));
        }

        let text = render_search(&result, "go", OutputMode::Text).unwrap();

        assert!(text.contains("### Imports (12 found)\n"));
        assert!(text.contains("- ... and 2 more"));
    }

    #[test]
    fn test_render_search_empty() {
        let text = render_search(&SearchResult::new(), "nothing", OutputMode::Text).unwrap();

        assert_eq!(text.trim(), "No matches found for \"nothing\"");
    }
}
