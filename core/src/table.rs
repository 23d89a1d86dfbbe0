//! Dispatch table mapping option names to categories.
//!
//! Lookup order: exact name, then suffix rule. Names are compared without
//! their leading dashes, so `--detect.tools` and `detect.tools` are the same
//! option.

use crate::category::OptionCategory;

/// Options matched by their full name.
const EXACT: &[(&str, OptionCategory)] = &[
    ("blackduck.trust.cert", OptionCategory::Boolean),
    ("detect.cleanup", OptionCategory::Boolean),
    ("detect.force.success", OptionCategory::Boolean),
    ("detect.notices.report", OptionCategory::Boolean),
    ("detect.risk.report.pdf", OptionCategory::Boolean),
    ("detect.wait.for.results", OptionCategory::Boolean),
    ("detect.project.codelocation.unmap", OptionCategory::Boolean),
    ("detect.project.version.update", OptionCategory::Boolean),
    ("detect.project.level.adjustments", OptionCategory::Boolean),
    (
        "detect.blackduck.signature.scanner.dry.run",
        OptionCategory::Boolean,
    ),
    ("detect.test.connection", OptionCategory::Boolean),
    (
        "logging.level.com.synopsys.integration",
        OptionCategory::LogLevel,
    ),
    ("logging.level.detect", OptionCategory::LogLevel),
    ("detect.tools", OptionCategory::Tools),
    ("detect.tools.excluded", OptionCategory::Tools),
    ("detect.project.tool", OptionCategory::ProjectTool),
    (
        "detect.policy.check.fail.on.severities",
        OptionCategory::Severity,
    ),
    ("detect.project.clone.categories", OptionCategory::CloneCategory),
    ("detect.project.tier", OptionCategory::Tier),
    (
        "detect.project.version.distribution",
        OptionCategory::Distribution,
    ),
    ("detect.project.version.phase", OptionCategory::Phase),
    (
        "detect.blackduck.signature.scanner.snippet.matching",
        OptionCategory::SnippetMatching,
    ),
];

/// Options matched by how their name ends, checked in order.
const SUFFIXES: &[(&str, OptionCategory)] = &[
    ("path", OptionCategory::Path),
    ("tar", OptionCategory::Path),
    ("mode", OptionCategory::Boolean),
    ("continue", OptionCategory::Boolean),
    ("exclusion.defaults", OptionCategory::Boolean),
];

/// Which rule of the table selected a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    Suffix(&'static str),
}

/// Returns the category for `option`, or `None` when it needs the
/// option-name fallback.
///
/// # Examples
///
/// ```
/// use detect_completion_core::{OptionCategory, classify};
///
/// assert_eq!(classify("--detect.tools"), Some(OptionCategory::Tools));
/// assert_eq!(classify("--detect.source.path"), Some(OptionCategory::Path));
/// assert_eq!(classify("--blackduck.offline.mode"), Some(OptionCategory::Boolean));
/// assert_eq!(classify("--blackduck.url"), None);
/// ```
pub fn classify(option: &str) -> Option<OptionCategory> {
    lookup(option).map(|(category, _)| category)
}

/// Like [`classify`], also reporting which rule matched.
pub fn lookup(option: &str) -> Option<(OptionCategory, MatchRule)> {
    let name = normalize_option_name(option);
    if name.is_empty() {
        return None;
    }

    if let Some((_, category)) = EXACT.iter().find(|(exact, _)| *exact == name) {
        return Some((*category, MatchRule::Exact));
    }

    SUFFIXES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(suffix, category)| (*category, MatchRule::Suffix(*suffix)))
}

/// Strips leading dashes from an option name.
pub fn normalize_option_name(option: &str) -> &str {
    option.trim_start_matches('-')
}

/// Every exactly-matched option name, with its category.
pub fn exact_entries() -> &'static [(&'static str, OptionCategory)] {
    EXACT
}
