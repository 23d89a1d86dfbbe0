//! Option categories and the completion strategy each one uses.

use serde::{Deserialize, Serialize};

use crate::values;

/// How values of an option are completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Exactly one value from the set.
    Single,
    /// Comma-separated values from the set, each at most once.
    List,
    /// File-system path, completed by the shell.
    Files,
}

/// Kind of value an option takes.
///
/// # Examples
///
/// ```
/// use detect_completion_core::{OptionCategory, Strategy};
///
/// assert_eq!(OptionCategory::Tools.strategy(), Strategy::List);
/// assert!(OptionCategory::Tools.values().contains(&"DOCKER"));
/// assert!(OptionCategory::Path.values().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    Boolean,
    Path,
    LogLevel,
    Tools,
    ProjectTool,
    Severity,
    CloneCategory,
    Tier,
    Distribution,
    Phase,
    SnippetMatching,
}

impl OptionCategory {
    pub const ALL: &'static [OptionCategory] = &[
        Self::Boolean,
        Self::Path,
        Self::LogLevel,
        Self::Tools,
        Self::ProjectTool,
        Self::Severity,
        Self::CloneCategory,
        Self::Tier,
        Self::Distribution,
        Self::Phase,
        Self::SnippetMatching,
    ];

    pub fn strategy(self) -> Strategy {
        match self {
            Self::Path => Strategy::Files,
            Self::Tools | Self::ProjectTool | Self::Severity | Self::CloneCategory => {
                Strategy::List
            }
            Self::Boolean
            | Self::LogLevel
            | Self::Tier
            | Self::Distribution
            | Self::Phase
            | Self::SnippetMatching => Strategy::Single,
        }
    }

    /// Value set offered for this category; empty for paths.
    pub fn values(self) -> &'static [&'static str] {
        match self {
            Self::Boolean => values::BOOLEANS,
            Self::Path => &[],
            Self::LogLevel => values::LOG_LEVELS,
            Self::Tools => values::TOOLS,
            Self::ProjectTool => values::PROJECT_TOOLS,
            Self::Severity => values::SEVERITIES,
            Self::CloneCategory => values::CLONE_CATEGORIES,
            Self::Tier => values::TIERS,
            Self::Distribution => values::DISTRIBUTIONS,
            Self::Phase => values::PHASES,
            Self::SnippetMatching => values::SNIPPET_MATCHING,
        }
    }

    /// Stable lowercase label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Path => "path",
            Self::LogLevel => "log_level",
            Self::Tools => "tools",
            Self::ProjectTool => "project_tool",
            Self::Severity => "severity",
            Self::CloneCategory => "clone_category",
            Self::Tier => "tier",
            Self::Distribution => "distribution",
            Self::Phase => "phase",
            Self::SnippetMatching => "snippet_matching",
        }
    }
}
