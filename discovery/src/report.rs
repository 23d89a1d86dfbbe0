//! Structured reports for the maintenance commands.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use detect_completion_core::{MatchRule, OptionCategory, Strategy, lookup};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheState, OptionCache};
use crate::extractor::HelpRunner;

/// Where the artifact and its cache are, and whether the cache is current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub artifact: Option<String>,
    /// RFC 3339 modification time of the artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_status: Option<CacheState>,
    pub option_count: usize,
}

impl StatusReport {
    /// Inspects the cache without refreshing it.
    pub fn collect<R: HelpRunner>(cache: &OptionCache<R>) -> Self {
        let Some(artifact) = cache.locate() else {
            return Self {
                artifact: None,
                artifact_modified: None,
                cache: None,
                cache_status: None,
                option_count: 0,
            };
        };

        let option_count = cache.read(&artifact).map(|o| o.len()).unwrap_or(0);
        Self {
            artifact: Some(artifact.path.display().to_string()),
            artifact_modified: Some(to_rfc3339(artifact.modified)),
            cache: Some(cache.cache_path(&artifact).display().to_string()),
            cache_status: Some(cache.state(&artifact)),
            option_count,
        }
    }
}

/// How the dispatch table treats one option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionReport {
    pub option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<OptionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// `exact`, `suffix:<suffix>`, or `fallback`.
    pub rule: String,
    pub values: Vec<String>,
}

impl OptionReport {
    pub fn explain(option: &str) -> Self {
        match lookup(option) {
            Some((category, rule)) => Self {
                option: option.to_string(),
                category: Some(category),
                strategy: Some(category.strategy()),
                rule: match rule {
                    MatchRule::Exact => "exact".to_string(),
                    MatchRule::Suffix(suffix) => format!("suffix:{suffix}"),
                },
                values: category.values().iter().map(|v| (*v).to_string()).collect(),
            },
            None => Self {
                option: option.to_string(),
                category: None,
                strategy: None,
                rule: "fallback".to_string(),
                values: Vec::new(),
            },
        }
    }
}

fn to_rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339()
}
