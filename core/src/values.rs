//! Static value sets offered for enumerated options.

/// Sentinel selecting every entry of a list option.
pub const ALL: &str = "ALL";

/// Sentinel selecting no entry of a list option.
pub const NONE: &str = "NONE";

pub const BOOLEANS: &[&str] = &["true", "false"];

pub const LOG_LEVELS: &[&str] = &["TRACE", "DEBUG", "INFO", "WARN", "ERROR", "FATAL", "OFF"];

/// Tools for `--detect.tools` and `--detect.tools.excluded`.
pub const TOOLS: &[&str] = &[
    "BAZEL",
    "DETECTOR",
    "DOCKER",
    "SIGNATURE_SCAN",
    "BINARY_SCAN",
    "POLARIS",
    NONE,
    ALL,
];

pub const PROJECT_TOOLS: &[&str] = &["DETECTOR", "BAZEL", "DOCKER"];

pub const SEVERITIES: &[&str] = &[
    ALL,
    "BLOCKER",
    "CRITICAL",
    "MAJOR",
    "MINOR",
    "TRIVIAL",
    "UNSPECIFIED",
];

pub const CLONE_CATEGORIES: &[&str] = &["COMPONENT_DATA", "VULN_DATA"];

pub const TIERS: &[&str] = &["1", "2", "3", "4", "5"];

pub const DISTRIBUTIONS: &[&str] = &["EXTERNAL", "SAAS", "INTERNAL", "OPENSOURCE"];

pub const PHASES: &[&str] = &[
    "PLANNING",
    "DEVELOPMENT",
    "RELEASED",
    "DEPRECATED",
    "ARCHIVED",
    "PRERELEASE",
];

pub const SNIPPET_MATCHING: &[&str] = &[
    "SNIPPET_MATCHING",
    "SNIPPET_MATCHING_ONLY",
    "FULL_SNIPPET_MATCHING",
    "FULL_SNIPPET_MATCHING_ONLY",
    NONE,
];
