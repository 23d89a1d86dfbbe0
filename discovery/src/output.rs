//! Output formatting for option lists and reports.

use serde::Serialize;

use crate::report::{OptionReport, StatusReport};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
    Yaml,
}

/// Formats an option list, one option per line for [`OutputFormat::Plain`].
pub fn format_options(options: &[String], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Plain => Ok(lines(options.iter().map(String::as_str))),
        _ => serialize(&options, format),
    }
}

/// Formats a cache status report.
pub fn format_status(report: &StatusReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Plain => Ok(status_to_plain(report)),
        _ => serialize(report, format),
    }
}

/// Formats an option explanation.
pub fn format_option_report(report: &OptionReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Plain => Ok(option_report_to_plain(report)),
        _ => serialize(report, format),
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut out| {
                out.push('\n');
                out
            })
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Plain => Err("plain output has no serialized form".to_string()),
    }
}

fn lines<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item);
        out.push('\n');
    }
    out
}

fn status_to_plain(report: &StatusReport) -> String {
    let Some(ref artifact) = report.artifact else {
        return "Artifact: not found\n".to_string();
    };

    let mut out = String::new();
    out.push_str(&format!("Artifact: {artifact}\n"));
    if let Some(ref modified) = report.artifact_modified {
        out.push_str(&format!("Modified: {modified}\n"));
    }
    if let Some(ref cache) = report.cache {
        out.push_str(&format!("Cache:    {cache}\n"));
    }
    if let Some(status) = report.cache_status {
        out.push_str(&format!("Status:   {status}\n"));
    }
    out.push_str(&format!("Options:  {}\n", report.option_count));
    out
}

fn option_report_to_plain(report: &OptionReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Option:   {}\n", report.option));
    match (report.category, report.strategy) {
        (Some(category), Some(strategy)) => {
            out.push_str(&format!("Category: {}\n", category.label()));
            out.push_str(&format!("Strategy: {strategy:?}\n"));
        }
        _ => out.push_str("Category: none (completes option names)\n"),
    }
    out.push_str(&format!("Rule:     {}\n", report.rule));
    if !report.values.is_empty() {
        out.push_str(&format!("Values:   {}\n", report.values.join(" ")));
    }
    out
}
