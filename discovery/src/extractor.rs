//! Option-name extraction from the artifact's help output.
//!
//! The artifact is run once per cache refresh through a [`HelpRunner`].
//! [`ProcessHelpRunner`] spawns the configured program with a timeout;
//! tests substitute their own runner.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;
use wait_timeout::ChildExt;

use crate::config::HelpConfig;
use crate::error::{DiscoveryError, Result};

/// Runs the artifact and returns its help text.
pub trait HelpRunner {
    fn run_help(&self, artifact: &Path) -> Result<String>;
}

/// Spawns the configured help program as a child process.
#[derive(Debug, Clone)]
pub struct ProcessHelpRunner {
    config: HelpConfig,
}

impl ProcessHelpRunner {
    pub fn new(config: HelpConfig) -> Self {
        Self { config }
    }
}

impl HelpRunner for ProcessHelpRunner {
    fn run_help(&self, artifact: &Path) -> Result<String> {
        let args = self.config.args_for(artifact);
        debug!(program = %self.config.program, args = ?args, "Running help command");

        let mut child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DiscoveryError::SpawnFailed {
                program: self.config.program.clone(),
                source,
            })?;

        // Drain both pipes on threads so a chatty child cannot block on a
        // full pipe buffer before it exits.
        let stdout_thread = child.stdout.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });
        let stderr_thread = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let status = match child.wait_timeout(timeout)? {
            Some(status) => status,
            None => {
                debug!(
                    timeout_secs = self.config.timeout_secs,
                    "Help command timed out, killing process"
                );
                let _ = child.kill();
                let _ = child.wait();
                return Err(DiscoveryError::HelpTimeout {
                    secs: self.config.timeout_secs,
                });
            }
        };

        let stdout = stdout_thread
            .and_then(|t| t.join().ok())
            .unwrap_or_default();
        let stderr = stderr_thread
            .and_then(|t| t.join().ok())
            .unwrap_or_default();
        let stdout = String::from_utf8_lossy(&stdout);
        let stderr = String::from_utf8_lossy(&stderr);
        let help_text = if stdout.len() >= stderr.len() {
            stdout.into_owned()
        } else {
            stderr.into_owned()
        };

        // Some launchers exit non-zero after printing help; only an empty
        // failure is treated as an error.
        if !status.success() && help_text.trim().is_empty() {
            return Err(DiscoveryError::HelpFailed(format!(
                "'{}' exited with {status}",
                self.config.program
            )));
        }

        debug!(length = help_text.len(), exit = ?status.code(), "Got help output");
        Ok(help_text)
    }
}

/// Extracts option names from help text.
///
/// Each line contributes at most one option: the `--name` token that starts
/// the line, where the name consists of ASCII letters, digits and dots.
/// Terminal escape sequences are stripped first. Order is preserved and
/// repeats are dropped.
///
/// # Examples
///
/// ```
/// use detect_completion_discovery::extractor::extract_option_names;
///
/// let help = "\
/// --blackduck.url: Black Duck server URL
/// --detect.tools --detect.tools.excluded
///   indented lines are ignored
/// --detect.tools: repeated
/// ";
/// assert_eq!(extract_option_names(help), ["--blackduck.url", "--detect.tools"]);
/// ```
pub fn extract_option_names(help_text: &str) -> Vec<String> {
    static OPTION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^--[A-Za-z0-9.]+").expect("static regex must compile"));

    let cleaned = strip_ansi(help_text);
    let mut names: Vec<String> = Vec::new();
    for line in cleaned.lines() {
        let Some(found) = OPTION_RE.find(line) else {
            continue;
        };
        let name = found.as_str();
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn strip_ansi(raw: &str) -> String {
    static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex must compile")
    });
    ANSI_RE.replace_all(raw, "").replace("\r\n", "\n")
}
