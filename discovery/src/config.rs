//! Completion configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! command_name: detect
//! search_dirs:
//!   - ~/synopsys-detect/download
//!   - /tmp
//! artifact_pattern: '^synopsys-detect-.*\.jar$'
//! cache_suffix: .options
//! help:
//!   program: java
//!   args: ["-jar", "{artifact}", "--help"]
//!   timeout_secs: 60
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "DETECT_COMPLETION_CONFIG";

/// Placeholder in [`HelpConfig::args`] replaced by the artifact path.
pub const ARTIFACT_PLACEHOLDER: &str = "{artifact}";

/// How the artifact is invoked to print its option documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    pub program: String,
    /// Arguments; [`ARTIFACT_PLACEHOLDER`] is substituted.
    pub args: Vec<String>,
    /// Seconds before the help process is killed.
    pub timeout_secs: u64,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: vec![
                "-jar".to_string(),
                ARTIFACT_PLACEHOLDER.to_string(),
                "--help".to_string(),
            ],
            timeout_secs: 60,
        }
    }
}

impl HelpConfig {
    /// Arguments with the artifact path substituted in.
    pub fn args_for(&self, artifact: &Path) -> Vec<String> {
        let artifact = artifact.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(ARTIFACT_PLACEHOLDER, &artifact))
            .collect()
    }
}

/// Top-level completion configuration.
///
/// # Examples
///
/// ```
/// use detect_completion_discovery::config::CompletionConfig;
///
/// let config: CompletionConfig = serde_yaml::from_str("command_name: detect.sh\n").unwrap();
/// assert_eq!(config.command_name, "detect.sh");
/// assert_eq!(config.cache_suffix, ".options");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Command the shell hook registers for.
    pub command_name: String,
    /// Directories scanned (non-recursively) for artifacts. `~` expands.
    pub search_dirs: Vec<String>,
    /// Regex matched against artifact file names.
    pub artifact_pattern: String,
    /// Appended to the artifact path to name its option cache.
    pub cache_suffix: String,
    pub help: HelpConfig,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            command_name: "detect".to_string(),
            search_dirs: vec!["~/synopsys-detect/download".to_string(), "/tmp".to_string()],
            artifact_pattern: r"^synopsys-detect-.*\.jar$".to_string(),
            cache_suffix: ".options".to_string(),
            help: HelpConfig::default(),
        }
    }
}

impl CompletionConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DiscoveryError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::DiscoveryError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        // An empty document deserializes to `None`, not to the defaults.
        let config: Option<Self> = serde_yaml::from_reader(reader)?;
        Ok(config.unwrap_or_default())
    }

    /// Resolves configuration from, in order: `explicit`, the
    /// [`CONFIG_ENV`] variable, the per-user config file if it exists, and
    /// finally built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
            return Self::load(PathBuf::from(path));
        }
        let user_file = Self::default_path();
        if user_file.is_file() {
            debug!(path = %user_file.display(), "Loading user configuration");
            return Self::load(user_file);
        }
        Ok(Self::default())
    }

    /// Default per-user configuration path
    /// (`$XDG_CONFIG_HOME/detect-completion/config.yaml`).
    pub fn default_path() -> PathBuf {
        config_home().join("detect-completion").join("config.yaml")
    }

    /// Search directories with `~` and `$HOME` expanded.
    pub fn expanded_search_dirs(&self) -> Vec<PathBuf> {
        self.search_dirs.iter().map(|dir| expand_home(dir)).collect()
    }
}

/// Expands a leading `~` or `$HOME` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let Some(home) = std::env::var_os("HOME") else {
        return PathBuf::from(raw);
    };
    let home = PathBuf::from(home);
    for prefix in ["~", "$HOME"] {
        if raw == prefix {
            return home;
        }
        if let Some(rest) = raw.strip_prefix(prefix).and_then(|r| r.strip_prefix('/')) {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

fn config_home() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    PathBuf::from("/tmp")
}
