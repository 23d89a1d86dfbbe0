//! Option cache keyed on artifact modification time.
//!
//! Each artifact has a companion text file (its path plus a suffix) holding
//! one option name per line. The file is valid while it is not older than
//! the artifact, and is fully rewritten otherwise.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use detect_completion_core::{OptionList, OptionSource};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::artifact::{Artifact, cache_path_for, locate_artifact};
use crate::config::CompletionConfig;
use crate::error::{DiscoveryError, Result};
use crate::extractor::{HelpRunner, ProcessHelpRunner, extract_option_names};

/// Notice shown when no artifact exists to read options from.
pub const ARTIFACT_MISSING_NOTICE: &str =
    "Detect artifact not found; run detect once to download it";

/// Progress message for a cache rebuild.
pub const BUILDING_NOTICE: &str = "Building option cache, this may take a few seconds...";

/// Freshness of an artifact's option cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    Missing,
    Stale,
    Fresh,
}

impl std::fmt::Display for CacheState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Stale => write!(f, "stale"),
            Self::Fresh => write!(f, "fresh"),
        }
    }
}

/// File-backed option cache for the newest Detect artifact.
pub struct OptionCache<R = ProcessHelpRunner> {
    search_dirs: Vec<PathBuf>,
    pattern: Regex,
    suffix: String,
    runner: R,
}

impl OptionCache<ProcessHelpRunner> {
    /// Builds a cache that probes the artifact as a child process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern`](DiscoveryError::InvalidPattern) if the
    /// configured artifact pattern does not compile.
    pub fn from_config(config: &CompletionConfig) -> Result<Self> {
        let runner = ProcessHelpRunner::new(config.help.clone());
        Self::with_runner(config, runner)
    }
}

impl<R: HelpRunner> OptionCache<R> {
    pub fn with_runner(config: &CompletionConfig, runner: R) -> Result<Self> {
        Ok(Self {
            search_dirs: config.expanded_search_dirs(),
            pattern: Regex::new(&config.artifact_pattern)?,
            suffix: config.cache_suffix.clone(),
            runner,
        })
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Newest matching artifact across the search directories.
    pub fn locate(&self) -> Option<Artifact> {
        locate_artifact(&self.search_dirs, &self.pattern)
    }

    /// Locates the artifact or reports where it was looked for.
    pub fn require_artifact(&self) -> Result<Artifact> {
        self.locate().ok_or_else(|| DiscoveryError::ArtifactNotFound {
            searched: self
                .search_dirs
                .iter()
                .map(|dir| dir.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn cache_path(&self, artifact: &Artifact) -> PathBuf {
        cache_path_for(&artifact.path, &self.suffix)
    }

    /// Compares the cache file's mtime against the artifact's.
    ///
    /// A cache with the same mtime as its artifact counts as fresh.
    pub fn state(&self, artifact: &Artifact) -> CacheState {
        let modified = fs::metadata(self.cache_path(artifact)).and_then(|m| m.modified());
        match modified {
            Ok(cached) if cached < artifact.modified => CacheState::Stale,
            Ok(_) => CacheState::Fresh,
            Err(_) => CacheState::Missing,
        }
    }

    /// Probes the artifact and rewrites its cache file.
    ///
    /// The previous cache is left untouched when the probe fails or finds no
    /// options. Returns the options written.
    pub fn refresh(&self, artifact: &Artifact) -> Result<Vec<String>> {
        let help_text = self.runner.run_help(&artifact.path)?;
        let options = extract_option_names(&help_text);
        if options.is_empty() {
            return Err(DiscoveryError::NoOptions {
                artifact: artifact.path.clone(),
            });
        }

        let path = self.cache_path(artifact);
        write_atomically(&path, &render(&options))?;
        info!(
            artifact = %artifact.path.display(),
            cache = %path.display(),
            options = options.len(),
            "Rebuilt option cache"
        );
        Ok(options)
    }

    /// Refreshes the cache if it is missing or older than the artifact.
    /// Returns whether a refresh happened.
    ///
    /// A failed refresh still marks the cache as current for this artifact,
    /// keeping any previous options, so the artifact is probed once per
    /// change. `refresh` retries unconditionally.
    pub fn ensure_fresh(&self, artifact: &Artifact) -> Result<bool> {
        match self.state(artifact) {
            CacheState::Fresh => Ok(false),
            state => {
                info!(
                    artifact = %artifact.path.display(),
                    state = %state,
                    "Building option cache"
                );
                match self.refresh(artifact) {
                    Ok(_) => Ok(true),
                    Err(err) => {
                        if let Err(mark_err) = self.record_failed_attempt(artifact) {
                            debug!(error = %mark_err, "Failed to record refresh attempt");
                        }
                        Err(err)
                    }
                }
            }
        }
    }

    /// Touches the cache file (creating it empty if needed) so its mtime is
    /// not older than the artifact's.
    fn record_failed_attempt(&self, artifact: &Artifact) -> Result<()> {
        let path = self.cache_path(artifact);
        if !path.exists() {
            write_atomically(&path, "")?;
        }
        let file = fs::File::options().write(true).open(&path)?;
        file.set_modified(SystemTime::now().max(artifact.modified))?;
        debug!(cache = %path.display(), "Recorded failed refresh attempt");
        Ok(())
    }

    /// Reads the cached options for `artifact`. A missing cache reads as
    /// empty.
    pub fn read(&self, artifact: &Artifact) -> Result<Vec<String>> {
        match fs::read_to_string(self.cache_path(artifact)) {
            Ok(raw) => Ok(parse(&raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Options for completion: locate, refresh when needed, read.
    ///
    /// Refresh and read failures degrade to whatever the cache holds (or
    /// nothing); only a missing artifact is reported, as a notice.
    pub fn load_options(&self) -> OptionList {
        let Some(artifact) = self.locate() else {
            debug!("No artifact in search directories");
            return OptionList::Unavailable(ARTIFACT_MISSING_NOTICE.to_string());
        };

        if let Err(err) = self.ensure_fresh(&artifact) {
            warn!(artifact = %artifact.path.display(), error = %err, "Option cache refresh failed");
        }

        match self.read(&artifact) {
            Ok(options) => OptionList::Available(options),
            Err(err) => {
                debug!(error = %err, "Failed to read option cache");
                OptionList::Available(Vec::new())
            }
        }
    }
}

impl<R: HelpRunner> OptionSource for OptionCache<R> {
    fn option_names(&self) -> OptionList {
        self.load_options()
    }
}

fn render(options: &[String]) -> String {
    let mut out = options.join("\n");
    out.push('\n');
    out
}

fn parse(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Writes via a sibling temp file and rename so readers in other sessions
/// see either the old or the new cache, never a partial one.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(format!(".tmp.{}", std::process::id()));
    let tmp = PathBuf::from(tmp_name);

    if let Err(err) = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    debug!(path = %path.display(), bytes = contents.len(), "Wrote option cache");
    Ok(())
}
