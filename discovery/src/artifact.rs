//! Locating the downloaded Detect artifact.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use regex::Regex;
use tracing::debug;

/// A tool artifact found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Returns the most recently modified file whose name matches `pattern`
/// across all `search_dirs`.
///
/// Directories are scanned non-recursively; unreadable or missing
/// directories are skipped. On equal modification times the first match
/// found wins.
pub fn locate_artifact<P: AsRef<Path>>(search_dirs: &[P], pattern: &Regex) -> Option<Artifact> {
    let mut newest: Option<Artifact> = None;

    for dir in search_dirs {
        let dir = dir.as_ref();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "Skipping search directory");
                continue;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !pattern.is_match(name) {
                continue;
            }
            let Ok(metadata) = fs::metadata(entry.path()) else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };

            let is_newer = newest
                .as_ref()
                .is_none_or(|current| modified > current.modified);
            if is_newer {
                newest = Some(Artifact {
                    path: entry.path(),
                    modified,
                });
            }
        }
    }

    if let Some(artifact) = &newest {
        debug!(artifact = %artifact.path.display(), "Located artifact");
    }
    newest
}

/// Path of the option cache belonging to `artifact`: the artifact's full
/// path with `suffix` appended.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use detect_completion_discovery::artifact::cache_path_for;
///
/// let path = cache_path_for(Path::new("/tmp/synopsys-detect-9.1.0.jar"), ".options");
/// assert_eq!(path, Path::new("/tmp/synopsys-detect-9.1.0.jar.options"));
/// ```
pub fn cache_path_for(artifact: &Path, suffix: &str) -> PathBuf {
    let mut raw = artifact.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
