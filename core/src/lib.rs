//! Completion engine for the Synopsys Detect command line.
//!
//! This crate is pure: it maps an option name and a partially typed value to
//! a [`Completion`] without touching the file system or the shell.
//!
//! - [`OptionCategory`] — the kind of value an option takes, with its
//!   [`Strategy`] and static value set.
//! - [`classify`] — the dispatch table (exact names, then suffix rules).
//! - [`completer`] — single-choice and comma-separated list completers.
//! - [`CompletionRequest`] / [`complete`] — the entry point.
//! - [`OptionSource`] — seam for the full option-name list, implemented by
//!   the on-disk cache in `detect-completion-discovery`.
//!
//! # Example
//!
//! ```
//! use detect_completion_core::*;
//!
//! let options = vec!["--detect.tools".to_string()];
//!
//! let request = CompletionRequest::new("detect", "--detect.project.version.phase=PRE");
//! let completion = complete(&request, &options);
//! assert_eq!(completion.candidates(), ["PRERELEASE".to_string()]);
//! ```

pub mod category;
pub mod completer;
mod request;
pub mod table;
mod types;
pub mod values;

pub use category::{OptionCategory, Strategy};
pub use request::{CompletionRequest, complete, complete_value};
pub use table::{MatchRule, classify, lookup};
pub use types::*;
