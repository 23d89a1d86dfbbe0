//! Option discovery for Synopsys Detect completion.
//!
//! Detect is distributed as a downloaded jar. This crate finds the newest
//! jar, scrapes option names from its help output, and keeps them in a
//! text cache next to the jar so completion stays fast after the first run.
//!
//! # Main entry points
//!
//! - [`OptionCache`] — the cache; implements
//!   [`OptionSource`](detect_completion_core::OptionSource) for the
//!   completion engine.
//! - [`extractor::extract_option_names`] — pure extraction from help text.
//! - [`CompletionConfig`] — search directories, artifact pattern, help
//!   invocation.
//!
//! # Example
//!
//! ```no_run
//! use detect_completion_core::{CompletionRequest, complete};
//! use detect_completion_discovery::{CompletionConfig, OptionCache};
//!
//! let config = CompletionConfig::resolve(None).unwrap();
//! let cache = OptionCache::from_config(&config).unwrap();
//! let completion = complete(&CompletionRequest::new("detect", "--detect.t"), &cache);
//! for candidate in completion.candidates() {
//!     println!("{candidate}");
//! }
//! ```

pub mod artifact;
pub mod cache;
pub mod config;
mod error;
pub mod extractor;
pub mod output;
pub mod report;

pub use artifact::{Artifact, locate_artifact};
pub use cache::{CacheState, OptionCache};
pub use config::CompletionConfig;
pub use error::{DiscoveryError, Result};
pub use extractor::{HelpRunner, ProcessHelpRunner};
