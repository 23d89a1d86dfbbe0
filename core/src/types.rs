//! Completion result types and the option-source seam.
//!
//! A single completion request produces exactly one [`Completion`]. The
//! engine never fails: "nothing to suggest" is an empty
//! [`Completion::Values`], and a missing tool artifact is a
//! [`Completion::Notice`].

use serde::{Deserialize, Serialize};

/// What the shell should do after inserting a candidate.
///
/// # Examples
///
/// ```
/// use detect_completion_core::Terminator;
///
/// assert_eq!(Terminator::default(), Terminator::Space);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Terminator {
    /// Append a space so the cursor moves on to the next word.
    #[default]
    Space,
    /// Leave the cursor in place; the value (or option) may continue.
    None,
}

/// Outcome of one completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Completion {
    /// Candidate words, in suggestion order.
    Values {
        candidates: Vec<String>,
        terminator: Terminator,
    },
    /// Path completion is delegated to the shell for `fragment`.
    Files { fragment: String },
    /// Informational one-liner shown instead of suggestions.
    Notice { message: String },
}

impl Completion {
    /// Candidates that the shell inserts followed by a space.
    pub fn closed(candidates: Vec<String>) -> Self {
        Self::Values {
            candidates,
            terminator: Terminator::Space,
        }
    }

    /// Candidates that leave the cursor in place.
    pub fn open(candidates: Vec<String>) -> Self {
        Self::Values {
            candidates,
            terminator: Terminator::None,
        }
    }

    /// An empty candidate list.
    pub fn empty() -> Self {
        Self::closed(Vec::new())
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }

    /// Returns the candidate words, or an empty slice for files/notice.
    ///
    /// # Examples
    ///
    /// ```
    /// use detect_completion_core::Completion;
    ///
    /// let completion = Completion::closed(vec!["INFO".to_string()]);
    /// assert_eq!(completion.candidates(), ["INFO".to_string()]);
    /// assert!(Completion::notice("no jar").candidates().is_empty());
    /// ```
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Values { candidates, .. } => candidates,
            Self::Files { .. } | Self::Notice { .. } => &[],
        }
    }
}

/// Option names known for the tool, or the reason they are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionList {
    Available(Vec<String>),
    /// No artifact to read options from; carries a notice for the user.
    Unavailable(String),
}

/// Supplies the full option-name list used when no specific option matches.
///
/// Implemented by the on-disk option cache; tests use in-memory lists.
pub trait OptionSource {
    fn option_names(&self) -> OptionList;
}

impl OptionSource for Vec<String> {
    fn option_names(&self) -> OptionList {
        OptionList::Available(self.clone())
    }
}

impl OptionSource for OptionList {
    fn option_names(&self) -> OptionList {
        self.clone()
    }
}
