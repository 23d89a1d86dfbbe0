//! Value completers for single-choice and comma-separated list options.

use crate::types::Completion;
use crate::values::{ALL, NONE};

/// Suggests every value starting with `fragment`, closing the word.
///
/// # Examples
///
/// ```
/// use detect_completion_core::completer::complete_single;
/// use detect_completion_core::values::LOG_LEVELS;
///
/// let completion = complete_single(LOG_LEVELS, "D");
/// assert_eq!(completion.candidates(), ["DEBUG".to_string()]);
/// ```
pub fn complete_single(values: &[&str], fragment: &str) -> Completion {
    Completion::closed(filter_prefix(values, fragment))
}

/// Completes one entry of a comma-separated list.
///
/// Without a comma the whole set is offered (sentinels included) and the
/// word stays open. After a comma, parameters already given are excluded,
/// `ALL`/`NONE` are only valid as the sole entry, and each candidate is
/// rendered with the specified prefix and a trailing comma.
///
/// # Examples
///
/// ```
/// use detect_completion_core::completer::complete_list;
/// use detect_completion_core::values::TOOLS;
///
/// let completion = complete_list(TOOLS, "DOCKER,DETECTOR,");
/// assert_eq!(
///     completion.candidates(),
///     [
///         "DOCKER,DETECTOR,BAZEL,",
///         "DOCKER,DETECTOR,SIGNATURE_SCAN,",
///         "DOCKER,DETECTOR,BINARY_SCAN,",
///         "DOCKER,DETECTOR,POLARIS,",
///     ]
/// );
/// ```
pub fn complete_list(values: &[&str], fragment: &str) -> Completion {
    let Some((specified, current)) = fragment.rsplit_once(',') else {
        return Completion::open(filter_prefix(values, fragment));
    };

    let chosen: Vec<&str> = specified.split(',').collect();
    if matches!(chosen.first().copied(), Some(ALL) | Some(NONE)) {
        return Completion::open(Vec::new());
    }

    let candidates = values
        .iter()
        .filter(|value| **value != ALL && **value != NONE)
        .filter(|value| !chosen.contains(*value))
        .filter(|value| value.starts_with(current))
        .map(|value| format!("{specified},{value},"))
        .collect();
    Completion::open(candidates)
}

fn filter_prefix(values: &[&str], prefix: &str) -> Vec<String> {
    values
        .iter()
        .filter(|value| value.starts_with(prefix))
        .map(|value| (*value).to_string())
        .collect()
}
