//! Completion entry point: word splitting and dispatch.

use crate::category::{OptionCategory, Strategy};
use crate::completer::{complete_list, complete_single};
use crate::table::classify;
use crate::types::{Completion, OptionList, OptionSource};

/// The words a shell hands over for one completion request.
///
/// When the current word has the `--name=value` form, the part before the
/// first `=` names the option and the shell's previous word is ignored.
/// Otherwise the previous word names the option only if it is a bare
/// `--name`; a value or a finished `--name=value` word names none.
///
/// # Examples
///
/// ```
/// use detect_completion_core::CompletionRequest;
///
/// let request = CompletionRequest::new("detect", "--detect.tools=DOC");
/// assert_eq!(request.option(), "--detect.tools");
/// assert_eq!(request.fragment(), "DOC");
/// assert!(request.has_assignment());
///
/// let request = CompletionRequest::new("--logging.level.detect", "IN");
/// assert_eq!(request.option(), "--logging.level.detect");
/// assert_eq!(request.fragment(), "IN");
///
/// let request = CompletionRequest::new("--detect.docker.tar=image.tar", "--det");
/// assert_eq!(request.option(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    option: String,
    fragment: String,
    current: String,
    assignment: bool,
}

impl CompletionRequest {
    pub fn new(previous: &str, current: &str) -> Self {
        match current.split_once('=') {
            Some((option, fragment)) => Self {
                option: option.to_string(),
                fragment: fragment.to_string(),
                current: current.to_string(),
                assignment: true,
            },
            None => Self {
                option: if awaits_value(previous) {
                    previous.to_string()
                } else {
                    String::new()
                },
                fragment: current.to_string(),
                current: current.to_string(),
                assignment: false,
            },
        }
    }

    /// Option whose value is being completed.
    pub fn option(&self) -> &str {
        &self.option
    }

    /// Partial value typed so far.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The raw current word, as typed.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn has_assignment(&self) -> bool {
        self.assignment
    }

    /// Category selected by the dispatch table, if any.
    pub fn category(&self) -> Option<OptionCategory> {
        classify(&self.option)
    }
}

fn awaits_value(word: &str) -> bool {
    word.starts_with('-') && !word.contains('=')
}

/// Produces the suggestions for `request`.
///
/// Exactly one branch fires: a categorized option is completed from its
/// value set (or handed to the shell for paths); anything else completes
/// option names from `source`.
///
/// # Examples
///
/// ```
/// use detect_completion_core::{Completion, CompletionRequest, complete};
///
/// let options = vec!["--detect.tools".to_string(), "--detect.cleanup".to_string()];
///
/// let completion = complete(&CompletionRequest::new("", "--logging.level.detect=W"), &options);
/// assert_eq!(completion.candidates(), ["WARN".to_string()]);
///
/// let completion = complete(&CompletionRequest::new("detect", "--detect.t"), &options);
/// assert_eq!(completion.candidates(), ["--detect.tools".to_string()]);
/// ```
pub fn complete(request: &CompletionRequest, source: &dyn OptionSource) -> Completion {
    match request.category() {
        Some(category) => complete_value(category, request.fragment()),
        None => complete_option_name(request.current(), source),
    }
}

/// Completes a value of an option in `category`.
pub fn complete_value(category: OptionCategory, fragment: &str) -> Completion {
    match category.strategy() {
        Strategy::Single => complete_single(category.values(), fragment),
        Strategy::List => complete_list(category.values(), fragment),
        Strategy::Files => Completion::Files {
            fragment: fragment.to_string(),
        },
    }
}

fn complete_option_name(prefix: &str, source: &dyn OptionSource) -> Completion {
    match source.option_names() {
        OptionList::Available(names) => Completion::open(
            names
                .into_iter()
                .filter(|name| name.starts_with(prefix))
                .collect(),
        ),
        OptionList::Unavailable(message) => Completion::notice(message),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::types::Terminator;
    use crate::values::{LOG_LEVELS, TOOLS};

    struct CountingSource {
        names: Vec<String>,
        calls: Cell<usize>,
    }

    impl OptionSource for CountingSource {
        fn option_names(&self) -> OptionList {
            self.calls.set(self.calls.get() + 1);
            OptionList::Available(self.names.clone())
        }
    }

    fn source() -> CountingSource {
        CountingSource {
            names: vec![
                "--blackduck.url".to_string(),
                "--detect.cleanup".to_string(),
                "--detect.tools".to_string(),
                "--detect.tools.excluded".to_string(),
            ],
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_split_on_first_equals_only() {
        let request = CompletionRequest::new("x", "--detect.project.name=a=b");
        assert_eq!(request.option(), "--detect.project.name");
        assert_eq!(request.fragment(), "a=b");
    }

    #[test]
    fn test_assignment_overrides_previous_word() {
        let request = CompletionRequest::new("--detect.tools", "--logging.level.detect=");
        assert_eq!(request.category(), Some(OptionCategory::LogLevel));
    }

    #[test]
    fn test_fixed_option_full_set_for_empty_fragment() {
        let source = source();
        let completion = complete(&CompletionRequest::new("--logging.level.detect", ""), &source);
        assert_eq!(completion.candidates(), LOG_LEVELS);
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_log_level_debug_example() {
        let completion = complete(
            &CompletionRequest::new("", "--logging.level.com.synopsys.integration=D"),
            &source(),
        );
        assert_eq!(completion.candidates(), ["DEBUG"]);
    }

    #[test]
    fn test_tools_list_example() {
        let completion = complete(
            &CompletionRequest::new("", "--detect.tools=DOCKER,DETECTOR,"),
            &source(),
        );
        assert_eq!(
            completion.candidates(),
            [
                "DOCKER,DETECTOR,BAZEL,",
                "DOCKER,DETECTOR,SIGNATURE_SCAN,",
                "DOCKER,DETECTOR,BINARY_SCAN,",
                "DOCKER,DETECTOR,POLARIS,",
            ]
        );
    }

    #[test]
    fn test_space_separated_value_uses_previous_word() {
        let completion = complete(&CompletionRequest::new("--detect.tools.excluded", ""), &source());
        assert_eq!(completion.candidates(), TOOLS);
    }

    #[test]
    fn test_boolean_option_offers_true_false() {
        let completion = complete(&CompletionRequest::new("", "--detect.cleanup="), &source());
        assert_eq!(
            completion,
            Completion::Values {
                candidates: vec!["true".into(), "false".into()],
                terminator: Terminator::Space,
            }
        );
    }

    #[test]
    fn test_path_option_delegates_to_shell() {
        let completion = complete(&CompletionRequest::new("", "--detect.source.path=./sr"), &source());
        assert_eq!(
            completion,
            Completion::Files {
                fragment: "./sr".into()
            }
        );
    }

    #[test]
    fn test_unknown_option_falls_back_to_option_names() {
        let source = source();
        let completion = complete(&CompletionRequest::new("detect", "--detect.to"), &source);
        assert_eq!(
            completion,
            Completion::open(vec![
                "--detect.tools".to_string(),
                "--detect.tools.excluded".to_string()
            ])
        );
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn test_previous_value_word_completes_option_names() {
        for previous in [
            "--detect.docker.tar=image.tar",
            "image.tar",
            "--detect.project.name=darkmode",
            "/opt/source/path",
        ] {
            let completion = complete(&CompletionRequest::new(previous, "--det"), &source());
            assert_eq!(
                completion,
                Completion::open(vec![
                    "--detect.cleanup".to_string(),
                    "--detect.tools".to_string(),
                    "--detect.tools.excluded".to_string(),
                ]),
                "previous word {previous:?}"
            );
        }
    }

    #[test]
    fn test_only_bare_option_names_value() {
        assert_eq!(CompletionRequest::new("--detect.cleanup", "t").option(), "--detect.cleanup");
        assert_eq!(CompletionRequest::new("-x", "").option(), "-x");
        assert_eq!(CompletionRequest::new("detect", "").option(), "");
        assert_eq!(CompletionRequest::new("--detect.tools=ALL", "").option(), "");
        assert_eq!(CompletionRequest::new("mode", "").category(), None);
    }

    #[test]
    fn test_unknown_assignment_yields_no_names() {
        let completion = complete(&CompletionRequest::new("", "--blackduck.url=ht"), &source());
        assert!(completion.candidates().is_empty());
    }

    #[test]
    fn test_unavailable_source_becomes_notice() {
        let source = OptionList::Unavailable("no artifact".to_string());
        let completion = complete(&CompletionRequest::new("detect", "--"), &source);
        assert_eq!(completion, Completion::notice("no artifact"));
    }

    #[test]
    fn test_value_for_fixed_option_never_consults_source() {
        let source = OptionList::Unavailable("no artifact".to_string());
        let completion = complete(&CompletionRequest::new("", "--detect.project.tier=3"), &source);
        assert_eq!(completion.candidates(), ["3"]);
    }
}
