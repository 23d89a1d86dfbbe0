//! Shell hooks and the line protocol they read.
//!
//! `detect-complete complete` prints a directive line followed by payload
//! lines:
//!
//! | Directive | Payload |
//! |-----------|---------|
//! | `space`   | candidates; a space follows the inserted word |
//! | `nospace` | candidates; the cursor stays after the word |
//! | `files`   | the fragment to hand to `compgen -f` |
//! | `notice`  | a message to show instead of candidates |

use detect_completion_core::{Completion, Terminator};

/// Shells with a generated hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
}

/// Renders a completion in the hook protocol.
pub fn render(completion: &Completion) -> String {
    let (directive, payload): (&str, Vec<&str>) = match completion {
        Completion::Values {
            candidates,
            terminator,
        } => {
            let directive = match terminator {
                Terminator::Space => "space",
                Terminator::None => "nospace",
            };
            (directive, candidates.iter().map(String::as_str).collect())
        }
        Completion::Files { fragment } => ("files", vec![fragment.as_str()]),
        Completion::Notice { message } => ("notice", vec![message.as_str()]),
    };

    let mut out = String::from(directive);
    out.push('\n');
    for line in payload {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Words are taken from `COMP_WORDS`, so quoting is respected, and pieces
/// bash split off at `=` or `:` are glued back onto their word.
const HOOK_TEMPLATE: &str = r#"# Completion for @COMMAND@ generated by detect-complete.
_detect_completion() {
    [[ -n "${ZSH_VERSION-}" ]] && setopt localoptions ksharrays
    local typed="${COMP_LINE:0:COMP_POINT}" trimmed word i last
    local -a parts=()
    for ((i = 0; i <= COMP_CWORD; i++)); do
        word="${COMP_WORDS[i]}"
        trimmed="${typed#"${typed%%[![:space:]]*}"}"
        last=$(( ${#parts[@]} - 1 ))
        if (( last >= 0 && ${#trimmed} == ${#typed} )); then
            parts[last]="${parts[last]}$word"
        else
            parts+=("$word")
        fi
        typed="${trimmed#"$word"}"
    done
    local cur="${parts[${#parts[@]}-1]}" prev=""
    (( ${#parts[@]} > 1 )) && prev="${parts[${#parts[@]}-2]}"

    local output directive fragment sq="'" dq='"'
    COMPREPLY=()

    output="$(@BIN@ complete -- "$prev" "$cur")" || return 0
    directive="${output%%$'\n'*}"
    if [[ "$output" == *$'\n'* ]]; then
        output="${output#*$'\n'}"
    else
        output=""
    fi

    local IFS=$'\n'
    case "$directive" in
        space)
            COMPREPLY=(@SPLIT_OUTPUT@)
            ;;
        nospace)
            COMPREPLY=(@SPLIT_OUTPUT@)
            type compopt >/dev/null 2>&1 && compopt -o nospace 2>/dev/null
            ;;
        files)
            fragment="${output#"$sq"}"
            fragment="${fragment#"$dq"}"
            type compopt >/dev/null 2>&1 && compopt -o filenames 2>/dev/null
            COMPREPLY=(@SPLIT_FILES@)
            ;;
        notice)
            printf '\n%s\n' "$output" >&2
            ;;
    esac
    return 0
}
complete -F _detect_completion @COMMAND@
"#;

/// Generates the hook registering completion for `command_name`, calling
/// the binary at `bin`.
pub fn hook(shell: Shell, command_name: &str, bin: &str) -> String {
    let (prelude, split_output, split_files) = match shell {
        Shell::Bash => ("", "$output", r#"$(compgen -f -- "$fragment")"#),
        Shell::Zsh => (
            "autoload -U +X bashcompinit && bashcompinit\n",
            "${(f)output}",
            r#"${(f)"$(compgen -f -- "$fragment")"}"#,
        ),
    };

    let body = HOOK_TEMPLATE
        .replace("@BIN@", &shell_quote(bin))
        .replace("@COMMAND@", &shell_quote(command_name))
        .replace("@SPLIT_OUTPUT@", split_output)
        .replace("@SPLIT_FILES@", split_files);
    format!("{prelude}{body}")
}

/// Single-quotes `raw` unless it only has characters safe in a shell word.
pub fn shell_quote(raw: &str) -> String {
    let safe = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./+:@".contains(c));
    if safe {
        raw.to_string()
    } else {
        format!("'{}'", raw.replace('\'', r"'\''"))
    }
}
