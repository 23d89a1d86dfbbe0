//! End-to-end tests driving the `detect-complete` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_detect-complete");

const FAKE_HELP: &str = "\
Synopsys Detect 9.0.0

--blackduck.url: URL of the Black Duck server
--detect.tools: tools to run
--detect.tools.excluded: tools to skip
--detect.source.path: source directory
";

/// A search directory plus config file pointing at it.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config = dir.path().join("config.yaml");
        let yaml = format!(
            "search_dirs:\n  - {search}\nhelp:\n  program: {program}\n  args: [\"-jar\", \"{{artifact}}\", \"--help\"]\n  timeout_secs: 10\n",
            search = dir.path().display(),
            program = dir.path().join("fake-java").display(),
        );
        fs::write(&config, yaml).expect("failed to write config");
        Self { dir, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Installs a stand-in for `java` that prints help and counts calls.
    #[cfg(unix)]
    fn install_fake_java(&self) {
        use std::os::unix::fs::PermissionsExt;

        let help_file = self.path().join("help.txt");
        fs::write(&help_file, FAKE_HELP).unwrap();
        let script = format!(
            "#!/bin/sh\necho call >> '{calls}'\ncat '{help}'\n",
            calls = self.path().join("calls").display(),
            help = help_file.display(),
        );
        let java = self.path().join("fake-java");
        fs::write(&java, script).unwrap();
        fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn add_artifact(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, b"jar").unwrap();
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(std::time::SystemTime::now() - std::time::Duration::from_secs(60))
            .unwrap();
        path
    }

    fn calls(&self) -> usize {
        fs::read_to_string(self.path().join("calls"))
            .map(|raw| raw.lines().count())
            .unwrap_or(0)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(BIN)
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .output()
            .expect("failed to run detect-complete")
    }

    fn complete(&self, previous: &str, current: &str) -> String {
        let output = self.run(&["complete", "--", previous, current]);
        assert!(
            output.status.success(),
            "complete failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }
}

// ---------------------------------------------------------------------------
// complete
// ---------------------------------------------------------------------------

#[test]
fn complete_log_level_value() {
    let ws = Workspace::new();
    assert_eq!(
        ws.complete("detect", "--logging.level.detect=D"),
        "space\nDEBUG\n"
    );
}

#[test]
fn complete_tools_list_excludes_chosen() {
    let ws = Workspace::new();
    assert_eq!(
        ws.complete("detect", "--detect.tools=DOCKER,DETECTOR,"),
        "nospace\nDOCKER,DETECTOR,BAZEL,\nDOCKER,DETECTOR,SIGNATURE_SCAN,\nDOCKER,DETECTOR,BINARY_SCAN,\nDOCKER,DETECTOR,POLARIS,\n"
    );
}

#[test]
fn complete_value_after_space_separated_option() {
    let ws = Workspace::new();
    assert_eq!(
        ws.complete("--detect.project.version.distribution", "S"),
        "space\nSAAS\n"
    );
}

#[test]
fn complete_path_delegates_to_shell() {
    let ws = Workspace::new();
    assert_eq!(
        ws.complete("detect", "--detect.source.path=./sr"),
        "files\n./sr\n"
    );
}

#[test]
fn complete_without_artifact_prints_notice() {
    let ws = Workspace::new();
    let out = ws.complete("detect", "--det");
    assert!(out.starts_with("notice\n"), "unexpected output: {out}");
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn complete_survives_broken_config() {
    let ws = Workspace::new();
    fs::write(&ws.config, "search_dirs: {broken: [\n").unwrap();
    assert_eq!(ws.complete("detect", "--detect.project.tier=4"), "space\n4\n");
}

#[test]
fn complete_without_arguments_succeeds() {
    let ws = Workspace::new();
    let output = ws.run(&["complete"]);
    assert!(output.status.success());
}

#[cfg(unix)]
#[test]
fn complete_option_names_builds_cache_once() {
    let ws = Workspace::new();
    ws.install_fake_java();
    let jar = ws.add_artifact("synopsys-detect-9.0.0.jar");

    assert_eq!(
        ws.complete("detect", "--detect.t"),
        "nospace\n--detect.tools\n--detect.tools.excluded\n"
    );
    let cache_file = PathBuf::from(format!("{}.options", jar.display()));
    let first = fs::read(&cache_file).expect("cache should exist");

    assert_eq!(
        ws.complete("detect", "--b"),
        "nospace\n--blackduck.url\n"
    );
    let second = fs::read(&cache_file).unwrap();

    assert_eq!(first, second);
    assert_eq!(ws.calls(), 1);
}

#[cfg(unix)]
#[test]
fn complete_option_names_after_finished_assignment() {
    let ws = Workspace::new();
    ws.install_fake_java();
    ws.add_artifact("synopsys-detect-9.0.0.jar");

    for previous in ["--detect.docker.tar=image.tar", "image.tar"] {
        assert_eq!(
            ws.complete(previous, "--detect.t"),
            "nospace\n--detect.tools\n--detect.tools.excluded\n",
            "previous word {previous}"
        );
    }
}

#[cfg(unix)]
#[test]
fn complete_announces_first_cache_build() {
    let ws = Workspace::new();
    ws.install_fake_java();
    ws.add_artifact("synopsys-detect-9.0.0.jar");

    let output = ws.run(&["complete", "--", "detect", "--b"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "nospace\n--blackduck.url\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Building option cache"), "stderr: {stderr}");

    let output = ws.run(&["complete", "--", "detect", "--b"]);
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");
}

#[cfg(unix)]
#[test]
fn complete_probes_broken_artifact_once() {
    let ws = Workspace::new();
    ws.install_fake_java();
    fs::write(ws.path().join("help.txt"), "Error: Invalid or corrupt jarfile\n").unwrap();
    ws.add_artifact("synopsys-detect-9.0.0.jar");

    for _ in 0..3 {
        assert_eq!(ws.complete("detect", "--det"), "nospace\n");
    }
    assert_eq!(ws.calls(), 1);

    let output = ws.run(&["refresh"]);
    assert!(!output.status.success());
    assert_eq!(ws.calls(), 2);
}

// ---------------------------------------------------------------------------
// maintenance commands
// ---------------------------------------------------------------------------

#[test]
fn init_bash_registers_configured_command() {
    let ws = Workspace::new();
    let output = ws.run(&["init", "bash"]);
    assert!(output.status.success());
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("complete -F _detect_completion detect\n"));
    assert!(script.contains("complete -- \"$prev\" \"$cur\")\""));
}

#[test]
fn init_accepts_command_name_override() {
    let ws = Workspace::new();
    let output = ws.run(&["init", "zsh", "--command-name", "detect9"]);
    assert!(output.status.success());
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("bashcompinit"));
    assert!(script.contains("complete -F _detect_completion detect9\n"));
}

#[test]
fn refresh_without_artifact_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["refresh"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no Detect artifact found"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn refresh_then_options_json() {
    let ws = Workspace::new();
    ws.install_fake_java();
    ws.add_artifact("synopsys-detect-9.0.0.jar");

    let output = ws.run(&["refresh"]);
    assert!(
        output.status.success(),
        "refresh failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Cached 4 option(s)"));

    let output = ws.run(&["refresh"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("up to date"));
    assert_eq!(ws.calls(), 1);

    let output = ws.run(&["refresh", "--force"]);
    assert!(output.status.success());
    assert_eq!(ws.calls(), 2);

    let output = ws.run(&["options", "--format", "json"]);
    assert!(output.status.success());
    let options: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        options,
        [
            "--blackduck.url",
            "--detect.tools",
            "--detect.tools.excluded",
            "--detect.source.path"
        ]
    );
}

#[cfg(unix)]
#[test]
fn status_reports_fresh_cache() {
    let ws = Workspace::new();
    ws.install_fake_java();
    ws.add_artifact("synopsys-detect-9.0.0.jar");

    let output = ws.run(&["status", "--format", "json"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["cache_status"], "missing");

    assert!(ws.run(&["refresh"]).status.success());

    let output = ws.run(&["status", "--format", "json"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["cache_status"], "fresh");
    assert_eq!(report["option_count"], 4);
}

#[test]
fn status_without_artifact() {
    let ws = Workspace::new();
    let output = ws.run(&["status"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Artifact: not found\n");
}

#[test]
fn explain_reports_category() {
    let ws = Workspace::new();
    let output = ws.run(&["explain", "--format", "json", "--", "--detect.tools.excluded"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["category"], "tools");
    assert_eq!(report["strategy"], "list");
    assert_eq!(report["rule"], "exact");
}
