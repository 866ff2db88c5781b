use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::common;

/// Isolated workspace for driving the sharpgraph binary.
///
/// Holds a working directory and a separate HOME so no global config from
/// the machine running the tests leaks in. The analyzer is replaced by a
/// shell script that prints canned output and records its arguments.
pub struct TestWorkspace {
    pub dir: TempDir,
    pub home: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            home: TempDir::new().expect("Failed to create temp home"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        common::write_file(&path, content).expect("Failed to write file");
        path
    }

    /// Configure a fake analyzer printing `stdout` and exiting with `exit_code`.
    pub fn fake_analyzer(&self, stdout: &str, exit_code: i32) {
        self.fake_analyzer_with_config(stdout, exit_code, "");
    }

    /// Same as `fake_analyzer`, with extra YAML appended to the config.
    pub fn fake_analyzer_with_config(&self, stdout: &str, exit_code: i32, extra_yaml: &str) {
        let fake_dir = self.home.path().join("fake");
        let payload = fake_dir.join("payload.txt");
        let args_log = fake_dir.join("args.txt");
        let script = fake_dir.join("analyzer.sh");

        common::write_file(&payload, stdout).expect("Failed to write payload");
        common::write_file(
            &script,
            &format!(
                "printf '%s\\n' \"$1\" \"$2\" > '{}'\ncat '{}'\necho 'analyzer diagnostics' >&2\nexit {}\n",
                args_log.display(),
                payload.display(),
                exit_code
            ),
        )
        .expect("Failed to write analyzer script");

        self.file(
            ".sharpgraph/config.md",
            &format!(
                "---\nanalyzer:\n  program: sh\n  args:\n    - '{}'\n{}---\n\n# Test config\n",
                script.display(),
                extra_yaml
            ),
        );
    }

    /// Arguments the fake analyzer last received, if it ran.
    pub fn analyzer_args(&self) -> Option<Vec<String>> {
        let log = self.home.path().join("fake").join("args.txt");
        fs::read_to_string(log)
            .ok()
            .map(|s| s.lines().map(str::to_string).collect())
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sharpgraph"))
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("SHARPGRAPH_QUIET")
            .output()
            .expect("Failed to run sharpgraph")
    }
}
