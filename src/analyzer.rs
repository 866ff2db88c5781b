//! Staging and invocation of the external project analyzer.
//!
//! The analyzer is an opaque collaborator: it receives the target path and a
//! configuration argument, and answers on stdout. [`ProjectAnalyzer`] is the
//! seam; [`ProcessAnalyzer`] runs the real subprocess.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{PipelineError, PipelineResult};
use crate::model::ResolvedTarget;
use crate::settings::BuildSettings;

/// Placeholder in configured analyzer arguments, replaced by the scratch path.
pub const SCRATCH_PLACEHOLDER: &str = "{scratch}";

/// A file compiled into the binary and written out before each run.
#[derive(Debug, Clone, Copy)]
pub struct BundleFile {
    pub name: &'static str,
    pub contents: &'static str,
}

/// The analyzer sources shipped with sharpgraph.
pub const EMBEDDED_BUNDLE: &[BundleFile] = &[
    BundleFile {
        name: "ProjectAnalyzer.csproj",
        contents: include_str!("../assets/analyzer/ProjectAnalyzer.csproj"),
    },
    BundleFile {
        name: "Program.cs",
        contents: include_str!("../assets/analyzer/Program.cs"),
    },
];

/// What the analyzer process produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl AnalyzerOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    fn diagnostics(&self) -> String {
        let mut out = String::new();
        for part in [self.stdout.trim(), self.stderr.trim()] {
            if part.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(part);
        }
        out
    }
}

/// Trait for analyzer backends
pub trait ProjectAnalyzer {
    /// Analyze `target`. `config` is the rendered configuration argument.
    ///
    /// An `Err` means the analyzer could not be started at all.
    fn analyze(&self, target: &ResolvedTarget, config: &str) -> std::io::Result<AnalyzerOutput>;
}

/// Runs the analyzer as a child process and blocks until it exits.
#[derive(Debug, Clone)]
pub struct ProcessAnalyzer {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl ProcessAnalyzer {
    pub fn new<I, A>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            current_dir: None,
        }
    }

    /// The default `dotnet run` invocation of the staged bundle.
    pub fn dotnet(scratch: &Path) -> Self {
        Self::configured("dotnet", &default_args(), scratch)
    }

    /// Build from configured program/args, expanding the scratch placeholder.
    pub fn configured(program: &str, args: &[String], scratch: &Path) -> Self {
        Self::new(program, args.iter().map(|a| expand_scratch(a, scratch)))
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

/// Default analyzer arguments, before placeholder expansion.
pub fn default_args() -> Vec<String> {
    vec![
        "run".to_string(),
        "--project".to_string(),
        format!("{}/ProjectAnalyzer.csproj", SCRATCH_PLACEHOLDER),
        "--".to_string(),
    ]
}

/// Replace every placeholder in `arg` with `scratch`, keeping the path's
/// platform encoding intact.
fn expand_scratch(arg: &str, scratch: &Path) -> OsString {
    let mut parts = arg.split(SCRATCH_PLACEHOLDER);
    let mut expanded = OsString::from(parts.next().unwrap_or_default());
    for part in parts {
        expanded.push(scratch.as_os_str());
        expanded.push(part);
    }
    expanded
}

impl ProjectAnalyzer for ProcessAnalyzer {
    fn analyze(&self, target: &ResolvedTarget, config: &str) -> std::io::Result<AnalyzerOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(target.path())
            .arg(config)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output()?;
        Ok(AnalyzerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

/// Write `bundle` into `dir`, creating it if needed.
///
/// Existing files with other names are left alone; same-named files are
/// overwritten.
pub fn stage(dir: &Path, bundle: &[BundleFile]) -> PipelineResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        PipelineError::io(
            format!("Failed to create scratch directory {}", dir.display()),
            e,
        )
    })?;

    for file in bundle {
        let path = dir.join(file.name);
        fs::write(&path, file.contents).map_err(|e| {
            PipelineError::io(format!("Failed to stage {}", path.display()), e)
        })?;
    }
    Ok(())
}

/// Stages the bundle, runs the analyzer, and returns its stdout.
pub struct AnalyzerInvoker<'a> {
    analyzer: &'a dyn ProjectAnalyzer,
    scratch: PathBuf,
    bundle: &'a [BundleFile],
}

impl<'a> AnalyzerInvoker<'a> {
    pub fn new(analyzer: &'a dyn ProjectAnalyzer, scratch: impl Into<PathBuf>) -> Self {
        Self {
            analyzer,
            scratch: scratch.into(),
            bundle: EMBEDDED_BUNDLE,
        }
    }

    pub fn with_bundle(mut self, bundle: &'a [BundleFile]) -> Self {
        self.bundle = bundle;
        self
    }

    pub fn invoke(&self, target: &ResolvedTarget, build: &BuildSettings) -> PipelineResult<String> {
        stage(&self.scratch, self.bundle)?;

        let output = self
            .analyzer
            .analyze(target, &build.analyzer_argument())
            .map_err(|e| PipelineError::AnalyzerFailed {
                exit_code: None,
                output: format!("Failed to start analyzer: {}", e),
            })?;

        if !output.success() {
            let mut diagnostics = output.diagnostics();
            if output.exit_code.is_none() {
                if !diagnostics.is_empty() {
                    diagnostics.push('\n');
                }
                diagnostics.push_str("analyzer terminated by signal");
            }
            return Err(PipelineError::AnalyzerFailed {
                exit_code: output.exit_code,
                output: diagnostics,
            });
        }

        Ok(output.stdout)
    }
}
