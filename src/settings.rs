//! Resolved input settings for one orchestration run.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::policy::PrereleasePolicy;

/// Default scratch directory, relative to the working directory.
pub const SCRATCH_DIR: &str = ".sharpgraph/analyzer";

/// Build configuration forwarded to the analyzer and the toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSettings {
    pub configuration: String,
    pub platform: Option<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            configuration: "Debug".to_string(),
            platform: None,
        }
    }
}

impl BuildSettings {
    /// Render the analyzer configuration argument.
    ///
    /// The analyzer expects a single-quoted object literal:
    /// `{'Platform':'x64','Configuration':'Release'}`, with `Platform`
    /// omitted when unset.
    pub fn analyzer_argument(&self) -> String {
        let mut fields = Vec::with_capacity(2);
        if let Some(platform) = &self.platform {
            fields.push(format!("'Platform':'{}'", platform));
        }
        fields.push(format!("'Configuration':'{}'", self.configuration));
        format!("{{{}}}", fields.join(","))
    }
}

/// Everything a run needs to know up front.
#[derive(Debug, Clone, Serialize)]
pub struct RunSettings {
    pub working_dir: PathBuf,
    /// Explicit solution/project path, relative to `working_dir`.
    pub target: Option<PathBuf>,
    pub build: BuildSettings,
    pub policy: PrereleasePolicy,
    /// Overrides the default scratch location.
    pub scratch_dir: Option<PathBuf>,
}

impl RunSettings {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            target: None,
            build: BuildSettings::default(),
            policy: PrereleasePolicy::default(),
            scratch_dir: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_build(mut self, build: BuildSettings) -> Self {
        self.build = build;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.policy.strict = strict;
        self
    }

    /// Scratch directory for this run, resolved against the working directory.
    pub fn scratch_path(&self) -> PathBuf {
        let dir = self
            .scratch_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(SCRATCH_DIR));
        self.working_dir.join(dir)
    }
}
