//! Default values and configuration sections with default implementations.

use serde::{Deserialize, Serialize};

use crate::settings::SCRATCH_DIR;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

default_fn!(default_configuration, String, "Debug".to_string());
default_fn!(default_program, String, "dotnet".to_string());
default_fn!(default_scratch_dir, String, SCRATCH_DIR.to_string());
default_fn!(default_analyzer_args, Vec<String>, crate::analyzer::default_args());

/// Target and build configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Explicit solution/project, relative to the working directory
    #[serde(default)]
    pub target: Option<String>,
    /// Build configuration name (default: Debug)
    #[serde(default = "default_configuration")]
    pub configuration: String,
    /// Target platform, forwarded only when set
    #[serde(default)]
    pub platform: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            target: None,
            configuration: default_configuration(),
            platform: None,
        }
    }
}

/// Pre-release policy configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Fail when any package reference is a pre-release
    #[serde(default)]
    pub reject_prerelease: bool,
    /// Package names exempt from the pre-release check
    #[serde(default)]
    pub allow_prerelease: Vec<String>,
}

/// How the analyzer is launched
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments before the target and configuration; `{scratch}` expands
    /// to the scratch directory
    #[serde(default = "default_analyzer_args")]
    pub args: Vec<String>,
    /// Scratch directory, relative to the working directory
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_analyzer_args(),
            scratch_dir: default_scratch_dir(),
        }
    }
}

/// Native toolchain configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}
