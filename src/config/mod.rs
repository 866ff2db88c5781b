//! Configuration management for sharpgraph.
//!
//! Settings live in the YAML frontmatter of markdown files. A global file
//! supplies defaults, the project file overrides it section by section, and
//! command-line flags override both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::ProcessAnalyzer;
use crate::policy::PrereleasePolicy;
use crate::settings::{BuildSettings, RunSettings};

pub mod defaults;
pub mod validation;

pub use defaults::*;

/// Project config location, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".sharpgraph/config.md";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// Command-line values that take precedence over config files.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<PathBuf>,
    pub configuration: Option<String>,
    pub platform: Option<String>,
    /// Only ever turns strict mode on.
    pub strict: bool,
}

impl Config {
    /// Load the merged configuration for `working_dir`.
    pub fn load(working_dir: &Path) -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            &working_dir.join(PROJECT_CONFIG),
        )
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;

        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from the given global and project paths.
    /// Either file may be missing. Project sections override global ones.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;
        Ok(config)
    }

    /// Combine with command-line overrides into the settings of one run.
    ///
    /// Overridden build values are held to the same rules as configured ones.
    pub fn run_settings(&self, working_dir: &Path, overrides: &Overrides) -> Result<RunSettings> {
        let build = BuildSettings {
            configuration: overrides
                .configuration
                .clone()
                .unwrap_or_else(|| self.build.configuration.clone()),
            platform: overrides
                .platform
                .clone()
                .or_else(|| self.build.platform.clone()),
        };
        validation::validate_build_values(&build.configuration, build.platform.as_deref())
            .context("Invalid command-line override")?;

        Ok(RunSettings {
            working_dir: working_dir.to_path_buf(),
            target: overrides
                .target
                .clone()
                .or_else(|| self.build.target.as_ref().map(PathBuf::from)),
            build,
            policy: PrereleasePolicy {
                strict: overrides.strict || self.policy.reject_prerelease,
                allow: self.policy.allow_prerelease.clone(),
            },
            scratch_dir: Some(PathBuf::from(&self.analyzer.scratch_dir)),
        })
    }

    /// The analyzer process described by this config.
    pub fn analyzer(&self, settings: &RunSettings) -> ProcessAnalyzer {
        ProcessAnalyzer::configured(
            &self.analyzer.program,
            &self.analyzer.args,
            &settings.scratch_path(),
        )
        .current_dir(&settings.working_dir)
    }
}

/// Returns the path to the global config file at ~/.config/sharpgraph/config.md
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/sharpgraph/config.md"))
}

/// Split `---` delimited YAML frontmatter from the markdown body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    if !content.starts_with("---") {
        return (None, content);
    }

    // The block closes at the first line consisting of `---` alone
    let rest = &content[3..];
    let mut offset = 0;
    for (i, line) in rest.split_inclusive('\n').enumerate() {
        if i > 0 && line.trim_end() == "---" {
            let frontmatter = rest[..offset].to_string();
            let body = rest[offset + line.len()..].trim_start();
            return (Some(frontmatter), body);
        }
        offset += line.len();
    }
    (None, content)
}

/// Partial config for merging - all sections optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub build: Option<PartialBuildConfig>,
    pub policy: Option<PolicyConfig>,
    pub analyzer: Option<AnalyzerConfig>,
    pub toolchain: Option<ToolchainConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialBuildConfig {
    pub target: Option<String>,
    pub configuration: Option<String>,
    pub platform: Option<String>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        // An empty frontmatter block deserializes to YAML null
        if frontmatter.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge this global config with a project config.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_build = self.build.unwrap_or_default();
        let project_build = project.build.unwrap_or_default();

        Config {
            build: BuildConfig {
                // The target only makes sense per project
                target: project_build.target,
                configuration: project_build
                    .configuration
                    .or(global_build.configuration)
                    .unwrap_or_else(defaults::default_configuration),
                platform: project_build.platform.or(global_build.platform),
            },
            policy: project.policy.or(self.policy).unwrap_or_default(),
            analyzer: project.analyzer.or(self.analyzer).unwrap_or_default(),
            toolchain: project.toolchain.or(self.toolchain).unwrap_or_default(),
        }
    }
}
