//! Validation logic for configuration sections.

use anyhow::Result;

use super::defaults::{AnalyzerConfig, BuildConfig, ToolchainConfig};
use super::Config;

impl BuildConfig {
    /// Validate build configuration
    pub fn validate(&self) -> Result<()> {
        validate_build_values(&self.configuration, self.platform.as_deref())
    }
}

/// Configuration and platform end up inside a single-quoted analyzer
/// argument, so they must be non-empty and free of quotes wherever they
/// come from.
pub(super) fn validate_build_values(configuration: &str, platform: Option<&str>) -> Result<()> {
    if configuration.trim().is_empty() {
        anyhow::bail!("build.configuration must not be empty");
    }
    if configuration.contains('\'') {
        anyhow::bail!(
            "build.configuration must not contain quotes, got {}",
            configuration
        );
    }
    if let Some(platform) = platform {
        if platform.trim().is_empty() {
            anyhow::bail!("build.platform must not be empty");
        }
        if platform.contains('\'') {
            anyhow::bail!("build.platform must not contain quotes, got {}", platform);
        }
    }
    Ok(())
}

impl AnalyzerConfig {
    /// Validate analyzer configuration
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            anyhow::bail!("analyzer.program must not be empty");
        }
        if self.scratch_dir.trim().is_empty() {
            anyhow::bail!("analyzer.scratch_dir must not be empty");
        }
        Ok(())
    }
}

impl ToolchainConfig {
    /// Validate toolchain configuration
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            anyhow::bail!("toolchain.program must not be empty");
        }
        Ok(())
    }
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.build.validate()?;
        self.analyzer.validate()?;
        self.toolchain.validate()
    }
}
