//! Orchestration entry point.
//!
//! One run resolves the target, runs the analyzer, decodes its output and
//! enforces the pre-release policy, strictly in that order. The first failing
//! stage ends the run; no partial graph is ever returned.

use serde::Serialize;

use crate::analyzer::{AnalyzerInvoker, BundleFile, ProjectAnalyzer, EMBEDDED_BUNDLE};
use crate::decode;
use crate::error::PipelineResult;
use crate::model::{ProjectGraph, ResolvedTarget, ValidationViolation};
use crate::settings::RunSettings;
use crate::target;

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct OrchestrationRun {
    pub target: ResolvedTarget,
    pub graph: ProjectGraph,
    #[serde(skip)]
    settings: RunSettings,
}

impl OrchestrationRun {
    /// Pre-release references under the run's policy, whether or not the
    /// policy was strict.
    pub fn violations(&self) -> Vec<ValidationViolation> {
        self.settings.policy.find_violations(&self.graph)
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }
}

pub struct Orchestrator<'a> {
    settings: RunSettings,
    analyzer: &'a dyn ProjectAnalyzer,
    bundle: &'a [BundleFile],
}

impl<'a> Orchestrator<'a> {
    pub fn new(settings: RunSettings, analyzer: &'a dyn ProjectAnalyzer) -> Self {
        Self {
            settings,
            analyzer,
            bundle: EMBEDDED_BUNDLE,
        }
    }

    pub fn with_bundle(mut self, bundle: &'a [BundleFile]) -> Self {
        self.bundle = bundle;
        self
    }

    /// Resolve the target only, without touching the analyzer.
    pub fn resolve_target(&self) -> PipelineResult<ResolvedTarget> {
        target::resolve(&self.settings.working_dir, self.settings.target.as_deref())
    }

    pub fn run(self) -> PipelineResult<OrchestrationRun> {
        let target = self.resolve_target()?;

        let stdout = AnalyzerInvoker::new(self.analyzer, self.settings.scratch_path())
            .with_bundle(self.bundle)
            .invoke(&target, &self.settings.build)?;

        let graph = decode::decode(&stdout)?;

        self.settings.policy.enforce(&graph)?;

        Ok(OrchestrationRun {
            target,
            graph,
            settings: self.settings,
        })
    }
}
