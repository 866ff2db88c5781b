//! Cross-project policy checks over a decoded [`ProjectGraph`].

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::model::{PackageReference, ProjectGraph, ValidationViolation};

/// Pre-release reference policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrereleasePolicy {
    /// Fail the run when a pre-release reference is found.
    #[serde(default)]
    pub strict: bool,
    /// Package names exempt from the check (case-insensitive).
    #[serde(default)]
    pub allow: Vec<String>,
}

impl PrereleasePolicy {
    pub fn strict() -> Self {
        Self {
            strict: true,
            allow: Vec::new(),
        }
    }

    fn is_allowed(&self, reference: &PackageReference) -> bool {
        self.allow
            .iter()
            .any(|name| name.eq_ignore_ascii_case(reference.name()))
    }

    /// Every pre-release reference in the graph, grouped by project in
    /// graph order and by declaration order within a project.
    pub fn find_violations(&self, graph: &ProjectGraph) -> Vec<ValidationViolation> {
        graph
            .projects()
            .flat_map(|project| {
                project
                    .package_references()
                    .iter()
                    .filter(|r| r.is_prerelease() && !self.is_allowed(r))
                    .map(move |r| ValidationViolation {
                        project_identifier: project.identifier().to_string(),
                        reference: r.clone(),
                    })
            })
            .collect()
    }

    /// Enforce the policy. A non-strict policy never looks at the graph.
    pub fn enforce(&self, graph: &ProjectGraph) -> PipelineResult<()> {
        if !self.strict {
            return Ok(());
        }

        let violations = self.find_violations(graph);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::PolicyViolation(violations))
        }
    }
}

/// Check `graph` for pre-release references when `strict` is set.
pub fn validate(graph: &ProjectGraph, strict: bool) -> PipelineResult<()> {
    PrereleasePolicy {
        strict,
        allow: Vec::new(),
    }
    .enforce(graph)
}

/// Group a flat violation list by project, keeping the incoming order.
pub fn group_by_project(
    violations: &[ValidationViolation],
) -> Vec<(&str, Vec<&PackageReference>)> {
    let mut groups: Vec<(&str, Vec<&PackageReference>)> = Vec::new();
    for v in violations {
        match groups.last_mut() {
            Some((project, refs)) if *project == v.project_identifier => refs.push(&v.reference),
            _ => groups.push((v.project_identifier.as_str(), vec![&v.reference])),
        }
    }
    groups
}
