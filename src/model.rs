//! Project model types produced by decoding analyzer output.
//!
//! Everything here is immutable once built: the decoder constructs the
//! values and every later stage only reads them.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Open attribute bag for analyzer fields the model does not name explicitly.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// A single dependency declaration of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReference {
    name: String,
    version: Option<String>,
}

impl PackageReference {
    /// Create a reference. Returns `None` when `name` is empty.
    pub fn new(name: impl Into<String>, version: Option<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self { name, version })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// A version containing a hyphen marks a non-stable release channel.
    pub fn is_prerelease(&self) -> bool {
        self.version.as_deref().is_some_and(|v| v.contains('-'))
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// One project entry of the analyzer payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectModel {
    identifier: String,
    name: String,
    package_references: Vec<PackageReference>,
    attributes: Attributes,
}

impl ProjectModel {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        package_references: Vec<PackageReference>,
        attributes: Attributes,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            package_references,
            attributes,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// References in the order the analyzer declared them.
    pub fn package_references(&self) -> &[PackageReference] {
        &self.package_references
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }
}

/// Projects keyed by identifier.
///
/// Iteration follows identifier order, so every traversal of the graph
/// (and every report derived from one) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectGraph {
    projects: BTreeMap<String, ProjectModel>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&ProjectModel> {
        self.projects.get(identifier)
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectModel> {
        self.projects.values()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }
}

impl FromIterator<ProjectModel> for ProjectGraph {
    fn from_iter<I: IntoIterator<Item = ProjectModel>>(iter: I) -> Self {
        Self {
            projects: iter
                .into_iter()
                .map(|p| (p.identifier.clone(), p))
                .collect(),
        }
    }
}

/// Kind of build-definition file the pipeline runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Solution,
    Project,
}

impl TargetKind {
    /// Classify a file by its extension.
    pub fn of(path: &Path) -> Self {
        let is_solution = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase().ends_with(".sln"))
            .unwrap_or(false);
        if is_solution {
            TargetKind::Solution
        } else {
            TargetKind::Project
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Solution => write!(f, "solution"),
            TargetKind::Project => write!(f, "project"),
        }
    }
}

/// The solution or project file a run operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    path: PathBuf,
    kind: TargetKind,
}

impl ResolvedTarget {
    pub fn new(path: PathBuf) -> Self {
        let kind = TargetKind::of(&path);
        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

/// A reference that broke the pre-release policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationViolation {
    pub project_identifier: String,
    pub reference: PackageReference,
}

impl fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.project_identifier, self.reference)
    }
}
