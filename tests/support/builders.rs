use std::cell::RefCell;
use std::path::PathBuf;

use sharpgraph::analyzer::{AnalyzerOutput, ProjectAnalyzer};
use sharpgraph::model::{Attributes, PackageReference, ProjectGraph, ProjectModel, ResolvedTarget};

pub struct ProjectBuilder {
    id: String,
    name: Option<String>,
    references: Vec<PackageReference>,
}

impl ProjectBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            references: Vec::new(),
        }
    }

    #[allow(dead_code)]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_reference(mut self, name: &str, version: &str) -> Self {
        self.references
            .push(PackageReference::new(name, Some(version.to_string())).unwrap());
        self
    }

    pub fn build(self) -> ProjectModel {
        let name = self.name.unwrap_or_else(|| self.id.clone());
        ProjectModel::new(self.id, name, self.references, Attributes::new())
    }
}

pub fn graph(projects: Vec<ProjectBuilder>) -> ProjectGraph {
    projects.into_iter().map(ProjectBuilder::build).collect()
}

/// Analyzer double that replays canned output and records its calls.
pub struct FakeAnalyzer {
    output: AnalyzerOutput,
    pub calls: RefCell<Vec<(PathBuf, String)>>,
}

impl FakeAnalyzer {
    pub fn new(stdout: &str) -> Self {
        Self::with_exit_code(stdout, 0)
    }

    pub fn with_exit_code(stdout: &str, exit_code: i32) -> Self {
        Self {
            output: AnalyzerOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: Some(exit_code),
            },
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ProjectAnalyzer for FakeAnalyzer {
    fn analyze(&self, target: &ResolvedTarget, config: &str) -> std::io::Result<AnalyzerOutput> {
        self.calls
            .borrow_mut()
            .push((target.path().to_path_buf(), config.to_string()));
        Ok(self.output.clone())
    }
}
