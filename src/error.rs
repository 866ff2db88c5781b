//! Failure taxonomy of the orchestration pipeline.
//!
//! Every stage fails fast with one of these; nothing is retried.

use std::fmt;
use std::path::PathBuf;

use crate::model::ValidationViolation;
use crate::policy::group_by_project;

#[derive(Debug)]
pub enum PipelineError {
    /// No usable solution/project file, or the configured one is missing.
    TargetNotFound {
        working_dir: PathBuf,
        explicit: Option<PathBuf>,
    },
    /// The analyzer could not be started or exited unsuccessfully.
    AnalyzerFailed {
        exit_code: Option<i32>,
        output: String,
    },
    /// Analyzer output did not carry a well-formed payload.
    DecodeError(String),
    /// Pre-release references found under strict mode. Holds all of them.
    PolicyViolation(Vec<ValidationViolation>),
    /// Staging the analyzer into the scratch directory failed.
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::TargetNotFound {
                working_dir,
                explicit: Some(path),
            } => write!(
                f,
                "Target not found: {} (relative to {})",
                path.display(),
                working_dir.display()
            ),
            PipelineError::TargetNotFound {
                working_dir,
                explicit: None,
            } => write!(
                f,
                "Target not found: no .sln or *proj file in {}",
                working_dir.display()
            ),
            PipelineError::AnalyzerFailed {
                exit_code: Some(code),
                output,
            } => write!(f, "Analyzer failed with exit code {}:\n{}", code, output.trim()),
            PipelineError::AnalyzerFailed {
                exit_code: None,
                output,
            } => write!(f, "Analyzer failed:\n{}", output.trim()),
            PipelineError::DecodeError(msg) => write!(f, "Failed to decode analyzer output: {}", msg),
            PipelineError::PolicyViolation(violations) => {
                write!(
                    f,
                    "Pre-release package references found ({}):",
                    violations.len()
                )?;
                for (project, references) in group_by_project(violations) {
                    write!(f, "\n  {}", project)?;
                    for r in references {
                        write!(f, "\n    {}", r)?;
                    }
                }
                Ok(())
            }
            PipelineError::Io { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
