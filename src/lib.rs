//! # sharpgraph - .NET project graph orchestration
//!
//! sharpgraph discovers a .NET solution or project, extracts its project
//! graph through an external analyzer, checks cross-project policy, and only
//! then hands the target to the `dotnet` toolchain.
//!
//! ## Pipeline
//!
//! 1. [`target`] - locate the solution/project file
//! 2. [`analyzer`] - stage and run the external analyzer
//! 3. [`decode`] - turn analyzer output into a [`model::ProjectGraph`]
//! 4. [`policy`] - reject pre-release package references
//! 5. [`orchestrate`] - sequence the above for callers
//!
//! ## Example
//!
//! ```no_run
//! use sharpgraph::analyzer::ProcessAnalyzer;
//! use sharpgraph::orchestrate::Orchestrator;
//! use sharpgraph::settings::RunSettings;
//!
//! let settings = RunSettings::new("./my-solution").with_strict(true);
//! let analyzer = ProcessAnalyzer::dotnet(&settings.scratch_path());
//! let run = Orchestrator::new(settings, &analyzer)
//!     .run()
//!     .expect("pipeline failed");
//!
//! for project in run.graph.projects() {
//!     println!("{} ({} packages)", project.name(), project.package_references().len());
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod orchestrate;
pub mod policy;
pub mod settings;
pub mod target;
pub mod toolchain;
pub mod ui;

pub use error::{PipelineError, PipelineResult};
