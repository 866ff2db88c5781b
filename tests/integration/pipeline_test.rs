//! Pipeline behavior through the library API, with the analyzer faked.

use crate::common;
use crate::support::builders::{graph, FakeAnalyzer, ProjectBuilder};

use sharpgraph::decode::decode;
use sharpgraph::model::TargetKind;
use sharpgraph::orchestrate::Orchestrator;
use sharpgraph::policy::{self, PrereleasePolicy};
use sharpgraph::settings::{BuildSettings, RunSettings};
use sharpgraph::target;
use sharpgraph::PipelineError;

use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_solution_wins_regardless_of_creation_order() {
    for solution_first in [true, false] {
        let tmp = TempDir::new().unwrap();
        let write_projects = || {
            for name in ["Api.csproj", "Core.csproj", "Tests.csproj"] {
                common::write_file(&tmp.path().join(name), common::project_xml()).unwrap();
            }
        };
        let write_solution = || {
            common::write_file(&tmp.path().join("Shop.sln"), common::solution_text()).unwrap();
        };

        if solution_first {
            write_solution();
            write_projects();
        } else {
            write_projects();
            write_solution();
        }

        let resolved = target::resolve(tmp.path(), None).unwrap();
        assert_eq!(resolved.kind(), TargetKind::Solution);
        assert!(resolved.path().ends_with("Shop.sln"));
    }
}

#[test]
fn test_lone_fsproj_is_selected() {
    let tmp = TempDir::new().unwrap();
    common::write_file(&tmp.path().join("Lib.fsproj"), common::project_xml()).unwrap();
    common::write_file(&tmp.path().join("notes.txt"), "notes").unwrap();

    let resolved = target::resolve(tmp.path(), None).unwrap();
    assert_eq!(resolved.kind(), TargetKind::Project);
    assert!(resolved.path().ends_with("Lib.fsproj"));
}

#[test]
fn test_missing_explicit_target() {
    let tmp = TempDir::new().unwrap();
    let err = target::resolve(tmp.path(), Some(Path::new("src/Nope.sln"))).unwrap_err();
    assert!(matches!(err, PipelineError::TargetNotFound { .. }));
}

#[test]
fn test_decode_sample_output() {
    let graph = decode(common::SAMPLE_OUTPUT).unwrap();
    assert_eq!(graph.identifiers().collect::<Vec<_>>(), vec!["P1"]);

    let p1 = graph.get("P1").unwrap();
    assert_eq!(p1.name(), "P1");
    let refs = p1.package_references();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].name(), "Foo");
    assert_eq!(refs[0].version(), Some("1.0.0"));
}

#[test]
fn test_decode_twice_is_equal() {
    let first = decode(common::PRERELEASE_OUTPUT).unwrap();
    let second = decode(common::PRERELEASE_OUTPUT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_prerelease_detection() {
    let graph = graph(vec![
        ProjectBuilder::new("A").with_reference("Bar", "2.0.0-beta"),
        ProjectBuilder::new("B").with_reference("Baz", "1.0.0"),
    ]);

    let violations = PrereleasePolicy::strict().find_violations(&graph);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].project_identifier, "A");
    assert_eq!(violations[0].reference.name(), "Bar");

    assert!(matches!(
        policy::validate(&graph, true),
        Err(PipelineError::PolicyViolation(_))
    ));
    assert!(policy::validate(&graph, false).is_ok());
}

#[test]
fn test_empty_payload_passes_strict_run() {
    let tmp = TempDir::new().unwrap();
    common::write_file(&tmp.path().join("App.csproj"), common::project_xml()).unwrap();
    let analyzer = FakeAnalyzer::new("{}");

    let run = Orchestrator::new(RunSettings::new(tmp.path()).with_strict(true), &analyzer)
        .run()
        .unwrap();

    assert!(run.graph.is_empty());
    assert!(run.violations().is_empty());
}

#[test]
fn test_run_forwards_build_settings_to_analyzer() {
    let tmp = TempDir::new().unwrap();
    common::write_file(&tmp.path().join("src/App.sln"), common::solution_text()).unwrap();
    let analyzer = FakeAnalyzer::new(common::SAMPLE_OUTPUT);

    let settings = RunSettings::new(tmp.path())
        .with_target("src/App.sln")
        .with_build(BuildSettings {
            configuration: "Release".to_string(),
            platform: Some("x64".to_string()),
        });
    let run = Orchestrator::new(settings, &analyzer).run().unwrap();

    let calls = analyzer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, run.target.path());
    assert!(calls[0].0.is_absolute());
    assert_eq!(calls[0].1, "{'Platform':'x64','Configuration':'Release'}");
}

#[test]
fn test_decode_failure_surfaces_from_run() {
    let tmp = TempDir::new().unwrap();
    common::write_file(&tmp.path().join("App.sln"), common::solution_text()).unwrap();
    let analyzer = FakeAnalyzer::new("Build FAILED.");

    let err = Orchestrator::new(RunSettings::new(tmp.path()), &analyzer)
        .run()
        .unwrap_err();
    assert!(matches!(err, PipelineError::DecodeError(_)));
}

#[test]
fn test_analyzer_exit_code_surfaces_from_run() {
    let tmp = TempDir::new().unwrap();
    common::write_file(&tmp.path().join("App.sln"), common::solution_text()).unwrap();
    let analyzer = FakeAnalyzer::with_exit_code(common::SAMPLE_OUTPUT, 1);

    let err = Orchestrator::new(RunSettings::new(tmp.path()), &analyzer)
        .run()
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::AnalyzerFailed {
            exit_code: Some(1),
            ..
        }
    ));
}
