//! Common test helpers for integration tests

use std::fs;
use std::path::Path;

/// Sample analyzer output: build chatter followed by the JSON payload.
pub const SAMPLE_OUTPUT: &str = "garbage-log-line\n{\"P1\":{\"Name\":\"P1\",\"PackageReferences\":[{\"Name\":\"Foo\",\"Version\":\"1.0.0\"}]}}";

/// Analyzer output with one pre-release reference in project A.
pub const PRERELEASE_OUTPUT: &str = r#"  Determining projects to restore...
  All projects are up-to-date for restore.
{"A": {"Name": "A", "TargetFramework": "net8.0", "PackageReferences": [{"Name": "Bar", "Version": "2.0.0-beta"}]},
 "B": {"Name": "B", "TargetFramework": "net8.0", "PackageReferences": [{"Name": "Baz", "Version": "1.0.0"}]}}
"#;

/// Write a non-empty file, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Minimal SDK-style project file contents.
pub fn project_xml() -> &'static str {
    "<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n"
}

/// Minimal solution file contents.
pub fn solution_text() -> &'static str {
    "Microsoft Visual Studio Solution File, Format Version 12.00\n"
}
