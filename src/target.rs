//! Build-definition file discovery.
//!
//! Mirrors the toolchain's own best-guess detection: a solution in the
//! working directory wins, otherwise any project file. Only immediate
//! children are considered.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::model::ResolvedTarget;

/// Resolve the target for `working_dir`.
///
/// An explicit path is joined onto the working directory (absolute paths are
/// kept as-is) and must name an existing file. Without one, the directory is
/// searched for a non-empty `*.sln`, then a non-empty `*proj` file. Ties go
/// to the first entry in directory-listing order, which is platform
/// dependent; configure the path explicitly when that matters.
pub fn resolve(working_dir: &Path, explicit: Option<&Path>) -> PipelineResult<ResolvedTarget> {
    let not_found = || PipelineError::TargetNotFound {
        working_dir: working_dir.to_path_buf(),
        explicit: explicit.map(Path::to_path_buf),
    };

    let base = fs::canonicalize(working_dir).map_err(|_| not_found())?;

    if let Some(path) = explicit {
        let candidate = base.join(path);
        if !candidate.is_file() {
            return Err(not_found());
        }
        return Ok(ResolvedTarget::new(candidate));
    }

    let candidates = list_candidates(&base).map_err(|_| not_found())?;

    candidates
        .iter()
        .find(|p| has_suffix(p, ".sln"))
        .or_else(|| candidates.iter().find(|p| has_suffix(p, "proj")))
        .map(|p| ResolvedTarget::new(p.clone()))
        .ok_or_else(not_found)
}

/// Non-empty regular files directly under `dir`, in listing order.
fn list_candidates(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Follow symlinks so a linked solution still counts
        let Ok(meta) = fs::metadata(entry.path()) else {
            continue;
        };
        if meta.is_file() && meta.len() > 0 {
            files.push(entry.path());
        }
    }
    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase().ends_with(suffix))
        .unwrap_or(false)
}
