//! Decoding of the analyzer's standard output into a [`ProjectGraph`].
//!
//! The analyzer may print build chatter before its payload, so decoding
//! starts at the first `{` and reads a single JSON object from there.

use serde_json::{Map, Value};

use crate::error::{PipelineError, PipelineResult};
use crate::model::{Attributes, PackageReference, ProjectGraph, ProjectModel};

const NAME_KEYS: [&str; 2] = ["Name", "name"];
const REFERENCES_KEYS: [&str; 2] = ["PackageReferences", "packageReferences"];
const VERSION_KEYS: [&str; 2] = ["Version", "version"];

/// Decode raw analyzer output.
pub fn decode(output: &str) -> PipelineResult<ProjectGraph> {
    let start = output
        .find('{')
        .ok_or_else(|| PipelineError::DecodeError("no JSON object in analyzer output".into()))?;

    let payload: Value = serde_json::from_str(&output[start..])
        .map_err(|e| PipelineError::DecodeError(format!("invalid JSON payload: {}", e)))?;

    let Value::Object(entries) = payload else {
        return Err(PipelineError::DecodeError(
            "payload is not a JSON object".into(),
        ));
    };

    entries
        .into_iter()
        .map(|(id, attrs)| decode_project(id, attrs))
        .collect()
}

fn decode_project(identifier: String, value: Value) -> PipelineResult<ProjectModel> {
    let Value::Object(mut attrs) = value else {
        return Err(PipelineError::DecodeError(format!(
            "project '{}' is not a JSON object",
            identifier
        )));
    };

    let name = match take_any(&mut attrs, &NAME_KEYS) {
        Some(Value::String(name)) => name,
        Some(Value::Null) | None => identifier.clone(),
        Some(other) => {
            return Err(PipelineError::DecodeError(format!(
                "project '{}' has a non-string name: {}",
                identifier, other
            )))
        }
    };

    let references = match take_any(&mut attrs, &REFERENCES_KEYS) {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| decode_reference(&identifier, idx, item))
            .collect::<PipelineResult<Vec<_>>>()?,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(PipelineError::DecodeError(format!(
                "project '{}' has non-array package references",
                identifier
            )))
        }
    };

    let attributes: Attributes = attrs.into_iter().collect();
    Ok(ProjectModel::new(identifier, name, references, attributes))
}

fn decode_reference(project: &str, idx: usize, value: Value) -> PipelineResult<PackageReference> {
    let malformed = |why: &str| {
        PipelineError::DecodeError(format!(
            "project '{}' package reference #{}: {}",
            project, idx, why
        ))
    };

    let Value::Object(mut fields) = value else {
        return Err(malformed("not a JSON object"));
    };

    let name = match take_any(&mut fields, &NAME_KEYS) {
        Some(Value::String(name)) => name,
        _ => return Err(malformed("missing name")),
    };

    let version = match take_any(&mut fields, &VERSION_KEYS) {
        Some(Value::String(v)) => Some(v),
        Some(Value::Null) | None => None,
        Some(_) => return Err(malformed("version is not a string")),
    };

    PackageReference::new(name, version).ok_or_else(|| malformed("empty name"))
}

/// Remove the first present key out of `keys`.
fn take_any(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|k| map.remove(*k))
}
