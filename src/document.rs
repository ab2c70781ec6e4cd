use crate::error::AugmentError;
use serde_json::{Map, Value};
use std::path::Path;

pub type Document = Map<String, Value>;

/// Read a JSON file whose root must be an object.
///
/// The file is read into memory and closed before parsing. Bytes that are not
/// valid UTF-8 surface as a parse failure, not as an unreadable input.
pub fn load_object(path: &Path) -> Result<Document, AugmentError> {
    let raw = std::fs::read(path).map_err(|source| AugmentError::MissingInput {
        path: path.to_path_buf(),
        source,
    })?;
    parse_object(path, &raw)
}

pub fn parse_object(path: &Path, raw: &[u8]) -> Result<Document, AugmentError> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| AugmentError::malformed(path, format!("invalid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AugmentError::malformed(
            path,
            format!("root is {}, expected an object", kind_of(&other)),
        )),
    }
}

/// Pretty-print with two-space indentation.
pub fn render_pretty(doc: &Document, trailing_newline: bool) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = serde_json::to_vec_pretty(doc)?;
    if trailing_newline {
        out.push(b'\n');
    }
    Ok(out)
}

pub(crate) fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
