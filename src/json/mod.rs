//! Reading and writing Frappe JSON export files
//!
//! Files are written back the way Frappe exports them: 4-space indentation,
//! non-ASCII characters left unescaped, keys in their original order.

pub mod diagnostics;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::core::error::ModfixError;
use diagnostics::JsonSyntaxError;

/// Load a JSON file, reporting syntax errors against the file's source
pub fn read_json(path: &Path) -> Result<Value, ModfixError> {
    let content = fs::read_to_string(path).map_err(|source| ModfixError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|err| {
        JsonSyntaxError::from_serde_error(&err, &content, &path.display().to_string()).into()
    })
}

/// Render a value as 4-space indented JSON
pub fn to_pretty_bytes(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a value back to disk (no trailing newline)
pub fn write_json(path: &Path, value: &Value) -> Result<(), ModfixError> {
    let bytes = to_pretty_bytes(value).map_err(|source| ModfixError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, bytes).map_err(|source| ModfixError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_pretty_output_uses_four_spaces_and_keeps_unicode() {
        let value = json!({"name": "Société", "module": null});
        let out = String::from_utf8(to_pretty_bytes(&value).unwrap()).unwrap();
        assert_eq!(out, "{\n    \"name\": \"Société\",\n    \"module\": null\n}");
    }

    #[test]
    fn test_key_order_preserved() {
        let value: Value = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        let out = String::from_utf8(to_pretty_bytes(&value).unwrap()).unwrap();
        assert!(out.find("\"z\"").unwrap() < out.find("\"a\"").unwrap());
    }

    #[test]
    fn test_read_json_reports_syntax_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"name\": }]").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, ModfixError::Json(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_read_json_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_json(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ModfixError::Read { .. }));
    }
}
