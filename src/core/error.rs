//! Error types for the repair run

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::json::diagnostics::JsonSyntaxError;

/// Errors that can occur while locating an app or repairing its files
#[derive(Debug, Error, Diagnostic)]
pub enum ModfixError {
    #[error("modules.txt not found at {0:?}")]
    #[diagnostic(
        code(modfix::modules_txt),
        help("--app-path must point at the app package (the directory holding modules.txt)")
    )]
    ModulesTxtNotFound(PathBuf),

    #[error("app directory not found at {0:?}")]
    #[diagnostic(code(modfix::app_not_found))]
    AppNotFound(PathBuf),

    #[error("cannot locate app '{0}'")]
    #[diagnostic(
        code(modfix::no_app_path),
        help("Pass --app-path or --bench, set `bench` in .modfix.yaml, or run from the bench directory")
    )]
    NoAppPath(String),

    #[error("no app given")]
    #[diagnostic(
        code(modfix::missing_app),
        help("Pass the app name as an argument or as \"app\" in --kwargs")
    )]
    MissingApp,

    #[error("app given twice with different values: '{positional}' and '{kwargs}'")]
    #[diagnostic(code(modfix::conflicting_app))]
    ConflictingApp { positional: String, kwargs: String },

    #[error("invalid override '{0}'")]
    #[diagnostic(code(modfix::invalid_override), help("Use ORIGINAL=module_key, e.g. \"HR=human_resources\""))]
    InvalidOverride(String),

    #[error("invalid override file {path:?}: {message}")]
    #[diagnostic(code(modfix::override_file))]
    OverrideFile { path: PathBuf, message: String },

    #[error("invalid --kwargs: {0}")]
    #[diagnostic(
        code(modfix::kwargs),
        help("Expected JSON like '{{\"app\": \"myapp\", \"custom_override_map\": {{\"HR\": \"human_resources\"}}}}'")
    )]
    InvalidKwargs(String),

    #[error("failed to read {path:?}")]
    #[diagnostic(code(modfix::io::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}")]
    #[diagnostic(code(modfix::io::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {path:?}")]
    #[diagnostic(code(modfix::io::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to serialize {path:?}")]
    #[diagnostic(code(modfix::json::serialize))]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Json(#[from] JsonSyntaxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_override_has_diagnostic_code_and_help() {
        let err = ModfixError::InvalidOverride("HR".to_string());
        assert_eq!(err.code().unwrap().to_string(), "modfix::invalid_override");
        assert!(err.help().unwrap().to_string().contains("ORIGINAL=module_key"));
    }

    #[test]
    fn test_override_file_code_is_distinct() {
        let err = ModfixError::OverrideFile {
            path: PathBuf::from("map.json"),
            message: "not an object".to_string(),
        };
        assert_eq!(err.code().unwrap().to_string(), "modfix::override_file");
    }
}
