//! The one-pass repair run
//!
//! Custom files are processed first, module by module in map order, so the
//! record-to-module mappings they produce are available when fixtures are
//! patched afterwards.
//!
//! Two module names can normalize to the same folder key, so one custom file
//! may be visited more than once. Parsed documents are kept for the whole run
//! and later passes see the earlier patches, whether or not files are written.

use serde::Serialize;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::app::AppLocation;
use crate::core::error::ModfixError;
use crate::core::fixer::{fix_custom_value, fix_fixture_value, Change, FixOutcome};
use crate::core::module_map::{
    app_module_name, build_module_map, merge_maps, CustomMappings, ModuleMap,
};
use crate::json;

/// Knobs for a run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute every change but leave files untouched
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Custom,
    Fixture,
}

/// What happened to one file
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: FileKind,
    /// Module assigned to the file's records (custom files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub changes: Vec<Change>,
    pub warnings: Vec<String>,
    pub written: bool,
}

/// Result of a run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub app: String,
    pub app_path: PathBuf,
    pub dry_run: bool,
    pub final_map: ModuleMap,
    pub custom_mappings: CustomMappings,
    /// Fallback module for fixtures; `None` when the app has no fixtures folder
    pub fallback_module: Option<String>,
    pub files: Vec<FileReport>,
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn files_of(&self, kind: FileKind) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    pub fn total_changes(&self) -> usize {
        self.files.iter().map(|f| f.changes.len()).sum()
    }

    pub fn modified_files(&self) -> usize {
        self.files.iter().filter(|f| !f.changes.is_empty()).count()
    }
}

/// Derive the module map and merge user overrides into it
pub fn final_map(app: &AppLocation, overrides: &ModuleMap) -> Result<ModuleMap, ModfixError> {
    let auto = build_module_map(app)?;
    Ok(merge_maps(&auto, overrides))
}

/// Repair every custom file and fixture of `app`
pub fn run(
    app: &AppLocation,
    overrides: &ModuleMap,
    options: &RunOptions,
) -> Result<RunReport, ModfixError> {
    let final_map = final_map(app, overrides)?;
    let mut custom_mappings = CustomMappings::new();
    let mut documents = HashMap::new();
    let mut files = Vec::new();
    let mut warnings = Vec::new();

    for (module_name, module_key) in final_map.iter() {
        for path in app.custom_files(module_key)? {
            let report = process_file(&path, FileKind::Custom, options, &mut documents, |value| {
                fix_custom_value(value, module_name, &mut custom_mappings)
            })?;
            files.push(FileReport {
                module: Some(module_name.to_string()),
                ..report
            });
        }
    }

    let fallback_module = match app.fixture_files()? {
        None => {
            warnings.push(format!(
                "no fixtures directory at {}; fixtures skipped",
                app.fixtures_dir().display()
            ));
            None
        }
        Some(fixtures) => {
            let fallback = app_module_name(&final_map, app.name());
            tracing::debug!(fallback = %fallback, "fixture fallback module");

            for path in fixtures {
                files.push(process_file(
                    &path,
                    FileKind::Fixture,
                    options,
                    &mut documents,
                    |value| fix_fixture_value(value, &custom_mappings, &fallback),
                )?);
            }
            Some(fallback)
        }
    };

    Ok(RunReport {
        app: app.name().to_string(),
        app_path: app.path().to_path_buf(),
        dry_run: options.dry_run,
        final_map,
        custom_mappings,
        fallback_module,
        files,
        warnings,
    })
}

/// Load (or reuse), patch and (unless nothing changed or dry-running) save one file
fn process_file<F>(
    path: &Path,
    kind: FileKind,
    options: &RunOptions,
    documents: &mut HashMap<PathBuf, Value>,
    fix: F,
) -> Result<FileReport, ModfixError>
where
    F: FnOnce(&mut Value) -> FixOutcome,
{
    let value = match documents.entry(path.to_path_buf()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => entry.insert(json::read_json(path)?),
    };
    let outcome = fix(value);

    let written = outcome.is_modified() && !options.dry_run;
    if written {
        json::write_json(path, value)?;
    }

    tracing::info!(
        file = %path.display(),
        changes = outcome.changes.len(),
        written,
        "processed file"
    );
    for warning in &outcome.warnings {
        tracing::debug!(file = %path.display(), "{}", warning);
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        kind,
        module: None,
        changes: outcome.changes,
        warnings: outcome.warnings,
        written,
    })
}
