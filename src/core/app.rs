//! App discovery and file layout

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::ModfixError;

/// A Frappe app package on disk (`<bench>/apps/<app>/<app>`)
#[derive(Debug, Clone)]
pub struct AppLocation {
    name: String,
    path: PathBuf,
}

impl AppLocation {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Resolve the app package directory
    ///
    /// Priority: explicit app path, then bench directory, then the current
    /// directory if it looks like a bench containing the app.
    pub fn resolve(
        name: &str,
        app_path: Option<&Path>,
        bench: Option<&Path>,
    ) -> Result<Self, ModfixError> {
        let path = match (app_path, bench) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(bench)) => Self::package_dir(bench, name),
            (None, None) => {
                let cwd = std::env::current_dir().map_err(|source| ModfixError::Read {
                    path: PathBuf::from("."),
                    source,
                })?;
                let candidate = Self::package_dir(&cwd, name);
                if !candidate.is_dir() {
                    return Err(ModfixError::NoAppPath(name.to_string()));
                }
                candidate
            }
        };

        if !path.is_dir() {
            return Err(ModfixError::AppNotFound(path));
        }

        tracing::debug!(app = name, path = %path.display(), "resolved app package");
        Ok(Self::new(name, path))
    }

    fn package_dir(bench: &Path, name: &str) -> PathBuf {
        bench.join("apps").join(name).join(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn modules_txt(&self) -> PathBuf {
        self.path.join("modules.txt")
    }

    pub fn custom_dir(&self, module_key: &str) -> PathBuf {
        self.path.join(module_key).join("custom")
    }

    pub fn fixtures_dir(&self) -> PathBuf {
        self.path.join("fixtures")
    }

    /// JSON files in a module's `custom` folder; empty if the folder is absent
    pub fn custom_files(&self, module_key: &str) -> Result<Vec<PathBuf>, ModfixError> {
        let dir = self.custom_dir(module_key);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        json_files_in(&dir)
    }

    /// JSON files in the app's `fixtures` folder, or `None` if it is absent
    pub fn fixture_files(&self) -> Result<Option<Vec<PathBuf>>, ModfixError> {
        let dir = self.fixtures_dir();
        if !dir.is_dir() {
            return Ok(None);
        }
        json_files_in(&dir).map(Some)
    }
}

/// `*.json` files directly inside `dir`, sorted by file name
fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>, ModfixError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ModfixError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|e| e == "json")
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_from_bench() {
        let tmp = tempdir().unwrap();
        let pkg = tmp.path().join("apps/myapp/myapp");
        fs::create_dir_all(&pkg).unwrap();

        let app = AppLocation::resolve("myapp", None, Some(tmp.path())).unwrap();
        assert_eq!(app.path(), pkg);
        assert_eq!(app.name(), "myapp");
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let tmp = tempdir().unwrap();
        let app = AppLocation::resolve("myapp", Some(tmp.path()), Some(Path::new("/nonexistent")))
            .unwrap();
        assert_eq!(app.path(), tmp.path());
    }

    #[test]
    fn test_resolve_missing_dir() {
        let tmp = tempdir().unwrap();
        let err = AppLocation::resolve("myapp", None, Some(tmp.path())).unwrap_err();
        assert!(matches!(err, ModfixError::AppNotFound(_)));
    }

    #[test]
    fn test_custom_files_only_json_sorted() {
        let tmp = tempdir().unwrap();
        let custom = tmp.path().join("hr/custom");
        fs::create_dir_all(custom.join("nested")).unwrap();
        fs::write(custom.join("b.json"), "[]").unwrap();
        fs::write(custom.join("a.json"), "[]").unwrap();
        fs::write(custom.join("notes.txt"), "").unwrap();
        fs::write(custom.join("nested/c.json"), "[]").unwrap();

        let app = AppLocation::new("myapp", tmp.path());
        let files = app.custom_files("hr").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_missing_folders() {
        let tmp = tempdir().unwrap();
        let app = AppLocation::new("myapp", tmp.path());
        assert!(app.custom_files("hr").unwrap().is_empty());
        assert!(app.fixture_files().unwrap().is_none());
    }
}
