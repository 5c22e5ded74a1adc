//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::module_map::ModuleMap;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".modfix.yaml";

/// modfix configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bench directory used when neither --app-path nor --bench is given
    pub bench: Option<PathBuf>,

    /// Default overrides (original module name -> module key)
    pub overrides: ModuleMap,

    /// Never write files
    pub dry_run: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().ok();
        Self::load_from(Self::global_config_path().as_deref(), cwd.as_deref())
    }

    /// Load from an explicit global config file and working directory
    pub fn load_from(global_path: Option<&Path>, cwd: Option<&Path>) -> Self {
        // 1. Built-in defaults (already in Default impl)
        let mut config = Config::default();

        // 2. Global user config (~/.config/modfix/config.yaml)
        if let Some(global) = global_path.and_then(Self::read_file) {
            config.merge(global);
        }

        // 3. Local config (./.modfix.yaml)
        if let Some(local) = cwd.and_then(|dir| Self::read_file(&dir.join(LOCAL_CONFIG_FILE))) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(bench) = std::env::var("MODFIX_BENCH") {
            if !bench.is_empty() {
                config.bench = Some(PathBuf::from(bench));
            }
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };

        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "modfix")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.bench.is_some() {
            self.bench = other.bench;
        }
        self.overrides.extend(other.overrides);
        if other.dry_run.is_some() {
            self.dry_run = other.dry_run;
        }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }
}
