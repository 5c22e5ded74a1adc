//! Target selection shared by `run` and `map`
//!
//! Overrides are layered lowest to highest: config file, `--override-file`,
//! `custom_override_map` from `--kwargs`, then `--override` flags.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{AppLocation, Config, ModfixError, ModuleMap};

#[derive(clap::Args, Debug, Default)]
pub struct TargetArgs {
    /// App name (as in `bench new-app`)
    pub app: Option<String>,

    /// App package directory containing modules.txt (default: <bench>/apps/<app>/<app>)
    #[arg(long)]
    pub app_path: Option<PathBuf>,

    /// Bench directory (default: $MODFIX_BENCH or `bench` from config, then the current directory)
    #[arg(long)]
    pub bench: Option<PathBuf>,

    /// Module override as ORIGINAL=module_key (repeatable)
    #[arg(long = "override", short = 'o', value_name = "ORIGINAL=KEY")]
    pub overrides: Vec<String>,

    /// JSON or YAML file with a mapping of overrides
    #[arg(long)]
    pub override_file: Option<PathBuf>,

    /// Keyword arguments as passed to `bench execute`, e.g.
    /// '{"app": "myapp", "custom_override_map": {"HR": "human_resources"}}'
    #[arg(long)]
    pub kwargs: Option<String>,
}

/// `bench execute --kwargs` payload
#[derive(Debug, Deserialize)]
struct Kwargs {
    app: String,
    #[serde(default)]
    custom_override_map: Option<ModuleMap>,
}

/// Resolved app and merged overrides
#[derive(Debug)]
pub struct Target {
    pub app: AppLocation,
    pub overrides: ModuleMap,
}

impl TargetArgs {
    pub fn resolve(&self, config: &Config) -> Result<Target, ModfixError> {
        let kwargs = self.kwargs.as_deref().map(parse_kwargs).transpose()?;

        let name = match (&self.app, &kwargs) {
            (Some(app), Some(kw)) if *app != kw.app => {
                return Err(ModfixError::ConflictingApp {
                    positional: app.clone(),
                    kwargs: kw.app.clone(),
                })
            }
            (Some(app), _) => app.clone(),
            (None, Some(kw)) => kw.app.clone(),
            (None, None) => return Err(ModfixError::MissingApp),
        };

        let mut overrides = config.overrides.clone();
        if let Some(path) = &self.override_file {
            overrides.extend(load_override_file(path)?);
        }
        if let Some(map) = kwargs.as_ref().and_then(|kw| kw.custom_override_map.as_ref()) {
            overrides.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        for raw in &self.overrides {
            let (original, key) = parse_override(raw)?;
            overrides.insert(original, key);
        }

        let bench = self.bench.as_deref().or(config.bench.as_deref());
        let app = AppLocation::resolve(&name, self.app_path.as_deref(), bench)?;

        Ok(Target { app, overrides })
    }
}

fn parse_kwargs(raw: &str) -> Result<Kwargs, ModfixError> {
    serde_json::from_str(raw).map_err(|e| ModfixError::InvalidKwargs(e.to_string()))
}

/// Split `ORIGINAL=KEY` at the last `=`
pub fn parse_override(raw: &str) -> Result<(String, String), ModfixError> {
    let (original, key) = raw
        .rsplit_once('=')
        .ok_or_else(|| ModfixError::InvalidOverride(raw.to_string()))?;
    let (original, key) = (original.trim(), key.trim());

    if original.is_empty() || key.is_empty() {
        return Err(ModfixError::InvalidOverride(raw.to_string()));
    }
    Ok((original.to_string(), key.to_string()))
}

/// Read an override mapping; `.yaml`/`.yml` as YAML, anything else as JSON
pub fn load_override_file(path: &Path) -> Result<ModuleMap, ModfixError> {
    let content = fs::read_to_string(path).map_err(|source| ModfixError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml");

    let parsed: Result<ModuleMap, String> = if is_yaml {
        serde_yml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ModfixError::OverrideFile {
        path: path.to_path_buf(),
        message,
    })
}
