//! Module map construction
//!
//! A module map pairs each module's display name (as listed in
//! `modules.txt`) with its module key, the scrubbed folder name under the
//! app package. Overrides supplied by the user take precedence over the
//! derived keys.

use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::sync::LazyLock;

use crate::core::app::AppLocation;
use crate::core::error::ModfixError;

/// Original module display name -> module key (folder name), in
/// `modules.txt` order
pub type ModuleMap = IndexMap<String, String>;

/// Record name -> module display name, collected from custom files
pub type CustomMappings = IndexMap<String, String>;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("separator pattern is valid"));

/// Scrub a module display name into its folder key
///
/// Trims, lowercases, and collapses each run of whitespace or hyphens into
/// a single underscore: `"Al-Jar HR"` becomes `"al_jar_hr"`.
pub fn normalize_module_name(name: &str) -> String {
    SEPARATORS
        .replace_all(&name.trim().to_lowercase(), "_")
        .into_owned()
}

/// Parse the contents of a `modules.txt` file
///
/// Duplicate lines keep the position of their first occurrence.
pub fn parse_modules_txt(text: &str) -> ModuleMap {
    let mut map = ModuleMap::new();
    for name in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        map.entry(name.to_string())
            .or_insert_with(|| normalize_module_name(name));
    }
    map
}

/// Build the derived module map from the app's `modules.txt`
pub fn build_module_map(app: &AppLocation) -> Result<ModuleMap, ModfixError> {
    let path = app.modules_txt();
    if !path.is_file() {
        return Err(ModfixError::ModulesTxtNotFound(path));
    }

    let text = fs::read_to_string(&path).map_err(|source| ModfixError::Read {
        path: path.clone(),
        source,
    })?;

    let map = parse_modules_txt(&text);
    tracing::debug!(modules = map.len(), path = %path.display(), "read modules.txt");
    Ok(map)
}

/// Merge the derived map with user overrides
///
/// Overrides win. A derived entry whose key is claimed by an override for a
/// different display name is dropped, so each folder is owned by exactly the
/// name the user chose.
pub fn merge_maps(auto: &ModuleMap, overrides: &ModuleMap) -> ModuleMap {
    let claimed: HashSet<&String> = overrides.values().collect();

    let mut merged: ModuleMap = auto
        .iter()
        .filter(|(name, key)| !claimed.contains(key) || overrides.contains_key(*name))
        .map(|(name, key)| (name.clone(), key.clone()))
        .collect();

    merged.extend(overrides.iter().map(|(name, key)| (name.clone(), key.clone())));
    merged
}

/// Module display name used for fixture records with no known owner
///
/// The first display name whose key equals the app name, or the app name
/// itself.
pub fn app_module_name(map: &ModuleMap, app: &str) -> String {
    map.iter()
        .find(|(_, key)| key.as_str() == app)
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| app.to_string())
}
