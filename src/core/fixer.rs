//! Filling in `"module": null` fields inside exported JSON
//!
//! Records can sit anywhere in a file: at the top level, inside arrays, or
//! nested in other objects, so both walks visit every value. A record is
//! identified by its `name`, rendered as text even when it is not a string;
//! one with no `name` key cannot be attributed and is left alone with a
//! warning.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::module_map::CustomMappings;

/// Where a newly assigned module came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// The module owning the custom folder the record lives in
    CustomFolder,
    /// A same-named record found in a custom folder
    CustomMapping,
    /// No owner known; the app's fallback module
    Fallback,
}

/// One `module` field that was filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub docname: String,
    pub module: String,
    pub source: ChangeSource,
}

/// Changes and warnings collected while walking one file
#[derive(Debug, Default, Serialize)]
pub struct FixOutcome {
    pub changes: Vec<Change>,
    pub warnings: Vec<String>,
}

impl FixOutcome {
    pub fn is_modified(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Record name used as the mapping key; a missing `name` means unnamed
fn record_name(object: &Map<String, Value>) -> Option<String> {
    match object.get("name")? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Walk every object, calling `assign` for each null `module` field.
///
/// `assign` receives the record name and returns the module to set.
fn walk<F>(value: &mut Value, assign: &mut F, outcome: &mut FixOutcome)
where
    F: FnMut(&str) -> (String, ChangeSource),
{
    match value {
        Value::Object(object) => {
            let name = record_name(object);

            for (key, child) in object.iter_mut() {
                if key == "module" && child.is_null() {
                    match &name {
                        Some(docname) => {
                            let (module, source) = assign(docname);
                            *child = Value::String(module.clone());
                            outcome.changes.push(Change {
                                docname: docname.clone(),
                                module,
                                source,
                            });
                        }
                        None => outcome
                            .warnings
                            .push("record has \"module\": null but no \"name\"; skipped".to_string()),
                    }
                } else {
                    walk(child, assign, outcome);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, assign, outcome);
            }
        }
        _ => {}
    }
}

/// Assign `module_name` to every unnamed-module record in a custom file
///
/// Each fixed record is remembered in `mappings` so fixtures exporting the
/// same record can pick up the same module.
pub fn fix_custom_value(
    value: &mut Value,
    module_name: &str,
    mappings: &mut CustomMappings,
) -> FixOutcome {
    let mut outcome = FixOutcome::default();
    let mut assign = |docname: &str| {
        mappings.insert(docname.to_string(), module_name.to_string());
        (module_name.to_string(), ChangeSource::CustomFolder)
    };
    walk(value, &mut assign, &mut outcome);
    outcome
}

/// Assign modules to fixture records from `mappings`, else `fallback`
pub fn fix_fixture_value(value: &mut Value, mappings: &CustomMappings, fallback: &str) -> FixOutcome {
    let mut outcome = FixOutcome::default();
    let mut assign = |docname: &str| match mappings.get(docname) {
        Some(module) => (module.clone(), ChangeSource::CustomMapping),
        None => (fallback.to_string(), ChangeSource::Fallback),
    };
    walk(value, &mut assign, &mut outcome);

    let fallbacks: Vec<String> = outcome
        .changes
        .iter()
        .filter(|change| change.source == ChangeSource::Fallback)
        .map(|change| {
            format!(
                "no custom record named '{}'; using fallback module '{}'",
                change.docname, change.module
            )
        })
        .collect();
    outcome.warnings.extend(fallbacks);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_sets_null_module_and_records_mapping() {
        let mut data = json!({
            "custom_fields": [
                {"name": "Employee-badge_no", "module": null},
                {"name": "Employee-shift", "module": "Existing"}
            ],
            "property_setters": [
                {"name": "Employee-main-sort", "module": null}
            ]
        });
        let mut mappings = CustomMappings::new();

        let outcome = fix_custom_value(&mut data, "HR Management", &mut mappings);

        assert_eq!(outcome.changes.len(), 2);
        assert!(outcome.warnings.is_empty());
        assert_eq!(data["custom_fields"][0]["module"], "HR Management");
        assert_eq!(data["custom_fields"][1]["module"], "Existing");
        assert_eq!(data["property_setters"][0]["module"], "HR Management");
        assert_eq!(mappings.get("Employee-badge_no").map(String::as_str), Some("HR Management"));
        assert_eq!(mappings.get("Employee-shift"), None);
    }

    #[test]
    fn test_custom_without_name_is_skipped_with_warning() {
        let mut data = json!([{"module": null, "fieldname": "x"}]);
        let mut mappings = CustomMappings::new();

        let outcome = fix_custom_value(&mut data, "HR", &mut mappings);

        assert!(!outcome.is_modified());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(data[0]["module"].is_null());
        assert!(mappings.is_empty());
    }

    #[test]
    fn test_null_name_is_keyed_as_null_text() {
        let mut data = json!({"name": null, "module": null});
        let mut mappings = CustomMappings::new();

        let outcome = fix_custom_value(&mut data, "HR", &mut mappings);

        assert_eq!(data["module"], "HR");
        assert!(outcome.warnings.is_empty());
        assert_eq!(mappings.get("null").map(String::as_str), Some("HR"));
    }

    #[test]
    fn test_deeply_nested_records() {
        let mut data = json!({"doctype": "Report", "name": "R1", "module": "Core",
            "children": [{"inner": {"name": "Child-1", "module": null}}]});
        let mut mappings = CustomMappings::new();

        let outcome = fix_custom_value(&mut data, "Selling", &mut mappings);

        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(data["module"], "Core");
        assert_eq!(data["children"][0]["inner"]["module"], "Selling");
    }

    #[test]
    fn test_numeric_name_is_keyed_by_json_text() {
        let mut data = json!({"name": 42, "module": null});
        let mut mappings = CustomMappings::new();
        fix_custom_value(&mut data, "HR", &mut mappings);
        assert_eq!(mappings.get("42").map(String::as_str), Some("HR"));
    }

    #[test]
    fn test_fixture_uses_mapping_then_fallback() {
        let mut data = json!([
            {"name": "Employee-badge_no", "module": null},
            {"name": "Unknown-field", "module": null},
            {"name": "Set", "module": "Selling"}
        ]);
        let mut mappings = CustomMappings::new();
        mappings.insert("Employee-badge_no".to_string(), "HR Management".to_string());

        let outcome = fix_fixture_value(&mut data, &mappings, "My App");

        assert_eq!(data[0]["module"], "HR Management");
        assert_eq!(data[1]["module"], "My App");
        assert_eq!(data[2]["module"], "Selling");
        let sources: Vec<_> = outcome.changes.iter().map(|c| c.source).collect();
        assert_eq!(sources, vec![ChangeSource::CustomMapping, ChangeSource::Fallback]);
    }

    #[test]
    fn test_fixture_fallback_is_warned() {
        let mut data = json!([
            {"name": "Employee-badge_no", "module": null},
            {"name": "Item-colour", "module": null}
        ]);
        let mut mappings = CustomMappings::new();
        mappings.insert("Employee-badge_no".to_string(), "HR".to_string());

        let outcome = fix_fixture_value(&mut data, &mappings, "My App");

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Item-colour"));
        assert!(outcome.warnings[0].contains("My App"));
    }

    #[test]
    fn test_fixture_without_name_is_skipped() {
        let mut data = json!([{"module": null}]);
        let outcome = fix_fixture_value(&mut data, &CustomMappings::new(), "App");
        assert!(data[0]["module"].is_null());
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_scalars_untouched() {
        let mut data = json!("module");
        let outcome = fix_fixture_value(&mut data, &CustomMappings::new(), "App");
        assert!(!outcome.is_modified());
        assert_eq!(data, json!("module"));
    }
}
