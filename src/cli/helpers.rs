//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use indexmap::IndexMap;

/// Render a two-column table of an ordered map
pub fn map_table(map: &IndexMap<String, String>, left: &str, right: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([left, right]);
    for (k, v) in map.iter() {
        builder.push_record([k.as_str(), v.as_str()]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Print a section heading
pub fn heading(title: &str) {
    println!("{}", style(format!("=== {} ===", title)).bold());
}

/// Print a warning to stderr
pub fn warn(message: &str) {
    eprintln!("{} {}", style("!").yellow(), message);
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_table_contains_entries_in_order() {
        let map: IndexMap<String, String> = [("Selling", "selling"), ("Al-Jar HR", "al_jar_hr")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let table = map_table(&map, "Module", "Key");

        assert!(table.contains("Module"));
        let selling = table.find("Selling").unwrap();
        let hr = table.find("Al-Jar HR").unwrap();
        assert!(selling < hr);
    }
}
