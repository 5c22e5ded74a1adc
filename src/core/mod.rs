//! Core module - module maps, record patching and the repair run

pub mod app;
pub mod config;
pub mod error;
pub mod fixer;
pub mod module_map;
pub mod runner;

pub use app::AppLocation;
pub use config::Config;
pub use error::ModfixError;
pub use fixer::{Change, ChangeSource, FixOutcome};
pub use module_map::{
    app_module_name, build_module_map, merge_maps, normalize_module_name, parse_modules_txt,
    CustomMappings, ModuleMap,
};
pub use runner::{FileKind, FileReport, RunOptions, RunReport};
