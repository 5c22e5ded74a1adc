//! `modfix map` command - Show the merged module map

use console::style;
use miette::Result;

use crate::cli::commands::common::TargetArgs;
use crate::cli::helpers::{heading, map_table, print_json};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{app_module_name, runner, Config};

#[derive(clap::Args, Debug)]
pub struct MapArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub fn run(args: MapArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let target = args.target.resolve(&config)?;
    let map = runner::final_map(&target.app, &target.overrides)?;

    if global.format == OutputFormat::Json {
        return print_json(&map);
    }

    if !global.quiet {
        heading("MODULE MAP (FINAL)");
    }
    println!("{}", map_table(&map, "Module", "Folder"));
    if !global.quiet {
        println!(
            "Fixture fallback module: {}",
            style(app_module_name(&map, target.app.name())).cyan()
        );
    }
    Ok(())
}
