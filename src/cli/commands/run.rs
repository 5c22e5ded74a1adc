//! `modfix run` command - Fix NULL modules in custom JSON files and fixtures

use console::style;
use miette::Result;

use crate::cli::commands::common::TargetArgs;
use crate::cli::helpers::{heading, map_table, print_json, warn};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{runner, ChangeSource, Config, FileKind, FileReport, RunOptions, RunReport};

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Report what would change without writing any file
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let target = args.target.resolve(&config)?;
    let options = RunOptions {
        dry_run: args.dry_run || config.dry_run(),
    };

    let report = runner::run(&target.app, &target.overrides, &options)?;

    match global.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Human => {
            print_report(&report, global.quiet);
            Ok(())
        }
    }
}

fn print_report(report: &RunReport, quiet: bool) {
    if !quiet {
        heading("MODULE MAP (FINAL)");
        println!("{}", map_table(&report.final_map, "Module", "Folder"));
        println!();

        for file in report.files_of(FileKind::Custom) {
            print_file(file, report.dry_run);
        }

        if let Some(fallback) = &report.fallback_module {
            heading("FIXTURES");
            println!("Fallback module: {}", style(fallback).cyan());
            println!();
            for file in report.files_of(FileKind::Fixture) {
                print_file(file, report.dry_run);
            }
        }

        if !report.custom_mappings.is_empty() {
            heading("CUSTOM -> MODULE");
            println!("{}", map_table(&report.custom_mappings, "Record", "Module"));
            println!();
        }
    }

    for message in &report.warnings {
        warn(message);
    }
    for file in &report.files {
        for message in &file.warnings {
            warn(&format!("{}: {}", file.path.display(), message));
        }
    }

    let verb = if report.dry_run { "Would fix" } else { "Fixed" };
    println!(
        "{} {} {} module field(s) in {} of {} file(s)",
        style("✓").green(),
        verb,
        style(report.total_changes()).cyan(),
        report.modified_files(),
        report.files.len()
    );
}

fn print_file(file: &FileReport, dry_run: bool) {
    let name = file
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.path.display().to_string());

    match &file.module {
        Some(module) => println!(
            "{} {} {}",
            style("→").blue(),
            name,
            style(format!("(module: {})", module)).dim()
        ),
        None => println!("{} {}", style("→").blue(), name),
    }

    for change in &file.changes {
        match change.source {
            ChangeSource::Fallback => println!(
                "  {} Set module for '{}' → {} {}",
                style("✓").green(),
                change.docname,
                style(&change.module).cyan(),
                style("(fallback)").dim()
            ),
            ChangeSource::CustomFolder | ChangeSource::CustomMapping => println!(
                "  {} Set module for '{}' → {}",
                style("✓").green(),
                change.docname,
                style(&change.module).cyan()
            ),
        }
    }

    if file.written {
        println!("  {} Saved {}", style("✓").green(), name);
    } else if !file.changes.is_empty() && dry_run {
        println!("  {} (dry run, not saved)", style("-").dim());
    } else {
        println!("  {} nothing to fix", style("-").dim());
    }
    println!();
}
