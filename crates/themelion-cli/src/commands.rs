use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info;

use themelion_cli::pipeline::{BuildOptions, Project, build, check};
use themelion_cli::reload::OutputSink;
use themelion_cli::types::{BuildResult, CheckResult};
use themelion_content::{aggregate, load_languages};
use themelion_module::{ContentPlugin, ModuleFormat, watch};

use crate::cli::{BuildArgs, CheckArgs, FormatArg, RootArgs, WatchArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell, print_build_summary};

pub fn run_build(args: &BuildArgs) -> Result<BuildResult> {
    let project = Project::open(args.root.root.as_deref())?;
    let output = project.output_path(args.out.as_deref());
    let options = BuildOptions {
        format: module_format(args.format),
        strict: args.strict,
    };
    build(&project, &output, options)
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let project = Project::open(args.root.root.as_deref())?;
    check(&project, args.strict)
}

/// Builds once, then blocks rebuilding on every change under a source root.
///
/// Each successful rebuild prints one `{"type":"full-reload"}` line on stdout.
/// A failed first build is reported the same way as a failed rebuild.
pub fn run_watch(args: &WatchArgs) -> Result<()> {
    let project = Project::open(args.root.root.as_deref())?;
    let output = project.output_path(args.out.as_deref());
    let options = BuildOptions {
        format: module_format(args.format),
        strict: false,
    };
    let mut sink = OutputSink::new(output, io::stdout());
    if let Some(initial) = sink.initial_build(&project, options) {
        print_build_summary(&initial);
    }

    let mut plugin = ContentPlugin::new(project.sources.clone()).with_format(options.format);
    info!(root = %project.root.display(), "watching for changes");
    watch(
        &mut plugin,
        &mut sink,
        Duration::from_millis(args.debounce_ms),
    )
    .context("watch sources")
}

pub fn run_languages(args: &RootArgs) -> Result<()> {
    let project = Project::open(args.root.as_deref())?;
    let registry =
        load_languages(&project.sources.languages_dir).context("load language registry")?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Ext"),
        header_cell("Editor"),
        header_cell("Label"),
        header_cell("Icon"),
    ]);
    apply_table_style(&mut table);
    for language in registry.iter() {
        table.add_row(vec![
            Cell::new(&language.id),
            Cell::new(&language.name),
            Cell::new(&language.file_extension),
            Cell::new(&language.editor_syntax_id),
            Cell::new(&language.label),
            Cell::new(&language.icon),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_rooms(args: &RootArgs) -> Result<()> {
    let project = Project::open(args.root.as_deref())?;
    let aggregation = aggregate(&project.sources).context("aggregate content")?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Order"),
        header_cell("Room"),
        header_cell("Name"),
        header_cell("Categories"),
        header_cell("Topics"),
        header_cell("Implemented"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for room in &aggregation.catalog.rooms {
        let total = room.topic_summaries().count();
        let implemented = room
            .topic_summaries()
            .filter(|summary| summary.status.is_implemented())
            .count();
        table.add_row(vec![
            Cell::new(room.order),
            Cell::new(&room.slug),
            Cell::new(&room.name),
            Cell::new(room.categories.len()),
            Cell::new(total),
            if implemented == 0 {
                dim_cell(implemented)
            } else {
                Cell::new(implemented)
            },
        ]);
    }
    println!("{table}");
    Ok(())
}

fn module_format(format: FormatArg) -> ModuleFormat {
    match format {
        FormatArg::Module => ModuleFormat::EsModule,
        FormatArg::Json => ModuleFormat::Json,
    }
}
