use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use mlr_core::MlrEngine;
use mlr_ingest::{CsvDirectorySource, TableSource, load_snapshot};
use mlr_model::TableKind;
use tracing::{info, info_span};

use mlr_cli::output::write_results;
use mlr_cli::settings::{apply_overrides, load_engine_config};
use mlr_cli::types::RunOutcome;

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

pub fn run_tables() {
    let mut table = Table::new();
    table.set_header(vec!["Table", "File", "Description", "Required columns"]);
    apply_table_style(&mut table);
    for kind in TableKind::ALL {
        let columns = kind
            .required_columns()
            .iter()
            .map(|spec| format!("{} ({})", spec.name, spec.kind))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            kind.warehouse_name().to_string(),
            format!("{}.csv", kind.warehouse_name()),
            kind.description().to_string(),
            columns,
        ]);
    }
    println!("{table}");
}

pub fn run_report(args: &RunArgs) -> Result<RunOutcome> {
    let config = load_engine_config(args.config.as_deref())?;
    let config = apply_overrides(config, args.threshold, args.product_line.as_deref())?;

    let report_span = info_span!("report", data_dir = %args.data_dir.display());
    let _report_guard = report_span.enter();

    // =========================================================================
    // Stage 1: Load - all nine tables or nothing
    // =========================================================================
    // One invocation loads once, so the snapshot cache is left to long-lived
    // library callers.
    let source = CsvDirectorySource::new(&args.data_dir);
    let load_start = Instant::now();
    let spinner = loading_spinner(&args.data_dir);
    let loaded = info_span!("load").in_scope(|| -> mlr_ingest::Result<_> {
        let id = source.snapshot_id()?;
        load_snapshot(&source).map(|tables| (id, tables))
    });
    spinner.finish_and_clear();
    let (snapshot_id, tables) =
        loaded.with_context(|| format!("load snapshot from {}", args.data_dir.display()))?;
    info!(
        snapshot_id = %snapshot_id,
        duration_ms = load_start.elapsed().as_millis(),
        "snapshot loaded"
    );

    // =========================================================================
    // Stage 2: Compute
    // =========================================================================
    let engine = MlrEngine::new(config);
    let report = engine
        .run(&tables)
        .context("source tables do not match the expected schema")?;

    // =========================================================================
    // Stage 3: Export
    // =========================================================================
    let (output_dir, written) = if args.dry_run {
        info!("dry run; no files written");
        (None, Vec::new())
    } else {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| args.data_dir.join("output"));
        let written = info_span!("export", dir = %dir.display())
            .in_scope(|| write_results(&report, engine.config(), &snapshot_id, &dir))?;
        (Some(dir), written)
    };

    Ok(RunOutcome {
        data_dir: args.data_dir.clone(),
        snapshot_id,
        config: engine.config().clone(),
        report,
        output_dir,
        written,
    })
}

fn loading_spinner(dir: &Path) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading snapshot from {}", dir.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
