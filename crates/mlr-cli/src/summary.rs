use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use mlr_cli::render::{flagged_headers, flagged_rows, frame_rows, rows_above};
use mlr_cli::types::RunOutcome;
use mlr_common::format_numeric;
use mlr_core::DataQualityReport;
use mlr_model::columns::{MLR_CLAIMS, MLR_PA};

pub fn print_summary(outcome: &RunOutcome) {
    let report = &outcome.report;
    let threshold = outcome.config.risk_threshold;
    println!("Data: {}", outcome.data_dir.display());
    println!("Snapshot: {}", short_id(&outcome.snapshot_id));
    match &outcome.output_dir {
        Some(dir) => println!("Output: {} ({} files)", dir.display(), outcome.written.len()),
        None => println!("Output: dry run, nothing written"),
    }

    print_frame(
        "MLR Analysis Results (PA)",
        &report.pa_mlr,
        Some((MLR_PA, threshold)),
        "No PA MLR data available.",
    );
    print_frame(
        "MLR Analysis Results (Claims)",
        &report.claims_mlr,
        Some((MLR_CLAIMS, threshold)),
        "No Claims MLR data available.",
    );
    print_flagged(outcome);
    print_frame(
        "Retail MLR - Individual/Plan Breakdown",
        &report.retail.member_costs,
        None,
        "No retail member cost data available.",
    );
    print_frame(
        "Retail Premium and Cost by Plan",
        &report.retail.plan_summary,
        None,
        "No retail plan data available.",
    );
    print_quality(&report.quality);

    if !report.failures.is_empty() {
        eprintln!("Errors:");
        for failure in &report.failures {
            eprintln!("- {}: {}", failure.stage, failure.message);
        }
    }
}

fn print_frame(title: &str, df: &DataFrame, highlight: Option<(&str, f64)>, empty: &str) {
    println!();
    println!("{title}");
    if df.height() == 0 {
        println!("{empty}");
        return;
    }
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for (index, column) in df.get_columns().iter().enumerate() {
        if column.dtype().is_float() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    let highlighted = match highlight {
        Some((column, threshold)) => rows_above(df, column, threshold),
        None => vec![false; df.height()],
    };
    for (row, above) in frame_rows(df).into_iter().zip(highlighted) {
        table.add_row(
            row.into_iter()
                .map(|value| if above { alert_cell(value) } else { Cell::new(value) })
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
}

fn print_flagged(outcome: &RunOutcome) {
    let threshold = outcome.config.risk_threshold;
    println!();
    println!("Groups with MLR > {}%", format_numeric(threshold));
    let rows = flagged_rows(&outcome.report.flagged);
    if rows.is_empty() {
        println!("No groups have MLR > {}%", format_numeric(threshold));
        return;
    }
    let [pa_header, claims_header] = flagged_headers(threshold);
    let mut table = Table::new();
    table.set_header(vec![header_cell(&pa_header), header_cell(&claims_header)]);
    apply_table_style(&mut table);
    for [pa, claims] in rows {
        table.add_row(vec![alert_cell(pa), alert_cell(claims)]);
    }
    println!("{table}");
}

fn print_quality(quality: &DataQualityReport) {
    if !quality.has_anomalies() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("PA"), header_cell("Claims")]);
    apply_quality_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Groups without revenue"),
        count_cell(quality.pa.groups_without_revenue),
        count_cell(quality.claims.groups_without_revenue),
    ]);
    table.add_row(vec![
        Cell::new("Non-finite MLR values"),
        count_cell(quality.pa.non_finite_ratios),
        count_cell(quality.claims.non_finite_ratios),
    ]);
    println!();
    println!("Data quality:");
    println!("{table}");
    if !quality.multi_period_groups.is_empty() {
        println!(
            "Groups with several contract periods: {}",
            quality.multi_period_groups.join(", ")
        );
    }
}

fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_quality_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn alert_cell(value: String) -> Cell {
    Cell::new(value)
        .fg(Color::Red)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
