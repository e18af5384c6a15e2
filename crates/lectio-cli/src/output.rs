//! Run summaries for the terminal

use crate::cli::SummaryFormat;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use lectio_pipeline::{RunReport, TranslationReport, TranslationState};

/// Render a run report in the requested format.
pub fn render_run(run: &RunReport, format: SummaryFormat) -> Result<String> {
    match format {
        SummaryFormat::Json => Ok(serde_json::to_string_pretty(run)?),
        SummaryFormat::Table => Ok(summary_table(run).to_string()),
    }
}

/// One row per translation.
pub fn summary_table(run: &RunReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Translation",
        "Shape",
        "State",
        "Books",
        "Chapters",
        "Verses",
        "Warnings",
        "Violations",
        "Output",
    ]);

    for report in &run.translations {
        table.add_row(vec![
            Cell::new(&report.code),
            Cell::new(report.shape.map(|s| s.to_string()).unwrap_or_else(|| "-".into())),
            state_cell(report),
            Cell::new(report.books),
            Cell::new(report.chapters),
            Cell::new(report.verses),
            count_cell(report.warnings.len()),
            count_cell(report.violations.len()),
            Cell::new(
                report
                    .output
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
        ]);
    }
    table
}

fn state_cell(report: &TranslationReport) -> Cell {
    let cell = Cell::new(report.state);
    match report.state {
        TranslationState::Failed => cell.fg(Color::Red),
        TranslationState::Persisted | TranslationState::Validated if report.issue_count() > 0 => {
            cell.fg(Color::Yellow)
        }
        TranslationState::Persisted | TranslationState::Validated => cell.fg(Color::Green),
        _ => cell,
    }
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

/// Error lines plus, when `details` is set, every warning and violation.
pub fn issue_lines(run: &RunReport, details: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for report in &run.translations {
        if let Some(error) = &report.error {
            lines.push(format!("{}: error: {}", report.code, error));
        }
        if details {
            lines.extend(
                report
                    .warnings
                    .iter()
                    .map(|w| format!("{}: warning: {}", report.code, w)),
            );
            lines.extend(
                report
                    .violations
                    .iter()
                    .map(|v| format!("{}: violation: {}", report.code, v)),
            );
        }
    }
    lines
}

/// Whether the process should exit successfully.
pub fn run_succeeded(run: &RunReport, strict: bool) -> bool {
    if strict {
        run.is_clean()
    } else {
        run.failed_count() == 0
    }
}
