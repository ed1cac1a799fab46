//! Report Writer — one timestamped `.xlsx` per run, plus a short summary on stdout.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::errors::AppError;
use crate::models::evaluation::ReportRow;

/// Column order of the report sheet.
pub const COLUMNS: [&str; 5] = ["filename", "name", "email", "score", "notes"];

/// Aggregate score figures. Only exists for a non-empty row set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub average: f64,
    pub max: f64,
}

impl ScoreSummary {
    pub fn from_rows(rows: &[ReportRow]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let total: f64 = rows.iter().map(|r| r.score).sum();
        let max = rows.iter().map(|r| r.score).fold(f64::MIN, f64::max);
        Some(Self {
            average: total / rows.len() as f64,
            max,
        })
    }
}

/// `scores_YYYYMMDD_HHMMSS.xlsx`; two runs in the same second collide.
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("scores_{}.xlsx", at.format("%Y%m%d_%H%M%S"))
}

/// Writes `rows` (possibly none) under `output_dir`, creating the directory if needed.
/// Returns the path of the new workbook.
pub fn write_report(output_dir: &Path, rows: &[ReportRow]) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(report_file_name(Local::now()));
    write_workbook(&path, rows)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

fn write_workbook(path: &Path, rows: &[ReportRow]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.filename)?;
        sheet.write_string(r, 1, &row.name)?;
        sheet.write_string(r, 2, &row.email)?;
        sheet.write_number(r, 3, row.score)?;
        sheet.write_string(r, 4, &row.notes)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Prints where the report went and, when there are rows, the average and highest score.
pub fn print_summary(path: &Path, rows: &[ReportRow]) {
    println!("\nResults saved to: {}", path.display());
    println!("Processed {} resumes", rows.len());

    if let Some(summary) = ScoreSummary::from_rows(rows) {
        println!("Average score: {:.2}", summary.average);
        println!("Highest score: {:.2}", summary.max);
    }
}
