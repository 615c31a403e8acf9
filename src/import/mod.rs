//! Excel production-data import: parse -> validate -> chunked upload.
//!
//! Expected columns: Job Number, Production Quantity, Date, Notes. Rows that
//! fail to parse or validate are excluded from upload and reported in the
//! summary; they never block other rows.

mod upload;

pub use upload::{upload_entries, EntrySink, UploadReport};

use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PressdeskError, Result};
use crate::job::{safe_f64, Job};

/// A production entry already persisted by the backend; used for duplicate
/// detection.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionEntry {
    #[serde(default)]
    pub job_number: String,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
}

/// A production entry staged for upload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProductionEntry {
    pub job_id: u64,
    pub job_number: String,
    pub quantity: u64,
    pub entry_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One spreadsheet row as read, before validation.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based spreadsheet row number (header is row 1).
    pub row: usize,
    pub job_number: String,
    pub quantity: String,
    pub date: Option<NaiveDate>,
    pub date_raw: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Valid,
    Warning,
    Invalid,
}

#[derive(Debug, Clone)]
pub struct RowReport {
    pub row: usize,
    pub job_number: String,
    pub status: RowStatus,
    pub message: String,
}

/// Validation outcome: counts, per-row messages, and the entries cleared
/// for upload.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub valid: usize,
    pub invalid: usize,
    pub warnings: usize,
    pub reports: Vec<RowReport>,
    pub entries: Vec<NewProductionEntry>,
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                format!("{f}")
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Excel serial day 0 is 1899-12-30.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}

fn parse_date_cell(cell: &Data) -> (Option<NaiveDate>, String) {
    match cell {
        Data::DateTime(dt) => (excel_serial_to_date(dt.as_f64()), format!("{}", dt.as_f64())),
        Data::Float(f) if *f > 20_000.0 && *f < 80_000.0 => {
            (excel_serial_to_date(*f), format!("{f}"))
        }
        other => {
            let raw = cell_to_string(other);
            let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(&raw, "%m/%d/%Y"))
                .or_else(|_| NaiveDate::parse_from_str(&raw, "%m/%d/%y"))
                .ok();
            (parsed, raw)
        }
    }
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let lower = h.to_lowercase();
        names.iter().any(|n| lower == *n)
    })
}

/// Read the first worksheet into raw rows. Blank rows are skipped; anything
/// else is kept for the validator to classify.
pub fn parse_workbook(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(PressdeskError::SpreadsheetNotFound(path.to_path_buf()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| PressdeskError::SpreadsheetOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PressdeskError::SpreadsheetEmpty {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PressdeskError::SpreadsheetOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .map(|r| r.iter().map(cell_to_string).collect())
        .unwrap_or_default();

    let job_col = find_column(&headers, &["job number", "job #", "job"])
        .ok_or_else(|| PressdeskError::MissingColumn("Job Number".into()))?;
    let qty_col = find_column(&headers, &["production quantity", "quantity", "qty"])
        .ok_or_else(|| PressdeskError::MissingColumn("Production Quantity".into()))?;
    let date_col = find_column(&headers, &["date", "production date"])
        .ok_or_else(|| PressdeskError::MissingColumn("Date".into()))?;
    let notes_col = find_column(&headers, &["notes", "note"]);

    let mut rows = Vec::new();
    for (i, cells) in rows_iter.enumerate() {
        let get = |col: usize| cells.get(col).unwrap_or(&Data::Empty);
        let job_number = cell_to_string(get(job_col));
        let quantity = cell_to_string(get(qty_col));
        let (date, date_raw) = parse_date_cell(get(date_col));
        let notes = notes_col
            .map(|c| cell_to_string(get(c)))
            .filter(|s| !s.is_empty());

        if job_number.is_empty() && quantity.is_empty() && date_raw.is_empty() {
            continue;
        }
        rows.push(RawRow {
            row: i + 2, // header occupies row 1
            job_number,
            quantity,
            date,
            date_raw,
            notes,
        });
    }

    debug!("parsed {} data rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Classify each row against the job list and already-persisted entries.
///
/// Invalid rows never upload. Duplicate rows (same job number and date as a
/// persisted entry) are warnings: uploaded unless `skip_duplicates`.
pub fn validate_rows(
    rows: &[RawRow],
    jobs: &[Job],
    existing: &[ProductionEntry],
    skip_duplicates: bool,
) -> ImportSummary {
    let persisted: HashSet<(String, NaiveDate)> = existing
        .iter()
        .filter_map(|e| e.entry_date.map(|d| (e.job_number.clone(), d)))
        .collect();

    let mut summary = ImportSummary::default();

    for row in rows {
        let invalid = |summary: &mut ImportSummary, message: String| {
            summary.invalid += 1;
            summary.reports.push(RowReport {
                row: row.row,
                job_number: row.job_number.clone(),
                status: RowStatus::Invalid,
                message,
            });
        };

        if row.job_number.is_empty() {
            invalid(&mut summary, "missing job number".into());
            continue;
        }
        let Some(job) = jobs.iter().find(|j| j.job_number == row.job_number) else {
            invalid(
                &mut summary,
                format!("job '{}' not found", row.job_number),
            );
            continue;
        };

        let quantity = safe_f64(&row.quantity);
        if quantity <= 0.0 {
            invalid(
                &mut summary,
                format!("invalid quantity '{}'", row.quantity),
            );
            continue;
        }

        let Some(date) = row.date else {
            invalid(&mut summary, format!("invalid date '{}'", row.date_raw));
            continue;
        };

        let entry = NewProductionEntry {
            job_id: job.id,
            job_number: row.job_number.clone(),
            quantity: quantity.round() as u64,
            entry_date: date,
            notes: row.notes.clone(),
        };

        if persisted.contains(&(row.job_number.clone(), date)) {
            summary.warnings += 1;
            summary.reports.push(RowReport {
                row: row.row,
                job_number: row.job_number.clone(),
                status: RowStatus::Warning,
                message: format!("entry for '{}' on {} already exists", row.job_number, date),
            });
            if !skip_duplicates {
                summary.entries.push(entry);
            }
            continue;
        }

        summary.valid += 1;
        summary.reports.push(RowReport {
            row: row.row,
            job_number: row.job_number.clone(),
            status: RowStatus::Valid,
            message: String::new(),
        });
        summary.entries.push(entry);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_jobs(numbers: &[&str]) -> Vec<Job> {
        numbers
            .iter()
            .enumerate()
            .map(|(i, n)| {
                serde_json::from_value(serde_json::json!({
                    "id": i as u64 + 1,
                    "job_number": n,
                }))
                .unwrap()
            })
            .collect()
    }

    fn raw_row(row: usize, job: &str, qty: &str, date: &str) -> RawRow {
        RawRow {
            row,
            job_number: job.to_string(),
            quantity: qty.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            date_raw: date.to_string(),
            notes: None,
        }
    }

    #[test]
    fn unknown_job_numbers_are_invalid_not_dropped() {
        let jobs = make_jobs(&["J-1", "J-2", "J-3", "J-4", "J-5", "J-6", "J-7", "J-8"]);
        let mut rows: Vec<RawRow> = (0..8)
            .map(|i| raw_row(i + 2, &format!("J-{}", i + 1), "1000", "2026-02-01"))
            .collect();
        rows.push(raw_row(10, "J-404", "1000", "2026-02-01"));
        rows.push(raw_row(11, "J-500", "1000", "2026-02-01"));

        let summary = validate_rows(&rows, &jobs, &[], false);
        assert_eq!(summary.valid, 8);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.entries.len(), 8);
        assert_eq!(summary.reports.len(), 10);
        let invalid_msgs: Vec<&str> = summary
            .reports
            .iter()
            .filter(|r| r.status == RowStatus::Invalid)
            .map(|r| r.message.as_str())
            .collect();
        assert!(invalid_msgs[0].contains("J-404"));
    }

    #[test]
    fn bad_quantity_and_bad_date_invalidate_row() {
        let jobs = make_jobs(&["J-1"]);
        let rows = vec![
            raw_row(2, "J-1", "0", "2026-02-01"),
            raw_row(3, "J-1", "abc", "2026-02-01"),
            raw_row(4, "J-1", "500", "not a date"),
        ];
        let summary = validate_rows(&rows, &jobs, &[], false);
        assert_eq!(summary.valid, 0);
        assert_eq!(summary.invalid, 3);
        assert!(summary.entries.is_empty());
    }

    #[test]
    fn duplicates_warn_and_upload_by_default() {
        let jobs = make_jobs(&["J-1"]);
        let existing = vec![ProductionEntry {
            job_number: "J-1".into(),
            entry_date: NaiveDate::from_ymd_opt(2026, 2, 1),
        }];
        let rows = vec![raw_row(2, "J-1", "1000", "2026-02-01")];

        let summary = validate_rows(&rows, &jobs, &existing, false);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.valid, 0);
        assert_eq!(summary.entries.len(), 1);

        let skipped = validate_rows(&rows, &jobs, &existing, true);
        assert_eq!(skipped.warnings, 1);
        assert!(skipped.entries.is_empty());
    }

    #[test]
    fn quantity_accepts_grouped_strings() {
        let jobs = make_jobs(&["J-1"]);
        let rows = vec![raw_row(2, "J-1", "12,500", "2026-02-01")];
        let summary = validate_rows(&rows, &jobs, &[], false);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.entries[0].quantity, 12_500);
    }

    #[test]
    fn excel_serial_dates_convert() {
        // 45658 => 2025-01-01
        assert_eq!(
            excel_serial_to_date(45658.0),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
    }

    #[test]
    fn missing_spreadsheet_is_a_clean_error() {
        let err = parse_workbook(Path::new("/nonexistent/entries.xlsx")).unwrap_err();
        assert!(matches!(err, PressdeskError::SpreadsheetNotFound(_)));
    }
}
