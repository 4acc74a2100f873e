//! Spreadsheet rendering of an assembled report.
//!
//! The layout mirrors the distribution template: a title cell with the date
//! range, one row per requested email with category hours in fixed columns,
//! and two summary cells for the processed-mailbox count and the business
//! days. Only the output filename depends on the clock.

use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::calculation::{PersonOutcome, Report};
use crate::error::{EngineError, EngineResult};

// Fixed column layout (zero-based), matching the distribution template:
// email in B, error text in C, category hours in D..J, total in L.
const COL_EMAIL: u16 = 1;
const COL_ERROR: u16 = 2;
const COL_CEREMONY: u16 = 3;
const COL_BENEFITS: u16 = 4;
const COL_MEETING: u16 = 5;
const COL_CAREER_PLAN: u16 = 6;
const COL_ROUTE: u16 = 7;
const COL_TRANSFER: u16 = 8;
const COL_SEEKER: u16 = 9;
const COL_TOTAL: u16 = 11;

/// Data rows start at sheet row 3.
const FIRST_DATA_ROW: u32 = 2;

// Summary cells G15 and G16, with labels one column to the left.
const ROW_PROCESSED: u32 = 14;
const ROW_BUSINESS_DAYS: u32 = 15;
const COL_SUMMARY_LABEL: u16 = 5;
const COL_SUMMARY_VALUE: u16 = 6;

/// Writes the report workbook into `output_dir`, returning the filename.
///
/// Hours render rounded to two decimals. The total column is written only
/// when positive: "no meetings recorded" must not read as "total time
/// worked is exactly zero hours". Error rows carry the message and no
/// numeric columns.
///
/// # Errors
///
/// Returns [`EngineError::Render`] when the output directory cannot be
/// created or the workbook cannot be written.
pub fn render_report(report: &Report, output_dir: &Path) -> EngineResult<String> {
    std::fs::create_dir_all(output_dir).map_err(|err| EngineError::Render {
        message: format!("could not create {}: {err}", output_dir.display()),
    })?;

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    let title = format!(
        "Slacktime Fecha Inicio: {} | Fecha Fin: {}",
        report.range.start.format("%Y-%m-%d"),
        report.range.end.format("%Y-%m-%d"),
    );
    sheet
        .write_string_with_format(0, COL_EMAIL, &title, &bold)
        .map_err(render_error)?;

    write_headers(sheet, &bold)?;

    let mut row = FIRST_DATA_ROW;
    for entry in &report.rows {
        sheet
            .write_string(row, COL_EMAIL, &entry.email)
            .map_err(render_error)?;

        match &entry.outcome {
            PersonOutcome::Failed { error } => {
                sheet
                    .write_string(row, COL_ERROR, format!("Error: {error}"))
                    .map_err(render_error)?;
            }
            PersonOutcome::Totals(totals) => {
                write_hours(sheet, row, COL_CEREMONY, totals.ceremony)?;
                if let Some(bonus) = entry.benefit_hours {
                    sheet
                        .write_number(row, COL_BENEFITS, bonus as f64)
                        .map_err(render_error)?;
                }
                write_hours(sheet, row, COL_MEETING, totals.meeting)?;
                write_hours(sheet, row, COL_CAREER_PLAN, totals.career_plan)?;
                write_hours(sheet, row, COL_ROUTE, totals.route)?;
                write_hours(sheet, row, COL_TRANSFER, totals.transfer)?;
                write_hours(sheet, row, COL_SEEKER, totals.seeker)?;
                if totals.total > Decimal::ZERO {
                    write_hours(sheet, row, COL_TOTAL, totals.total)?;
                }
            }
        }

        row += 1;
    }

    sheet
        .write_string(ROW_PROCESSED, COL_SUMMARY_LABEL, "Correos procesados")
        .map_err(render_error)?;
    sheet
        .write_number(
            ROW_PROCESSED,
            COL_SUMMARY_VALUE,
            f64::from(report.processed_count),
        )
        .map_err(render_error)?;
    sheet
        .write_string(ROW_BUSINESS_DAYS, COL_SUMMARY_LABEL, "Días hábiles")
        .map_err(render_error)?;
    sheet
        .write_number(
            ROW_BUSINESS_DAYS,
            COL_SUMMARY_VALUE,
            f64::from(report.business_days),
        )
        .map_err(render_error)?;

    let filename = format!("SlackTime_{}.xlsx", Utc::now().timestamp_millis());
    let path = output_dir.join(&filename);
    workbook.save(&path).map_err(|err| EngineError::Render {
        message: format!("could not write {}: {err}", path.display()),
    })?;

    Ok(filename)
}

/// Column headers in row 2, bold like the template's.
fn write_headers(sheet: &mut Worksheet, bold: &Format) -> EngineResult<()> {
    let headers: &[(u16, &str)] = &[
        (COL_EMAIL, "Correo"),
        (COL_CEREMONY, "Ceremonias"),
        (COL_BENEFITS, "Beneficios"),
        (COL_MEETING, "Reuniones"),
        (COL_CAREER_PLAN, "Plan Carrera"),
        (COL_ROUTE, "Rutas"),
        (COL_TRANSFER, "Transferencias"),
        (COL_SEEKER, "Seekers"),
        (COL_TOTAL, "Total"),
    ];
    for (col, label) in headers {
        sheet
            .write_string_with_format(1, *col, *label, bold)
            .map_err(render_error)?;
    }
    Ok(())
}

/// Writes an hour value rounded to two decimals.
fn write_hours(sheet: &mut Worksheet, row: u32, col: u16, hours: Decimal) -> EngineResult<()> {
    let rounded = hours.round_dp(2).to_f64().unwrap_or(0.0);
    sheet.write_number(row, col, rounded).map_err(render_error)?;
    Ok(())
}

fn render_error(err: rust_xlsxwriter::XlsxError) -> EngineError {
    EngineError::Render {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{DateRange, PersonTotals, ReportRow};
    use chrono::NaiveDate;

    fn sample_report() -> Report {
        let totals = PersonTotals {
            ceremony: Decimal::new(25, 1), // 2.5
            meeting: Decimal::new(4, 0),
            route: Decimal::ZERO,
            seeker: Decimal::ZERO,
            transfer: Decimal::new(1, 0),
            career_plan: Decimal::ZERO,
            total: Decimal::new(75, 1), // 7.5
        };

        Report {
            range: DateRange {
                start: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
            },
            rows: vec![
                ReportRow {
                    email: "ana@example.com".to_string(),
                    outcome: PersonOutcome::Totals(totals),
                    benefit_hours: Some(6),
                },
                ReportRow {
                    email: "ghost@example.com".to_string(),
                    outcome: PersonOutcome::Failed {
                        error: "mailbox not found".to_string(),
                    },
                    benefit_hours: None,
                },
            ],
            business_days: 5,
            processed_count: 1,
        }
    }

    #[test]
    fn test_render_writes_workbook_file() {
        let dir = std::env::temp_dir().join("slacktime-render-test");
        let filename = render_report(&sample_report(), &dir).unwrap();

        assert!(filename.starts_with("SlackTime_"));
        assert!(filename.ends_with(".xlsx"));

        let path = dir.join(&filename);
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_render_into_unwritable_directory_is_a_render_error() {
        let result = render_report(&sample_report(), Path::new("/proc/no-such-dir"));
        assert!(matches!(result, Err(EngineError::Render { .. })));
    }
}
