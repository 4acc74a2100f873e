//! Benefits ledger source.
//!
//! The ledger arrives as a workbook dropped into the templates directory;
//! it is located by a marker phrase in its filename rather than by a fixed
//! name, since exports carry dates and revision suffixes. Reading yields
//! raw positional rows; all interpretation happens in
//! [`crate::calculation::parse_benefits`].

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::LedgerRow;

/// Filename marker that identifies the benefits workbook.
const LEDGER_FILE_MARKER: &str = "Reporte de Beneficios";

/// Picks the ledger workbook out of a directory.
///
/// Returns the first entry whose filename carries the marker phrase and the
/// spreadsheet extension, or `None` when the directory has no such file (or
/// cannot be listed).
pub fn find_ledger_file(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_ledger_filename(&name) {
            return Some(entry.path());
        }
    }
    None
}

/// Whether a filename identifies a benefits workbook.
fn is_ledger_filename(name: &str) -> bool {
    name.contains(LEDGER_FILE_MARKER) && name.ends_with(".xlsx")
}

/// Reads every row of the workbook's first worksheet as a positional
/// [`LedgerRow`].
///
/// Header rows are returned too; the parser skips the template's reserved
/// block itself so that row positions stay meaningful.
///
/// # Errors
///
/// Returns [`EngineError::Ledger`] when the workbook cannot be opened or
/// its first worksheet cannot be read.
pub fn read_ledger_rows(path: &Path) -> EngineResult<Vec<LedgerRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|err| EngineError::Ledger {
        message: format!("could not open {}: {err}", path.display()),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EngineError::Ledger {
            message: format!("{} has no worksheets", path.display()),
        })?
        .map_err(|err| EngineError::Ledger {
            message: format!("could not read {}: {err}", path.display()),
        })?;

    Ok(range.rows().map(row_from_cells).collect())
}

/// Loads the ledger rows for a batch, degrading to an empty list when the
/// workbook is missing or unreadable. The report then simply carries no
/// bonus hours; a missing ledger must not fail the batch.
pub fn load_ledger(dir: &Path) -> Vec<LedgerRow> {
    let Some(path) = find_ledger_file(dir) else {
        warn!(dir = %dir.display(), "no benefits ledger found, bonus hours default to none");
        return Vec::new();
    };

    match read_ledger_rows(&path) {
        Ok(rows) => rows,
        Err(error) => {
            warn!(%error, "benefits ledger unreadable, bonus hours default to none");
            Vec::new()
        }
    }
}

fn row_from_cells(cells: &[Data]) -> LedgerRow {
    LedgerRow {
        full_name: cell_text(cells, 0),
        email: cell_text(cells, 1),
        request_date: cell_text(cells, 2),
        benefit_type: cell_text(cells, 3),
        resolution_date: cell_text(cells, 4),
        category: cell_text(cells, 5),
        detail: cell_text(cells, 6),
    }
}

/// Text content of one cell, `None` for blank or missing cells.
fn cell_text(cells: &[Data], index: usize) -> Option<String> {
    match cells.get(index)? {
        Data::Empty => None,
        Data::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_filename_requires_marker_and_extension() {
        assert!(is_ledger_filename("Reporte de Beneficios 2025-05.xlsx"));
        assert!(is_ledger_filename("copia Reporte de Beneficios (3).xlsx"));
        assert!(!is_ledger_filename("Reporte de Beneficios.csv"));
        assert!(!is_ledger_filename("Slack Time General.xlsx"));
        assert!(!is_ledger_filename("reporte de beneficios.xlsx"));
    }

    #[test]
    fn test_find_ledger_file_in_missing_directory_is_none() {
        assert!(find_ledger_file(Path::new("/definitely/not/here")).is_none());
    }

    #[test]
    fn test_read_missing_workbook_is_a_ledger_error() {
        let result = read_ledger_rows(Path::new("/definitely/not/here.xlsx"));
        assert!(matches!(result, Err(EngineError::Ledger { .. })));
    }

    #[test]
    fn test_load_ledger_degrades_to_empty() {
        assert!(load_ledger(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn test_cell_text_maps_cell_kinds() {
        let cells = vec![
            Data::String("ana@example.com".to_string()),
            Data::Empty,
            Data::Float(8.0),
        ];
        assert_eq!(cell_text(&cells, 0).as_deref(), Some("ana@example.com"));
        assert_eq!(cell_text(&cells, 1), None);
        assert_eq!(cell_text(&cells, 2).as_deref(), Some("8"));
        assert_eq!(cell_text(&cells, 9), None);
    }
}
