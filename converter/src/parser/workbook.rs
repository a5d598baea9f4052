//! Workbook input (`.xlsx`, `.xlsm`, `.xls`, `.ods`) via calamine.
//!
//! Only the first sheet is read. Rows and columns keep their sheet
//! positions: a used range starting at `B3` still yields rows aligned to
//! column `A` and row 1.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::models::{Cell, Row};

/// Read every row of the workbook's first sheet.
pub fn read_first_sheet(path: impl AsRef<Path>) -> SheetResult<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or(SheetError::NoSheets)??;
    Ok(range_to_rows(&range))
}

/// Convert a used range to rows anchored at `A1`.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut rows: Vec<Row> = (0..start_row).map(|_| Row::default()).collect();
    for sheet_row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(sheet_row.iter().map(cell_from_data));
        rows.push(Row::new(cells));
    }
    rows
}

/// Map a calamine cell to a [`Cell`]. Dates keep their serial number, as a
/// spreadsheet stores them.
pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}
