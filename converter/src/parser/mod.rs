//! Sheet reading.
//!
//! Turns the input file into rows of [`Cell`](crate::models::Cell)s. No
//! schema logic here: every row of the sheet is returned, header included.
//!
//! - Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`): first sheet, via calamine
//! - Delimited text (`.csv`, `.tsv`, `.txt`): encoding and delimiter auto-detected

pub mod text;
pub mod workbook;

use std::path::Path;

use crate::error::SheetResult;
use crate::models::Row;

pub use text::{decode_content, detect_delimiter, detect_encoding, parse_delimited, read_text_file};
pub use workbook::read_first_sheet;

/// Input kinds recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    DelimitedText,
}

impl SheetFormat {
    /// Anything that is not a known text extension is handed to calamine,
    /// which rejects formats it cannot open.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv" | "tsv" | "txt") => SheetFormat::DelimitedText,
            _ => SheetFormat::Workbook,
        }
    }
}

/// Read all rows of the input file.
pub fn read_sheet(path: impl AsRef<Path>) -> SheetResult<Vec<Row>> {
    let path = path.as_ref();
    match SheetFormat::from_path(path) {
        SheetFormat::DelimitedText => read_text_file(path),
        SheetFormat::Workbook => read_first_sheet(path),
    }
}
