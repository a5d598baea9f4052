//! Delimited text input (`.csv`, `.tsv`, `.txt`) with encoding and delimiter
//! auto-detection.

use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

use crate::error::SheetResult;
use crate::models::{Cell, Row};

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "euc-kr" | "cp949" | "uhc" | "ks_c_5601-1987" => "euc-kr".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the named encoding. Unknown labels fall back to UTF-8;
/// a byte order mark overrides the label.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let encoding = Encoding::for_label(encoding.as_bytes()).unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Pick the separator occurring most often on the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Split delimited text into rows. Every line is a row, the first included;
/// empty fields become [`Cell::Empty`].
pub fn parse_delimited(content: &str, delimiter: char) -> SheetResult<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(Row::new(record.iter().map(Cell::text).collect()));
    }
    Ok(rows)
}

/// Text content of a file. Valid UTF-8 is taken as is (minus a BOM);
/// chardet only guesses for everything else.
pub fn decode_file_bytes(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => decode_content(bytes, &detect_encoding(bytes)),
    }
}

/// Read a delimited text file with auto-detection.
pub fn read_text_file(path: impl AsRef<Path>) -> SheetResult<Vec<Row>> {
    let bytes = std::fs::read(path.as_ref())?;
    let content = decode_file_bytes(&bytes);
    parse_delimited(&content, detect_delimiter(&content))
}
