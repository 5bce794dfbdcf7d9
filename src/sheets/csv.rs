use ::csv::{ByteRecord, ReaderBuilder};

use super::traits::{extension, SheetReader};
use super::workbook::has_workbook_magic;
use crate::errors::ImportResult;
use crate::types::{Cell, RawRow};

/// Delimited text export of a statement. Every field is kept as text.
pub struct CsvSheet;

impl SheetReader for CsvSheet {
    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        if content.is_empty() || has_workbook_magic(content) {
            return false;
        }

        let has_csv_extension = filename
            .and_then(extension)
            .is_some_and(|ext| ext == "csv");

        has_csv_extension
            || String::from_utf8_lossy(content)
                .to_lowercase()
                .contains("data operazione")
    }

    fn read(content: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(sniff_delimiter(content))
            .from_reader(content);

        let mut rows = Vec::new();
        let mut record = ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            let row: RawRow = record
                .iter()
                .map(|field| Cell::from(String::from_utf8_lossy(field).into_owned()))
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }
}

/// `;` when the first lines hold more semicolons than commas, `,` otherwise.
fn sniff_delimiter(content: &[u8]) -> u8 {
    let text = String::from_utf8_lossy(content);
    let (semicolons, commas) = text.lines().take(20).fold((0, 0), |(s, c), line| {
        (
            s + line.matches(';').count(),
            c + line.matches(',').count(),
        )
    });

    if semicolons > commas { b';' } else { b',' }
}
