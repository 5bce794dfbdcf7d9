use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use tracing::debug;

use super::traits::{extension, SheetReader};
use crate::errors::{ImportError, ImportResult};
use crate::types::{Cell, RawRow};

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Excel/LibreOffice workbook. Only the first worksheet is read.
pub struct WorkbookSheet;

impl SheetReader for WorkbookSheet {
    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        has_workbook_magic(content)
            || filename
                .and_then(extension)
                .is_some_and(|ext| WORKBOOK_EXTENSIONS.contains(&ext.as_str()))
    }

    fn read(content: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ImportError::EmptyWorkbook)??;

        // calamine trims leading empty rows and columns; put them back so
        // positions match what the user sees in the sheet
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        debug!(
            rows = range.height(),
            columns = range.width(),
            row_offset,
            col_offset,
            "first worksheet loaded"
        );

        let mut rows: Vec<RawRow> = (0..row_offset).map(|_| Vec::new()).collect();
        for sheet_row in range.rows() {
            let mut row = vec![Cell::Empty; col_offset as usize];
            row.extend(sheet_row.iter().map(to_cell));
            rows.push(row);
        }

        Ok(rows)
    }
}

pub(crate) fn has_workbook_magic(content: &[u8]) -> bool {
    content.starts_with(ZIP_MAGIC) || content.starts_with(OLE_MAGIC)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) if dt.is_duration() => Cell::Number(dt.as_f64()),
        // as_datetime applies the workbook's 1900 or 1904 date system
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|datetime| Cell::Date(datetime.date()))
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_date(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::from(s.as_str())),
        Data::DurationIso(s) => Cell::from(s.as_str()),
    }
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let date = text.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
