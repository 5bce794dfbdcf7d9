use std::fs;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{ImportError, ImportResult},
    pipeline::ImportPipeline,
    sheets::prelude::*,
    types::{RawRow, Transaction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetFormat {
    #[serde(rename = "csv")]
    Csv,
    /// xlsx, xlsm, xlsb, xls or ods
    #[serde(rename = "workbook")]
    Workbook,
}

impl SheetFormat {
    fn read(&self, content: &[u8]) -> ImportResult<Vec<RawRow>> {
        match self {
            SheetFormat::Csv => CsvSheet::read(content),
            SheetFormat::Workbook => WorkbookSheet::read(content),
        }
    }

    fn detect(filename: Option<&str>, content: Option<&[u8]>) -> ImportResult<Self> {
        if let Some(content) = content {
            if WorkbookSheet::is_supported(None, content) {
                return Ok(SheetFormat::Workbook);
            }
            if CsvSheet::is_supported(filename, content) {
                return Ok(SheetFormat::Csv);
            }
        }

        if filename.is_some_and(|name| WorkbookSheet::is_supported(Some(name), &[])) {
            return Ok(SheetFormat::Workbook);
        }
        if let Some(name) = filename {
            if name.to_lowercase().ends_with(".csv") {
                return Ok(SheetFormat::Csv);
            }
        }

        Err(ImportError::UnsupportedFormat)
    }
}

/// Reads an uploaded statement and runs it through the import pipeline.
///
/// ```rust,ignore
/// let imported = ImportBuilder::new()
///     .filename("movimenti.xlsx")
///     .import(&store.transactions)?;
/// ```
#[derive(Default)]
pub struct ImportBuilder {
    content: Option<Vec<u8>>,
    filepath: Option<String>,
    format: Option<SheetFormat>,
    today: Option<NaiveDate>,
    details: Option<String>,
}

impl ImportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &[u8]) -> Self {
        self.content = Some(content.to_vec());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: SheetFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Date used in place of unreadable operation dates. Defaults to the local date.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Provenance label stored on each imported transaction.
    pub fn details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    fn pipeline(&self) -> ImportPipeline {
        let mut pipeline = ImportPipeline::new();
        if let Some(today) = self.today {
            pipeline = pipeline.with_today(today);
        }
        if let Some(details) = &self.details {
            pipeline = pipeline.with_details(details);
        }
        pipeline
    }

    /// Cell grid of the first sheet, without running the pipeline.
    pub fn read_rows(self) -> ImportResult<Vec<RawRow>> {
        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| {
                SheetFormat::detect(self.filepath.as_deref(), self.content.as_deref())
            })?;

        let content = self.content.map(Ok).unwrap_or_else(|| {
            self.filepath
                .ok_or(ImportError::MissingContentAndFilepath)
                .and_then(|path| fs::read(path).map_err(Into::into))
        })?;

        format.read(&content)
    }

    /// New transactions found in the statement, skipping those already in `existing`.
    pub fn import(self, existing: &[Transaction]) -> ImportResult<Vec<Transaction>> {
        let pipeline = self.pipeline();
        let rows = self.read_rows()?;
        pipeline.run(&rows, existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Cell};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_CSV: &str = "Estratto conto corrente;;;;\n\
Data Operazione;Descrizione;Entrate;Uscite;Categoria\n\
05 mar 2024;Pagamento POS;;23,40;Pagamento carta\n\
;presso SUPERMERCATO;;;\n\
27/03/2024;Accredito;2.150,00;;Stipendio\n\
;Saldo al 31/03/2024;;;\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    #[test]
    fn test_builder_missing_content() {
        let result = ImportBuilder::new().import(&[]);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat)));
    }

    #[test]
    fn test_builder_new() {
        let builder = ImportBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert!(builder.format.is_none());
        assert!(builder.today.is_none());
        assert!(builder.details.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ImportBuilder::new()
            .content(b"content")
            .filename("movimenti.csv")
            .format(SheetFormat::Csv)
            .today(today())
            .details("Caricato");

        assert_eq!(builder.content.as_deref(), Some(b"content".as_slice()));
        assert_eq!(builder.filepath.as_deref(), Some("movimenti.csv"));
        assert_eq!(builder.format, Some(SheetFormat::Csv));
        assert_eq!(builder.today, Some(today()));
        assert_eq!(builder.details.as_deref(), Some("Caricato"));
    }

    #[rstest]
    #[case(Some(SheetFormat::Csv), None, "Explicit format")]
    #[case(None, None, "Auto-detect by content")]
    #[case(None, Some("movimenti.csv"), "Auto-detect by filename")]
    #[case(None, Some("movimenti.txt"), "Content wins over an unknown extension")]
    fn test_import_with_different_detection_methods(
        #[case] format: Option<SheetFormat>,
        #[case] filename: Option<&str>,
        #[case] _description: &str,
    ) {
        let mut builder = ImportBuilder::new()
            .content(SAMPLE_CSV.as_bytes())
            .today(today());

        if let Some(fmt) = format {
            builder = builder.format(fmt);
        }
        if let Some(fname) = filename {
            builder = builder.filename(fname);
        }

        let transactions = builder.import(&[]).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].name, "Pagamento POS presso SUPERMERCATO");
        assert_eq!(transactions[0].amount, Decimal::from_str("-23.40").unwrap());
        assert_eq!(transactions[1].category, Category::Salary);
    }

    #[rstest]
    #[case(None, Some(b"PK\x03\x04".as_slice()), Ok(SheetFormat::Workbook))]
    #[case(Some("x.csv"), Some(b"PK\x03\x04".as_slice()), Ok(SheetFormat::Workbook))]
    #[case(None, Some(SAMPLE_CSV.as_bytes()), Ok(SheetFormat::Csv))]
    #[case(Some("estratto.xlsx"), None, Ok(SheetFormat::Workbook))]
    #[case(Some("estratto.ODS"), None, Ok(SheetFormat::Workbook))]
    #[case(Some("estratto.CSV"), None, Ok(SheetFormat::Csv))]
    #[case(Some("estratto.pdf"), Some(b"%PDF-1.7".as_slice()), Err(()))]
    #[case(None, Some(b"random".as_slice()), Err(()))]
    #[case(None, None, Err(()))]
    fn test_sheet_format_detect(
        #[case] filename: Option<&str>,
        #[case] content: Option<&[u8]>,
        #[case] expected: Result<SheetFormat, ()>,
    ) {
        let result = SheetFormat::detect(filename, content);
        match expected {
            Ok(format) => assert_eq!(result.unwrap(), format),
            Err(()) => assert!(matches!(
                result.unwrap_err(),
                ImportError::UnsupportedFormat
            )),
        }
    }

    #[test]
    fn test_explicit_format_without_content() {
        let result = ImportBuilder::new().format(SheetFormat::Csv).import(&[]);
        assert!(matches!(
            result,
            Err(ImportError::MissingContentAndFilepath)
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = ImportBuilder::new()
            .filename("/nonexistent/estratto.csv")
            .import(&[]);
        assert!(matches!(result, Err(ImportError::Io(_))));
    }

    #[test]
    fn test_read_rows_keeps_preamble() {
        let rows = ImportBuilder::new()
            .content(SAMPLE_CSV.as_bytes())
            .read_rows()
            .unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0][0], Cell::from("Estratto conto corrente"));
    }

    #[test]
    fn test_custom_details_label() {
        let transactions = ImportBuilder::new()
            .content(SAMPLE_CSV.as_bytes())
            .details("Caricato da CSV")
            .import(&[])
            .unwrap();
        assert!(transactions.iter().all(|t| t.details == "Caricato da CSV"));
    }

    #[test]
    fn test_csv_without_header_fails() {
        let result = ImportBuilder::new()
            .content(b"Data;Importo\n05/03/2024;1,00\n")
            .format(SheetFormat::Csv)
            .import(&[]);
        assert!(matches!(result, Err(ImportError::HeaderNotFound)));
    }

    #[test]
    fn test_format_serialization() {
        let json = serde_json::to_string(&SheetFormat::Workbook).unwrap();
        assert_eq!(json, "\"workbook\"");
        let back: SheetFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(back, SheetFormat::Csv);
    }
}
