use thiserror::Error;

/// Errors that abort a statement import or a store operation.
///
/// Row-level problems (an unreadable date, a blank amount) never show up here:
/// the pipeline degrades those rows instead of failing the whole file.
#[derive(Error, Debug)]
pub enum ImportError {
    /// No row mentions both "Data Operazione" and "Descrizione"
    #[error("Header not found — expected 'Data Operazione' and 'Descrizione'")]
    HeaderNotFound,

    /// The header row was found but one of the mandatory columns is missing
    #[error("Required columns 'Data Operazione' or 'Descrizione' not found")]
    MissingRequiredColumns,

    /// Neither the content nor the filename identify a readable spreadsheet
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// The builder was run without content and without a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    #[error("File access failed: {0}")]
    Io(#[from] std::io::Error),

    // ── Grid readers ────────────────────────────────────────────────────────

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// calamine failed to open the workbook or its first sheet
    #[error("Workbook read error: {0}")]
    Workbook(String),

    #[error("Workbook has no worksheets")]
    EmptyWorkbook,

    // ── Store ───────────────────────────────────────────────────────────────

    #[error("Store serialization error: {0}")]
    Store(#[from] serde_json::Error),
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::Workbook(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
