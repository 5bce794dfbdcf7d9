use crate::errors::{ImportError, ImportResult};
use crate::types::{Cell, RawRow};

const DATE_HEADER: &str = "data operazione";
const DESCRIPTION_HEADER: &str = "descrizione";
const INCOME_HEADER: &str = "entrate";
const OUTCOME_HEADER: &str = "uscite";
const CATEGORY_HEADER: &str = "categoria";

/// Column positions discovered from the statement's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub description: usize,
    pub income: Option<usize>,
    pub outcome: Option<usize>,
    pub category: Option<usize>,
}

impl ColumnMap {
    pub fn from_header(header: &[Cell]) -> ImportResult<Self> {
        let labels: Vec<String> = header
            .iter()
            .map(|cell| cell.to_string().to_lowercase())
            .collect();
        let find = |needle: &str| labels.iter().position(|label| label.contains(needle));

        let (Some(date), Some(description)) = (find(DATE_HEADER), find(DESCRIPTION_HEADER)) else {
            return Err(ImportError::MissingRequiredColumns);
        };

        Ok(ColumnMap {
            date,
            description,
            income: find(INCOME_HEADER),
            outcome: find(OUTCOME_HEADER),
            category: find(CATEGORY_HEADER),
        })
    }
}

/// Index of the first row mentioning both "data operazione" and "descrizione".
///
/// Bank exports put a variable preamble (holder, IBAN, period) above the table,
/// so the header is located by content. A row naming only one of the two is a
/// header with a missing column rather than no header at all.
pub fn find_header_row(rows: &[RawRow]) -> ImportResult<usize> {
    let texts: Vec<String> = rows.iter().map(|row| row_text(row)).collect();

    if let Some(index) = texts
        .iter()
        .position(|text| text.contains(DATE_HEADER) && text.contains(DESCRIPTION_HEADER))
    {
        return Ok(index);
    }

    if texts
        .iter()
        .any(|text| text.contains(DATE_HEADER) || text.contains(DESCRIPTION_HEADER))
    {
        return Err(ImportError::MissingRequiredColumns);
    }

    Err(ImportError::HeaderNotFound)
}

fn row_text(row: &[Cell]) -> String {
    row.iter()
        .map(Cell::to_string)
        .collect::<Vec<_>>()
        .join(",")
        .to_lowercase()
}
