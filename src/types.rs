use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pipeline::dedup;

/// One spreadsheet cell, as handed over by a grid reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

/// A physical spreadsheet row. Columns are addressed by position only.
pub type RawRow = Vec<Cell>;

static EMPTY_CELL: Cell = Cell::Empty;

/// Cell at `index`, or `Cell::Empty` when the row is shorter than that.
pub fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY_CELL)
}

impl Cell {
    /// Blank cells carry nothing: empty, whitespace-only text, zero or NaN.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => *n == 0.0 || n.is_nan(),
            Cell::Date(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

/// Semantic tag inferred from the statement's category and description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Salary,
    TransferIn,
    Payment,
    #[default]
    Default,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::TransferIn => "transfer_in",
            Category::Payment => "payment",
            Category::Default => "default",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub accounting_date: NaiveDate,
    pub currency_date: NaiveDate,
    pub name: String,
    /// Movement label such as "PAGAMENTO" or "ACCREDITO".
    #[serde(rename = "type")]
    pub movement_type: String,
    pub amount: Decimal,
    pub details: String,
    pub category: Category,
}

impl Transaction {
    /// Composite key used to recognise an already imported movement.
    pub fn natural_key(&self) -> String {
        dedup::natural_key(self.accounting_date, self.amount, &self.name)
    }
}
