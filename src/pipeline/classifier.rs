use std::sync::OnceLock;

use regex::Regex;

use crate::types::{cell_at, Cell};

const SUMMARY_MARKERS: [&str; 2] = ["totale movimenti", "saldo al"];

/// What a data row means for the transaction being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// Nothing in it.
    Skip,
    /// Carries an operation date: opens a new transaction.
    NewTransaction,
    /// Wrapped description text of the previous transaction.
    Continuation,
}

fn day_month_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}\s\w+\s\d{4}").expect("valid regex"))
}

fn slash_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}/\d{1,2}/\d{4}").expect("valid regex"))
}

pub fn classify(row: &[Cell], date_column: usize) -> RowClass {
    if row.iter().all(Cell::is_blank) {
        return RowClass::Skip;
    }

    if looks_like_date(cell_at(row, date_column)) {
        RowClass::NewTransaction
    } else {
        RowClass::Continuation
    }
}

/// Trailing "Totale movimenti" / "Saldo al ..." rows end the data section.
pub fn is_summary_row(row: &[Cell]) -> bool {
    let joined = row
        .iter()
        .map(Cell::to_string)
        .collect::<Vec<_>>()
        .join(",")
        .to_lowercase();

    SUMMARY_MARKERS.iter().any(|marker| joined.contains(marker))
}

fn looks_like_date(cell: &Cell) -> bool {
    match cell {
        Cell::Date(_) => true,
        Cell::Empty => false,
        other if other.is_blank() => false,
        other => {
            let text = other.to_string();
            day_month_year_re().is_match(&text) || slash_date_re().is_match(&text)
        }
    }
}
