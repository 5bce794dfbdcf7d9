//! Operation-date parsing for statement rows.
//!
//! Statements come with three kinds of date cells:
//! - native spreadsheet dates (already typed by the grid reader)
//! - slash-delimited `D/M/Y` text
//! - Italian long or short form text such as `5 marzo 2024` or `05 mar. 2024`

use chrono::NaiveDate;

use crate::types::Cell;

const MONTHS: [(&str, &str); 12] = [
    ("gen", "gennaio"),
    ("feb", "febbraio"),
    ("mar", "marzo"),
    ("apr", "aprile"),
    ("mag", "maggio"),
    ("giu", "giugno"),
    ("lug", "luglio"),
    ("ago", "agosto"),
    ("set", "settembre"),
    ("ott", "ottobre"),
    ("nov", "novembre"),
    ("dic", "dicembre"),
];

/// Parses a date cell, returning `None` when the value is not a recognisable date.
///
/// Native dates pass through untouched. Text is tried as `D/M/Y` first, then as
/// `D <mese> Y`.
pub fn parse_date(value: &Cell) -> Option<NaiveDate> {
    match value {
        Cell::Date(date) => Some(*date),
        Cell::Empty => None,
        other => {
            let text = other.to_string();
            parse_slash_date(&text).or_else(|| parse_italian_date(&text))
        }
    }
}

pub fn parse_slash_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_italian_date(text: &str) -> Option<NaiveDate> {
    let cleaned = text.to_lowercase().replace('.', "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }

    let day: u32 = tokens[0].parse().ok()?;
    let month = month_number(tokens[1])?;
    let year: i32 = tokens[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// 1-based month number for an Italian month name or abbreviation.
fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|(short, long)| *short == name || *long == name)
        .map(|index| index as u32 + 1)
}
