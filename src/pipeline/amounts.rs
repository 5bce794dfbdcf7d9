use std::sync::OnceLock;

use num_traits::FromPrimitive;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Cell;

/// Signed movement amount from the statement's income and outcome columns.
///
/// A nonzero income wins as-is. Otherwise the outcome is always booked as a
/// debit, whatever sign the bank printed. Both empty or zero gives zero.
pub fn normalize_amount(income: &Cell, outcome: &Cell) -> Decimal {
    let income = parse_amount(income);
    let outcome = parse_amount(outcome);

    let amount = if !income.is_zero() {
        income
    } else if !outcome.is_zero() {
        -outcome.abs()
    } else {
        Decimal::ZERO
    };

    round_money(amount)
}

/// Reads one amount cell. Anything unreadable counts as zero.
pub fn parse_amount(value: &Cell) -> Decimal {
    match value {
        Cell::Number(n) => Decimal::from_f64(*n).unwrap_or_default(),
        Cell::Text(text) => parse_amount_text(text),
        Cell::Empty | Cell::Date(_) => Decimal::ZERO,
    }
}

/// Parses Italian-formatted amounts such as `1.234,56` or `-50,00`.
///
/// With a comma present, periods are thousands separators. Trailing text after
/// the number (currency codes, notes) is ignored.
pub fn parse_amount_text(text: &str) -> Decimal {
    let text = text.trim();
    let normalized = if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };

    leading_number(&normalized)
        .and_then(|number| number.parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

/// Parses an amount typed by the user while editing a movement, e.g. `-1.234,56 €`.
pub fn parse_edited_amount(text: &str) -> Decimal {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .collect();
    let normalized = kept.replacen(',', ".", 1);

    leading_number(&normalized)
        .and_then(|number| number.parse::<Decimal>().ok())
        .map(round_money)
        .unwrap_or(Decimal::ZERO)
}

/// Two-decimal money rounding, half away from zero, never a negative zero.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d*(?:\.\d+)?").expect("valid regex"))
}

/// Longest prefix that looks like `[+-]digits[.digits]`.
fn leading_number(text: &str) -> Option<&str> {
    let number = leading_number_re().find(text)?.as_str();
    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(number.trim_start_matches('+'))
}
