use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::types::Transaction;

/// `<d/m/yyyy>_<amount with 2 decimals>_<name>`.
///
/// Two movements on the same day with the same amount and name share a key and
/// are treated as one.
pub fn natural_key(date: NaiveDate, amount: Decimal, name: &str) -> String {
    format!(
        "{}/{}/{}_{:.2}_{}",
        date.day(),
        date.month(),
        date.year(),
        amount,
        name
    )
}

/// Natural keys of everything already in the ledger.
#[derive(Debug, Default, Clone)]
pub struct DuplicateFilter {
    existing: HashSet<String>,
}

impl DuplicateFilter {
    pub fn new(existing: &[Transaction]) -> Self {
        Self {
            existing: existing.iter().map(Transaction::natural_key).collect(),
        }
    }

    pub fn is_duplicate(&self, key: &str) -> bool {
        self.existing.contains(key)
    }
}
