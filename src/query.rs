use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionFilter {
    #[default]
    All,
    Incomes,
    Expenses,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Incomes => {
                transaction.amount.is_sign_positive() && !transaction.amount.is_zero()
            }
            TransactionFilter::Expenses => {
                transaction.amount.is_sign_negative() && !transaction.amount.is_zero()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortOrder::DateDesc => b.accounting_date.cmp(&a.accounting_date),
            SortOrder::DateAsc => a.accounting_date.cmp(&b.accounting_date),
            SortOrder::AmountDesc => b.amount.cmp(&a.amount),
            SortOrder::AmountAsc => a.amount.cmp(&b.amount),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date_desc" => Ok(SortOrder::DateDesc),
            "date_asc" => Ok(SortOrder::DateAsc),
            "amount_desc" => Ok(SortOrder::AmountDesc),
            "amount_asc" => Ok(SortOrder::AmountAsc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Transactions whose name, or amount written with a decimal comma, contains `term`.
pub fn search<'a>(
    transactions: &'a [Transaction],
    term: &str,
    filter: TransactionFilter,
    sort: SortOrder,
) -> Vec<&'a Transaction> {
    let term = term.trim().to_lowercase();
    let mut found: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .filter(|t| {
            term.is_empty()
                || t.name.to_lowercase().contains(&term)
                || t.amount.to_string().replace('.', ",").contains(&term)
        })
        .collect();

    found.sort_by(|a, b| sort.compare(a, b));
    found
}

/// The `limit` most recent transactions.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| SortOrder::DateDesc.compare(a, b));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn tx(id: &str, day: u32, amount: &str, name: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        Transaction {
            id: id.to_string(),
            accounting_date: date,
            currency_date: date,
            name: name.to_string(),
            movement_type: "PAGAMENTO".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            details: "Importato da file".to_string(),
            category: Category::Default,
        }
    }

    fn ledger() -> Vec<Transaction> {
        vec![
            tx("a", 5, "-23.40", "Supermercato"),
            tx("b", 27, "2150.00", "Stipendio marzo"),
            tx("c", 1, "-500.00", "Affitto"),
            tx("d", 15, "12.50", "Rimborso supermercato"),
        ]
    }

    fn ids(found: &[&Transaction]) -> Vec<String> {
        found.iter().map(|t| t.id.clone()).collect()
    }

    #[rstest]
    #[case(TransactionFilter::All, SortOrder::DateDesc, &["b", "d", "a", "c"])]
    #[case(TransactionFilter::All, SortOrder::DateAsc, &["c", "a", "d", "b"])]
    #[case(TransactionFilter::All, SortOrder::AmountDesc, &["b", "d", "a", "c"])]
    #[case(TransactionFilter::All, SortOrder::AmountAsc, &["c", "a", "d", "b"])]
    #[case(TransactionFilter::Incomes, SortOrder::DateDesc, &["b", "d"])]
    #[case(TransactionFilter::Expenses, SortOrder::AmountAsc, &["c", "a"])]
    fn test_filter_and_sort(
        #[case] filter: TransactionFilter,
        #[case] sort: SortOrder,
        #[case] expected: &[&str],
    ) {
        let ledger = ledger();
        let found = search(&ledger, "", filter, sort);
        assert_eq!(ids(&found), expected);
    }

    #[rstest]
    #[case("supermercato", &["d", "a"])]
    #[case("  STIPENDIO ", &["b"])]
    #[case("23,4", &["a"])]
    #[case("2150,00", &["b"])]
    #[case("nessuno", &[])]
    fn test_search_terms(#[case] term: &str, #[case] expected: &[&str]) {
        let ledger = ledger();
        let found = search(&ledger, term, TransactionFilter::All, SortOrder::DateDesc);
        assert_eq!(ids(&found), expected);
    }

    #[test]
    fn test_recent() {
        let ledger = ledger();
        assert_eq!(ids(&recent(&ledger, 2)), vec!["b", "d"]);
        assert_eq!(recent(&ledger, 10).len(), 4);
    }

    #[rstest]
    #[case("date_desc", SortOrder::DateDesc)]
    #[case("date_asc", SortOrder::DateAsc)]
    #[case("amount_desc", SortOrder::AmountDesc)]
    #[case("amount_asc", SortOrder::AmountAsc)]
    fn test_sort_order_from_str(#[case] input: &str, #[case] expected: SortOrder) {
        assert_eq!(input.parse::<SortOrder>().unwrap(), expected);
    }

    #[test]
    fn test_sort_order_rejects_unknown() {
        assert!("newest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_zero_amount_is_neither_income_nor_expense() {
        let zero = tx("z", 2, "0", "Storno");
        assert!(!TransactionFilter::Incomes.matches(&zero));
        assert!(!TransactionFilter::Expenses.matches(&zero));
        assert!(TransactionFilter::All.matches(&zero));
    }
}
