//! Keyword rules mapping a statement's category and description text to a
//! [`Category`], plus the movement label shown next to each transaction.
//!
//! Rules run in priority order and the first match wins.

use rust_decimal::Decimal;

use crate::types::Category;

const PAYMENT_KEYWORDS: [&str; 7] = [
    "bonifico",
    "prelievo",
    "commission",
    "competenze",
    "rata",
    "pagamento",
    "bancomat",
];

pub fn infer_category(category_raw: &str, description_raw: &str) -> Category {
    let category = category_raw.to_lowercase();
    let description = description_raw.to_lowercase();

    if category.contains("stipendio") || description.contains("emolumenti") {
        return Category::Salary;
    }

    if category.contains("versamento") {
        return Category::TransferIn;
    }

    if PAYMENT_KEYWORDS.iter().any(|keyword| category.contains(keyword)) {
        return Category::Payment;
    }

    Category::Default
}

/// The bank's own category text when present, else a label derived from the sign.
pub fn movement_type(category_raw: &str, amount: Decimal) -> String {
    let label = category_raw.trim();
    if !label.is_empty() {
        return label.to_uppercase();
    }

    if amount.is_sign_negative() && !amount.is_zero() {
        "PAGAMENTO".to_string()
    } else {
        "ACCREDITO".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("Stipendio", "", Category::Salary)]
    #[case("", "pagamento emolumenti", Category::Salary)]
    #[case("", "EMOLUMENTI MARZO", Category::Salary)]
    #[case("Stipendio e pensione", "bonifico", Category::Salary)]
    #[case("Versamento contanti", "", Category::TransferIn)]
    #[case("Bancomat prelievo", "", Category::Payment)]
    #[case("Bonifico in uscita", "", Category::Payment)]
    #[case("Commissioni", "", Category::Payment)]
    #[case("Competenze di liquidazione", "", Category::Payment)]
    #[case("Rata mutuo", "", Category::Payment)]
    #[case("PAGAMENTO POS", "", Category::Payment)]
    #[case("", "", Category::Default)]
    #[case("Altro", "bonifico a Mario", Category::Default)]
    fn test_infer_category(
        #[case] category: &str,
        #[case] description: &str,
        #[case] expected: Category,
    ) {
        assert_eq!(infer_category(category, description), expected);
    }

    #[test]
    fn test_versamento_outranks_payment_keywords() {
        assert_eq!(
            infer_category("Versamento tramite bonifico", ""),
            Category::TransferIn
        );
    }

    #[rstest]
    #[case("  bonifico sepa ", "-10", "BONIFICO SEPA")]
    #[case("", "-10", "PAGAMENTO")]
    #[case("", "10", "ACCREDITO")]
    #[case("", "0", "ACCREDITO")]
    #[case("   ", "-0.01", "PAGAMENTO")]
    fn test_movement_type(#[case] category: &str, #[case] amount: &str, #[case] expected: &str) {
        let amount = Decimal::from_str(amount).unwrap();
        assert_eq!(movement_type(category, amount), expected);
    }
}
