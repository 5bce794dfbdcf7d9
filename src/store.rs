//! The account ledger and its single-file JSON persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::builder::ImportBuilder;
use crate::errors::ImportResult;
use crate::pipeline::amounts::parse_edited_amount;
use crate::types::{Category, Transaction};

pub const DEFAULT_STORE_FILE: &str = "estratto_conto.json";

const MANUAL_DETAILS: &str = "Aggiunto manualmente";
const MANUAL_NAME: &str = "Nuova Transazione";

/// A user edit to one field of a stored transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionEdit {
    Name(String),
    MovementType(String),
    Details(String),
    /// Amount as typed, e.g. `-1.234,56 €`.
    Amount(String),
}

/// A user edit to the account header.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountEdit {
    Title(String),
    Holder(String),
    Iban(String),
    /// Balance as typed. Overwritten by the next recalculation.
    Balance(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStore {
    pub account_title: String,
    pub account_holder: String,
    pub iban: String,
    pub balance: Decimal,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self {
            account_title: "Conto Corrente".to_string(),
            account_holder: "Mario Rossi".to_string(),
            iban: "IT60X0538703202000000123456".to_string(),
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }
}

impl AccountStore {
    /// Loads the ledger blob, creating and saving a default one if the file is missing.
    pub fn load(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let store: AccountStore = serde_json::from_str(&content)?;
                debug!(
                    path = %path.display(),
                    transactions = store.transactions.len(),
                    "store loaded"
                );
                Ok(store)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let store = AccountStore::default();
                store.save(path)?;
                info!(path = %path.display(), "new store created");
                Ok(store)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ImportResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn recalculate_balance(&mut self) {
        self.balance = self.transactions.iter().map(|t| t.amount).sum();
    }

    /// Puts a placeholder debit at the top of the list for the user to edit.
    pub fn add_manual_transaction(&mut self, today: NaiveDate) -> &Transaction {
        let transaction = Transaction {
            id: format!("tx_{}", Uuid::new_v4().simple()),
            accounting_date: today,
            currency_date: today,
            name: MANUAL_NAME.to_string(),
            movement_type: "PAGAMENTO".to_string(),
            amount: Decimal::new(-1000, 2),
            details: MANUAL_DETAILS.to_string(),
            category: Category::Payment,
        };
        self.transactions.insert(0, transaction);
        self.recalculate_balance();
        &self.transactions[0]
    }

    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let Some(index) = self.transactions.iter().position(|t| t.id == id) else {
            return false;
        };
        self.transactions.remove(index);
        self.recalculate_balance();
        true
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
        self.recalculate_balance();
    }

    pub fn edit_transaction(&mut self, id: &str, edit: TransactionEdit) -> bool {
        let Some(transaction) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return false;
        };

        match edit {
            TransactionEdit::Name(name) => transaction.name = name,
            TransactionEdit::MovementType(label) => transaction.movement_type = label,
            TransactionEdit::Details(details) => transaction.details = details,
            TransactionEdit::Amount(text) => transaction.amount = parse_edited_amount(&text),
        }
        self.recalculate_balance();
        true
    }

    pub fn edit_account(&mut self, edit: AccountEdit) {
        match edit {
            AccountEdit::Title(title) => self.account_title = title,
            AccountEdit::Holder(holder) => self.account_holder = holder,
            AccountEdit::Iban(iban) => self.iban = iban,
            AccountEdit::Balance(text) => self.balance = parse_edited_amount(&text),
        }
    }

    /// Appends pipeline output to the ledger and returns how many were added.
    pub fn append_imported(&mut self, transactions: Vec<Transaction>) -> usize {
        let count = transactions.len();
        if count > 0 {
            self.transactions.extend(transactions);
            self.recalculate_balance();
        }
        count
    }

    /// Imports a statement against the current ledger. On error nothing is appended.
    pub fn import(&mut self, builder: ImportBuilder) -> ImportResult<usize> {
        let imported = builder.import(&self.transactions)?;
        Ok(self.append_imported(imported))
    }
}
