//! Import Italian bank statement spreadsheets into a local account ledger.
//!
//! ```rust,ignore
//! use estratto_conto::{AccountStore, ImportBuilder};
//!
//! let mut store = AccountStore::load("estratto_conto.json")?;
//! let imported = store.import(ImportBuilder::new().filename("movimenti.xlsx"))?;
//! store.save("estratto_conto.json")?;
//! ```

mod builder;
mod types;

pub mod errors;
pub mod pipeline;
pub mod query;
pub mod sheets;
pub mod store;

pub use builder::{ImportBuilder, SheetFormat};
pub use errors::{ImportError, ImportResult};
pub use pipeline::ImportPipeline;
pub use sheets::prelude::*;
pub use store::{AccountEdit, AccountStore, TransactionEdit};
pub use types::{Category, Cell, RawRow, Transaction};
