//! Statement import pipeline.
//!
//! A grid of cells goes in, new ledger transactions come out:
//!
//! 1. locate the header row and map its columns ([`columns`])
//! 2. fold the data rows into per-movement groups, joining wrapped
//!    description lines ([`classifier`])
//! 3. normalize each group's date, amount and category ([`dates`],
//!    [`amounts`], [`category`])
//! 4. drop movements already in the ledger ([`dedup`])
//!
//! The pipeline keeps no state between runs.

pub mod amounts;
pub mod category;
pub mod classifier;
pub mod columns;
pub mod dates;
pub mod dedup;

use std::mem;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::errors::ImportResult;
use crate::types::{cell_at, Cell, RawRow, Transaction};

use classifier::RowClass;
use columns::ColumnMap;
use dedup::DuplicateFilter;

/// Provenance label stored on every imported transaction.
pub const IMPORT_DETAILS: &str = "Importato da file";

/// Raw cells of one movement, possibly gathered from several physical rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTransactionGroup {
    pub operation_date: Cell,
    pub description: String,
    pub income: Cell,
    pub outcome: Cell,
    pub category: String,
}

impl RawTransactionGroup {
    fn from_row(row: &[Cell], columns: &ColumnMap) -> Self {
        let optional = |index: Option<usize>| {
            index
                .map(|i| cell_at(row, i).clone())
                .unwrap_or(Cell::Empty)
        };

        RawTransactionGroup {
            operation_date: cell_at(row, columns.date).clone(),
            description: description_text(row, columns),
            income: optional(columns.income),
            outcome: optional(columns.outcome),
            category: columns
                .category
                .map(|i| cell_at(row, i).to_string().trim().to_string())
                .unwrap_or_default(),
        }
    }
}

fn description_text(row: &[Cell], columns: &ColumnMap) -> String {
    cell_at(row, columns.description)
        .to_string()
        .replace('"', "")
        .trim()
        .to_string()
}

enum GroupState {
    NoOpenGroup,
    OpenGroup(RawTransactionGroup),
}

/// Two-state machine folding classified rows into transaction groups.
struct GroupAssembler {
    state: GroupState,
    groups: Vec<RawTransactionGroup>,
}

impl GroupAssembler {
    fn new() -> Self {
        Self {
            state: GroupState::NoOpenGroup,
            groups: Vec::new(),
        }
    }

    fn open(&mut self, group: RawTransactionGroup) {
        let previous = mem::replace(&mut self.state, GroupState::OpenGroup(group));
        if let GroupState::OpenGroup(done) = previous {
            self.groups.push(done);
        }
    }

    fn extend(&mut self, text: &str) {
        match &mut self.state {
            GroupState::OpenGroup(group) => {
                if !text.is_empty() {
                    group.description.push(' ');
                    group.description.push_str(text);
                }
            }
            GroupState::NoOpenGroup => {
                trace!(text, "continuation row before any transaction, dropped")
            }
        }
    }

    fn finish(mut self) -> Vec<RawTransactionGroup> {
        if let GroupState::OpenGroup(last) = self.state {
            self.groups.push(last);
        }
        self.groups
    }
}

/// Groups the data rows that follow the header, stopping at the summary rows.
pub fn assemble_groups(rows: &[RawRow], columns: &ColumnMap) -> Vec<RawTransactionGroup> {
    let mut assembler = GroupAssembler::new();

    for row in rows {
        let class = classifier::classify(row, columns.date);
        if class == RowClass::Skip {
            continue;
        }
        if classifier::is_summary_row(row) {
            debug!("summary row reached, stopping scan");
            break;
        }

        match class {
            RowClass::NewTransaction => assembler.open(RawTransactionGroup::from_row(row, columns)),
            RowClass::Continuation => assembler.extend(&description_text(row, columns)),
            RowClass::Skip => {}
        }
    }

    assembler.finish()
}

/// Turns an extracted statement grid into new, normalized transactions.
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    today: Option<NaiveDate>,
    details: String,
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self {
            today: None,
            details: IMPORT_DETAILS.to_string(),
        }
    }
}

impl ImportPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the date substituted for unreadable operation dates.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = details.to_string();
        self
    }

    /// Runs the whole import against the transactions already in the ledger.
    ///
    /// Fails only when the header or its mandatory columns are missing. An empty
    /// result means nothing new was found.
    pub fn run(&self, rows: &[RawRow], existing: &[Transaction]) -> ImportResult<Vec<Transaction>> {
        let header_index = columns::find_header_row(rows)?;
        let columns = ColumnMap::from_header(&rows[header_index])?;
        debug!(header_index, ?columns, "statement header located");

        let groups = assemble_groups(&rows[header_index + 1..], &columns);
        let filter = DuplicateFilter::new(existing);
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());

        let mut transactions = Vec::with_capacity(groups.len());
        let mut duplicates = 0usize;
        for group in groups {
            let transaction = self.normalize(group, today);
            if filter.is_duplicate(&transaction.natural_key()) {
                trace!(name = %transaction.name, "duplicate movement dropped");
                duplicates += 1;
                continue;
            }
            transactions.push(transaction);
        }

        info!(
            imported = transactions.len(),
            duplicates, "statement import finished"
        );
        Ok(transactions)
    }

    fn normalize(&self, group: RawTransactionGroup, today: NaiveDate) -> Transaction {
        let date = dates::parse_date(&group.operation_date).unwrap_or_else(|| {
            warn!(
                value = %group.operation_date,
                description = %group.description,
                "invalid operation date, using today's date"
            );
            today
        });

        let amount = amounts::normalize_amount(&group.income, &group.outcome);
        let name = group.description.split_whitespace().collect::<Vec<_>>().join(" ");

        Transaction {
            id: format!("imp_{}", Uuid::new_v4().simple()),
            accounting_date: date,
            currency_date: date,
            movement_type: category::movement_type(&group.category, amount),
            category: category::infer_category(&group.category, &group.description),
            name,
            amount,
            details: self.details.clone(),
        }
    }
}
