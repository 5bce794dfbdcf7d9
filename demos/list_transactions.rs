use estratto_conto::query::{self, SortOrder, TransactionFilter};
use estratto_conto::AccountStore;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // list_transactions [store.json] [search term] [incomes|expenses|all] [date_desc|date_asc|amount_desc|amount_asc]
    let args: Vec<String> = env::args().collect();

    let store_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or(estratto_conto::store::DEFAULT_STORE_FILE);
    let term = args.get(2).map(String::as_str).unwrap_or("");
    let filter = match args.get(3).map(String::as_str) {
        Some("incomes") => TransactionFilter::Incomes,
        Some("expenses") => TransactionFilter::Expenses,
        _ => TransactionFilter::All,
    };
    let sort: SortOrder = args
        .get(4)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or_default();

    let store = AccountStore::load(store_path)?;
    println!("{} - {}", store.account_title, store.account_holder);
    println!("IBAN: {}", store.iban);
    println!("Saldo: {:.2} EUR\n", store.balance);

    println!("Ultimi movimenti:");
    for tx in query::recent(&store.transactions, 5) {
        println!("  {} | {:>10.2} | {}", tx.accounting_date, tx.amount, tx.name);
    }

    let found = query::search(&store.transactions, term, filter, sort);
    println!("\nFound {} transactions\n", found.len());

    for (i, tx) in found.iter().enumerate() {
        println!("Transaction {}:", i + 1);
        println!("  Date: {}", tx.accounting_date);
        println!("  Amount: {:.2}", tx.amount);
        println!("  Name: {}", tx.name);
        println!("  Type: {}", tx.movement_type);
        println!("  Category: {}", tx.category);
        println!();
    }

    Ok(())
}
