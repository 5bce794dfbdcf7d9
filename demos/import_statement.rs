use estratto_conto::{AccountStore, ImportBuilder};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let Some(file_path) = args.get(1) else {
        println!("Usage: cargo run --example import_statement <movimenti.xlsx|.csv> [store.json]\n");
        return Ok(());
    };
    let store_path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(estratto_conto::store::DEFAULT_STORE_FILE);

    let mut store = AccountStore::load(store_path)?;
    let imported = store.import(ImportBuilder::new().filename(file_path))?;

    if imported > 0 {
        store.save(store_path)?;
        println!("{} transazioni importate!", imported);
    } else {
        println!("Nessuna nuova transazione trovata o solo duplicati.");
    }
    println!("Saldo: {:.2} EUR", store.balance);

    Ok(())
}
