use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use tally_rs::{
    Category, CreateTransactionUseCase, SQLiteTransactionRepository, Transaction,
    TransactionCreator, TransactionType, initialize_db,
};

/// A utility for creating a test database for the REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let repository = SQLiteTransactionRepository::new(Arc::new(Mutex::new(conn)));
    let use_case = CreateTransactionUseCase::new(repository);
    let now = OffsetDateTime::now_utc();

    let samples = [
        (450_000, TransactionType::INCOME, "Salary", "Monthly pay", 30),
        (12_050, TransactionType::DEBIT, "Food", "Groceries", 21),
        (4_599, TransactionType::CREDIT, "Food", "", 14),
        (89_900, TransactionType::DEBIT, "Rent", "Weekly rent", 7),
        (2_300, TransactionType::CREDIT, "Health", "Pharmacy", 1),
    ];

    for (amount, transaction_type, category, name, days_ago) in samples {
        let transaction = use_case.create(
            Transaction::build(amount, transaction_type, Category::new(category))
                .date(Some(now - Duration::days(days_ago)))
                .name(name),
        )?;

        println!(
            "  #{} {} {} on {}",
            transaction.id,
            transaction.category.name,
            transaction.amount,
            transaction.date.date()
        );
    }

    println!("Success!");

    Ok(())
}
