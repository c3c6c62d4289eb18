use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{
    Date, Month, PrimitiveDateTime, Time, UtcOffset, format_description::well_known::Rfc3339,
    macros::offset,
};

use sales_stats_rs::{Transaction, count_transactions, initialize_db, insert_transaction};

/// A utility for creating a test database for the REST API server of sales_stats_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// The offset used for the sample sale dates, matching the third party dataset.
const SALE_OFFSET: UtcOffset = offset!(+05:30);

const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];

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

    println!("Creating sample transactions...");

    for transaction in sample_transactions()? {
        insert_transaction(&transaction, &conn)?;
    }

    println!("Created {} transactions.", count_transactions(&conn)?);
    println!("Success!");

    Ok(())
}

/// Two transactions per month over two years, with prices spread across every histogram
/// bucket and alternating sold status.
fn sample_transactions() -> Result<Vec<Transaction>, Box<dyn Error>> {
    let mut transactions: Vec<Transaction> = Vec::new();

    for year in [2021, 2022] {
        for month_number in 1..=12u8 {
            let month = Month::try_from(month_number)?;

            for day in [5, 20] {
                let id = transactions.len() as i64 + 1;
                let date = Date::from_calendar_date(year, month, day)?;
                let date_of_sale = PrimitiveDateTime::new(date, Time::from_hms(10, 30, 0)?)
                    .assume_offset(SALE_OFFSET)
                    .format(&Rfc3339)?;

                transactions.push(Transaction {
                    id,
                    title: format!("Sample product #{id}"),
                    price: (id as f64 * 47.5) % 1_100.0,
                    description: format!("A {month} sample product"),
                    category: CATEGORIES[id as usize % CATEGORIES.len()].to_owned(),
                    image: format!("https://example.com/images/{id}.jpg"),
                    sold: id % 2 == 0,
                    date_of_sale,
                });
            }
        }
    }

    Ok(transactions)
}
