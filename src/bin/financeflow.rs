use std::{error::Error, fs::File, path::PathBuf};

use clap::{Parser, Subcommand};
use time::{Date, macros::format_description};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use financeflow::{
    Config, DEFAULT_TIMEZONE, NewTransaction, Repository, SQLiteTransactionStore, Transaction,
    TransactionType, category, chart::expense_chart_options, export::write_csv, today,
};

/// Record income and expenses and summarise them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "FINANCEFLOW_DB_PATH", default_value = "financeflow.db")]
    db_path: PathBuf,

    /// Canonical timezone used to decide today's date, e.g. "Asia/Kolkata".
    #[arg(long, env = "FINANCEFLOW_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction.
    Add {
        /// What the transaction was for.
        title: String,
        /// The amount, the sign is ignored.
        #[arg(allow_hyphen_values = true)]
        amount: f64,
        /// Either "income" or "expense".
        #[arg(value_name = "TYPE")]
        kind: TransactionType,
        /// Any category, e.g. "food".
        category: String,
        /// The date as YYYY-MM-DD, defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Delete a transaction by its ID.
    Remove {
        /// The transaction ID shown by `list`.
        id: i64,
    },
    /// Show every transaction, newest first.
    List,
    /// Show transactions whose title, category or date contains a term.
    Search {
        /// The text to look for.
        term: String,
    },
    /// Print the balance, totals and expense breakdown as JSON.
    Summary,
    /// Write every transaction to a CSV file.
    Export {
        /// Where to save the CSV file.
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Write the expense breakdown chart as ECharts options JSON.
    Chart {
        /// Where to save the JSON file.
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();
    let config = Config::new(args.db_path).timezone(&args.timezone);

    let store = SQLiteTransactionStore::open(&config.db_path)?;
    let repository = Repository::new(store, &config.timezone).await?;

    match args.command {
        Command::Add {
            title,
            amount,
            kind,
            category,
            date,
        } => {
            let date = match date {
                Some(date) => date,
                None => today(config.local_offset()?),
            };
            let transaction = repository
                .create(NewTransaction::new(&title, amount, kind, &category, date))
                .await?;
            println!("Added transaction {}", transaction.id);
        }
        Command::Remove { id } => {
            repository.remove(id).await?;
            println!("Removed transaction {id}");
        }
        Command::List => print_transactions(&repository.list().await?),
        Command::Search { term } => print_transactions(&repository.search(&term).await?),
        Command::Summary => {
            let summary = repository.summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Export { output } => {
            let transactions = repository.list().await?;
            write_csv(&transactions, File::create(&output)?)?;
            println!("Exported {} transactions to {output:?}", transactions.len());
        }
        Command::Chart { output } => {
            let summary = repository.summary().await?;
            std::fs::write(&output, expense_chart_options(&summary.expense_by_category))?;
            println!("Saved expense chart to {output:?}");
        }
    }

    Ok(())
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found");
        return;
    }

    for transaction in transactions {
        let sign = match transaction.kind {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };

        println!(
            "{:>14}  {}  {} {:<24} {:<14} {sign}₹{:.2}",
            transaction.id,
            transaction.iso_date(),
            category::icon(&transaction.category),
            transaction.title,
            transaction.category,
            transaction.amount,
        );
    }
}

/// Log to stderr so command output on stdout stays clean. `RUST_LOG` overrides the default level.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
