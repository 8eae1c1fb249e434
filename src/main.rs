use std::env;

use clap::{Parser, Subcommand};
use cryptofolio_tui::{
    api::CoinGeckoApi,
    app::{App, Portfolio, utils},
    db,
    models::{Coin, Entry, PortfolioSummary},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

#[derive(Parser)]
#[command(name = "cryptofolio-tui", about = "A terminal-based crypto portfolio tracker")]
struct Cli {
    /// SQLite database path
    #[arg(long, env = "CRYPTOFOLIO_DB", default_value = "cryptofolio.db")]
    db: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the dashboard (default)
    Tui,
    /// Record a buy entry
    Add {
        /// Ticker symbol, e.g. BTC
        #[arg(long)]
        symbol: String,
        /// CoinGecko coin id, e.g. bitcoin
        #[arg(long)]
        coin_id: String,
        /// Display name, e.g. Bitcoin
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: String,
        /// Price paid per unit, in USD
        #[arg(long)]
        price: String,
        /// Purchase date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an entry by id
    Remove { id: i64 },
    /// Print the aggregated portfolio summary
    List,
    /// Print raw buy entries
    Entries,
    /// Import entries from a CSV file (date,symbol,coin_id,name,quantity,price[,notes])
    Import {
        path: String,
        /// Drop existing entries first
        #[arg(long)]
        replace: bool,
    },
    /// List top coins by market cap
    Coins {
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Search top coins by name or symbol
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let api = CoinGeckoApi::new(env::var("COINGECKO_API_KEY").ok());
    let command = cli.command.unwrap_or(Command::Tui);

    // Market browsing does not touch the entry store.
    match &command {
        Command::Coins { limit } => {
            let coins = api.markets(*limit).await?;
            print_coins(&coins);
            return Ok(());
        }
        Command::Search { query } => {
            let coins = api.markets(250).await?;
            let matches: Vec<Coin> = coins.into_iter().filter(|c| c.matches(query)).collect();

            if matches.is_empty() {
                println!("No coins matching '{}'", query);
            } else {
                print_coins(&matches);
            }
            return Ok(());
        }
        _ => {}
    }

    let db_path = shellexpand::tilde(&cli.db).into_owned();
    let db_connect_options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(db_connect_options).await?;

    db::init::create_entries(&connection).await?;

    let mut portfolio = Portfolio::new(connection, api);

    match command {
        Command::Tui => {
            let mut app = App::new(portfolio);
            app.run().await?;
        }
        Command::Add {
            symbol,
            coin_id,
            name,
            quantity,
            price,
            date,
            notes,
        } => {
            let quantity = utils::parse_decimal(&quantity, "quantity")?;
            let price = utils::parse_decimal(&price, "price")?;
            let timestamp = match date {
                Some(date) => utils::parse_datetime(&date)?,
                None => chrono::Local::now(),
            };

            let id = portfolio
                .add_entry(&symbol, &coin_id, &name, quantity, price, timestamp, notes)
                .await?;
            println!("Added entry {} ({} {})", id, quantity, symbol.to_uppercase());
        }
        Command::Remove { id } => {
            if portfolio.delete_entry(id).await? {
                println!("Removed entry {}", id);
            } else {
                println!("No entry with id {}", id);
            }
        }
        Command::List => {
            portfolio.load().await?;
            if let Err(e) = portfolio.update_prices(false).await {
                eprintln!(
                    "Warning: Price update failed, valuing holdings at break-even: {:#}",
                    e
                );
            }
            print_summary(portfolio.summary());
        }
        Command::Entries => {
            portfolio.load().await?;
            print_entries(portfolio.entries());
        }
        Command::Import { path, replace } => {
            let path = shellexpand::tilde(&path).into_owned();

            let imported = portfolio.import_entries(&path, replace).await?;
            println!("Imported {} entries from {}", imported, path);
        }
        Command::Coins { .. } | Command::Search { .. } => {}
    }

    Ok(())
}

fn print_summary(summary: &PortfolioSummary) {
    if summary.holdings().is_empty() {
        println!("No holdings recorded.");
        return;
    }

    println!(
        "{:<10} {:<20} {:>14} {:>14} {:>14} {:>14} {:>14} {:>10}",
        "Symbol", "Name", "Amount", "Avg Price", "Price", "Value", "P&L", "P&L %"
    );

    for holding in summary.holdings() {
        println!(
            "{:<10} {:<20} {:>14} {:>14} {:>14} {:>14} {:>14} {:>10}",
            holding.symbol(),
            holding.name(),
            format!("{:.4}", holding.total_quantity()),
            format!("{:.2}", holding.average_buy_price()),
            format!("{:.2}", holding.current_price()),
            format!("{:.2}", holding.current_value()),
            format!("{:.2}", holding.profit_or_loss()),
            format!("{:.2}%", holding.profit_or_loss_percentage()),
        );
    }

    println!();
    println!(
        "Total value: {:.2}  Invested: {:.2}  P&L: {:.2} ({:.2}%)",
        summary.total_portfolio_value(),
        summary.total_invested(),
        summary.total_profit_or_loss(),
        summary.total_profit_or_loss_percentage(),
    );
}

fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No entries recorded.");
        return;
    }

    println!(
        "{:>6} {:<12} {:<10} {:>14} {:>14}  {}",
        "Id", "Date", "Symbol", "Quantity", "Price", "Notes"
    );

    for entry in entries {
        println!(
            "{:>6} {:<12} {:<10} {:>14} {:>14}  {}",
            entry.id(),
            entry.timestamp().format("%Y-%m-%d"),
            entry.symbol(),
            format!("{:.4}", entry.quantity()),
            format!("{:.2}", entry.price_used()),
            entry.notes().clone().unwrap_or_default(),
        );
    }
}

fn print_coins(coins: &[Coin]) {
    println!(
        "{:>6} {:<10} {:<24} {:>14} {:>10}",
        "Rank", "Symbol", "Name", "Price", "24h %"
    );

    for coin in coins {
        let rank = coin
            .market_cap_rank()
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| "-".to_string());
        let price = coin
            .current_price()
            .map(|price| format!("{:.2}", price))
            .unwrap_or_else(|| "-".to_string());
        let change = coin
            .price_change_percentage_24h()
            .map(|change| format!("{:.2}%", change))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:>6} {:<10} {:<24} {:>14} {:>10}",
            rank,
            coin.symbol(),
            coin.name(),
            price,
            change
        );
    }
}
