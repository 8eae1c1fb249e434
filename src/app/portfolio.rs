use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use csv::ReaderBuilder;
use reqwest::Client;
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};

use crate::{
    api::{CoinGeckoApi, alternative},
    app::{aggregate::aggregate, utils},
    db,
    models::{Entry, FearGreed, PortfolioSummary},
    services::{PriceFeedService, RefreshRate},
};

/// Floor between two price requests, independent of the user-selected
/// refresh rate.
const PRICE_FEED_GUARD: Duration = Duration::from_secs(10);

/// Ties the entry store, the price feed, and the aggregator together. Every
/// mutation reloads the entries and re-runs the aggregation; nothing derived
/// is cached across refreshes except the price map itself.
pub struct Portfolio {
    connection: Pool<Sqlite>,
    client: Client,
    price_feed: PriceFeedService,
    refresh_rate: RefreshRate,
    entries: Vec<Entry>,
    summary: PortfolioSummary,
    fear_greed: Option<FearGreed>,
}

impl Portfolio {
    pub fn new(connection: Pool<Sqlite>, api: CoinGeckoApi) -> Self {
        Self {
            connection,
            client: Client::new(),
            price_feed: PriceFeedService::new(api, PRICE_FEED_GUARD),
            refresh_rate: RefreshRate::default(),
            entries: Vec::new(),
            summary: PortfolioSummary::default(),
            fear_greed: None,
        }
    }

    pub fn summary(&self) -> &PortfolioSummary {
        &self.summary
    }

    pub fn entries(&self) -> &Vec<Entry> {
        &self.entries
    }

    pub fn fear_greed(&self) -> &Option<FearGreed> {
        &self.fear_greed
    }

    pub fn refresh_rate(&self) -> &RefreshRate {
        &self.refresh_rate
    }

    pub fn set_refresh_rate(&mut self, refresh_rate: RefreshRate) {
        self.refresh_rate = refresh_rate;
    }

    /// Reloads entries from the store and re-aggregates against whatever
    /// prices the feed currently holds.
    pub async fn load(&mut self) -> Result<()> {
        self.entries = db::utils::fetch_entries(&self.connection).await?;
        self.rebuild_summary();
        Ok(())
    }

    /// Refreshes the price feed for the coins currently held, then
    /// re-aggregates. `force` bypasses the feed's staleness window.
    pub async fn update_prices(&mut self, force: bool) -> Result<()> {
        let coin_ids = self.coin_ids();

        if force {
            self.price_feed.force_refresh(&coin_ids).await?;
        } else {
            self.price_feed.refresh(&coin_ids).await?;
        }

        self.rebuild_summary();
        Ok(())
    }

    /// Index fetch is best-effort; the header simply omits it on failure.
    pub async fn update_fear_greed(&mut self) {
        self.fear_greed = alternative::get_fear_greed(&self.client).await.ok();
    }

    pub async fn add_entry(
        &mut self,
        symbol: &str,
        coin_id: &str,
        name: &str,
        quantity: Decimal,
        price_used: Decimal,
        timestamp: DateTime<Local>,
        notes: Option<String>,
    ) -> Result<i64> {
        utils::validate_quantity(&quantity)?;
        utils::validate_price(&price_used)?;

        let coin_id = coin_id.to_lowercase();
        utils::validate_coin_id(&coin_id)?;

        let entry = Entry::new(
            0,
            symbol.to_uppercase(),
            coin_id,
            name.to_string(),
            quantity,
            price_used,
            timestamp,
            notes,
        );

        let id = db::write::insert_entry(&entry, &self.connection).await?;
        self.load().await?;

        Ok(id)
    }

    pub async fn delete_entry(&mut self, id: i64) -> Result<bool> {
        let deleted = db::write::delete_entry(id, &self.connection).await?;
        self.load().await?;

        Ok(deleted)
    }

    /// Imports buy entries from a CSV file with a header row and columns
    /// `date,symbol,coin_id,name,quantity,price[,notes]`. Malformed rows are
    /// reported with their row number and skipped. With `replace`, existing
    /// entries are dropped, but only once the file has opened; a bad path
    /// leaves the store untouched. Returns the number of rows imported.
    pub async fn import_entries(&mut self, path: &str, replace: bool) -> Result<usize> {
        // Flexible so the notes column may be omitted and short rows reach
        // the column-count check instead of failing the whole import.
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file at path: {}", path))?;

        if replace {
            db::utils::truncate_entries(&self.connection).await?;
        }

        let mut imported = 0;

        for (row_idx, record) in reader.records().enumerate() {
            let rec = record
                .with_context(|| format!("Failed to read CSV record at row {}", row_idx + 1))?;

            if rec.len() < 6 {
                eprintln!(
                    "Warning: Skipping row {}: expected at least 6 columns, found {}",
                    row_idx + 1,
                    rec.len()
                );
                continue;
            }

            let row = parse_entry_row(&rec);

            match row {
                Ok((timestamp, symbol, coin_id, name, quantity, price_used, notes)) => {
                    let entry = Entry::new(
                        0, symbol, coin_id, name, quantity, price_used, timestamp, notes,
                    );
                    db::write::insert_entry(&entry, &self.connection).await?;
                    imported += 1;
                }
                Err(err) => {
                    eprintln!("Warning: Skipping row {}: {:#}", row_idx + 1, err);
                }
            }
        }

        self.load().await?;

        Ok(imported)
    }

    fn rebuild_summary(&mut self) {
        self.summary = aggregate(&self.entries, self.price_feed.prices());
    }

    /// Distinct coin ids across current entries, first-seen order.
    fn coin_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();

        for entry in &self.entries {
            if !ids.contains(entry.coin_id()) {
                ids.push(entry.coin_id().clone());
            }
        }

        ids
    }
}

type EntryRow = (
    DateTime<Local>,
    String,
    String,
    String,
    Decimal,
    Decimal,
    Option<String>,
);

fn parse_entry_row(rec: &csv::StringRecord) -> Result<EntryRow> {
    let timestamp = utils::parse_datetime(&rec[0])?;
    let symbol = rec[1].to_uppercase();
    let coin_id = rec[2].to_lowercase();
    utils::validate_coin_id(&coin_id)?;
    let name = rec[3].to_string();

    let quantity = utils::parse_decimal(&rec[4], "quantity")?;
    utils::validate_quantity(&quantity)?;

    let price_used = utils::parse_decimal(&rec[5], "price")?;
    utils::validate_price(&price_used)?;

    let notes = rec
        .get(6)
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string);

    Ok((timestamp, symbol, coin_id, name, quantity, price_used, notes))
}
