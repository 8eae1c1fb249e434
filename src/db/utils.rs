use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::models::Entry;

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_optional_string_from_row(row: &SqliteRow, column: &str) -> Result<Option<String>> {
    row.try_get::<Option<String>, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_f64_from_row(row: &SqliteRow, column: &str) -> Result<f64> {
    let value: f64 = row
        .try_get(column)
        .with_context(|| format!("Failed to parse f64 from column '{}'", column))?;
    Ok(value)
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_f64_from_row(row, column)?;
    Decimal::from_f64(value)
        .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
}

pub fn parse_datetime_from_row(row: &SqliteRow, column: &str) -> Result<DateTime<Local>> {
    let timestamp = parse_i64_from_row(row, column)?;
    Local.timestamp_opt(timestamp, 0).single().with_context(|| {
        format!(
            "Failed to convert timestamp to DateTime for column '{}'",
            column
        )
    })
}

pub fn parse_entry(row: SqliteRow) -> Result<Entry> {
    let id = parse_i64_from_row(&row, "id")?;
    let symbol = parse_string_from_row(&row, "symbol")?;
    let coin_id = parse_string_from_row(&row, "coin_id")?;
    let name = parse_string_from_row(&row, "name")?;
    let quantity = parse_decimal_from_row(&row, "quantity")?;
    let price_used = parse_decimal_from_row(&row, "price_used")?;
    let timestamp = parse_datetime_from_row(&row, "purchase_date")?;
    let notes = parse_optional_string_from_row(&row, "notes")?;

    Ok(Entry::new(
        id, symbol, coin_id, name, quantity, price_used, timestamp, notes,
    ))
}

/// Most recent purchases first, the ordering the dashboard shows.
pub async fn fetch_entries(connection: &Pool<Sqlite>) -> Result<Vec<Entry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, symbol, coin_id, name, quantity, price_used, purchase_date, notes
        FROM entries
        ORDER BY purchase_date DESC, id DESC
        "#,
    )
    .fetch_all(connection)
    .await?;

    rows.into_iter().map(parse_entry).collect()
}

pub async fn truncate_entries(connection: &Pool<Sqlite>) -> Result<()> {
    sqlx::query("DELETE FROM entries")
        .execute(connection)
        .await?;

    Ok(())
}
