use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Pool, Sqlite};

use crate::models::Entry;

pub async fn insert_entry(entry: &Entry, connection: &Pool<Sqlite>) -> Result<i64> {
    let quantity = entry
        .quantity()
        .round_dp(8)
        .to_f64()
        .with_context(|| "Failed to convert quantity to f64")?;
    let price_used = entry
        .price_used()
        .round_dp(8)
        .to_f64()
        .with_context(|| "Failed to convert price to f64")?;

    let id = sqlx::query(
        r#"
        INSERT INTO entries
        (symbol, coin_id, name, quantity, price_used, purchase_date, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.symbol())
    .bind(entry.coin_id())
    .bind(entry.name())
    .bind(quantity)
    .bind(price_used)
    .bind(entry.timestamp().timestamp())
    .bind(entry.notes())
    .execute(connection)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns whether a row was actually removed.
pub async fn delete_entry(id: i64, connection: &Pool<Sqlite>) -> Result<bool> {
    let result = sqlx::query("DELETE FROM entries WHERE id = ?")
        .bind(id)
        .execute(connection)
        .await?;

    Ok(result.rows_affected() > 0)
}
