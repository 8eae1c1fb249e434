use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, TimeZone};
use regex::Regex;
use rust_decimal::Decimal;

static COIN_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("Invalid coin id pattern"));

pub fn parse_datetime(field: &str) -> Result<DateTime<Local>> {
    let date_str = format!("{} 00:00:00", field);
    let naive = chrono::NaiveDateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("Failed to parse date '{}'", field))?;

    Ok(Local.from_utc_datetime(&naive))
}

pub fn parse_decimal(field: &str, field_name: &str) -> Result<Decimal> {
    field
        .parse::<Decimal>()
        .with_context(|| format!("Failed to parse {} '{}'", field_name, field))
}

/// Entries are buys, so a non-positive quantity is rejected before it can
/// reach the aggregator.
pub fn validate_quantity(quantity: &Decimal) -> Result<()> {
    if quantity <= &Decimal::ZERO {
        bail!("Quantity must be greater than zero, got {}", quantity);
    }
    Ok(())
}

pub fn validate_price(price: &Decimal) -> Result<()> {
    if price < &Decimal::ZERO {
        bail!("Price must not be negative, got {}", price);
    }
    Ok(())
}

/// CoinGecko ids are lowercase slugs ("bitcoin", "usd-coin").
pub fn validate_coin_id(coin_id: &str) -> Result<()> {
    if !COIN_ID_PATTERN.is_match(coin_id) {
        bail!("Invalid coin id '{}': expected a lowercase slug", coin_id);
    }
    Ok(())
}
