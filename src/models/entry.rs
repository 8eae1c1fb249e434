use chrono::{DateTime, Local};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// One recorded buy of an asset. Immutable once stored; removed by id.
#[derive(Clone, Debug, Getters, new)]
pub struct Entry {
    id: i64,
    symbol: String,
    coin_id: String,
    name: String,
    quantity: Decimal,
    price_used: Decimal,
    timestamp: DateTime<Local>,
    notes: Option<String>,
}
