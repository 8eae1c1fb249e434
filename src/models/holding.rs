use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::Entry;

/// Per-symbol rollup of all buy entries plus live valuation.
#[derive(Clone, Debug, Getters, new)]
pub struct AggregatedHolding {
    symbol: String,
    name: String,
    coin_id: String,
    total_quantity: Decimal,
    average_buy_price: Decimal,
    current_price: Decimal,
    current_value: Decimal,
    profit_or_loss: Decimal,
    profit_or_loss_percentage: Decimal,
    entries: Vec<Entry>,
}
