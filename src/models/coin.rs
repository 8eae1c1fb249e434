use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// One market-browsing row, as returned by the CoinGecko markets endpoint.
#[derive(Clone, Debug, Getters, new)]
pub struct Coin {
    id: String,
    symbol: String,
    name: String,
    market_cap_rank: Option<i64>,
    current_price: Option<Decimal>,
    price_change_percentage_24h: Option<Decimal>,
}

impl Coin {
    /// Case-insensitive match on name or symbol, the filter the coin
    /// search applies against the fetched market list.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.symbol.to_lowercase().contains(&query)
    }
}
