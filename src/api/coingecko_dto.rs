use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Coin;

#[derive(Debug, Deserialize, Getters, new)]
pub struct MarketCoinDto {
    id: String,
    symbol: String,
    name: String,
    market_cap_rank: Option<i64>,
    current_price: Option<Decimal>,
    price_change_percentage_24h: Option<Decimal>,
}

impl MarketCoinDto {
    pub fn to_coin(&self) -> Coin {
        Coin::new(
            self.id.clone(),
            self.symbol.to_uppercase(),
            self.name.clone(),
            self.market_cap_rank,
            self.current_price,
            self.price_change_percentage_24h,
        )
    }
}
