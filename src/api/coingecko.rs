use std::collections::HashMap;

use anyhow::{Context, Result};
use reqwest::Client;
use rust_decimal::Decimal;

use crate::{
    api::{
        coingecko_dto::MarketCoinDto,
        utils::{make_request, parse_response_array},
    },
    models::Coin,
};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const VS_CURRENCY: &str = "usd";

#[derive(Clone, Debug, Default)]
pub struct CoinGeckoApi {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoApi {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Current USD price per coin id. An empty id list short-circuits to an
    /// empty map without touching the network.
    pub async fn simple_price(&self, coin_ids: &[String]) -> Result<HashMap<String, Decimal>> {
        if coin_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids = coin_ids.join(",");
        let params = [("ids", ids.as_str()), ("vs_currencies", VS_CURRENCY)];
        let res = make_request(
            &self.client,
            BASE_URL,
            "simple/price",
            &params,
            self.api_key.as_deref(),
        )
        .await?;

        let by_id: HashMap<String, HashMap<String, Decimal>> =
            serde_json::from_value(res).with_context(|| "Failed to parse simple price response")?;

        Ok(by_id
            .into_iter()
            .filter_map(|(id, vs)| vs.get(VS_CURRENCY).copied().map(|price| (id, price)))
            .collect())
    }

    /// Top coins ordered by market cap, the source for market browsing and
    /// coin search.
    pub async fn markets(&self, per_page: u32) -> Result<Vec<Coin>> {
        let per_page = per_page.to_string();
        let params = [
            ("vs_currency", VS_CURRENCY),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
            ("sparkline", "false"),
        ];
        let res = make_request(
            &self.client,
            BASE_URL,
            "coins/markets",
            &params,
            self.api_key.as_deref(),
        )
        .await?;

        let coins =
            parse_response_array::<MarketCoinDto>(res, "Failed to parse market data").await?;

        Ok(coins.iter().map(|dto| dto.to_coin()).collect())
    }
}
