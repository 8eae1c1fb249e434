use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use rust_decimal::Decimal;
use strum_macros::{Display, EnumIter};

use crate::api::CoinGeckoApi;

/// How often the dashboard re-polls live prices. Selectable from the TUI.
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq)]
pub enum RefreshRate {
    #[strum(serialize = "30 seconds")]
    ThirtySeconds,
    #[default]
    #[strum(serialize = "1 minute")]
    OneMinute,
    #[strum(serialize = "5 minutes")]
    FiveMinutes,
    #[strum(serialize = "10 minutes")]
    TenMinutes,
}

impl RefreshRate {
    pub fn interval(&self) -> Duration {
        match self {
            RefreshRate::ThirtySeconds => Duration::from_secs(30),
            RefreshRate::OneMinute => Duration::from_secs(60),
            RefreshRate::FiveMinutes => Duration::from_secs(300),
            RefreshRate::TenMinutes => Duration::from_secs(600),
        }
    }
}

/// Live USD price source with a staleness window, so repeated UI-driven
/// refreshes collapse into a single request against the free API tier.
pub struct PriceFeedService {
    api: CoinGeckoApi,
    min_interval: Duration,
    prices: HashMap<String, Decimal>,
    fetched_at: Option<Instant>,
}

impl PriceFeedService {
    pub fn new(api: CoinGeckoApi, min_interval: Duration) -> Self {
        Self {
            api,
            min_interval,
            prices: HashMap::new(),
            fetched_at: None,
        }
    }

    pub fn prices(&self) -> &HashMap<String, Decimal> {
        &self.prices
    }

    fn is_stale(&self) -> bool {
        self.fetched_at
            .is_none_or(|at| at.elapsed() >= self.min_interval)
    }

    /// Re-fetches when the cached map is stale or misses any requested id,
    /// otherwise serves the cache.
    pub async fn refresh(&mut self, coin_ids: &[String]) -> Result<&HashMap<String, Decimal>> {
        let covers_all = coin_ids.iter().all(|id| self.prices.contains_key(id));

        if self.is_stale() || !covers_all {
            self.prices = self.api.simple_price(coin_ids).await?;
            self.fetched_at = Some(Instant::now());
        }

        Ok(&self.prices)
    }

    pub async fn force_refresh(
        &mut self,
        coin_ids: &[String],
    ) -> Result<&HashMap<String, Decimal>> {
        self.fetched_at = None;
        self.refresh(coin_ids).await
    }
}
