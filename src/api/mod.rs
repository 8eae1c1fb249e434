pub mod alternative;
pub mod alternative_dto;
pub mod coingecko;
pub mod coingecko_dto;
pub mod utils;

pub use coingecko::CoinGeckoApi;
