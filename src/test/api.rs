#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::api::{
        CoinGeckoApi, alternative_dto::FngResponseDto, coingecko_dto::MarketCoinDto,
    };

    #[test]
    fn market_coin_dto_parses_and_uppercases_symbol() {
        let dto: MarketCoinDto = serde_json::from_value(json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "market_cap_rank": 1,
            "current_price": 64250.12,
            "price_change_percentage_24h": -1.25
        }))
        .unwrap();

        let coin = dto.to_coin();
        assert_eq!(coin.id(), "bitcoin");
        assert_eq!(coin.symbol(), "BTC");
        assert_eq!(coin.market_cap_rank(), &Some(1));
        assert_eq!(coin.current_price(), &Some(dec!(64250.12)));
    }

    #[test]
    fn market_coin_dto_tolerates_nulls() {
        let dto: MarketCoinDto = serde_json::from_value(json!({
            "id": "obscurecoin",
            "symbol": "obs",
            "name": "Obscure Coin",
            "market_cap_rank": null,
            "current_price": null,
            "price_change_percentage_24h": null
        }))
        .unwrap();

        let coin = dto.to_coin();
        assert_eq!(coin.market_cap_rank(), &None);
        assert_eq!(coin.current_price(), &None);
    }

    #[test]
    fn coin_search_matches_name_and_symbol() {
        let dto: MarketCoinDto = serde_json::from_value(json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "market_cap_rank": 1,
            "current_price": 64250.12,
            "price_change_percentage_24h": 0.5
        }))
        .unwrap();
        let coin = dto.to_coin();

        assert!(coin.matches("bit"));
        assert!(coin.matches("BTC"));
        assert!(!coin.matches("ethereum"));
    }

    #[test]
    fn fear_greed_dto_converts() {
        let dto: FngResponseDto = serde_json::from_value(json!({
            "data": [{
                "value": "73",
                "value_classification": "Greed",
                "timestamp": "1735689600"
            }]
        }))
        .unwrap();

        let fear_greed = dto.data()[0].to_fear_greed().unwrap();
        assert_eq!(fear_greed.value(), &73);
        assert_eq!(fear_greed.classification(), "Greed");
    }

    #[test]
    fn fear_greed_dto_rejects_bad_value() {
        let dto: FngResponseDto = serde_json::from_value(json!({
            "data": [{
                "value": "not-a-number",
                "value_classification": "Greed",
                "timestamp": "1735689600"
            }]
        }))
        .unwrap();

        assert!(dto.data()[0].to_fear_greed().is_err());
    }

    #[tokio::test]
    async fn simple_price_with_no_ids_skips_the_request() {
        let api = CoinGeckoApi::new(None);
        let prices = api.simple_price(&[]).await.unwrap();

        assert!(prices.is_empty());
    }

    #[tokio::test]
    #[ignore = "hits the live CoinGecko API"]
    async fn markets_works() {
        let api = CoinGeckoApi::new(std::env::var("COINGECKO_API_KEY").ok());
        let coins = api.markets(10).await.unwrap();

        assert_eq!(coins.len(), 10);
        assert!(coins.iter().any(|coin| coin.id() == "bitcoin"));
    }

    #[tokio::test]
    #[ignore = "hits the live CoinGecko API"]
    async fn simple_price_works() {
        let api = CoinGeckoApi::new(std::env::var("COINGECKO_API_KEY").ok());
        let prices = api
            .simple_price(&["bitcoin".to_string(), "ethereum".to_string()])
            .await
            .unwrap();

        assert!(prices.contains_key("bitcoin"));
        assert!(prices.contains_key("ethereum"));
    }
}
