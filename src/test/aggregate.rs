#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Local;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::app::aggregate::aggregate;
    use crate::models::Entry;

    fn entry(id: i64, symbol: &str, coin_id: &str, quantity: Decimal, price: Decimal) -> Entry {
        Entry::new(
            id,
            symbol.to_string(),
            coin_id.to_string(),
            symbol.to_string(),
            quantity,
            price,
            Local::now(),
            None,
        )
    }

    fn prices(pairs: &[(&str, Decimal)]) -> HashMap<String, Decimal> {
        pairs
            .iter()
            .map(|(id, price)| (id.to_string(), *price))
            .collect()
    }

    #[test]
    fn empty_entries_produce_zero_summary() {
        let summary = aggregate(&[], &HashMap::new());

        assert_eq!(summary.total_portfolio_value(), &Decimal::ZERO);
        assert_eq!(summary.total_invested(), &Decimal::ZERO);
        assert_eq!(summary.total_profit_or_loss(), &Decimal::ZERO);
        assert_eq!(summary.total_profit_or_loss_percentage(), &Decimal::ZERO);
        assert!(summary.holdings().is_empty());
    }

    #[test]
    fn btc_two_lots_with_live_price() {
        let entries = vec![
            entry(1, "BTC", "bitcoin", dec!(1), dec!(20000)),
            entry(2, "BTC", "bitcoin", dec!(1), dec!(30000)),
        ];
        let prices = prices(&[("bitcoin", dec!(40000))]);

        let summary = aggregate(&entries, &prices);

        assert_eq!(summary.holdings().len(), 1);
        let holding = &summary.holdings()[0];
        assert_eq!(holding.total_quantity(), &dec!(2));
        assert_eq!(holding.average_buy_price(), &dec!(25000));
        assert_eq!(holding.current_price(), &dec!(40000));
        assert_eq!(holding.current_value(), &dec!(80000));
        assert_eq!(holding.profit_or_loss(), &dec!(30000));
        assert_eq!(holding.profit_or_loss_percentage(), &dec!(60));
        assert_eq!(holding.entries().len(), 2);
    }

    #[test]
    fn missing_price_falls_back_to_break_even() {
        let entries = vec![entry(1, "ETH", "ethereum", dec!(2), dec!(1000))];

        let summary = aggregate(&entries, &HashMap::new());

        let holding = &summary.holdings()[0];
        assert_eq!(holding.current_price(), &dec!(1000));
        assert_eq!(holding.current_value(), &dec!(2000));
        assert_eq!(holding.profit_or_loss(), &Decimal::ZERO);
        assert_eq!(holding.profit_or_loss_percentage(), &Decimal::ZERO);
    }

    #[test]
    fn grouping_is_case_insensitive() {
        let entries = vec![
            entry(1, "btc", "bitcoin", dec!(1), dec!(10000)),
            entry(2, "BTC", "bitcoin", dec!(3), dec!(20000)),
        ];

        let summary = aggregate(&entries, &HashMap::new());

        assert_eq!(summary.holdings().len(), 1);
        let holding = &summary.holdings()[0];
        assert_eq!(holding.symbol(), "BTC");
        assert_eq!(holding.total_quantity(), &dec!(4));
    }

    #[test]
    fn total_quantity_matches_entry_sum() {
        let entries = vec![
            entry(1, "SOL", "solana", dec!(12.5), dec!(95)),
            entry(2, "SOL", "solana", dec!(7.25), dec!(140)),
            entry(3, "SOL", "solana", dec!(0.3), dec!(201.3)),
            entry(4, "ETH", "ethereum", dec!(1), dec!(3000)),
        ];

        let summary = aggregate(&entries, &HashMap::new());

        let sol = summary
            .holdings()
            .iter()
            .find(|h| h.symbol() == "SOL")
            .unwrap();
        assert_eq!(sol.total_quantity(), &dec!(20.05));
    }

    #[test]
    fn average_lies_between_min_and_max_price() {
        let entries = vec![
            entry(1, "ADA", "cardano", dec!(100), dec!(0.35)),
            entry(2, "ADA", "cardano", dec!(400), dec!(0.52)),
            entry(3, "ADA", "cardano", dec!(50), dec!(1.10)),
        ];

        let summary = aggregate(&entries, &HashMap::new());

        let average = summary.holdings()[0].average_buy_price();
        assert!(average >= &dec!(0.35));
        assert!(average <= &dec!(1.10));
    }

    #[test]
    fn zero_invested_reports_zero_percentage() {
        // Airdropped coins have a zero cost basis; the percentage is
        // defined as zero rather than dividing by zero.
        let entries = vec![entry(1, "UNI", "uniswap", dec!(10), dec!(0))];
        let prices = prices(&[("uniswap", dec!(8))]);

        let summary = aggregate(&entries, &prices);

        let holding = &summary.holdings()[0];
        assert_eq!(holding.current_value(), &dec!(80));
        assert_eq!(holding.profit_or_loss(), &dec!(80));
        assert_eq!(holding.profit_or_loss_percentage(), &Decimal::ZERO);
        assert_eq!(summary.total_profit_or_loss_percentage(), &Decimal::ZERO);
    }

    #[test]
    fn deleting_an_entry_recomputes_from_remaining() {
        let first = entry(1, "BTC", "bitcoin", dec!(1), dec!(20000));
        let second = entry(2, "BTC", "bitcoin", dec!(1), dec!(30000));
        let prices = prices(&[("bitcoin", dec!(40000))]);

        let before = aggregate(&[first.clone(), second], &prices);
        assert_eq!(before.holdings()[0].average_buy_price(), &dec!(25000));

        let after = aggregate(&[first], &prices);
        let holding = &after.holdings()[0];
        assert_eq!(holding.total_quantity(), &dec!(1));
        assert_eq!(holding.average_buy_price(), &dec!(20000));
        assert_eq!(holding.profit_or_loss(), &dec!(20000));
    }

    #[test]
    fn holdings_sorted_by_value_descending() {
        let entries = vec![
            entry(1, "DOGE", "dogecoin", dec!(100), dec!(0.1)),
            entry(2, "BTC", "bitcoin", dec!(1), dec!(50000)),
            entry(3, "ETH", "ethereum", dec!(2), dec!(3000)),
        ];

        let summary = aggregate(&entries, &HashMap::new());

        let symbols: Vec<&str> = summary
            .holdings()
            .iter()
            .map(|h| h.symbol().as_str())
            .collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "DOGE"]);
    }

    #[test]
    fn totals_sum_across_holdings() {
        let entries = vec![
            entry(1, "BTC", "bitcoin", dec!(1), dec!(20000)),
            entry(2, "ETH", "ethereum", dec!(10), dec!(2000)),
        ];
        let prices = prices(&[("bitcoin", dec!(30000)), ("ethereum", dec!(1500))]);

        let summary = aggregate(&entries, &prices);

        // 30000 + 15000 value against 20000 + 20000 invested.
        assert_eq!(summary.total_portfolio_value(), &dec!(45000));
        assert_eq!(summary.total_invested(), &dec!(40000));
        assert_eq!(summary.total_profit_or_loss(), &dec!(5000));
        assert_eq!(summary.total_profit_or_loss_percentage(), &dec!(12.5));
    }
}
