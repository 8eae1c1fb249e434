use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{AggregatedHolding, Entry, PortfolioSummary};

/// Folds raw buy entries and a current-price map into the portfolio
/// summary. Pure and infallible: entries arrive in arbitrary order, the
/// price map may be incomplete, and malformed numerics are the caller's
/// problem (see `app::utils`).
pub fn aggregate(entries: &[Entry], prices: &HashMap<String, Decimal>) -> PortfolioSummary {
    let mut groups: HashMap<String, Vec<Entry>> = HashMap::new();

    for entry in entries {
        groups
            .entry(entry.symbol().to_uppercase())
            .or_default()
            .push(entry.clone());
    }

    let mut holdings: Vec<AggregatedHolding> = Vec::with_capacity(groups.len());

    for (symbol, group) in groups {
        let total_quantity: Decimal = group.iter().map(|entry| *entry.quantity()).sum();
        let invested: Decimal = group
            .iter()
            .map(|entry| entry.quantity() * entry.price_used())
            .sum();

        // A group whose quantities sum to zero is retained rather than
        // dropped; its weighted average is reported as zero.
        let average_buy_price = if total_quantity.is_zero() {
            Decimal::ZERO
        } else {
            invested / total_quantity
        };

        let name = group[0].name().clone();
        let coin_id = group[0].coin_id().clone();

        // A coin id the feed does not know is valued at break-even.
        let current_price = prices
            .get(&coin_id)
            .copied()
            .unwrap_or(average_buy_price);

        let current_value = total_quantity * current_price;
        let cost_basis = total_quantity * average_buy_price;
        let profit_or_loss = current_value - cost_basis;
        let profit_or_loss_percentage = if cost_basis.is_zero() {
            Decimal::ZERO
        } else {
            profit_or_loss / cost_basis * Decimal::from(100)
        };

        holdings.push(AggregatedHolding::new(
            symbol,
            name,
            coin_id,
            total_quantity,
            average_buy_price,
            current_price,
            current_value,
            profit_or_loss,
            profit_or_loss_percentage,
            group,
        ));
    }

    // Largest positions first, ties broken by symbol for stable rendering.
    holdings.sort_by(|a, b| {
        b.current_value()
            .cmp(a.current_value())
            .then_with(|| a.symbol().cmp(b.symbol()))
    });

    let total_portfolio_value: Decimal = holdings.iter().map(|h| *h.current_value()).sum();
    let total_invested: Decimal = holdings
        .iter()
        .map(|h| h.total_quantity() * h.average_buy_price())
        .sum();
    let total_profit_or_loss = total_portfolio_value - total_invested;
    let total_profit_or_loss_percentage = if total_invested.is_zero() {
        Decimal::ZERO
    } else {
        total_profit_or_loss / total_invested * Decimal::from(100)
    };

    PortfolioSummary::new(
        total_portfolio_value,
        total_invested,
        total_profit_or_loss,
        total_profit_or_loss_percentage,
        holdings,
    )
}
