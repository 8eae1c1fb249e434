use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::AggregatedHolding;

/// Whole-account rollup across all holdings. Recomputed on every refresh,
/// never persisted.
#[derive(Clone, Debug, Default, Getters, new)]
pub struct PortfolioSummary {
    total_portfolio_value: Decimal,
    total_invested: Decimal,
    total_profit_or_loss: Decimal,
    total_profit_or_loss_percentage: Decimal,
    holdings: Vec<AggregatedHolding>,
}
