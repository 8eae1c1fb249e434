pub mod coin;
pub mod entry;
pub mod fear_greed;
pub mod holding;
pub mod summary;

pub use coin::Coin;
pub use entry::Entry;
pub use fear_greed::FearGreed;
pub use holding::AggregatedHolding;
pub use summary::PortfolioSummary;
