pub mod price_feed_service;

pub use price_feed_service::{PriceFeedService, RefreshRate};
