use derive_getters::Getters;
use derive_new::new;

/// Market Fear & Greed index reading from alternative.me.
#[derive(Clone, Debug, Getters, new)]
pub struct FearGreed {
    value: i64,
    classification: String,
}
