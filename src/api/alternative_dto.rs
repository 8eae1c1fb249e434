use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;
use serde::Deserialize;

use crate::models::FearGreed;

#[derive(Debug, Deserialize, Getters, new)]
pub struct FngResponseDto {
    data: Vec<FngDataDto>,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct FngDataDto {
    value: String,
    value_classification: String,
    timestamp: String,
}

impl FngDataDto {
    pub fn to_fear_greed(&self) -> Result<FearGreed> {
        let value = self
            .value
            .parse::<i64>()
            .with_context(|| format!("Failed to parse Fear & Greed value '{}'", self.value))?;

        Ok(FearGreed::new(value, self.value_classification.clone()))
    }
}
