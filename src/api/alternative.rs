use anyhow::{Context, Result};
use reqwest::Client;

use crate::{
    api::{
        alternative_dto::FngResponseDto,
        utils::{make_request, parse_response_object},
    },
    models::FearGreed,
};

const BASE_URL: &str = "https://api.alternative.me";

pub async fn get_fear_greed(client: &Client) -> Result<FearGreed> {
    let res = make_request(client, BASE_URL, "fng/", &[], None).await?;
    let dto =
        parse_response_object::<FngResponseDto>(res, "Failed to parse Fear & Greed response")
            .await?;

    dto.data()
        .first()
        .with_context(|| "Empty Fear & Greed response")?
        .to_fear_greed()
}
