use crate::error::SeedError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub fn build_client() -> Client {
    let timeout = std::env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(30);
    let connect = std::env::var("HTTP_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(5);
    Client::builder()
        .timeout(Duration::from_secs(timeout))
        .connect_timeout(Duration::from_secs(connect))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Decode a JSON response body. Any status >= 300 and any undecodable body
/// maps to `UnexpectedResponse` carrying the status and raw body.
pub async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, SeedError> {
    let url = response.url().to_string();
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| SeedError::network(&url, err))?;
    if status.as_u16() >= 300 {
        return Err(SeedError::unexpected_response(&url, status, body));
    }
    serde_json::from_str(&body).map_err(|_| SeedError::unexpected_response(&url, status, body))
}

/// Accept any status < 300, discarding the body; used for the raw storage
/// transfer where the response carries no payload of interest.
pub async fn expect_success(response: Response) -> Result<(), SeedError> {
    let url = response.url().to_string();
    let status = response.status();
    if status.as_u16() >= 300 {
        let body = response.text().await.unwrap_or_default();
        return Err(SeedError::unexpected_response(&url, status, body));
    }
    Ok(())
}
