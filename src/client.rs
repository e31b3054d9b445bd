use anyhow::Result;
use reqwest::{header, Client};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn build_client(timeout_secs: u64) -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    let user_agent = format!("fr24rs/{}", env!("CARGO_PKG_VERSION"));
    headers.insert(header::USER_AGENT, header::HeaderValue::from_str(&user_agent)?);
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?;

    Ok(client)
}
