use anyhow::{anyhow, Result};
use reqwest::{header, Client, Url};
use serde_json::Value;

use crate::auth::{mask_secret, AuthMode};
use crate::error::FetchError;
use crate::filter::FilterSpec;
use crate::response::{decode_body, parse_content_type, RawResponse, ResultEnvelope};
use crate::timing::RequestTimer;

pub const PUBLIC_FEED_URL: &str = "https://data-live.flightradar24.com/zones/fcgi/feed.js";
pub const PREMIUM_SEARCH_URL: &str = "https://api.flightradar24.com/common/v1/search.json";

/// Data sources the public live feed expects to be switched on.
const FEED_SOURCES: [&str; 9] = [
    "faa", "mlat", "flarm", "adsb", "gnd", "air", "vehicles", "estimated", "stats",
];

/// A fully resolved GET request, independent of the HTTP stack.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl OutboundRequest {
    pub fn build(filter: &FilterSpec, auth: &AuthMode, endpoint: Option<&str>) -> Self {
        let url = endpoint
            .map(str::to_string)
            .unwrap_or_else(|| default_endpoint(auth).to_string());

        let mut query = filter.query_pairs();
        if !auth.is_premium() {
            query.extend(
                FEED_SOURCES
                    .iter()
                    .map(|source| (source.to_string(), "1".to_string())),
            );
        }

        Self {
            url,
            query,
            headers: auth.headers(),
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Full URL with the encoded query string.
    pub fn full_url(&self) -> Result<Url> {
        let url = Url::parse_with_params(&self.url, &self.query)
            .map_err(|e| anyhow!("Invalid endpoint '{}': {}", self.url, e))?;
        Ok(url)
    }

    /// Emit the request line and headers to the debug log, credentials masked.
    pub fn log(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        match self.full_url() {
            Ok(url) => log::debug!("> GET {}", url),
            Err(_) => log::debug!("> GET {}", self.url),
        }
        for (key, value) in &self.headers {
            if key.eq_ignore_ascii_case("authorization") {
                log::debug!("> {}: {}", key, mask_secret(value));
            } else {
                log::debug!("> {}: {}", key, value);
            }
        }
    }
}

pub fn default_endpoint(auth: &AuthMode) -> &'static str {
    match auth {
        AuthMode::Public => PUBLIC_FEED_URL,
        AuthMode::Premium(_) => PREMIUM_SEARCH_URL,
    }
}

/// The single seam between request building and the network.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn issue(&self, request: &OutboundRequest) -> Result<RawResponse, FetchError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn issue(&self, request: &OutboundRequest) -> Result<RawResponse, FetchError> {
        let mut timer = RequestTimer::start();

        let mut req_builder = self.client.get(&request.url);
        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        let resp = req_builder.send().await?;
        timer.record_first_byte();

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_type);
        log::debug!("< {:?} {}", resp.version(), resp.status());

        let body = resp.text().await?;
        timer.finish();
        log::debug!("< {} bytes ({})", body.len(), timer.summary());

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Build the request, send it once and decode the payload.
pub async fn fetch_payload<T: Transport>(
    transport: &T,
    filter: &FilterSpec,
    auth: &AuthMode,
    endpoint: Option<&str>,
) -> Result<Value, FetchError> {
    let request = OutboundRequest::build(filter, auth, endpoint);
    log::info!("Querying {} API at {}", auth.label(), request.url);
    if let Some(bounds) = filter.bounds() {
        log::debug!(
            "Bounding box lat {}..{}, lon {}..{}",
            bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
        );
    }
    request.log();

    let outcome = transport.issue(&request).await.and_then(decode_body);
    if let Err(ref e) = outcome {
        log::warn!("{}", e);
    }
    outcome
}

/// Run the whole exchange: build, send once, normalize.
pub async fn fetch<T: Transport>(
    transport: &T,
    filter: &FilterSpec,
    auth: &AuthMode,
    endpoint: Option<&str>,
) -> ResultEnvelope {
    let outcome = fetch_payload(transport, filter, auth, endpoint).await;
    let envelope = ResultEnvelope::from_outcome(outcome, filter);
    log::info!("Returning {} aircraft", envelope.count);
    envelope
}

// ============================================================================
// Tests
// ============================================================================
