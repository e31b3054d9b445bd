use anyhow::Result;
use mime::Mime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use syntect::parsing::SyntaxReference;
use syntect::{
    easy::HighlightLines,
    highlighting::{Style, ThemeSet},
    parsing::SyntaxSet,
    util::{as_24_bit_terminal_escaped, LinesWithEndings},
};

use crate::error::FetchError;
use crate::filter::FilterSpec;

/// Fields that may hold the aircraft list in a provider payload,
/// tried in order when the payload is not itself a list.
const AIRCRAFT_FIELDS: [&str; 3] = ["aircraft", "data", "flights"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub status: Status,
    pub count: usize,
    pub aircraft: Vec<Value>,
    pub raw_response: Value,
}

impl ResultEnvelope {
    /// Build a success envelope from a decoded payload: extract, filter
    /// client-side, truncate to the limit.
    pub fn success(payload: Value, filter: &FilterSpec) -> Self {
        let aircraft: Vec<Value> = extract_aircraft(&payload)
            .iter()
            .filter(|record| filter.matches(record))
            .take(filter.limit())
            .cloned()
            .collect();

        Self {
            status: Status::Success,
            count: aircraft.len(),
            aircraft,
            raw_response: payload,
        }
    }

    pub fn error(raw_response: Value) -> Self {
        Self {
            status: Status::Error,
            count: 0,
            aircraft: Vec::new(),
            raw_response,
        }
    }

    pub fn from_outcome(outcome: Result<Value, FetchError>, filter: &FilterSpec) -> Self {
        match outcome {
            Ok(payload) => Self::success(payload, filter),
            Err(err) => Self::from(err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<FetchError> for ResultEnvelope {
    fn from(err: FetchError) -> Self {
        let raw = match err {
            FetchError::Network(_) => Value::String(err.to_string()),
            // keep structured error bodies when the provider sends JSON
            FetchError::Upstream { body, .. } => {
                serde_json::from_str(&body).unwrap_or(Value::String(body))
            }
            FetchError::Decode { body, .. } => Value::String(body),
        };
        Self::error(raw)
    }
}

/// The raw result of the one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<Mime>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turn a raw response into a JSON payload, or the matching error.
pub fn decode_body(resp: RawResponse) -> Result<Value, FetchError> {
    if !resp.is_success() {
        return Err(FetchError::Upstream {
            status: resp.status,
            body: resp.body,
        });
    }

    if let Some(ref m) = resp.content_type
        && m.subtype() != mime::JSON
        && m.suffix() != Some(mime::JSON)
    {
        log::debug!("Response content type is {}, decoding as JSON anyway", m);
    }

    serde_json::from_str(&resp.body).map_err(|e| FetchError::Decode {
        reason: e.to_string(),
        body: resp.body,
    })
}

pub fn extract_aircraft(payload: &Value) -> &[Value] {
    if let Some(list) = payload.as_array() {
        return list;
    }

    AIRCRAFT_FIELDS
        .iter()
        .find_map(|field| payload.get(*field).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn parse_content_type(value: &str) -> Option<Mime> {
    value.parse().ok()
}

pub fn print_envelope(envelope: &ResultEnvelope, highlight: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(envelope)?;
    if highlight {
        print_syntect(&json, "json")?;
        println!();
    } else {
        println!("{}", json);
    }
    Ok(())
}

pub fn print_syntect(s: &str, ext: &str) -> Result<()> {
    let ps = SyntaxSet::load_defaults_newlines();
    let ts = ThemeSet::load_defaults();

    let syntax: &SyntaxReference = ps
        .find_syntax_by_extension(ext)
        .unwrap_or_else(|| ps.find_syntax_plain_text());

    let mut h = HighlightLines::new(syntax, &ts.themes["base16-ocean.dark"]);

    for line in LinesWithEndings::from(s) {
        let ranges: Vec<(Style, &str)> = h.highlight_line(line, &ps)?;
        let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
        print!("{}", escaped);
    }
    print!("\x1b[0m");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
