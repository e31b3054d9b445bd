use anyhow::Result;
use clap::Parser;
use reqwest::Url;

use crate::client::DEFAULT_TIMEOUT_SECS;
use crate::error::SetupError;
use crate::filter::{BoundingBox, FilterSpec, DEFAULT_LIMIT};

/// Query the FlightRadar24 API for live aircraft data and print a JSON envelope
///
/// Examples:
///   # Top 50 aircraft worldwide
///   fr24rs
///
///   # Filter by type
///   fr24rs --aircraft_type C17 --limit 20
///
///   # Bounding box (minLat,minLon,maxLat,maxLon)
///   fr24rs --bounds 30,-120,40,-110 --limit 100
///
///   # Premium API with FR24_API_KEY from the environment
///   fr24rs --use_env_key --registration N12345
#[derive(Parser, Debug, Clone)]
#[command(version, verbatim_doc_comment)]
pub struct Cli {
    /// Filter by aircraft type (e.g., C17, KC135)
    #[arg(long = "aircraft_type", value_name = "TYPE")]
    pub aircraft_type: Option<String>,

    /// Filter by aircraft registration (e.g., N12345)
    #[arg(long = "registration", value_name = "REG")]
    pub registration: Option<String>,

    /// Bounding box as minLat,minLon,maxLat,maxLon (e.g., 30,-120,40,-110)
    #[arg(long = "bounds", value_name = "BOUNDS", value_parser = parse_bounds, allow_hyphen_values = true)]
    pub bounds: Option<BoundingBox>,

    /// Maximum number of results to return
    #[arg(long = "limit", default_value_t = DEFAULT_LIMIT, value_parser = parse_limit)]
    pub limit: usize,

    /// Use the premium API with the key from the FR24_API_KEY environment variable
    #[arg(long = "use_env_key")]
    pub use_env_key: bool,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = parse_timeout)]
    pub timeout: u64,

    /// Override the API base URL
    #[arg(long = "endpoint", value_name = "URL", value_parser = parse_url)]
    pub endpoint: Option<String>,

    /// Verbose mode: log request details to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Never syntax-highlight the output
    #[arg(long = "plain")]
    pub plain: bool,
}

impl Cli {
    pub fn filter_spec(&self) -> Result<FilterSpec, SetupError> {
        FilterSpec::new(
            self.aircraft_type.clone(),
            self.registration.clone(),
            self.bounds,
            self.limit,
        )
    }
}

// ============================================================================
// Parse Function
// ============================================================================

fn parse_url(s: &str) -> Result<String> {
    let _url: Url = s.parse()?;
    Ok(s.into())
}

fn parse_bounds(s: &str) -> Result<BoundingBox> {
    Ok(s.parse()?)
}

fn parse_limit(s: &str) -> Result<usize> {
    let limit: usize = s.parse()?;
    if limit == 0 {
        return Err(SetupError::InvalidLimit.into());
    }
    Ok(limit)
}

fn parse_timeout(s: &str) -> Result<u64> {
    let secs: u64 = s.parse()?;
    if secs == 0 {
        return Err(SetupError::InvalidTimeout.into());
    }
    Ok(secs)
}

// ============================================================================
// Tests
// ============================================================================
