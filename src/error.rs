use std::error::Error as _;

use thiserror::Error;

/// Failures that happen before any request is sent.
/// These abort the run without printing an envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("Invalid bounds '{0}': expected minLat,minLon,maxLat,maxLon")]
    InvalidBounds(String),

    #[error("Limit must be at least 1")]
    InvalidLimit,

    #[error("Timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("FR24_API_KEY environment variable not set")]
    MissingApiKey,
}

/// Failures of the single outbound request.
/// Each one is rendered as an error envelope on stdout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("API request failed: {0}")]
    Network(String),

    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse JSON response: {reason}")]
    Decode { reason: String, body: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest keeps the interesting part (refused, timed out) in the source chain
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        FetchError::Network(message)
    }
}

impl FetchError {
    /// Troubleshooting lines for transport failures. Upstream and decode
    /// errors carry provider text and get none.
    pub fn hints(&self) -> &'static [&'static str] {
        let FetchError::Network(message) = self else {
            return &[];
        };
        let message = message.to_lowercase();

        if message.contains("dns error") || message.contains("failed to lookup") {
            &[
                "Check your network connection",
                "Check the --endpoint URL if you set one",
            ]
        } else if message.contains("timed out") {
            &["Increase timeout with --timeout <seconds>"]
        } else if message.contains("connection refused") {
            &["Server is not running", "Firewall blocking the connection"]
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_error_messages() {
        assert_eq!(
            SetupError::MissingApiKey.to_string(),
            "FR24_API_KEY environment variable not set"
        );
        assert!(
            SetupError::InvalidBounds("1,2".into())
                .to_string()
                .contains("'1,2'")
        );
    }

    #[test]
    fn fetch_error_messages() {
        assert_eq!(
            FetchError::Network("connection refused".into()).to_string(),
            "API request failed: connection refused"
        );
        let upstream = FetchError::Upstream {
            status: 500,
            body: "oops".into(),
        };
        assert_eq!(upstream.to_string(), "Upstream returned HTTP 500");
    }

    #[test]
    fn hints_for_network_errors() {
        let timeout = FetchError::Network("error sending request: operation timed out".into());
        assert_eq!(timeout.hints(), ["Increase timeout with --timeout <seconds>"]);

        let refused = FetchError::Network("tcp connect error: Connection refused (os error 111)".into());
        assert_eq!(refused.hints().len(), 2);

        assert!(FetchError::Network("something else".into()).hints().is_empty());
    }

    #[test]
    fn no_hints_for_provider_bodies() {
        let upstream = FetchError::Upstream {
            status: 504,
            body: "<html>Gateway timed out</html>".into(),
        };
        assert!(upstream.hints().is_empty());

        let decode = FetchError::Decode {
            reason: "expected value".into(),
            body: "connection refused upstream".into(),
        };
        assert!(decode.hints().is_empty());
    }
}
