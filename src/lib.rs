pub mod auth;
pub mod cli;
pub mod client;
pub mod error;
pub mod filter;
pub mod request;
pub mod response;
pub mod timing;

// Re-export commonly used types
pub use auth::AuthMode;
pub use cli::Cli;
pub use client::build_client;
pub use error::{FetchError, SetupError};
pub use filter::{BoundingBox, FilterSpec};
pub use request::{fetch, fetch_payload, HttpTransport, OutboundRequest, Transport};
pub use response::{ResultEnvelope, Status};
