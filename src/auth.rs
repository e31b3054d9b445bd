use crate::error::SetupError;

pub const API_KEY_ENV: &str = "FR24_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    Public,
    Premium(String),
}

impl AuthMode {
    /// Resolve the mode from the `--use_env_key` flag. `lookup` reads an
    /// environment variable; callers normally pass `std::env::var`.
    pub fn resolve<F>(use_env_key: bool, lookup: F) -> Result<Self, SetupError>
    where
        F: FnOnce(&str) -> Result<String, std::env::VarError>,
    {
        if !use_env_key {
            return Ok(AuthMode::Public);
        }

        match lookup(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(AuthMode::Premium(key.trim().to_string())),
            _ => Err(SetupError::MissingApiKey),
        }
    }

    pub fn from_env(use_env_key: bool) -> Result<Self, SetupError> {
        Self::resolve(use_env_key, |name| std::env::var(name))
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, AuthMode::Premium(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Public => "public",
            AuthMode::Premium(_) => "premium",
        }
    }

    /// Headers this mode adds to the outbound request.
    pub fn headers(&self) -> Vec<(String, String)> {
        match self {
            AuthMode::Public => Vec::new(),
            AuthMode::Premium(key) => vec![
                ("Authorization".to_string(), format!("Bearer {}", key)),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
        }
    }
}

/// Shorten a credential for diagnostics.
pub fn mask_secret(value: &str) -> String {
    if value.len() > 20 && value.is_ascii() {
        format!("{}...{}", &value[..10], &value[value.len() - 5..])
    } else {
        "****".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
