//! Error types for account resolution

use std::fmt;

use chrono::{DateTime, Utc};

const CREDENTIAL_HELP: &str = "Twitter API Key (Bearer Token) invalid or not setup properly. \
It should be setup as an .env variable called TWITTER_API_KEY.\n\
You can go here to register your Twitter API Key (Bearer Token): \
https://developer.twitter.com/en/docs/authentication/oauth-2-0/application-only.";

#[derive(Debug)]
pub enum ResolverError {
    /// Bearer token missing or rejected. Never retryable.
    Credential(String),
    /// Provider throttled us. Re-drive the remaining accounts after `reset`.
    RateLimited {
        limit: Option<u64>,
        reset: Option<DateTime<Utc>>,
    },
    /// One account (or a whole batch) did not resolve. Subject to `ErrorPolicy`.
    Unresolved(String),
    /// The lookup for a batch failed outright
    BatchTransport {
        usernames: Vec<String>,
        reason: String,
    },
    Config(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl ResolverError {
    /// Credential error with the standard setup hint
    pub fn credential(cause: impl fmt::Display) -> Self {
        ResolverError::Credential(format!("{cause}. {CREDENTIAL_HELP}"))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolverError::Unresolved(_))
    }
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::Credential(msg) => write!(f, "Credential error: {}", msg),
            ResolverError::RateLimited { limit, reset } => {
                write!(f, "Too many requests to Twitter API")?;
                if let Some(l) = limit {
                    write!(f, " ({} requests)", l)?;
                }
                match reset {
                    Some(r) => write!(f, ". The reset time is at {}", r),
                    None => write!(f, ". The reset time is unknown"),
                }
            }
            ResolverError::Unresolved(msg) => write!(f, "Unresolved account: {}", msg),
            ResolverError::BatchTransport { usernames, reason } => write!(
                f,
                "Error while fetching {}: {}",
                usernames.join(","),
                reason
            ),
            ResolverError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ResolverError::Io(err) => write!(f, "IO error: {}", err),
            ResolverError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for ResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolverError::Io(err) => Some(err),
            ResolverError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResolverError {
    fn from(err: std::io::Error) -> Self {
        ResolverError::Io(err)
    }
}

impl From<serde_json::Error> for ResolverError {
    fn from(err: serde_json::Error) -> Self {
        ResolverError::Json(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for ResolverError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ResolverError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
