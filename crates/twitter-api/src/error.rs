//! Error types for the Twitter API client

use std::fmt;

use chrono::{DateTime, Utc};

/// Errors that can occur when calling the Twitter API
#[derive(Debug)]
pub enum TwitterError {
    /// The credential pool is empty, so no request can be authorized
    NoCredentials,
    /// The bearer token was rejected
    Unauthorized { title: Option<String> },
    /// The token hit its rate limit
    RateLimited {
        limit: Option<u64>,
        reset: Option<DateTime<Utc>>,
    },
    /// Any other 4xx response
    Api { status: u16, detail: Option<String> },
    /// 5xx response
    Server { status: u16 },
    /// Connection, timeout or body decoding failure
    Http(reqwest::Error),
}

impl fmt::Display for TwitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "No Twitter bearer tokens configured"),
            Self::Unauthorized { title } => match title {
                Some(t) => write!(f, "Twitter API unauthorized: {}", t),
                None => write!(f, "Twitter API unauthorized"),
            },
            Self::RateLimited { limit, reset } => {
                write!(f, "Twitter API rate limited")?;
                if let Some(l) = limit {
                    write!(f, " (limit {})", l)?;
                }
                if let Some(r) = reset {
                    write!(f, ", resets at {}", r)?;
                }
                Ok(())
            }
            Self::Api { status, detail } => match detail {
                Some(d) => write!(f, "Twitter API error {}: {}", status, d),
                None => write!(f, "Twitter API error {}", status),
            },
            Self::Server { status } => write!(f, "Twitter API server error {}", status),
            Self::Http(e) => write!(f, "Twitter HTTP error: {}", e),
        }
    }
}

impl std::error::Error for TwitterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TwitterError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

/// Result type for Twitter API operations
pub type Result<T> = std::result::Result<T, TwitterError>;
