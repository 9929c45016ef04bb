//! Twitter API HTTP client

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tracing::debug;

use crate::credentials::CredentialPool;
use crate::error::{Result, TwitterError};
use crate::types::{ApiProblem, UsersResponse};

const RATE_LIMIT_LIMIT_HEADER: &str = "x-rate-limit-limit";
const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Client for the Twitter v2 user lookup endpoint
pub struct TwitterClient {
    http: reqwest::Client,
    base_url: String,
    credentials: CredentialPool,
}

impl TwitterClient {
    /// Production API root
    pub const DEFAULT_BASE_URL: &'static str = "https://api.twitter.com";
    /// Maximum number of usernames accepted by one `/2/users/by` call
    pub const MAX_USERNAMES_PER_REQUEST: usize = 100;

    /// Create a client against the production API (30 second timeout)
    pub fn new(credentials: CredentialPool) -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL, credentials)
    }

    /// Create a client against a custom API root
    pub fn with_base_url(base_url: &str, credentials: CredentialPool) -> Self {
        Self::with_base_url_and_timeout(base_url, credentials, Duration::from_secs(30))
    }

    /// Create a client against a custom API root with a custom timeout
    pub fn with_base_url_and_timeout(
        base_url: &str,
        credentials: CredentialPool,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Look up a batch of usernames in a single request.
    ///
    /// Unknown usernames are simply missing from `data` when several are
    /// requested. A lone unknown username comes back as a 200 whose body
    /// only carries `errors`, which callers must inspect.
    pub async fn lookup_usernames(&self, usernames: &[String]) -> Result<UsersResponse> {
        let token = self.credentials.pick()?;

        let url = format!(
            "{}/2/users/by?usernames={}",
            self.base_url,
            join_usernames(usernames)
        );

        debug!(count = usernames.len(), "Looking up Twitter usernames");

        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let headers = response.headers().clone();
        // Error bodies are best-effort; a missing or non-JSON body still gets classified by status.
        let problem = response.json::<ApiProblem>().await.unwrap_or_default();

        Err(classify_failure(status, &headers, problem))
    }
}

/// Comma-join usernames, percent-encoding each one but not the separators
fn join_usernames(usernames: &[String]) -> String {
    usernames
        .iter()
        .map(|u| urlencoding::encode(u))
        .collect::<Vec<_>>()
        .join(",")
}

fn classify_failure(status: StatusCode, headers: &HeaderMap, problem: ApiProblem) -> TwitterError {
    let title = problem.title.as_deref().unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED || title.contains("Unauthorized") {
        return TwitterError::Unauthorized {
            title: problem.title,
        };
    }

    if status == StatusCode::TOO_MANY_REQUESTS || title.contains("Too Many Requests") {
        return TwitterError::RateLimited {
            limit: header_u64(headers, RATE_LIMIT_LIMIT_HEADER),
            reset: header_u64(headers, RATE_LIMIT_RESET_HEADER)
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        };
    }

    if status.is_server_error() {
        return TwitterError::Server {
            status: status.as_u16(),
        };
    }

    TwitterError::Api {
        status: status.as_u16(),
        detail: problem.description().map(str::to_string),
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
