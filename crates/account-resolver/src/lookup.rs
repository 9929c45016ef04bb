//! One lookup per chunk, with outcome classification

use tracing::debug;
use twitter_api::{TwitterClient, TwitterError, User, UsersResponse};

use crate::error::{ResolverError, Result};
use crate::policy::ErrorPolicy;

/// Look up one chunk of usernames and return the resolved accounts.
///
/// Failures that only mean "these accounts don't exist" go through `policy`;
/// everything else aborts.
pub async fn lookup_chunk(
    client: &TwitterClient,
    usernames: &[String],
    policy: ErrorPolicy,
) -> Result<Vec<User>> {
    match client.lookup_usernames(usernames).await {
        Ok(response) => accounts_from_response(response, policy),
        Err(err) => {
            policy.handle(classify_error(err, usernames))?;
            Ok(Vec::new())
        }
    }
}

/// Extract users from a 200 body. A body without `data` means nothing
/// resolved; each of its `errors` is an unresolved account.
pub fn accounts_from_response(response: UsersResponse, policy: ErrorPolicy) -> Result<Vec<User>> {
    match response.data {
        Some(users) => {
            if let Some(errors) = response.errors {
                debug!(
                    resolved = users.len(),
                    unresolved = errors.len(),
                    "Some usernames in batch did not resolve"
                );
            }
            Ok(users)
        }
        None => {
            for problem in response.errors.unwrap_or_default() {
                if let Some(description) = problem.description() {
                    policy.handle(ResolverError::Unresolved(description.to_string()))?;
                }
            }
            Ok(Vec::new())
        }
    }
}

/// Map a client error onto the resolver's error taxonomy
pub fn classify_error(err: TwitterError, usernames: &[String]) -> ResolverError {
    match err {
        TwitterError::NoCredentials => ResolverError::credential("No bearer token configured"),
        TwitterError::Unauthorized { title } => {
            ResolverError::credential(title.unwrap_or_else(|| "Unauthorized".to_string()))
        }
        TwitterError::RateLimited { limit, reset } => ResolverError::RateLimited { limit, reset },
        TwitterError::Api { detail, .. } => {
            let batch = usernames.join(",");
            ResolverError::Unresolved(match detail {
                Some(d) => format!(
                    "Twitter Error detail: {d} Error while fetching {batch}. Are they existing twitter handles?"
                ),
                None => format!("Error while fetching {batch}. Are they existing twitter handles?"),
            })
        }
        err @ (TwitterError::Server { .. } | TwitterError::Http(_)) => {
            ResolverError::BatchTransport {
                usernames: usernames.to_vec(),
                reason: err.to_string(),
            }
        }
    }
}
