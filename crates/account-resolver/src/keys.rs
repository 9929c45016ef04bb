//! Canonical key composition

/// Provider code used for Twitter accounts in canonical keys
pub const TWITTER_PROVIDER_CODE: &str = "1002";

/// Build a canonical key: `"<provider_code>:<external_id>"`
pub fn compose(provider_code: &str, external_id: &str) -> String {
    format!("{provider_code}:{external_id}")
}
