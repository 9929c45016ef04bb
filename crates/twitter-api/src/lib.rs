//! Rust client for the Twitter v2 user lookup API
//!
//! Resolves batches of usernames to numeric account IDs through
//! `GET /2/users/by`, spreading requests over a pool of bearer tokens.
//!
//! # Example
//!
//! ```no_run
//! use twitter_api::{CredentialPool, TwitterClient};
//!
//! # async fn example() -> Result<(), twitter_api::TwitterError> {
//! let pool = CredentialPool::from_keys("token-a,token-b");
//! let client = TwitterClient::new(pool);
//!
//! let usernames = vec!["jack".to_string(), "TwitterDev".to_string()];
//! let response = client.lookup_usernames(&usernames).await?;
//! for user in response.data.unwrap_or_default() {
//!     println!("{} -> {}", user.username, user.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error classification
//!
//! Non-success responses are classified rather than passed through:
//! rejected tokens become [`TwitterError::Unauthorized`], throttling becomes
//! [`TwitterError::RateLimited`] with the limit and reset time taken from the
//! `x-rate-limit-*` headers, other client errors become [`TwitterError::Api`].

mod client;
mod credentials;
mod error;
mod types;

pub use client::TwitterClient;
pub use credentials::{parse_keys, CredentialPool};
pub use error::{Result, TwitterError};
pub use types::{ApiProblem, User, UsersResponse};
