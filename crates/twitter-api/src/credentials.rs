//! Bearer token pool

use std::fmt;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, TwitterError};

/// Set of bearer tokens that requests are spread across.
///
/// Each request draws one token uniformly at random (not round-robin), so
/// load lands roughly evenly on each token's provider-side rate limit.
pub struct CredentialPool {
    tokens: Vec<String>,
    rng: Mutex<StdRng>,
}

impl CredentialPool {
    /// Create a pool seeded from OS entropy
    pub fn new(tokens: Vec<String>) -> Self {
        Self::with_rng(tokens, StdRng::from_entropy())
    }

    /// Create a pool with a fixed seed, for reproducible token choice
    pub fn with_seed(tokens: Vec<String>, seed: u64) -> Self {
        Self::with_rng(tokens, StdRng::seed_from_u64(seed))
    }

    fn with_rng(tokens: Vec<String>, rng: StdRng) -> Self {
        Self {
            tokens,
            rng: Mutex::new(rng),
        }
    }

    /// Parse a comma-separated key list such as `TWITTER_API_KEY`.
    /// Blank entries are dropped.
    pub fn from_keys(keys: &str) -> Self {
        Self::new(parse_keys(keys))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Pick a token for the next request
    pub fn pick(&self) -> Result<&str> {
        if self.tokens.is_empty() {
            return Err(TwitterError::NoCredentials);
        }
        // A poisoned lock only means another picker panicked; the RNG state is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let idx = pick_index(self.tokens.len(), &mut *rng);
        Ok(&self.tokens[idx])
    }
}

impl fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPool")
            .field("tokens", &format_args!("[{} redacted]", self.tokens.len()))
            .finish()
    }
}

/// Uniform index into a non-empty pool of `len` tokens
pub(crate) fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    rng.gen_range(0..len)
}

/// Split a comma-separated key list, trimming whitespace and dropping blanks
pub fn parse_keys(keys: &str) -> Vec<String> {
    keys.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
