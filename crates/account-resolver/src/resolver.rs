//! Provider resolvers

use async_trait::async_trait;
use tracing::{debug, info};
use twitter_api::{CredentialPool, TwitterClient};

use crate::batch::{run_in_waves, BatchOptions};
use crate::config::ResolverConfig;
use crate::error::{ResolverError, Result};
use crate::lookup::lookup_chunk;
use crate::partition::partition_input;
use crate::policy::ErrorPolicy;
use crate::reconcile::{reconcile, unique_usernames, CandidateIndex};
use crate::types::{InputMap, ResultMap, ResultSink};

/// Turns provider-tagged account keys into canonical `"<code>:<id>"` keys,
/// carrying each key's payload across
#[async_trait]
pub trait AccountResolver<V>: Send + Sync {
    async fn resolve(&self, input: InputMap<V>) -> Result<ResultMap<V>>;
}

/// Resolves `twitter:<username>` keys through the v2 user lookup API
pub struct TwitterResolver {
    client: TwitterClient,
    policy: ErrorPolicy,
    batch: BatchOptions,
    provider_code: String,
}

impl TwitterResolver {
    /// Build a resolver from validated configuration
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let pool = CredentialPool::new(config.api_keys.clone());
        let client =
            TwitterClient::with_base_url_and_timeout(&config.base_url, pool, config.request_timeout);
        Self::with_client(client, config)
    }

    /// Build a resolver around an existing client (e.g. one with a seeded pool)
    pub fn with_client(client: TwitterClient, config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            policy: ErrorPolicy::from_flag(config.ignore_resolving_errors),
            batch: config.batch,
            provider_code: config.provider_code.clone(),
        })
    }

    /// Build a resolver from `TWITTER_API_KEY` and friends
    pub fn from_env() -> Result<Self> {
        Self::new(&ResolverConfig::from_env())
    }

    /// Resolve `input` into a caller-owned sink.
    ///
    /// Whatever was written before a failure (passthrough entries, chunks that
    /// completed) stays in `results`, so the caller can re-drive just the
    /// remainder once a rate limit resets.
    pub async fn resolve_into<V>(&self, input: InputMap<V>, results: &ResultSink<V>) -> Result<()>
    where
        V: Clone + Send + Sync,
    {
        let candidates = partition_input(input, &self.provider_code, results);
        if candidates.is_empty() {
            return Ok(());
        }

        let mut usernames = unique_usernames(&candidates);
        // Deterministic chunking regardless of map iteration order
        usernames.sort();
        let index = CandidateIndex::new(&candidates);

        debug!(
            candidates = candidates.len(),
            usernames = usernames.len(),
            batch_size = self.batch.batch_size(),
            concurrency = self.batch.concurrency(),
            "Resolving Twitter usernames"
        );

        let index = &index;
        let resolved = run_in_waves(&usernames, &self.batch, move |chunk| async move {
            let users = lookup_chunk(&self.client, &chunk, self.policy).await?;
            Ok::<_, ResolverError>(reconcile(&users, index, &self.provider_code, results))
        })
        .await?;

        info!(
            requested = usernames.len(),
            resolved = resolved.iter().sum::<usize>(),
            "Resolved Twitter usernames"
        );
        Ok(())
    }
}

#[async_trait]
impl<V> AccountResolver<V> for TwitterResolver
where
    V: Clone + Send + Sync + 'static,
{
    /// Each call starts from an empty result map
    async fn resolve(&self, input: InputMap<V>) -> Result<ResultMap<V>> {
        let results = ResultSink::new();
        self.resolve_into(input, &results).await?;
        Ok(results.into_inner())
    }
}
