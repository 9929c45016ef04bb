//! Splits raw input keys into passthrough entries and lookup candidates

use tracing::warn;

use crate::keys::compose;
use crate::types::{Candidate, InputMap, ResultSink};

/// Partition `input` by key shape.
///
/// `"<tag>:<username>:<id>"` already carries its external id and is written
/// straight into `results`. `"<tag>:<username>"` becomes a [`Candidate`].
/// Anything else is skipped with a warning. Duplicate usernames (e.g. the
/// same handle under two tags) are kept; deduplication happens downstream.
pub fn partition_input<V>(
    input: InputMap<V>,
    provider_code: &str,
    results: &ResultSink<V>,
) -> Vec<Candidate<V>> {
    let mut candidates = Vec::new();

    for (key, payload) in input {
        let parts: Vec<&str> = key.split(':').collect();
        match parts.as_slice() {
            [_, username, id] if !username.is_empty() && !id.is_empty() => {
                results.insert(compose(provider_code, id), payload);
            }
            [_, username] if !username.is_empty() => {
                candidates.push(Candidate {
                    username: (*username).to_string(),
                    payload,
                });
            }
            _ => warn!(key = %key, "Skipping malformed account key"),
        }
    }

    candidates
}
