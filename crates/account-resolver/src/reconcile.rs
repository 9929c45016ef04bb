//! Reattaches payloads to looked-up accounts

use std::collections::{HashMap, HashSet};

use tracing::warn;
use twitter_api::User;

use crate::keys::compose;
use crate::types::{Candidate, ResultSink};

/// Candidates indexed by exact (case-sensitive) username
pub struct CandidateIndex<'a, V> {
    by_username: HashMap<&'a str, &'a V>,
}

impl<'a, V> CandidateIndex<'a, V> {
    /// Build the index. For duplicate usernames the first candidate wins.
    pub fn new(candidates: &'a [Candidate<V>]) -> Self {
        let mut by_username = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            by_username
                .entry(candidate.username.as_str())
                .or_insert(&candidate.payload);
        }
        Self { by_username }
    }

    pub fn get(&self, username: &str) -> Option<&'a V> {
        self.by_username.get(username).copied()
    }
}

/// Usernames to send to the lookup API, one per distinct candidate, in input order
pub fn unique_usernames<V>(candidates: &[Candidate<V>]) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|c| seen.insert(c.username.as_str()))
        .map(|c| c.username.clone())
        .collect()
}

/// Write `compose(provider_code, user.id) = payload` for every returned user
/// that matches a candidate by username. Unmatched users are skipped.
///
/// Returns the number of entries written.
pub fn reconcile<V: Clone>(
    users: &[User],
    index: &CandidateIndex<'_, V>,
    provider_code: &str,
    results: &ResultSink<V>,
) -> usize {
    let mut written = 0;
    for user in users {
        match index.get(&user.username) {
            Some(payload) => {
                if results.insert(compose(provider_code, &user.id), payload.clone()) {
                    written += 1;
                }
            }
            None => warn!(
                username = %user.username,
                id = %user.id,
                "Lookup returned an account nobody asked for, skipping"
            ),
        }
    }
    written
}
