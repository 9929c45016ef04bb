//! Concurrency-bounded batch execution in sequential waves

use std::future::Future;

use futures::future::try_join_all;
use tracing::debug;

use crate::error::{ResolverError, Result};

/// Chunking and concurrency limits for [`run_in_waves`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    batch_size: usize,
    concurrency: usize,
}

impl BatchOptions {
    /// Full-size lookups, 20 in flight
    pub const BULK: Self = Self {
        batch_size: 100,
        concurrency: 20,
    };
    /// Small lookups, 2 in flight
    pub const CONSERVATIVE: Self = Self {
        batch_size: 5,
        concurrency: 2,
    };

    pub fn new(batch_size: usize, concurrency: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(ResolverError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        if concurrency == 0 {
            return Err(ResolverError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            batch_size,
            concurrency,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::BULK
    }
}

/// Run `worker` over `items` in chunks of at most `batch_size`.
///
/// Up to `concurrency` consecutive chunks form a wave and run concurrently.
/// The next wave starts only after every chunk of the current one has
/// settled. Results come back in chunk order. The first failing chunk aborts
/// the run: the rest of its wave is dropped and later waves never start.
pub async fn run_in_waves<T, R, E, F, Fut>(
    items: &[T],
    options: &BatchOptions,
    mut worker: F,
) -> std::result::Result<Vec<R>, E>
where
    T: Clone,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    let chunks: Vec<&[T]> = items.chunks(options.batch_size).collect();
    let mut results = Vec::with_capacity(chunks.len());

    for (wave_index, wave) in chunks.chunks(options.concurrency).enumerate() {
        debug!(
            wave = wave_index,
            chunks = wave.len(),
            items = wave.iter().map(|c| c.len()).sum::<usize>(),
            "Dispatching wave"
        );

        let pending: Vec<Fut> = wave.iter().map(|chunk| worker(chunk.to_vec())).collect();
        results.extend(try_join_all(pending).await?);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[test]
    fn test_options_reject_zero() {
        assert!(BatchOptions::new(0, 1).is_err());
        assert!(BatchOptions::new(1, 0).is_err());
        let options = BatchOptions::new(5, 2).unwrap();
        assert_eq!(options, BatchOptions::CONSERVATIVE);
        assert_eq!(BatchOptions::default().batch_size(), 100);
        assert_eq!(BatchOptions::default().concurrency(), 20);
    }

    #[tokio::test]
    async fn test_chunks_respect_batch_size_and_order() {
        let items: Vec<u32> = (0..12).collect();
        let options = BatchOptions::new(5, 2).unwrap();

        let chunks = run_in_waves(&items, &options, |chunk| async move {
            Ok::<_, ResolverError>(chunk)
        })
        .await
        .unwrap();

        assert_eq!(
            chunks,
            vec![(0..5).collect::<Vec<_>>(), (5..10).collect(), (10..12).collect()]
        );
        assert!(chunks.iter().all(|c| c.len() <= 5));
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_worker() {
        let calls = AtomicUsize::new(0);
        let results = run_in_waves(&Vec::<u32>::new(), &BatchOptions::BULK, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, ResolverError>(()) }
        })
        .await
        .unwrap();

        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_results_follow_submission_not_completion_order() {
        let items: Vec<u64> = vec![30, 20, 10];
        let options = BatchOptions::new(1, 3).unwrap();

        let results = run_in_waves(&items, &options, |chunk| async move {
            // Later chunks finish first
            tokio::time::sleep(Duration::from_millis(chunk[0])).await;
            Ok::<_, ResolverError>(chunk[0])
        })
        .await
        .unwrap();

        assert_eq!(results, vec![30, 20, 10]);
    }

    #[tokio::test]
    async fn test_waves_are_barriers() {
        let items: Vec<usize> = (0..10).collect();
        let options = BatchOptions::new(1, 3).unwrap();

        let in_flight = Arc::new(AtomicUsize::new(0));
        let settled = Arc::new(AtomicUsize::new(0));
        // (chunk value, chunks settled when it started)
        let starts = Arc::new(Mutex::new(Vec::new()));

        run_in_waves(&items, &options, |chunk| {
            let in_flight = in_flight.clone();
            let settled = settled.clone();
            let starts = starts.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                assert!(now <= 3, "more than one wave in flight");
                starts
                    .lock()
                    .unwrap()
                    .push((chunk[0], settled.load(Ordering::SeqCst)));

                tokio::time::sleep(Duration::from_millis(5 * (3 - chunk[0] as u64 % 3))).await;

                in_flight.fetch_sub(1, Ordering::SeqCst);
                settled.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ResolverError>(())
            }
        })
        .await
        .unwrap();

        let starts = starts.lock().unwrap();
        assert_eq!(starts.len(), 10);
        for (value, settled_before) in starts.iter() {
            let wave = value / 3;
            // Every chunk of all earlier waves had settled before this one started
            assert!(
                *settled_before >= wave * 3,
                "chunk {value} started with only {settled_before} settled"
            );
        }
    }

    #[tokio::test]
    async fn test_failure_stops_later_waves() {
        let items: Vec<usize> = (0..6).collect();
        let options = BatchOptions::new(1, 2).unwrap();
        let dispatched = Arc::new(Mutex::new(Vec::new()));

        let err = run_in_waves(&items, &options, |chunk| {
            let dispatched = dispatched.clone();
            async move {
                dispatched.lock().unwrap().push(chunk[0]);
                if chunk[0] == 3 {
                    return Err(ResolverError::BatchTransport {
                        usernames: vec![chunk[0].to_string()],
                        reason: "boom".to_string(),
                    });
                }
                Ok(chunk[0])
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ResolverError::BatchTransport { .. }));
        let mut dispatched = dispatched.lock().unwrap().clone();
        dispatched.sort();
        // Waves [0,1] and [2,3] ran; [4,5] never did
        assert_eq!(dispatched, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_abandons_pending_chunks_in_wave() {
        let items: Vec<u64> = vec![0, 1];
        let options = BatchOptions::new(1, 2).unwrap();
        let completed = Arc::new(AtomicUsize::new(0));

        let result = run_in_waves(&items, &options, |chunk| {
            let completed = completed.clone();
            async move {
                if chunk[0] == 0 {
                    return Err(ResolverError::Unresolved("first".to_string()));
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
                completed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

        assert!(result.is_err());
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }
}
