//! Single-entry, TTL-bound read-through cache for the site directory.
//!
//! The remote listing is slow and rate-limited relative to how often
//! the menu renders, so one snapshot is cached process-wide. The entry
//! is replaced wholesale on refresh and dropped explicitly when
//! credentials change -- it is never mutated in place, so a reader can
//! never observe a half-written snapshot.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::CoreError;
use crate::model::SiteDirectory;

/// Anything that can produce a fresh directory snapshot.
///
/// The production implementation wraps the Account API client; tests
/// inject counting or failing fakes.
pub trait DirectorySource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<SiteDirectory, CoreError>> + Send;
}

struct CacheEntry {
    snapshot: Arc<SiteDirectory>,
    fetched_at: Instant,
}

/// Read-through cache around [`DirectorySource::fetch`].
///
/// The mutex guards the single entry and is held across the refresh, so
/// concurrent callers racing an expired entry coalesce into one remote
/// call -- the losers wait and then read the entry the winner wrote.
pub struct DirectoryCache {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl DirectoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached snapshot, fetching through `source` when the
    /// entry is missing, expired, or `force_refresh` is set.
    ///
    /// A fetch failure propagates to the caller and leaves any stale
    /// entry untouched; stale data is never served as a fallback, since
    /// showing another account's sites is worse than showing none.
    pub async fn get<S: DirectorySource>(
        &self,
        source: &S,
        force_refresh: bool,
    ) -> Result<Arc<SiteDirectory>, CoreError> {
        let mut guard = self.entry.lock().await;

        if !force_refresh {
            if let Some(entry) = guard.as_ref() {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!("directory cache hit");
                    return Ok(Arc::clone(&entry.snapshot));
                }
            }
        }

        debug!(force_refresh, "refreshing directory cache");
        let snapshot = Arc::new(source.fetch().await?);
        *guard = Some(CacheEntry {
            snapshot: Arc::clone(&snapshot),
            fetched_at: Instant::now(),
        });
        Ok(snapshot)
    }

    /// Drop the current entry unconditionally.
    ///
    /// Called around a credential test: the credentials or the account
    /// contents may have changed, so the snapshot can no longer be
    /// trusted regardless of age.
    pub async fn invalidate(&self) {
        debug!("invalidating directory cache");
        *self.entry.lock().await = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::model::{Install, Site};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DirectorySource for CountingSource {
        async fn fetch(&self) -> Result<SiteDirectory, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CoreError::FetchFailed {
                    message: "synthetic outage".into(),
                });
            }
            Ok(SiteDirectory::new(vec![Site {
                name: "Acme".into(),
                group: None,
                installs: vec![Install {
                    name: "acmeprod".into(),
                    environment: "production".into(),
                    domain: Some("acme.com".into()),
                }],
            }]))
        }
    }

    #[tokio::test]
    async fn second_get_within_ttl_hits_cache() {
        let cache = DirectoryCache::new(Duration::from_secs(3600));
        let source = CountingSource::new();

        let first = cache.get(&source, false).await.unwrap();
        let second = cache.get(&source, false).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn expired_entry_triggers_refetch() {
        let cache = DirectoryCache::new(Duration::ZERO);
        let source = CountingSource::new();

        cache.get(&source, false).await.unwrap();
        cache.get(&source, false).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn force_refresh_bypasses_live_entry() {
        let cache = DirectoryCache::new(Duration::from_secs(3600));
        let source = CountingSource::new();

        cache.get(&source, false).await.unwrap();
        cache.get(&source, true).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_fetch_regardless_of_ttl() {
        let cache = DirectoryCache::new(Duration::from_secs(3600));
        let source = CountingSource::new();

        cache.get(&source, false).await.unwrap();
        cache.invalidate().await;
        cache.get(&source, false).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_propagates_and_preserves_stale_entry() {
        let cache = DirectoryCache::new(Duration::ZERO);
        let good = CountingSource::new();
        let bad = CountingSource::failing();

        let stale = cache.get(&good, false).await.unwrap();

        // Entry is expired (zero TTL); the failing refresh must error out
        // without clobbering what is stored.
        let err = cache.get(&bad, false).await.unwrap_err();
        assert!(matches!(err, CoreError::FetchFailed { .. }));

        // A later successful refresh still works, and the failure did not
        // empty the slot in between (the stale snapshot stayed intact).
        let fresh = cache.get(&good, false).await.unwrap();
        assert_eq!(stale, fresh);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_gets_coalesce_into_one_fetch() {
        struct SlowSource(AtomicUsize);

        impl DirectorySource for SlowSource {
            async fn fetch(&self) -> Result<SiteDirectory, CoreError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(SiteDirectory::default())
            }
        }

        let cache = Arc::new(DirectoryCache::new(Duration::from_secs(3600)));
        let source = Arc::new(SlowSource(AtomicUsize::new(0)));

        let a = {
            let (cache, source) = (Arc::clone(&cache), Arc::clone(&source));
            tokio::spawn(async move { cache.get(source.as_ref(), false).await })
        };
        let b = {
            let (cache, source) = (Arc::clone(&cache), Arc::clone(&source));
            tokio::spawn(async move { cache.get(source.as_ref(), false).await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(source.0.load(Ordering::SeqCst), 1);
    }
}
