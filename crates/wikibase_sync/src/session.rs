//! Per-session edit token.

use crate::error::WikibaseResult;
use parking_lot::RwLock;

/// Caches the CSRF token required by every write.
///
/// The token is fetched at most once however many threads ask for it at
/// the same time, and is then reused for the life of the session.
#[derive(Debug, Default)]
pub struct EditTokenCache {
    token: RwLock<Option<String>>,
}

impl EditTokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Returns the cached token, calling `fetch` to obtain it if there is
    /// none. A failed fetch leaves the cache empty.
    pub fn get_or_fetch<F>(&self, fetch: F) -> WikibaseResult<String>
    where
        F: FnOnce() -> WikibaseResult<String>,
    {
        if let Some(token) = self.token.read().as_ref() {
            return Ok(token.clone());
        }

        let mut slot = self.token.write();
        // Another caller may have fetched while we waited for the lock.
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = fetch()?;
        *slot = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WikibaseError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn cached(cache: &EditTokenCache) -> Option<String> {
        cache.token.read().clone()
    }

    #[test]
    fn fetches_once() {
        let cache = EditTokenCache::new();
        let calls = AtomicUsize::new(0);
        let fetch = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok("token+\\".to_string())
        };

        assert_eq!(cache.get_or_fetch(fetch).unwrap(), "token+\\");
        assert_eq!(cache.get_or_fetch(fetch).unwrap(), "token+\\");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached(&cache).as_deref(), Some("token+\\"));
    }

    #[test]
    fn seeded_token_is_not_fetched() {
        let cache = EditTokenCache::with_token("seeded");
        let token = cache
            .get_or_fetch(|| panic!("fetch should not be called"))
            .unwrap();
        assert_eq!(token, "seeded");
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let cache = EditTokenCache::new();
        let err = cache
            .get_or_fetch(|| Err(WikibaseError::precondition("no token")))
            .unwrap_err();
        assert!(matches!(err, WikibaseError::Precondition(_)));
        assert!(cached(&cache).is_none());

        assert_eq!(cache.get_or_fetch(|| Ok("t".into())).unwrap(), "t");
    }

    #[test]
    fn concurrent_callers_share_one_fetch() {
        let cache = Arc::new(EditTokenCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache
                        .get_or_fetch(|| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(std::time::Duration::from_millis(10));
                            Ok("shared".to_string())
                        })
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "shared");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
