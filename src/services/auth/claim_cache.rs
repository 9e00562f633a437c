//! Cache of verified claim sets, keyed by the raw token string.
//!
//! A hit lets the authenticator skip signature verification, so an entry must never
//! outlive the token it was decoded from.
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::services::auth::claims::Claims;

/// Storage seam for decoded claims.
///
/// `now` is passed in rather than read so the cache shares the authenticator's clock.
pub trait ClaimCache: Send + Sync {
    /// Cached claims for `token` if their expiry is strictly after `now`.
    /// A stale entry found here is dropped.
    fn get(&self, token: &str, now: i64) -> Option<Claims>;

    fn insert(&self, token: String, claims: Claims, expires_at: i64, now: i64);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct Entry {
    claims: Claims,
    expires_at: i64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    // (expires_at, token): the first element is always the next entry to expire.
    by_expiry: BTreeSet<(i64, String)>,
}

impl Inner {
    fn remove(&mut self, token: &str) {
        if let Some(old) = self.entries.remove(token) {
            self.by_expiry.remove(&(old.expires_at, token.to_string()));
        }
    }

    fn purge_expired(&mut self, now: i64) -> usize {
        let mut purged = 0;
        while let Some((expires_at, _)) = self.by_expiry.first() {
            if *expires_at > now {
                break;
            }
            if let Some((_, token)) = self.by_expiry.pop_first() {
                self.entries.remove(&token);
                purged += 1;
            }
        }
        purged
    }

    fn evict_earliest(&mut self) {
        if let Some((_, token)) = self.by_expiry.pop_first() {
            self.entries.remove(&token);
        }
    }
}

/// In-process cache with a hard capacity.
///
/// Expired entries are purged on insert; when still full, the entry closest to
/// expiry is evicted. A capacity of 0 disables caching.
#[derive(Debug)]
pub struct BoundedClaimCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl BoundedClaimCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // poisoned: worst case a token gets verified again
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ClaimCache for BoundedClaimCache {
    fn get(&self, token: &str, now: i64) -> Option<Claims> {
        let mut inner = self.lock();

        let stale = match inner.entries.get(token) {
            Some(entry) if entry.expires_at > now => return Some(entry.claims.clone()),
            Some(_) => true,
            None => false,
        };

        if stale {
            inner.remove(token);
        }
        None
    }

    fn insert(&self, token: String, claims: Claims, expires_at: i64, now: i64) {
        if self.capacity == 0 || expires_at <= now {
            return;
        }

        let mut inner = self.lock();
        inner.remove(&token);

        let purged = inner.purge_expired(now);
        if purged > 0 {
            tracing::debug!(purged, "purged expired claim cache entries");
        }

        while inner.entries.len() >= self.capacity {
            inner.evict_earliest();
        }

        inner.by_expiry.insert((expires_at, token.clone()));
        inner.entries.insert(token, Entry { claims, expires_at });
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::role::Role;

    fn claims(id: &str) -> Claims {
        Claims {
            id: id.to_string(),
            username: format!("user-{id}"),
            role: Role::Employee,
            exp: None,
        }
    }

    #[test]
    fn hit_before_expiry_miss_at_expiry() {
        let cache = BoundedClaimCache::new(8);
        cache.insert("t1".into(), claims("E1"), 100, 0);

        assert_eq!(cache.get("t1", 99), Some(claims("E1")));
        // expiry must be strictly greater than now
        assert_eq!(cache.get("t1", 100), None);
        assert!(cache.is_empty(), "stale entry is dropped on lookup");
    }

    #[test]
    fn already_expired_entries_are_not_stored() {
        let cache = BoundedClaimCache::new(8);
        cache.insert("t1".into(), claims("E1"), 50, 50);
        assert!(cache.is_empty());
    }

    #[test]
    fn reinsert_replaces_expiry() {
        let cache = BoundedClaimCache::new(8);
        cache.insert("t1".into(), claims("E1"), 100, 0);
        cache.insert("t1".into(), claims("E1"), 300, 0);

        assert_eq!(cache.len(), 1);
        assert!(cache.get("t1", 200).is_some());
    }

    #[test]
    fn full_cache_evicts_entry_closest_to_expiry() {
        let cache = BoundedClaimCache::new(2);
        cache.insert("late".into(), claims("E1"), 500, 0);
        cache.insert("soon".into(), claims("E2"), 100, 0);
        cache.insert("new".into(), claims("E3"), 300, 0);

        assert_eq!(cache.len(), 2);
        assert!(cache.get("soon", 0).is_none());
        assert!(cache.get("late", 0).is_some());
        assert!(cache.get("new", 0).is_some());
    }

    #[test]
    fn insert_purges_expired_before_evicting_live_entries() {
        let cache = BoundedClaimCache::new(2);
        cache.insert("a".into(), claims("E1"), 10, 0);
        cache.insert("b".into(), claims("E2"), 1_000, 0);

        // At t=20, "a" is dead: it should be the one to go, not "b".
        cache.insert("c".into(), claims("E3"), 2_000, 20);

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b", 20).is_some());
        assert!(cache.get("c", 20).is_some());
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = BoundedClaimCache::new(0);
        cache.insert("t1".into(), claims("E1"), 100, 0);
        assert!(cache.get("t1", 0).is_none());
    }

    #[test]
    fn concurrent_inserts_respect_capacity() {
        use std::sync::Arc;

        let cache = Arc::new(BoundedClaimCache::new(16));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let token = format!("tok-{t}-{i}");
                        cache.insert(token.clone(), claims("E1"), 1_000 + i, 0);
                        let _ = cache.get(&token, 0);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert!(cache.len() <= 16);
    }
}
