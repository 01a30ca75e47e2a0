//! Revoked-token registry
//!
//! JWTs are stateless, so logout records the token's `jti` here until the
//! token would have expired anyway. Entries past their expiry are dropped
//! lazily on lookup and in bulk on every revocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

pub struct TokenStore {
    /// Revoked token IDs and the instant each token expires
    revoked: DashMap<String, DateTime<Utc>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self {
            revoked: DashMap::new(),
        }
    }

    /// Revoke a token until `expires_at`
    pub fn revoke(&self, jti: impl Into<String>, expires_at: DateTime<Utc>) {
        let jti = jti.into();
        debug!(jti = %jti, "Token revoked");
        self.revoked.insert(jti, expires_at);
        self.purge_expired();
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        let now = Utc::now();
        // Expiry check and removal happen under one shard lock
        if self
            .revoked
            .remove_if(jti, |_, expires_at| *expires_at <= now)
            .is_some()
        {
            return false;
        }
        self.revoked.contains_key(jti)
    }

    /// Drop entries whose token has expired. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;
        self.revoked.retain(|_, expires_at| {
            let keep = *expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe token store
pub type SharedTokenStore = Arc<TokenStore>;

pub fn create_token_store() -> SharedTokenStore {
    Arc::new(TokenStore::new())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn revoked_until_expiry() {
        let store = TokenStore::new();
        store.revoke("abc", Utc::now() + Duration::hours(1));

        assert!(store.is_revoked("abc"));
        assert!(!store.is_revoked("other"));
    }

    #[test]
    fn expired_entries_are_forgotten() {
        let store = TokenStore::new();
        store.revoked.insert("old".into(), Utc::now() - Duration::seconds(1));
        assert_eq!(store.len(), 1);

        assert!(!store.is_revoked("old"));
        assert!(store.is_empty());
    }

    #[test]
    fn revoke_purges_stale_entries() {
        let store = TokenStore::new();
        store.revoked.insert("stale-1".into(), Utc::now() - Duration::minutes(5));
        store.revoked.insert("stale-2".into(), Utc::now() - Duration::minutes(1));

        store.revoke("fresh", Utc::now() + Duration::minutes(10));
        assert_eq!(store.len(), 1);
        assert!(store.is_revoked("fresh"));
    }

    #[test]
    fn purge_reports_removed_count() {
        let store = TokenStore::new();
        store.revoked.insert("stale".into(), Utc::now() - Duration::minutes(1));
        store.revoked.insert("live".into(), Utc::now() + Duration::minutes(1));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.purge_expired(), 0);
        assert!(store.is_revoked("live"));
    }

    #[test]
    fn concurrent_revocations_and_lookups() {
        let store = create_token_store();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let jti = format!("{t}-{i}");
                        if i % 2 == 0 {
                            store.revoke(jti.clone(), Utc::now() + Duration::hours(1));
                            assert!(store.is_revoked(&jti));
                        } else {
                            store.revoke(jti.clone(), Utc::now() - Duration::seconds(1));
                            assert!(!store.is_revoked(&jti));
                        }
                        store.purge_expired();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 8 * 100);
    }
}
