// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! LRU caches for GraphQL read results.
//!
//! Each signed-in session gets its own [`ResponseCache`], looked up in
//! [`SessionCaches`] by a SHA-256 digest of the bearer token, so cached data
//! never crosses identities and raw tokens are never kept as keys.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Default number of cached operations per session.
pub const DEFAULT_ENTRIES_PER_SESSION: usize = 128;

/// Default number of sessions with a live cache.
pub const DEFAULT_SESSION_CAPACITY: usize = 256;

/// Default freshness window of a cached result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

/// Cached entry: response `data` + insertion timestamp.
struct CacheEntry {
    data: Value,
    inserted_at: Instant,
}

/// Per-session cache of GraphQL `data` payloads keyed by operation and variables.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(non_zero(capacity))),
            ttl,
        }
    }

    /// Cache key for an operation invocation.
    pub fn key(operation: &str, variables: &Value) -> String {
        format!("{operation}:{variables}")
    }

    /// Returns `None` if not cached or expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().ok()?;
        if let Some(entry) = entries.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.data.clone());
            }
            entries.pop(key);
        }
        None
    }

    pub fn put(&self, key: String, data: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(
                key,
                CacheEntry {
                    data,
                    inserted_at: Instant::now(),
                },
            );
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES_PER_SESSION, DEFAULT_TTL)
    }
}

/// Registry of per-session response caches.
pub struct SessionCaches {
    sessions: Mutex<LruCache<String, Arc<ResponseCache>>>,
    entries_per_session: usize,
    ttl: Duration,
}

impl SessionCaches {
    pub fn new(session_capacity: usize, entries_per_session: usize, ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(non_zero(session_capacity))),
            entries_per_session,
            ttl,
        }
    }

    fn fresh(&self) -> Arc<ResponseCache> {
        Arc::new(ResponseCache::new(self.entries_per_session, self.ttl))
    }

    /// Cache for the session holding `token`.
    ///
    /// Anonymous callers get a throwaway cache that is never shared.
    pub fn for_token(&self, token: Option<&str>) -> Arc<ResponseCache> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return self.fresh();
        };
        let key = format!("{:x}", Sha256::digest(token.as_bytes()));

        match self.sessions.lock() {
            Ok(mut sessions) => {
                if let Some(cache) = sessions.get(&key) {
                    return Arc::clone(cache);
                }
                let cache = self.fresh();
                sessions.put(key, Arc::clone(&cache));
                cache
            }
            Err(_) => self.fresh(),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for SessionCaches {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY, DEFAULT_ENTRIES_PER_SESSION, DEFAULT_TTL)
    }
}
