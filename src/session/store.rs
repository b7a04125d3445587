// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persisted credential storage.
//!
//! [`CredentialStore`] is a plain string key/value interface. The serializer
//! for the auth snapshot lives in `snapshot.rs` and only talks to this trait,
//! so the storage medium can change without touching serialization.
//!
//! ## Cookie attributes
//!
//! Every `set` forces `Max-Age` of two days, `SameSite=Strict`, `Path=/` and
//! `Secure` when the store was built for production, whatever the caller
//! passed in [`CookieOptions`].
//!
//! ## Removal scopes
//!
//! A cookie set with a `Domain` attribute survives a domain-less removal.
//! [`CredentialStore::purge`] therefore emits removals for the bare path, the
//! request hostname and the parent domain.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::http::{header, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

/// Cookie holding the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Lifetime of every credential cookie.
pub const CREDENTIAL_MAX_AGE: Duration = Duration::days(2);

/// Caller-supplied cookie attributes. Expiry, SameSite, Secure and Path are
/// always overridden by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub http_only: bool,
    pub domain: Option<String>,
}

impl CookieOptions {
    pub fn http_only() -> Self {
        Self {
            http_only: true,
            ..Self::default()
        }
    }
}

/// String key/value store for credentials.
///
/// Reads never fail: an unavailable or unreadable medium yields `None`.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str, options: CookieOptions);

    /// Remove `key` for `Path=/`.
    fn remove(&self, key: &str);

    /// Remove `key` under every scope it may have been written with.
    fn purge(&self, key: &str) {
        self.remove(key);
    }
}

/// Domains a credential cookie may have been scoped to, for `hostname`.
///
/// Mirrors the browser cases: the exact host and the parent formed by its
/// last two labels, with a leading dot.
pub fn removal_domains(hostname: &str) -> Vec<String> {
    let labels: Vec<&str> = hostname.split('.').collect();
    let parent = labels[labels.len().saturating_sub(2)..].join(".");
    vec![hostname.to_string(), format!(".{parent}")]
}

fn removal_cookie(key: &str, domain: Option<&str>) -> Cookie<'static> {
    let mut builder = Cookie::build((key.to_string(), ""))
        .path("/")
        .expires(OffsetDateTime::UNIX_EPOCH)
        .max_age(Duration::ZERO);
    if let Some(domain) = domain {
        builder = builder.domain(domain.to_string());
    }
    builder.build()
}

#[derive(Default)]
struct CookieState {
    values: HashMap<String, String>,
    outgoing: Vec<Cookie<'static>>,
}

/// Cookie-backed store for one request/response exchange.
///
/// Reads come from the request's `Cookie` header and reflect writes made
/// since. Writes are queued as `Set-Cookie` headers for the response.
pub struct CookieStore {
    hostname: Option<String>,
    secure: bool,
    state: Mutex<CookieState>,
}

impl CookieStore {
    /// Empty store for `hostname`.
    pub fn new(hostname: Option<&str>, secure: bool) -> Self {
        Self {
            hostname: hostname.map(str::to_string),
            secure,
            state: Mutex::new(CookieState::default()),
        }
    }

    /// Store seeded from request headers. The hostname comes from `Host`
    /// (port stripped), falling back to `fallback_host`.
    pub fn from_headers(headers: &HeaderMap, secure: bool, fallback_host: Option<&str>) -> Self {
        let hostname = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(strip_port)
            .filter(|h| !h.is_empty())
            .or(fallback_host);

        let store = Self::new(hostname, secure);
        let jar = CookieJar::from_headers(headers);
        if let Ok(mut state) = store.state.lock() {
            for cookie in jar.iter() {
                state
                    .values
                    .insert(cookie.name().to_string(), cookie.value().to_string());
            }
        }
        store
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Cookies queued for the response, in write order.
    pub fn pending(&self) -> Vec<Cookie<'static>> {
        self.state
            .lock()
            .map(|s| s.outgoing.clone())
            .unwrap_or_default()
    }

    /// Append every queued cookie to `headers` as `Set-Cookie`.
    ///
    /// Values are percent-encoded, matching how `CookieJar` decodes them on
    /// the next request. A cookie rewritten later in the exchange for the
    /// same name and domain is only emitted once, with its last value.
    pub fn write_headers(&self, headers: &mut HeaderMap) {
        let pending = self.pending();
        for (i, cookie) in pending.iter().enumerate() {
            let superseded = pending[i + 1..]
                .iter()
                .any(|later| later.name() == cookie.name() && later.domain() == cookie.domain());
            if superseded {
                continue;
            }
            match HeaderValue::from_str(&cookie.encoded().to_string()) {
                Ok(value) => {
                    headers.append(header::SET_COOKIE, value);
                }
                Err(e) => {
                    tracing::warn!(cookie = cookie.name(), error = %e, "Dropping unencodable cookie");
                }
            }
        }
    }

    fn queue_removal(&self, key: &str, domains: &[Option<&str>]) {
        if let Ok(mut state) = self.state.lock() {
            state.values.remove(key);
            for domain in domains {
                state.outgoing.push(removal_cookie(key, *domain));
            }
        }
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons.
    if let Some(end) = host.strip_prefix('[').and_then(|h| h.find(']')) {
        return &host[..end + 2];
    }
    host.split(':').next().unwrap_or(host)
}

impl CredentialStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        let state = self.state.lock().ok()?;
        state.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&self, key: &str, value: &str, options: CookieOptions) {
        let mut builder = Cookie::build((key.to_string(), value.to_string()))
            .max_age(CREDENTIAL_MAX_AGE)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .path("/")
            .http_only(options.http_only);
        if let Some(domain) = options.domain {
            builder = builder.domain(domain);
        }

        match self.state.lock() {
            Ok(mut state) => {
                state.values.insert(key.to_string(), value.to_string());
                state.outgoing.push(builder.build());
            }
            Err(_) => tracing::error!(key, "Cookie store lock poisoned, credential not written"),
        }
    }

    fn remove(&self, key: &str) {
        self.queue_removal(key, &[None]);
    }

    fn purge(&self, key: &str) {
        let domains = self
            .hostname
            .as_deref()
            .map(removal_domains)
            .unwrap_or_default();
        let mut scopes: Vec<Option<&str>> = vec![None];
        scopes.extend(domains.iter().map(|d| Some(d.as_str())));
        self.queue_removal(key, &scopes);
    }
}

/// In-memory store. Used where no cookie medium exists, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().map(|v| v.is_empty()).unwrap_or(true)
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str, _options: CookieOptions) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}
