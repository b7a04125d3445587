// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory auth state with automatic persistence.
//!
//! Every mutator writes the persisted fields (`user`, `token`,
//! `isAuthenticated`) back through the snapshot codec. `loading` and `error`
//! stay in memory.
//!
//! [`AuthState::logout`] is the only way to tear a session down. It resets
//! the fields, purges both credential cookies under every domain scope and
//! empties the gateway cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::snapshot::{Credential, SnapshotCodec, SNAPSHOT_KEY};
use super::store::{CredentialStore, AUTH_TOKEN_KEY};
use crate::gateway::GatewayClient;
use crate::models::UserSummary;

/// Every key logout must clear.
pub const PERSISTED_KEYS: [&str; 2] = [AUTH_TOKEN_KEY, SNAPSHOT_KEY];

#[derive(Debug, Clone, Default, PartialEq)]
struct AuthFields {
    user: Option<UserSummary>,
    token: Option<String>,
    is_authenticated: bool,
    loading: bool,
    error: Option<String>,
}

impl AuthFields {
    fn credential(&self) -> Credential {
        Credential {
            user: self.user.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }
}

/// Auth state for one session, passed explicitly to whoever needs identity.
pub struct AuthState {
    store: Arc<dyn CredentialStore>,
    gateway: GatewayClient,
    fields: RwLock<AuthFields>,
    generation: AtomicU64,
}

impl AuthState {
    /// Empty state. Nothing is read from the store.
    pub fn new(store: Arc<dyn CredentialStore>, gateway: GatewayClient) -> Self {
        Self {
            store,
            gateway,
            fields: RwLock::new(AuthFields::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// State rehydrated from the persisted snapshot, if one exists.
    pub fn rehydrate(store: Arc<dyn CredentialStore>, gateway: GatewayClient) -> Self {
        let state = Self::new(store, gateway);
        if let Some(credential) = SnapshotCodec::new(state.store.as_ref()).load() {
            let mut fields = state.write();
            fields.user = credential.user;
            fields.token = credential.token;
            fields.is_authenticated = credential.is_authenticated;
        }
        state
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthFields> {
        self.fields.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthFields> {
        self.fields.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` and persist the result.
    fn update(&self, change: impl FnOnce(&mut AuthFields)) {
        let credential = {
            let mut fields = self.write();
            change(&mut fields);
            fields.credential()
        };
        SnapshotCodec::new(self.store.as_ref()).save(&credential);
    }

    pub fn user(&self) -> Option<UserSummary> {
        self.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    pub fn loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// The persisted view of the state.
    pub fn credential(&self) -> Credential {
        self.read().credential()
    }

    /// Raw token currently held by the credential store.
    pub fn stored_token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }

    /// The credential store this state persists into.
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// Incremented by every logout.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Replace the user wholesale.
    pub fn set_user(&self, user: Option<UserSummary>) {
        self.update(|f| f.user = user);
    }

    pub fn set_token(&self, token: Option<String>) {
        self.update(|f| f.token = token);
    }

    pub fn set_is_authenticated(&self, is_authenticated: bool) {
        self.update(|f| f.is_authenticated = is_authenticated);
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|f| f.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.update(|f| f.error = error);
    }

    /// Tear the session down. Safe to call any number of times.
    pub fn logout(&self) {
        let was_signed_in = {
            let mut fields = self.write();
            let active = fields.token.is_some() || fields.user.is_some() || fields.is_authenticated;
            *fields = AuthFields::default();
            active
        };

        for key in PERSISTED_KEYS {
            self.store.purge(key);
        }
        self.gateway.reset_cache();
        self.generation.fetch_add(1, Ordering::SeqCst);

        if was_signed_in {
            tracing::info!("Admin session cleared");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gateway::ResponseCache;
    use crate::session::store::{CookieOptions, CookieStore, MemoryStore};
    use serde_json::json;
    use url::Url;

    pub(crate) fn offline_gateway(store: Arc<dyn CredentialStore>) -> GatewayClient {
        GatewayClient::new(
            Url::parse("http://127.0.0.1:9/graphql").unwrap(),
            reqwest::Client::new(),
            store,
            Arc::new(ResponseCache::default()),
        )
    }

    fn sample_user() -> UserSummary {
        UserSummary {
            id: "admin_1".into(),
            email: Some("ops@tanscrow.com".into()),
            first_name: "Tolu".into(),
            last_name: "Ade".into(),
            verified: true,
            ..Default::default()
        }
    }

    fn memory_state() -> (Arc<MemoryStore>, AuthState) {
        let store = Arc::new(MemoryStore::new());
        let state = AuthState::new(store.clone(), offline_gateway(store.clone()));
        (store, state)
    }

    #[test]
    fn starts_empty() {
        let (_, state) = memory_state();
        assert_eq!(state.credential(), Credential::default());
        assert!(!state.loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn mutators_persist_snapshot() {
        let (store, state) = memory_state();
        state.set_token(Some("tok".into()));
        state.set_user(Some(sample_user()));
        state.set_is_authenticated(true);

        let persisted = SnapshotCodec::new(store.as_ref()).load().unwrap();
        assert_eq!(persisted.token.as_deref(), Some("tok"));
        assert_eq!(persisted.user, Some(sample_user()));
        assert!(persisted.is_authenticated);
    }

    #[test]
    fn transient_fields_are_not_persisted() {
        let (store, state) = memory_state();
        state.set_loading(true);
        state.set_error(Some("boom".into()));

        let raw: serde_json::Value =
            serde_json::from_str(&store.get(SNAPSHOT_KEY).unwrap()).unwrap();
        assert_eq!(raw, json!({ "user": null, "token": null, "isAuthenticated": false }));
        assert!(state.loading());
    }

    #[test]
    fn rehydrates_from_snapshot() {
        let (store, state) = memory_state();
        state.set_user(Some(sample_user()));
        state.set_token(Some("tok".into()));

        let again = AuthState::rehydrate(store.clone(), offline_gateway(store.clone()));
        assert_eq!(again.user(), Some(sample_user()));
        assert_eq!(again.token().as_deref(), Some("tok"));
    }

    #[test]
    fn logout_resets_fields_and_store() {
        let (store, state) = memory_state();
        store.set(AUTH_TOKEN_KEY, "tok", CookieOptions::default());
        state.set_token(Some("tok".into()));
        state.set_user(Some(sample_user()));
        state.set_is_authenticated(true);
        state.gateway().cache().put("k".into(), json!(1));

        state.logout();

        assert_eq!(state.credential(), Credential::default());
        assert!(!state.loading());
        assert!(state.error().is_none());
        assert!(store.is_empty());
        assert!(state.gateway().cache().is_empty());
    }

    #[test]
    fn double_logout_is_a_noop() {
        let (store, state) = memory_state();
        state.set_token(Some("tok".into()));
        state.logout();
        state.logout();

        assert_eq!(state.credential(), Credential::default());
        assert!(store.is_empty());
        assert_eq!(state.generation(), 2);
    }

    #[test]
    fn logout_purges_cookies_across_domain_scopes() {
        let store = Arc::new(CookieStore::new(Some("admin.tanscrow.com"), true));
        let state = AuthState::new(store.clone(), offline_gateway(store.clone()));
        store.set(AUTH_TOKEN_KEY, "tok", CookieOptions::default());
        state.set_token(Some("tok".into()));

        state.logout();

        for key in PERSISTED_KEYS {
            assert!(store.get(key).is_none());
            let scopes: Vec<Option<String>> = store
                .pending()
                .iter()
                .filter(|c| c.name() == key && c.value().is_empty())
                .map(|c| c.domain().map(|d| d.trim_start_matches('.').to_string()))
                .collect();
            assert!(scopes.contains(&None), "{key} path scope");
            assert!(scopes.contains(&Some("admin.tanscrow.com".into())), "{key} host scope");
            assert!(scopes.contains(&Some("tanscrow.com".into())), "{key} parent scope");
        }
    }
}
