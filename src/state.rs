// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::config::Config;
use crate::gateway::{GatewayClient, SessionCaches};
use crate::session::{AuthState, CookieStore, CredentialStore, Session, AUTH_TOKEN_KEY};

/// Process-wide state shared by every request.
///
/// Holds nothing session-specific: each request builds its own [`Session`]
/// from its cookies through [`AppState::open_session`].
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    http: reqwest::Client,
    caches: Arc<SessionCaches>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            caches: Arc::new(SessionCaches::default()),
        }
    }

    /// Build the session for one request from its headers.
    ///
    /// The response cache is chosen by the raw token cookie, so two admins
    /// never share cached reads.
    pub fn open_session(&self, headers: &HeaderMap) -> Session {
        let store = Arc::new(CookieStore::from_headers(
            headers,
            self.config.secure_cookies(),
            self.config.public_host.as_deref(),
        ));
        let cache = self.caches.for_token(store.get(AUTH_TOKEN_KEY).as_deref());
        let gateway = GatewayClient::new(
            self.config.api_url.clone(),
            self.http.clone(),
            store.clone(),
            cache,
        );
        let auth = AuthState::rehydrate(store.clone(), gateway);
        Session::new(auth, store)
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn session_caches(&self) -> &SessionCaches {
        &self.caches
    }
}
