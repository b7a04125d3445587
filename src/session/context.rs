// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request session context and the middleware that establishes it.
//!
//! A [`Session`] bundles the request's cookie store, its [`AuthState`] and
//! the gateway client built on top of both. Protected routes go through
//! [`require_session`], which runs the bootstrap and hands the verified
//! session to handlers through the [`CurrentSession`] extractor.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use url::form_urlencoded;

use super::auth::AuthState;
use super::bootstrap::bootstrap;
use super::guard::SIGN_IN_PATH;
use super::store::CookieStore;
use crate::error::ApiError;
use crate::gateway::GatewayClient;
use crate::state::AppState;

/// Everything a handler needs to act on behalf of the signed-in admin.
pub struct Session {
    auth: AuthState,
    store: Arc<CookieStore>,
}

impl Session {
    pub fn new(auth: AuthState, store: Arc<CookieStore>) -> Self {
        Self { auth, store }
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn gateway(&self) -> &GatewayClient {
        self.auth.gateway()
    }

    pub fn store(&self) -> &CookieStore {
        &self.store
    }

    /// Flush credential writes made during the exchange onto `headers`.
    pub fn write_cookies(&self, headers: &mut HeaderMap) {
        self.store.write_headers(headers);
    }
}

/// Middleware for protected routes.
///
/// Runs the session bootstrap against the request cookies. Unauthenticated
/// requests are redirected to sign-in with whatever cookie removals the
/// bootstrap queued.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = Arc::new(state.open_session(request.headers()));
    let outcome = bootstrap(session.auth(), Utc::now()).await;

    let mut response = if outcome.is_authenticated() {
        request.extensions_mut().insert(session.clone());
        next.run(request).await
    } else {
        let location = redirect_location(outcome.redirect().unwrap_or(SIGN_IN_PATH), outcome.notice);
        tracing::debug!(
            path = %request.uri().path(),
            state = ?outcome.state,
            %location,
            "Session not established, redirecting"
        );
        Redirect::temporary(&location).into_response()
    };

    session.write_cookies(response.headers_mut());
    response
}

/// `path`, with the bootstrap notice as a `notice` query parameter.
fn redirect_location(path: &str, notice: Option<&str>) -> String {
    match notice {
        Some(notice) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("notice", notice)
                .finish();
            format!("{path}?{query}")
        }
        None => path.to_string(),
    }
}

/// Extractor for the session established by [`require_session`].
///
/// ```rust,ignore
/// async fn handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
///     session.auth().user()
/// }
/// ```
pub struct CurrentSession(pub Arc<Session>);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Arc<Session>>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| ApiError::unauthorized("Not signed in"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::session::store::{CredentialStore, AUTH_TOKEN_KEY};
    use crate::session::token::tests::token_expiring_at;
    use axum::{body::Body, http::{header, StatusCode}, routing::get, Router};
    use chrono::Duration;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(state: AppState) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|CurrentSession(session): CurrentSession| async move {
                    session.auth().user().map(|u| u.id).unwrap_or_default()
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_session))
            .with_state(state)
    }

    fn state_for(server: &MockServer) -> AppState {
        let config = Config::for_environment(Environment::Development)
            .unwrap()
            .with_api_url(&server.uri())
            .unwrap();
        AppState::new(config)
    }

    fn request(cookie: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri("/whoami")
            .header(header::HOST, "admin.tanscrow.com")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn verified_session_reaches_handler() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "me": { "id": "admin_1", "firstName": "Tolu", "lastName": "Ade" } }
            })))
            .mount(&server)
            .await;

        let token = token_expiring_at((Utc::now() + Duration::hours(1)).timestamp());
        let response = app(state_for(&server))
            .oneshot(request(&format!("{AUTH_TOKEN_KEY}={token}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot_written = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .any(|v| v.to_str().unwrap().starts_with("tanscrow-admin-auth="));
        assert!(snapshot_written);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"admin_1");
    }

    #[tokio::test]
    async fn expired_token_redirects_and_clears_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let token = token_expiring_at((Utc::now() - Duration::minutes(5)).timestamp());
        let response = app(state_for(&server))
            .oneshot(request(&format!("{AUTH_TOKEN_KEY}={token}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/signin?notice=Session+expired.+Please+sign+in+again."
        );
        let removals = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter(|v| v.to_str().unwrap().starts_with("authToken=;"))
            .count();
        assert_eq!(removals, 3);
    }

    #[tokio::test]
    async fn extractor_rejects_without_middleware() {
        let router: Router = Router::new().route(
            "/whoami",
            get(|CurrentSession(_): CurrentSession| async { "unreachable" }),
        );
        let response = router
            .oneshot(axum::http::Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_token_redirects_without_notice() {
        let server = MockServer::start().await;
        let response = app(state_for(&server))
            .oneshot(request("theme=dark"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], SIGN_IN_PATH);
    }

    #[test]
    fn session_exposes_store_reads() {
        let state = AppState::new(Config::for_environment(Environment::Development).unwrap());
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "authToken=abc".parse().unwrap());
        let session = state.open_session(&headers);
        assert_eq!(session.store().get(AUTH_TOKEN_KEY).as_deref(), Some("abc"));
    }
}
