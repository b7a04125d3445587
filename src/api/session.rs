// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-in, sign-out and the current admin.
//!
//! Sign-in and sign-out build a session straight from the request cookies
//! instead of going through the session middleware, so both work with a
//! stale or expired credential. Every response carries the cookie writes
//! queued during the exchange.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    models::UserSummary,
    screens::signin::{self, Credentials},
    session::{CurrentSession, HOME_PATH, SIGN_IN_PATH},
    state::AppState,
};

/// What the sign-in screen submits and where.
#[derive(Debug, Serialize, ToSchema)]
pub struct SignInForm {
    pub action: String,
    pub fields: Vec<String>,
    /// Why the admin was sent back here, e.g. an expired session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SignInQuery {
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: Option<UserSummary>,
    pub is_authenticated: bool,
}

#[utoipa::path(
    get,
    path = "/signin",
    params(SignInQuery),
    tag = "Session",
    responses((status = 200, body = SignInForm))
)]
pub async fn sign_in_form(Query(params): Query<SignInQuery>) -> Json<SignInForm> {
    Json(SignInForm {
        action: SIGN_IN_PATH.to_string(),
        fields: vec!["email".to_string(), "password".to_string()],
        notice: params.notice.filter(|n| !n.trim().is_empty()),
    })
}

#[utoipa::path(
    post,
    path = "/signin",
    request_body = Credentials,
    tag = "Session",
    responses(
        (status = 303, description = "Signed in, continue to the dashboard"),
        (status = 400, description = "Missing email or password"),
        (status = 502, description = "Backend rejected the credentials")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(credentials): Json<Credentials>,
) -> Response {
    let session = state.open_session(&headers);
    let mut response = match signin::sign_in(session.auth(), credentials).await {
        Ok(_) => Redirect::to(HOME_PATH).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    };
    session.write_cookies(response.headers_mut());
    response
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Session",
    responses((status = 303, description = "Signed out, continue to sign-in"))
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.open_session(&headers);
    session.auth().logout();

    let mut response = Redirect::to(SIGN_IN_PATH).into_response();
    session.write_cookies(response.headers_mut());
    response
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "Session",
    responses((status = 200, body = SessionView))
)]
pub async fn current_session(CurrentSession(session): CurrentSession) -> Json<SessionView> {
    let auth = session.auth();
    Json(SessionView {
        user: auth.user(),
        is_authenticated: auth.is_authenticated(),
    })
}
