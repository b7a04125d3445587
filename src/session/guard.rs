// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Edge route guard.
//!
//! Runs before any handler and only looks at whether the raw `authToken`
//! cookie is present. It never decodes the token or touches the network;
//! expiry and identity are checked later by the session bootstrap.
//!
//! | Path | Token | Decision |
//! |------|-------|----------|
//! | sign-in | absent | `Allow` |
//! | sign-in | present | `RedirectToHome` |
//! | other | present | `Allow` |
//! | other | absent | `RedirectToSignIn` |

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::store::AUTH_TOKEN_KEY;

/// The only public navigation path.
pub const SIGN_IN_PATH: &str = "/signin";

pub const HOME_PATH: &str = "/";

/// Path prefixes the guard never evaluates: static assets, health probes and
/// API documentation.
pub const UNGUARDED_PREFIXES: &[&str] = &[
    "/api",
    "/static",
    "/assets",
    "/favicon.ico",
    "/health",
    "/docs",
    "/api-doc",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToSignIn,
    RedirectToHome,
}

impl Decision {
    pub fn location(self) -> Option<&'static str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectToSignIn => Some(SIGN_IN_PATH),
            Decision::RedirectToHome => Some(HOME_PATH),
        }
    }
}

/// Decide a navigation from the path and the raw token. Empty tokens count
/// as absent.
pub fn decide(path: &str, token: Option<&str>) -> Decision {
    let is_public = path == SIGN_IN_PATH;
    let has_token = token.is_some_and(|t| !t.is_empty());

    match (is_public, has_token) {
        (true, false) | (false, true) => Decision::Allow,
        (false, false) => Decision::RedirectToSignIn,
        (true, true) => Decision::RedirectToHome,
    }
}

/// Whether the guard evaluates `path` at all.
pub fn is_guarded(path: &str) -> bool {
    !UNGUARDED_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Axum middleware applying [`decide`] to every guarded request.
pub async fn route_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !is_guarded(&path) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let token = jar.get(AUTH_TOKEN_KEY).map(|c| c.value());

    match decide(&path, token).location() {
        None => next.run(request).await,
        Some(location) => {
            tracing::debug!(%path, location, "Route guard redirect");
            Redirect::temporary(location).into_response()
        }
    }
}
