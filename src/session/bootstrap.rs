// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session bootstrap: re-establish identity from persisted credentials.
//!
//! ```text
//! NoToken       -> LoggedOut
//! TokenExpired  -> LoggedOut (redirect to sign-in, no network call)
//! TokenValid    -> Verifying (one network-only `me` query)
//! Verifying     -> Authenticated | LoggedOut (redirect to sign-in)
//! ```
//!
//! Every failure goes through [`AuthState::logout`]. A fetch that completes
//! after a logout it did not cause is discarded.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::auth::AuthState;
use super::guard::SIGN_IN_PATH;
use super::token;
use crate::gateway::Operation;
use crate::models::UserSummary;

/// Message shown when a stored session can no longer be used.
pub const SESSION_EXPIRED_NOTICE: &str = "Session expired. Please sign in again.";

pub const ME: Operation = Operation {
    name: "Me",
    document: r#"query Me {
  me {
    id
    email
    firstName
    lastName
    phoneNumber
    profileImageUrl
    accountType
    verified
    createdAt
  }
}"#,
};

#[derive(Debug, Deserialize)]
struct MeData {
    me: UserSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    NoToken,
    TokenExpired,
    TokenValid,
    Verifying,
    Authenticated,
    LoggedOut { redirect: Option<&'static str> },
}

impl BootState {
    pub fn is_terminal(self) -> bool {
        matches!(self, BootState::Authenticated | BootState::LoggedOut { .. })
    }
}

/// Where a bootstrap run ended and how it got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootOutcome {
    pub state: BootState,
    /// Every state visited, terminal state last.
    pub trace: Vec<BootState>,
    /// Whether an identity fetch was issued.
    pub fetched: bool,
    pub notice: Option<&'static str>,
}

impl BootOutcome {
    pub fn is_authenticated(&self) -> bool {
        self.state == BootState::Authenticated
    }

    pub fn redirect(&self) -> Option<&'static str> {
        match self.state {
            BootState::LoggedOut { redirect } => redirect,
            _ => None,
        }
    }
}

struct Run {
    trace: Vec<BootState>,
    fetched: bool,
}

impl Run {
    fn enter(&mut self, state: BootState) {
        tracing::debug!(?state, "Session bootstrap transition");
        self.trace.push(state);
    }

    fn finish(mut self, state: BootState, notice: Option<&'static str>) -> BootOutcome {
        self.enter(state);
        BootOutcome {
            state,
            trace: self.trace,
            fetched: self.fetched,
            notice,
        }
    }
}

/// Run the bootstrap state machine against the stored token at `now`.
pub async fn bootstrap(auth: &AuthState, now: DateTime<Utc>) -> BootOutcome {
    let mut run = Run {
        trace: Vec::with_capacity(4),
        fetched: false,
    };

    let Some(token) = auth.stored_token() else {
        run.enter(BootState::NoToken);
        auth.logout();
        return run.finish(BootState::LoggedOut { redirect: None }, None);
    };

    if token::is_expired_at(&token, now) {
        run.enter(BootState::TokenExpired);
        tracing::info!(expired_at = ?token::expires_at(&token), "Stored admin token expired");
        auth.logout();
        return run.finish(
            BootState::LoggedOut {
                redirect: Some(SIGN_IN_PATH),
            },
            Some(SESSION_EXPIRED_NOTICE),
        );
    }

    run.enter(BootState::TokenValid);
    run.enter(BootState::Verifying);
    let generation = auth.generation();
    auth.set_loading(true);
    run.fetched = true;

    let result = auth.gateway().query::<MeData>(&ME, serde_json::json!({})).await;
    auth.set_loading(false);

    if auth.generation() != generation {
        tracing::debug!("Discarding identity fetch that outlived its session");
        return run.finish(BootState::LoggedOut { redirect: None }, None);
    }

    match result {
        Ok(MeData { me }) => {
            tracing::debug!(user_id = %me.id, "Admin identity verified");
            auth.set_token(Some(token));
            auth.set_user(Some(me));
            auth.set_is_authenticated(true);
            run.finish(BootState::Authenticated, None)
        }
        Err(e) => {
            tracing::warn!(error = %e, unauthorized = e.is_unauthorized(), "Identity fetch failed, signing out");
            auth.logout();
            run.finish(
                BootState::LoggedOut {
                    redirect: Some(SIGN_IN_PATH),
                },
                Some(SESSION_EXPIRED_NOTICE),
            )
        }
    }
}
