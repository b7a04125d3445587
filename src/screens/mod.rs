// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Admin Screens
//!
//! One module per console screen. Each owns its GraphQL documents, filter
//! inputs and the read/write operations the HTTP layer exposes.
//!
//! Reads go through [`GatewayClient::watch_query`](crate::gateway::GatewayClient::watch_query)
//! and never fail: a backend error comes back as a `notice` beside the last
//! cached rows. Writes go through [`mutate`], which surfaces the backend
//! message and signs the session out when the backend rejects the token.
//! No screen changes what it shows until the backend confirms a write.

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ScreenError;
use crate::gateway::Operation;
use crate::session::AuthState;

pub mod audit_logs;
pub mod dashboard;
pub mod disputes;
pub mod notifications;
pub mod reports;
pub mod settings;
pub mod signin;
pub mod transactions;
pub mod users;
pub mod verification;
pub mod withdrawals;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Reporting window used when a screen is opened without a date range.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Inclusive date range sent to filtered lists and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    /// The `days` days ending at `now`.
    pub fn last_days(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            start_date: now - Duration::days(days),
            end_date: now,
        }
    }

    /// Fill missing bounds independently: the start defaults to thirty days
    /// before `now`, the end to `now`.
    pub fn or_default(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let fallback = Self::last_days(now, DEFAULT_WINDOW_DAYS);
        Self {
            start_date: start.unwrap_or(fallback.start_date),
            end_date: end.unwrap_or(fallback.end_date),
        }
    }
}

/// Page/limit pair for the backend's paginated filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Paging {
    /// Zero or missing values fall back to the defaults.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// Client-side search over already fetched rows. Blank needles keep every row.
pub fn search<T>(rows: Vec<T>, needle: Option<&str>, matches: impl Fn(&T, &str) -> bool) -> Vec<T> {
    match needle.map(str::trim).filter(|n| !n.is_empty()) {
        None => rows,
        Some(needle) => rows.into_iter().filter(|row| matches(row, needle)).collect(),
    }
}

/// Treat blank strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn require(value: &str, message: &str) -> Result<(), ScreenError> {
    if value.trim().is_empty() {
        Err(ScreenError::validation(message))
    } else {
        Ok(())
    }
}

/// Run a write against the backend on behalf of `auth`.
///
/// Unauthorized failures end the session before the error is returned.
pub(crate) async fn mutate<T: DeserializeOwned>(
    auth: &AuthState,
    operation: &Operation,
    variables: impl Serialize,
) -> Result<T, ScreenError> {
    match auth.gateway().mutate(operation, variables).await {
        Ok(data) => {
            tracing::info!(operation = operation.name, "Admin mutation applied");
            Ok(data)
        }
        Err(e) if e.is_unauthorized() => {
            tracing::warn!(operation = operation.name, error = %e, "Mutation unauthorized, signing out");
            auth.logout();
            Err(e.into())
        }
        Err(e) => {
            tracing::warn!(operation = operation.name, error = %e, "Mutation failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gateway::{GatewayClient, ResponseCache};
    use crate::session::{CookieOptions, CredentialStore, MemoryStore, AUTH_TOKEN_KEY};
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Arc;
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Signed-in auth state talking to `server`.
    pub(crate) fn signed_in(server: &MockServer) -> (Arc<MemoryStore>, AuthState) {
        let store = Arc::new(MemoryStore::new());
        store.set(AUTH_TOKEN_KEY, "tok", CookieOptions::default());
        let gateway = GatewayClient::new(
            Url::parse(&server.uri()).unwrap(),
            reqwest::Client::new(),
            store.clone(),
            Arc::new(ResponseCache::default()),
        );
        let auth = AuthState::new(store.clone(), gateway);
        auth.set_token(Some("tok".into()));
        auth.set_is_authenticated(true);
        (store, auth)
    }

    /// Parsed JSON body of the `n`th request the server received.
    pub(crate) async fn request_body(server: &MockServer, n: usize) -> serde_json::Value {
        let requests = server.received_requests().await.unwrap();
        serde_json::from_slice(&requests[n].body).unwrap()
    }

    #[test]
    fn date_range_defaults_each_bound_independently() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        let range = DateRange::or_default(Some(start), None, now);
        assert_eq!(range.start_date, start);
        assert_eq!(range.end_date, now);

        let range = DateRange::or_default(None, None, now);
        assert_eq!(range.start_date, Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn date_range_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let value = serde_json::to_value(DateRange::last_days(now, 1)).unwrap();
        assert_eq!(value["endDate"], "2026-03-31T12:00:00Z");
        assert_eq!(value["startDate"], "2026-03-30T12:00:00Z");
    }

    #[test]
    fn paging_falls_back_to_defaults() {
        assert_eq!(Paging::new(None, None), Paging::default());
        assert_eq!(Paging::new(Some(0), Some(0)), Paging { page: 1, limit: 10 });
        assert_eq!(Paging::new(Some(3), Some(25)), Paging { page: 3, limit: 25 });
    }

    #[test]
    fn blank_search_keeps_all_rows() {
        let rows = vec!["alpha", "beta"];
        assert_eq!(search(rows.clone(), Some("  "), |r, n| r.contains(n)), rows);
        assert_eq!(search(rows, Some("et"), |r, n| r.contains(n)), vec!["beta"]);
    }

    #[tokio::test]
    async fn unauthorized_mutation_signs_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Not authorized", "extensions": { "code": "UNAUTHENTICATED" } }]
            })))
            .mount(&server)
            .await;

        let (store, auth) = signed_in(&server);
        let op = Operation { name: "Noop", document: "mutation Noop { noop }" };
        let err = mutate::<serde_json::Value>(&auth, &op, json!({})).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!auth.is_authenticated());
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn failed_mutation_keeps_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Insufficient balance" }]
            })))
            .mount(&server)
            .await;

        let (_, auth) = signed_in(&server);
        let op = Operation { name: "Noop", document: "mutation Noop { noop }" };
        let err = mutate::<serde_json::Value>(&auth, &op, json!({})).await.unwrap_err();

        assert_eq!(err.to_string(), "Insufficient balance");
        assert!(auth.is_authenticated());
    }
}
