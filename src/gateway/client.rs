// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! GraphQL client for the Tanscrow API.
//!
//! Every request passes through [`GatewayClient::authorize`], which reads the
//! bearer token from the credential store at send time. The in-memory auth
//! state is not consulted, so a half-rehydrated state can never send a stale
//! token.
//!
//! ## Fetch policies
//!
//! | Entry point | Cache | Errors |
//! |-------------|-------|--------|
//! | [`watch_query`](GatewayClient::watch_query) | cache-and-network | suppressed, stale cache returned |
//! | [`query`](GatewayClient::query) | network-only | surfaced |
//! | [`mutate`](GatewayClient::mutate) | never cached | surfaced |

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::cache::ResponseCache;
use super::error::{GatewayError, GraphQlError};
use crate::session::store::{CredentialStore, AUTH_TOKEN_KEY};

/// A named GraphQL document.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

/// How GraphQL `errors` entries are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Any entry fails the call.
    All,
    /// Entries are logged and partial `data` is used. Without data the
    /// entries still fail the call.
    Ignore,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// Result of a passive read.
///
/// Failures are not fatal: `data` falls back to the last cached result and
/// `notice` carries the error message for inline display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Watched<T> {
    pub data: Option<T>,
    pub stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl<T> Watched<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Watched<U> {
        Watched {
            data: self.data.map(f),
            stale: self.stale,
            notice: self.notice,
        }
    }
}

/// GraphQL client bound to one credential store and one response cache.
///
/// Cheap to clone; clones share the HTTP connection pool, store and cache.
#[derive(Clone)]
pub struct GatewayClient {
    endpoint: Url,
    http: Client,
    store: Arc<dyn CredentialStore>,
    cache: Arc<ResponseCache>,
}

impl GatewayClient {
    pub fn new(
        endpoint: Url,
        http: Client,
        store: Arc<dyn CredentialStore>,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            endpoint,
            http,
            store,
            cache,
        }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Empty the response cache. Called on logout.
    pub fn reset_cache(&self) {
        self.cache.clear();
    }

    /// Attach `Authorization: Bearer` when a token is stored.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        operation: &Operation,
        variables: &Value,
        policy: ErrorPolicy,
    ) -> Result<Value, GatewayError> {
        let body = json!({
            "operationName": operation.name,
            "query": operation.document,
            "variables": variables,
        });

        let response = self
            .authorize(self.http.post(self.endpoint.clone()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let parsed: Result<GraphQlResponse, _> = response.json().await;

        // GraphQL servers often pair 4xx with an `errors` body; prefer it.
        let payload = match parsed {
            Ok(payload) => payload,
            Err(_) if !status.is_success() => {
                return Err(GatewayError::Status {
                    status: status.as_u16(),
                })
            }
            Err(e) => return Err(GatewayError::InvalidResponse(e.to_string())),
        };

        let data = payload.data.filter(|data| !data.is_null());
        if !payload.errors.is_empty() {
            // Without partial data there is nothing to serve; keep the backend's reason.
            if policy == ErrorPolicy::All || data.is_none() {
                return Err(GatewayError::GraphQl(payload.errors));
            }
            tracing::debug!(
                operation = operation.name,
                errors = payload.errors.len(),
                "Ignoring GraphQL errors on passive read"
            );
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
            });
        }

        data.ok_or_else(|| {
            GatewayError::InvalidResponse(format!("no data for {}", operation.name))
        })
    }

    /// One-shot network read. Errors are surfaced; the result refreshes the cache.
    pub async fn query<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: impl Serialize,
    ) -> Result<T, GatewayError> {
        let variables = to_variables(variables)?;
        let data = self.send(operation, &variables, ErrorPolicy::All).await?;
        let decoded = decode(operation, data.clone())?;
        self.cache
            .put(ResponseCache::key(operation.name, &variables), data);
        Ok(decoded)
    }

    /// Write operation. Errors are surfaced and nothing is cached.
    pub async fn mutate<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: impl Serialize,
    ) -> Result<T, GatewayError> {
        let variables = to_variables(variables)?;
        let data = self.send(operation, &variables, ErrorPolicy::All).await?;
        decode(operation, data)
    }

    /// Passive read: refresh from the network, falling back to the cache.
    pub async fn watch_query<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: impl Serialize,
    ) -> Watched<T> {
        let variables = match to_variables(variables) {
            Ok(v) => v,
            Err(e) => {
                return Watched {
                    data: None,
                    stale: false,
                    notice: Some(e.to_string()),
                }
            }
        };
        let key = ResponseCache::key(operation.name, &variables);

        let fresh = match self.send(operation, &variables, ErrorPolicy::Ignore).await {
            Ok(data) => decode::<T>(operation, data.clone()).map(|decoded| (decoded, data)),
            Err(e) => Err(e),
        };

        match fresh {
            Ok((decoded, data)) => {
                self.cache.put(key, data);
                Watched {
                    data: Some(decoded),
                    stale: false,
                    notice: None,
                }
            }
            Err(e) => {
                tracing::warn!(operation = operation.name, error = %e, "Passive read failed, serving cache");
                let cached = self
                    .cache
                    .get(&key)
                    .and_then(|data| decode::<T>(operation, data).ok());
                Watched {
                    stale: cached.is_some(),
                    data: cached,
                    notice: Some(e.to_string()),
                }
            }
        }
    }
}

fn to_variables(variables: impl Serialize) -> Result<Value, GatewayError> {
    serde_json::to_value(variables).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

fn decode<T: DeserializeOwned>(operation: &Operation, data: Value) -> Result<T, GatewayError> {
    serde_json::from_value(data)
        .map_err(|e| GatewayError::InvalidResponse(format!("{}: {e}", operation.name)))
}
