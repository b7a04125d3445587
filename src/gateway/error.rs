// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! GraphQL gateway errors.

use serde::Deserialize;

/// An entry of a GraphQL response's `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl GraphQlError {
    /// The `extensions.code` value, when the server set one.
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("GraphQL request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GraphQL endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("{}", join_messages(.0))]
    GraphQl(Vec<GraphQlError>),

    #[error("GraphQL response was invalid: {0}")]
    InvalidResponse(String),
}

fn join_messages(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return "GraphQL request returned errors".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl GatewayError {
    /// Whether the backend refused the caller's identity.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            GatewayError::Status { status } => *status == 401 || *status == 403,
            GatewayError::GraphQl(errors) => errors
                .iter()
                .any(|e| matches!(e.code(), Some("UNAUTHENTICATED" | "FORBIDDEN"))),
            _ => false,
        }
    }
}
