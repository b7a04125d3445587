// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::gateway::GatewayError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Failure of a screen operation.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ScreenError {
    pub fn validation(message: impl Into<String>) -> Self {
        ScreenError::Validation(message.into())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ScreenError::Gateway(e) if e.is_unauthorized())
    }
}

impl From<ScreenError> for ApiError {
    fn from(err: ScreenError) -> Self {
        match err {
            ScreenError::Validation(message) => ApiError::bad_request(message),
            ScreenError::Gateway(e) if e.is_unauthorized() => ApiError::unauthorized(e.to_string()),
            ScreenError::Gateway(e) => ApiError::bad_gateway(e.to_string()),
        }
    }
}
