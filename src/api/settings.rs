// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::{
    error::ApiError,
    gateway::Watched,
    models::SystemConfig,
    screens::settings::{self, SettingsGroup, SystemConfigInput},
    session::CurrentSession,
};

#[utoipa::path(
    get,
    path = "/settings",
    tag = "Settings",
    responses((status = 200, description = "System configuration grouped by key prefix"))
)]
pub async fn list_settings(
    CurrentSession(session): CurrentSession,
) -> Json<Watched<Vec<SettingsGroup>>> {
    Json(settings::list(session.auth()).await)
}

#[utoipa::path(
    put,
    path = "/settings",
    request_body = SystemConfigInput,
    tag = "Settings",
    responses(
        (status = 200, body = SystemConfig),
        (status = 400, description = "Missing key"),
        (status = 502, description = "Backend refused the change")
    )
)]
pub async fn update_setting(
    CurrentSession(session): CurrentSession,
    Json(input): Json<SystemConfigInput>,
) -> Result<Json<SystemConfig>, ApiError> {
    Ok(Json(settings::update(session.auth(), input).await?))
}
