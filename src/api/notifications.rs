// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::{
    gateway::Watched, models::Notification, screens::notifications, session::CurrentSession,
};

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    responses((status = 200, description = "Notifications for the signed-in admin"))
)]
pub async fn list_notifications(
    CurrentSession(session): CurrentSession,
) -> Json<Watched<Vec<Notification>>> {
    Json(notifications::list(session.auth()).await)
}
