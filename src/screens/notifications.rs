// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use serde::Deserialize;
use serde_json::json;

use crate::gateway::{Operation, Watched};
use crate::models::Notification;
use crate::session::AuthState;

pub const NOTIFICATIONS: Operation = Operation {
    name: "Notifications",
    document: r#"query Notifications {
  notifications {
    id
    title
    message
    type
    isRead
    relatedEntityType
    createdAt
  }
}"#,
};

#[derive(Deserialize)]
struct NotificationsData {
    notifications: Vec<Notification>,
}

pub async fn list(auth: &AuthState) -> Watched<Vec<Notification>> {
    auth.gateway()
        .watch_query::<NotificationsData>(&NOTIFICATIONS, json!({}))
        .await
        .map(|data| data.notifications)
}
