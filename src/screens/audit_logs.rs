// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Audit log browser. Paged with `take`/`skip`.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::non_blank;
use crate::gateway::{Operation, Watched};
use crate::models::AuditLogPage;
use crate::session::AuthState;

pub const PAGE_SIZE: u32 = 20;

pub const GET_AUDIT_LOGS: Operation = Operation {
    name: "GetAuditLogs",
    document: r#"query GetAuditLogs($take: Int, $skip: Int, $filter: AuditLogFilter) {
  getAuditLogs(take: $take, skip: $skip, filter: $filter) {
    items {
      id
      userId
      entityType
      action
      category
      details
      createdAt
    }
    total
    hasMore
  }
}"#,
};

/// `AuditLogFilter`. Blank values are sent as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl AuditLogFilter {
    pub fn new(
        user_id: Option<String>,
        entity_type: Option<String>,
        action: Option<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            user_id: non_blank(user_id),
            entity_type: non_blank(entity_type),
            action: non_blank(action),
            category: non_blank(category),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditData {
    get_audit_logs: AuditLogPage,
}

/// Largest `skip` the backend's `Int` accepts.
const MAX_SKIP: u32 = i32::MAX as u32;

/// `take`/`skip` for a 1-based page number. Pages past the end clamp to
/// the largest offset the backend accepts.
pub fn window(page: u32) -> (u32, u32) {
    let skip = page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE);
    (PAGE_SIZE, skip.min(MAX_SKIP))
}

pub async fn list(auth: &AuthState, page: u32, filter: &AuditLogFilter) -> Watched<AuditLogPage> {
    let (take, skip) = window(page);
    auth.gateway()
        .watch_query::<AuditData>(
            &GET_AUDIT_LOGS,
            json!({ "take": take, "skip": skip, "filter": filter }),
        )
        .await
        .map(|data| data.get_audit_logs)
}
