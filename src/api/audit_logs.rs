// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::Query, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    gateway::Watched,
    models::AuditLogPage,
    screens::{
        audit_logs::{self, AuditLogFilter},
        DEFAULT_PAGE,
    },
    session::CurrentSession,
};

/// Audit log filters. Blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AuditLogQuery {
    /// 1-based page of twenty entries.
    pub page: Option<u32>,
    pub user_id: Option<String>,
    pub entity_type: Option<String>,
    pub action: Option<String>,
    pub category: Option<String>,
}

#[utoipa::path(
    get,
    path = "/audit-logs",
    params(AuditLogQuery),
    tag = "Audit",
    responses((status = 200, description = "One page of audit entries with the total count"))
)]
pub async fn list_audit_logs(
    CurrentSession(session): CurrentSession,
    Query(params): Query<AuditLogQuery>,
) -> Json<Watched<AuditLogPage>> {
    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let filter = AuditLogFilter::new(params.user_id, params.entity_type, params.action, params.category);
    Json(audit_logs::list(session.auth(), page, &filter).await)
}
