// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    gateway::Watched,
    models::{Dispute, DisputeStatus},
    screens::{
        disputes::{self, DisputeFilter, Resolution},
        DateRange, Paging,
    },
    session::CurrentSession,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DisputeQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<DisputeStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Ruling on a dispute. `status` must close it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResolveRequest {
    pub resolution: String,
    pub status: DisputeStatus,
}

#[utoipa::path(
    get,
    path = "/disputes",
    params(DisputeQuery),
    tag = "Disputes",
    responses((status = 200, description = "One page of disputes with an optional stale-data notice"))
)]
pub async fn list_disputes(
    CurrentSession(session): CurrentSession,
    Query(params): Query<DisputeQuery>,
) -> Json<Watched<Vec<Dispute>>> {
    let filter = DisputeFilter::new(
        Paging::new(params.page, params.limit),
        params.status,
        DateRange::or_default(params.start_date, params.end_date, Utc::now()),
    );
    Json(disputes::list(session.auth(), &filter).await)
}

#[utoipa::path(
    get,
    path = "/disputes/{dispute_id}",
    params(("dispute_id" = String, Path, description = "Dispute identifier")),
    tag = "Disputes",
    responses((status = 200, description = "Dispute with its evidence"))
)]
pub async fn get_dispute(
    CurrentSession(session): CurrentSession,
    Path(dispute_id): Path<String>,
) -> Json<Watched<Dispute>> {
    Json(disputes::detail(session.auth(), &dispute_id).await)
}

#[utoipa::path(
    post,
    path = "/disputes/{dispute_id}/resolve",
    params(("dispute_id" = String, Path, description = "Dispute identifier")),
    request_body = ResolveRequest,
    tag = "Disputes",
    responses(
        (status = 200, description = "Backend acknowledgement of the ruling"),
        (status = 400, description = "Missing resolution or non-terminal status"),
        (status = 502, description = "Backend refused the ruling")
    )
)]
pub async fn resolve_dispute(
    CurrentSession(session): CurrentSession,
    Path(dispute_id): Path<String>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<Value>, ApiError> {
    let resolution = Resolution {
        dispute_id,
        resolution: request.resolution,
        status: request.status,
    };
    Ok(Json(disputes::resolve(session.auth(), resolution).await?))
}

#[cfg(test)]
mod tests {
    use crate::api::router;
    use crate::api::tests::{backend, json_body, request, state_for, valid_token};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn open_status_is_rejected_before_the_backend() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "ResolveDispute" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let token = valid_token();
        let response = router(state_for(&server))
            .oneshot(request(
                Method::POST,
                "/disputes/d1/resolve",
                Some(&token),
                Some(json!({ "resolution": "Refund the buyer", "status": "IN_REVIEW" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_sends_null_status_when_unset() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "GetFilteredDisputes",
                "variables": { "filter": { "page": 1, "limit": 10, "status": null } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "getFilteredDisputes": [] } })))
            .expect(1)
            .mount(&server)
            .await;

        let token = valid_token();
        let response = router(state_for(&server))
            .oneshot(request(Method::GET, "/disputes", Some(&token), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"], json!([]));
    }
}
