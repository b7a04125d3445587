// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::Query, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    screens::{
        dashboard::{self, Dashboard},
        reports::{self, Reports},
        DateRange,
    },
    session::CurrentSession,
};

/// Reporting window. Each missing bound falls back independently to the
/// last thirty days.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl RangeQuery {
    fn range(&self) -> DateRange {
        DateRange::or_default(self.start_date, self.end_date, Utc::now())
    }
}

#[utoipa::path(
    get,
    path = "/",
    params(RangeQuery),
    tag = "Dashboard",
    responses((status = 200, body = Dashboard))
)]
pub async fn dashboard(
    CurrentSession(session): CurrentSession,
    Query(params): Query<RangeQuery>,
) -> Json<Dashboard> {
    Json(dashboard::load(session.auth(), params.range()).await)
}

#[utoipa::path(
    get,
    path = "/reports",
    params(RangeQuery),
    tag = "Dashboard",
    responses((status = 200, body = Reports))
)]
pub async fn reports(
    CurrentSession(session): CurrentSession,
    Query(params): Query<RangeQuery>,
) -> Json<Reports> {
    Json(reports::load(session.auth(), params.range()).await)
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
    async fn reports_use_the_requested_range() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "DisputeReport",
                "variables": { "dateRange": { "startDate": "2026-01-01T00:00:00Z" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "disputeReport": {
                "totalDisputes": 3, "resolvedDisputes": 2, "pendingDisputes": 1,
                "averageResolutionTime": 36.5, "disputeRate": 0.04
            } } })))
            .expect(1)
            .mount(&server)
            .await;

        let token = valid_token();
        let response = router(state_for(&server))
            .oneshot(request(
                Method::GET,
                "/reports?startDate=2026-01-01T00:00:00Z",
                Some(&token),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["range"]["startDate"], "2026-01-01T00:00:00Z");
        assert_eq!(body["disputes"]["data"]["totalDisputes"], 3);
        assert!(body["transactions"]["notice"].is_string());
    }
}
