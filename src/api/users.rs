// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    gateway::Watched,
    models::{AccountType, UserDetail, UserPage, UserSummary},
    screens::users::{self, UserManagementInput},
    session::CurrentSession,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Matches name and email.
    pub search: Option<String>,
}

/// Account type and verification flag to apply to a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagementRequest {
    pub account_type: AccountType,
    pub verified: bool,
}

#[utoipa::path(
    get,
    path = "/users",
    params(UserQuery),
    tag = "Users",
    responses((status = 200, description = "Paginated users with an optional stale-data notice"))
)]
pub async fn list_users(
    CurrentSession(session): CurrentSession,
    Query(params): Query<UserQuery>,
) -> Json<Watched<UserPage>> {
    Json(users::list(session.auth(), params.search.as_deref()).await)
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    tag = "Users",
    responses((status = 200, description = "User profile with wallet and reviews"))
)]
pub async fn get_user(
    CurrentSession(session): CurrentSession,
    Path(user_id): Path<String>,
) -> Json<Watched<UserDetail>> {
    Json(users::detail(session.auth(), &user_id).await)
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/management",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = ManagementRequest,
    tag = "Users",
    responses(
        (status = 200, body = UserSummary),
        (status = 502, description = "Backend refused the update")
    )
)]
pub async fn update_user_management(
    CurrentSession(session): CurrentSession,
    Path(user_id): Path<String>,
    Json(request): Json<ManagementRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    let input = UserManagementInput {
        user_id,
        account_type: request.account_type,
        verified: request.verified,
    };
    let user = users::update_management(session.auth(), input).await?;
    Ok(Json(user))
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
    async fn management_update_sends_path_id() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "UpdateUserManagement",
                "variables": { "input": { "userId": "u7", "accountType": "ADMIN", "verified": true } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "updateUserManagement": {
                "id": "u7", "firstName": "Ada", "lastName": "Obi", "accountType": "ADMIN", "verified": true
            } } })))
            .expect(1)
            .mount(&server)
            .await;

        let token = valid_token();
        let response = router(state_for(&server))
            .oneshot(request(
                Method::PUT,
                "/users/u7/management",
                Some(&token),
                Some(json!({ "accountType": "ADMIN", "verified": true })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["verified"], true);
    }

    #[tokio::test]
    async fn unauthorized_write_signs_out() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "UpdateUserManagement" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Admin access required", "extensions": { "code": "UNAUTHENTICATED" } }]
            })))
            .mount(&server)
            .await;

        let token = valid_token();
        let response = router(state_for(&server))
            .oneshot(request(
                Method::PUT,
                "/users/u7/management",
                Some(&token),
                Some(json!({ "accountType": "USER", "verified": false })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let cleared = response
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .any(|v| v.to_str().unwrap().starts_with("authToken=;"));
        assert!(cleared);
    }
}
