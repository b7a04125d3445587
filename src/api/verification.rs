// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::Path, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    gateway::Watched,
    models::{VerificationDocument, VerificationStatus},
    screens::verification::{self, DocumentReview},
    session::CurrentSession,
};

/// Approve or reject a document. Rejections need a reason.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub status: VerificationStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[utoipa::path(
    get,
    path = "/verification-documents",
    tag = "Verification",
    responses((status = 200, description = "Documents awaiting review with an optional stale-data notice"))
)]
pub async fn list_pending_documents(
    CurrentSession(session): CurrentSession,
) -> Json<Watched<Vec<VerificationDocument>>> {
    Json(verification::pending(session.auth()).await)
}

#[utoipa::path(
    post,
    path = "/verification-documents/{document_id}/review",
    params(("document_id" = String, Path, description = "Document identifier")),
    request_body = ReviewRequest,
    tag = "Verification",
    responses(
        (status = 200, body = VerificationDocument),
        (status = 400, description = "Rejection without a reason"),
        (status = 502, description = "Backend refused the review")
    )
)]
pub async fn review_document(
    CurrentSession(session): CurrentSession,
    Path(document_id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<VerificationDocument>, ApiError> {
    let review = DocumentReview {
        document_id,
        status: request.status,
        rejection_reason: request.rejection_reason,
    };
    Ok(Json(verification::review(session.auth(), review).await?))
}
