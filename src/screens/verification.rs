// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity document review queue.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{mutate, non_blank, require};
use crate::error::ScreenError;
use crate::gateway::{Operation, Watched};
use crate::models::{VerificationDocument, VerificationStatus};
use crate::session::AuthState;

pub const PENDING_VERIFICATION_DOCUMENTS: Operation = Operation {
    name: "PendingVerificationDocuments",
    document: r#"query PendingVerificationDocuments {
  pendingVerificationDocuments {
    id
    userId
    documentType
    documentNumber
    documentUrl
    verificationStatus
    submittedAt
  }
}"#,
};

pub const REVIEW_VERIFICATION_DOCUMENT: Operation = Operation {
    name: "ReviewVerificationDocument",
    document: r#"mutation ReviewVerificationDocument($input: ReviewVerificationDocumentInput!) {
  reviewVerificationDocument(input: $input) {
    id
    verificationStatus
    rejectionReason
    verifiedAt
  }
}"#,
};

/// Outcome of reviewing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReview {
    pub document_id: String,
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingData {
    pending_verification_documents: Vec<VerificationDocument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewData {
    review_verification_document: VerificationDocument,
}

pub async fn pending(auth: &AuthState) -> Watched<Vec<VerificationDocument>> {
    auth.gateway()
        .watch_query::<PendingData>(&PENDING_VERIFICATION_DOCUMENTS, json!({}))
        .await
        .map(|data| data.pending_verification_documents)
}

/// Approve or reject a document. Rejections need a reason; approvals drop
/// any reason supplied.
pub async fn review(auth: &AuthState, mut input: DocumentReview) -> Result<VerificationDocument, ScreenError> {
    require(&input.document_id, "Document id is required")?;
    input.rejection_reason = non_blank(input.rejection_reason.take());

    match input.status {
        VerificationStatus::Rejected if input.rejection_reason.is_none() => {
            return Err(ScreenError::validation("A rejection reason is required"));
        }
        VerificationStatus::Pending => {
            return Err(ScreenError::validation("A review must approve or reject"));
        }
        VerificationStatus::Approved => input.rejection_reason = None,
        VerificationStatus::Rejected => {}
    }

    let data: ReviewData = mutate(auth, &REVIEW_VERIFICATION_DOCUMENT, json!({ "input": input })).await?;
    Ok(data.review_verification_document)
}
