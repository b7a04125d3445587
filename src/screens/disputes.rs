// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Disputes screen.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{mutate, require, DateRange, Paging};
use crate::error::ScreenError;
use crate::gateway::{Operation, Watched};
use crate::models::{Dispute, DisputeStatus};
use crate::session::AuthState;

pub const GET_FILTERED_DISPUTES: Operation = Operation {
    name: "GetFilteredDisputes",
    document: r#"query GetFilteredDisputes($filter: DisputeFilterInput!) {
  getFilteredDisputes(filter: $filter) {
    id
    status
    reason
    createdAt
  }
}"#,
};

pub const DISPUTE: Operation = Operation {
    name: "Dispute",
    document: r#"query Dispute($disputeId: String!) {
  dispute(id: $disputeId) {
    id
    transaction {
      id
      transactionCode
      seller { id email firstName lastName phoneNumber profileImageUrl accountType verified }
      buyer { id email firstName lastName phoneNumber profileImageUrl accountType verified }
      title
      description
      paymentCurrency
      amount
      escrowFee
      totalAmount
      paymentReference
      status
      escrowStatus
      deliveryMethod
      trackingInfo
      isPaid
      type
      createdAt
    }
    initiator { id email firstName lastName phoneNumber profileImageUrl accountType verified }
    moderator { id firstName email lastName profileImageUrl }
    status
    reason
    description
    resolution
    evidence {
      id
      evidenceType
      evidenceUrl
      description
      submittedBy
      createdAt
    }
    createdAt
    updatedAt
    resolvedAt
  }
}"#,
};

pub const RESOLVE_DISPUTE: Operation = Operation {
    name: "ResolveDispute",
    document: r#"mutation ResolveDispute($input: DisputeManagementInput!) {
  resolveDispute(input: $input)
}"#,
};

/// `DisputeFilterInput`. An absent status means every status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeFilter {
    pub page: u32,
    pub limit: u32,
    pub status: Option<DisputeStatus>,
    #[serde(flatten)]
    pub range: DateRange,
}

impl DisputeFilter {
    pub fn new(paging: Paging, status: Option<DisputeStatus>, range: DateRange) -> Self {
        Self {
            page: paging.page,
            limit: paging.limit,
            status,
            range,
        }
    }
}

/// An admin ruling on a dispute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub dispute_id: String,
    pub resolution: String,
    pub status: DisputeStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    get_filtered_disputes: Vec<Dispute>,
}

#[derive(Deserialize)]
struct DetailData {
    dispute: Dispute,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveData {
    resolve_dispute: Value,
}

pub async fn list(auth: &AuthState, filter: &DisputeFilter) -> Watched<Vec<Dispute>> {
    auth.gateway()
        .watch_query::<ListData>(&GET_FILTERED_DISPUTES, json!({ "filter": filter }))
        .await
        .map(|data| data.get_filtered_disputes)
}

pub async fn detail(auth: &AuthState, dispute_id: &str) -> Watched<Dispute> {
    auth.gateway()
        .watch_query::<DetailData>(&DISPUTE, json!({ "disputeId": dispute_id }))
        .await
        .map(|data| data.dispute)
}

/// Record a ruling. The status must close the dispute and the resolution
/// text must be non-empty.
pub async fn resolve(auth: &AuthState, input: Resolution) -> Result<Value, ScreenError> {
    require(&input.dispute_id, "Dispute id is required")?;
    require(&input.resolution, "Resolution details are required")?;
    if !input.status.is_resolution() {
        return Err(ScreenError::validation(format!(
            "{:?} does not resolve a dispute",
            input.status
        )));
    }

    let data: ResolveData = mutate(auth, &RESOLVE_DISPUTE, json!({ "input": input })).await?;
    Ok(data.resolve_dispute)
}
