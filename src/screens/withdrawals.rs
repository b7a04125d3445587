// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Withdrawals screen.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{mutate, require, search, DateRange, Paging};
use crate::error::ScreenError;
use crate::gateway::{Operation, Watched};
use crate::models::{Withdrawal, WithdrawalRequest, WithdrawalStatus};
use crate::session::AuthState;

pub const GET_FILTERED_WITHDRAWALS: Operation = Operation {
    name: "GetFilteredWithdrawals",
    document: r#"query GetFilteredWithdrawals($filter: WithdrawalFilterInput!) {
  getFilteredWithdrawals(filter: $filter) {
    id
    amount
    currency
    type
    reference
    status
    description
    balanceBefore
    balanceAfter
    createdAt
    updatedAt
    wallet {
      id
      userId
      currency
      balance
      escrowBalance
      isActive
      user { id firstName lastName email phoneNumber profileImageUrl }
    }
  }
}"#,
};

pub const CONFIRM_WITHDRAWAL: Operation = Operation {
    name: "ConfirmWithdrawal",
    document: r#"mutation ConfirmWithdrawal($confirmWithdrawalId: ID!) {
  confirmWithdrawal(id: $confirmWithdrawalId) {
    id
    userId
    bankName
    accountNumber
    accountName
    bankCode
    amount
    currency
    reference
    status
    failureReason
  }
}"#,
};

/// `WithdrawalFilterInput`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalFilter {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WithdrawalStatus>,
    #[serde(flatten)]
    pub range: DateRange,
}

impl WithdrawalFilter {
    pub fn new(paging: Paging, status: Option<WithdrawalStatus>, range: DateRange) -> Self {
        Self {
            page: paging.page,
            limit: paging.limit,
            status,
            range,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    get_filtered_withdrawals: Vec<Withdrawal>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmData {
    confirm_withdrawal: WithdrawalRequest,
}

/// Withdrawals narrowed by `needle` over the reference and account holder.
pub async fn list(
    auth: &AuthState,
    filter: &WithdrawalFilter,
    needle: Option<&str>,
) -> Watched<Vec<Withdrawal>> {
    auth.gateway()
        .watch_query::<ListData>(&GET_FILTERED_WITHDRAWALS, json!({ "filter": filter }))
        .await
        .map(|data| search(data.get_filtered_withdrawals, needle, Withdrawal::matches))
}

/// Confirm a pending withdrawal payout.
pub async fn confirm(auth: &AuthState, id: &str) -> Result<WithdrawalRequest, ScreenError> {
    require(id, "Withdrawal id is required")?;
    let data: ConfirmData = mutate(auth, &CONFIRM_WITHDRAWAL, json!({ "confirmWithdrawalId": id })).await?;
    Ok(data.confirm_withdrawal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::tests::{request_body, signed_in};
    use chrono::Utc;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn withdrawal(id: &str, reference: &str, first_name: &str) -> serde_json::Value {
        json!({
            "id": id, "amount": 5000.0, "currency": "NGN", "reference": reference, "status": "PENDING",
            "wallet": { "id": "w1", "user": { "id": "u1", "firstName": first_name, "lastName": "Obi" } }
        })
    }

    #[tokio::test]
    async fn list_searches_reference_and_holder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "GetFilteredWithdrawals" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {
                "getFilteredWithdrawals": [withdrawal("w1", "WD-100", "Ada"), withdrawal("w2", "WD-200", "Chidi")]
            } })))
            .mount(&server)
            .await;

        let (_, auth) = signed_in(&server);
        let filter = WithdrawalFilter::new(Paging::default(), Some(WithdrawalStatus::Pending), DateRange::last_days(Utc::now(), 30));

        let by_holder = list(&auth, &filter, Some("chidi")).await.data.unwrap();
        assert_eq!(by_holder.len(), 1);
        assert_eq!(by_holder[0].id, "w2");

        let by_reference = list(&auth, &filter, Some("wd-100")).await.data.unwrap();
        assert_eq!(by_reference[0].id, "w1");

        let body = request_body(&server, 0).await;
        assert_eq!(body["variables"]["filter"]["status"], "PENDING");
    }

    #[tokio::test]
    async fn confirm_sends_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "confirmWithdrawalId": "w1" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "confirmWithdrawal": {
                "id": "w1", "amount": 5000.0, "currency": "NGN", "reference": "WD-100", "status": "COMPLETED"
            } } })))
            .expect(1)
            .mount(&server)
            .await;

        let (_, auth) = signed_in(&server);
        let confirmed = confirm(&auth, "w1").await.unwrap();
        assert_eq!(confirmed.status, WithdrawalStatus::Completed);
    }
}
