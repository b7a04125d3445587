// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transactions screen: filtered list, detail with audit trail, escrow release.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{mutate, require, search, DateRange, Paging};
use crate::error::ScreenError;
use crate::gateway::{Operation, Watched};
use crate::models::{EscrowStatus, Transaction, TransactionStatus};
use crate::session::AuthState;

pub const GET_FILTERED_TRANSACTIONS: Operation = Operation {
    name: "GetFilteredTransactions",
    document: r#"query GetFilteredTransactions($filter: TransactionFilterInput!) {
  getFilteredTransactions(filter: $filter) {
    id
    transactionCode
    seller { id firstName lastName email }
    buyer { id firstName lastName email }
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
    isPaid
    type
    createdAt
    updatedAt
  }
}"#,
};

pub const TRANSACTION: Operation = Operation {
    name: "Transaction",
    document: r#"query Transaction($id: ID!) {
  transaction(id: $id) {
    id
    transactionCode
    seller { id firstName lastName email }
    buyer { id firstName lastName email }
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
    expectedDeliveryDate
    actualDeliveryDate
    isPaid
    type
    createdAt
    updatedAt
    completedAt
    canceledAt
    refundedAt
    logs {
      id
      action
      status
      escrowStatus
      performedBy
      description
      createdAt
    }
  }
}"#,
};

pub const RELEASE_ESCROW: Operation = Operation {
    name: "ReleaseEscrow",
    document: r#"mutation ReleaseEscrow($input: ReleaseEscrowInput!) {
  releaseEscrow(input: $input) {
    id
    transactionCode
    amount
    escrowFee
    totalAmount
    status
    escrowStatus
    isPaid
    updatedAt
    completedAt
  }
}"#,
};

/// `TransactionFilterInput` as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escrow_status: Option<EscrowStatus>,
    #[serde(flatten)]
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn new(paging: Paging, range: DateRange) -> Self {
        Self {
            page: paging.page,
            limit: paging.limit,
            status: None,
            escrow_status: None,
            range,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    get_filtered_transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct DetailData {
    transaction: Transaction,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseData {
    release_escrow: Transaction,
}

/// One page of transactions, narrowed by `needle` over code, title and parties.
pub async fn list(
    auth: &AuthState,
    filter: &TransactionFilter,
    needle: Option<&str>,
) -> Watched<Vec<Transaction>> {
    auth.gateway()
        .watch_query::<ListData>(&GET_FILTERED_TRANSACTIONS, json!({ "filter": filter }))
        .await
        .map(|data| search(data.get_filtered_transactions, needle, Transaction::matches))
}

pub async fn detail(auth: &AuthState, id: &str) -> Watched<Transaction> {
    auth.gateway()
        .watch_query::<DetailData>(&TRANSACTION, json!({ "id": id }))
        .await
        .map(|data| data.transaction)
}

/// Release escrowed funds to the seller.
pub async fn release_escrow(auth: &AuthState, transaction_id: &str) -> Result<Transaction, ScreenError> {
    require(transaction_id, "Transaction id is required")?;
    let data: ReleaseData = mutate(
        auth,
        &RELEASE_ESCROW,
        json!({ "input": { "transactionId": transaction_id } }),
    )
    .await?;
    Ok(data.release_escrow)
}
