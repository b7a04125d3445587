// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction and dispute reports over a date range.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::DateRange;
use crate::gateway::{Operation, Watched};
use crate::models::{DisputeReport, TransactionReport};
use crate::session::AuthState;

pub const TRANSACTION_REPORT: Operation = Operation {
    name: "TransactionReport",
    document: r#"query TransactionReport($dateRange: ReportDateRangeInput!) {
  transactionReport(dateRange: $dateRange) {
    totalTransactions
    totalAmount
    totalEscrowFees
    completedTransactions
    canceledTransactions
    disputedTransactions
    averageTransactionAmount
    statusBreakdown {
      status
      count
    }
  }
}"#,
};

pub const DISPUTE_REPORT: Operation = Operation {
    name: "DisputeReport",
    document: r#"query DisputeReport($dateRange: ReportDateRangeInput!) {
  disputeReport(dateRange: $dateRange) {
    totalDisputes
    resolvedDisputes
    pendingDisputes
    averageResolutionTime
    disputeRate
  }
}"#,
};

/// Both reports for one range. Each side fails independently.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reports {
    pub range: DateRange,
    #[schema(value_type = Object)]
    pub transactions: Watched<TransactionReport>,
    #[schema(value_type = Object)]
    pub disputes: Watched<DisputeReport>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionData {
    transaction_report: TransactionReport,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisputeData {
    dispute_report: DisputeReport,
}

pub async fn transaction_report(auth: &AuthState, range: DateRange) -> Watched<TransactionReport> {
    auth.gateway()
        .watch_query::<TransactionData>(&TRANSACTION_REPORT, json!({ "dateRange": range }))
        .await
        .map(|data| data.transaction_report)
}

pub async fn dispute_report(auth: &AuthState, range: DateRange) -> Watched<DisputeReport> {
    auth.gateway()
        .watch_query::<DisputeData>(&DISPUTE_REPORT, json!({ "dateRange": range }))
        .await
        .map(|data| data.dispute_report)
}

pub async fn load(auth: &AuthState, range: DateRange) -> Reports {
    let (transactions, disputes) =
        tokio::join!(transaction_report(auth, range), dispute_report(auth, range));
    Reports {
        range,
        transactions,
        disputes,
    }
}
