// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Landing dashboard: platform totals plus the transaction report.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::reports::transaction_report;
use super::DateRange;
use crate::gateway::{Operation, Watched};
use crate::models::{AdminDashboardStats, TransactionReport};
use crate::session::AuthState;

pub const GET_ADMIN_DASHBOARD_STATS: Operation = Operation {
    name: "GetAdminDashboardStats",
    document: r#"query GetAdminDashboardStats {
  getAdminDashboardStats {
    totalUsers
    totalTransactions
    activeDisputes
    totalTransactionVolume
  }
}"#,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub range: DateRange,
    #[schema(value_type = Object)]
    pub stats: Watched<AdminDashboardStats>,
    #[schema(value_type = Object)]
    pub report: Watched<TransactionReport>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsData {
    get_admin_dashboard_stats: AdminDashboardStats,
}

pub async fn stats(auth: &AuthState) -> Watched<AdminDashboardStats> {
    auth.gateway()
        .watch_query::<StatsData>(&GET_ADMIN_DASHBOARD_STATS, json!({}))
        .await
        .map(|data| data.get_admin_dashboard_stats)
}

pub async fn load(auth: &AuthState, range: DateRange) -> Dashboard {
    let (stats, report) = tokio::join!(stats(auth), transaction_report(auth, range));
    Dashboard { range, stats, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::tests::signed_in;
    use crate::screens::DEFAULT_WINDOW_DAYS;
    use chrono::Utc;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn load_combines_stats_and_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "GetAdminDashboardStats" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "getAdminDashboardStats": {
                "totalUsers": 1200, "totalTransactions": 5400, "activeDisputes": 7, "totalTransactionVolume": 9.5e7
            } } })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "TransactionReport" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "transactionReport": {
                "totalTransactions": 300, "totalAmount": 3.0e6, "totalEscrowFees": 45000.0,
                "completedTransactions": 250, "canceledTransactions": 20, "disputedTransactions": 5,
                "averageTransactionAmount": 10000.0
            } } })))
            .mount(&server)
            .await;

        let (_, auth) = signed_in(&server);
        let dashboard = load(&auth, DateRange::last_days(Utc::now(), DEFAULT_WINDOW_DAYS)).await;

        assert_eq!(dashboard.stats.data.unwrap().active_disputes, 7);
        let report = dashboard.report.data.unwrap();
        assert_eq!(report.completed_transactions, 250);
        assert!(report.status_breakdown.is_empty());
    }
}
