// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    gateway::Watched,
    models::{EscrowStatus, Transaction, TransactionStatus},
    screens::{transactions, DateRange, Paging},
    session::CurrentSession,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<TransactionStatus>,
    pub escrow_status: Option<EscrowStatus>,
    /// Defaults to thirty days before now.
    pub start_date: Option<DateTime<Utc>>,
    /// Defaults to now.
    pub end_date: Option<DateTime<Utc>>,
    /// Matches transaction code, title and party names.
    pub search: Option<String>,
}

impl TransactionQuery {
    fn filter(&self, now: DateTime<Utc>) -> transactions::TransactionFilter {
        let mut filter = transactions::TransactionFilter::new(
            Paging::new(self.page, self.limit),
            DateRange::or_default(self.start_date, self.end_date, now),
        );
        filter.status = self.status;
        filter.escrow_status = self.escrow_status;
        filter
    }
}

#[utoipa::path(
    get,
    path = "/transactions",
    params(TransactionQuery),
    tag = "Transactions",
    responses((status = 200, description = "One page of transactions with an optional stale-data notice"))
)]
pub async fn list_transactions(
    CurrentSession(session): CurrentSession,
    Query(params): Query<TransactionQuery>,
) -> Json<Watched<Vec<Transaction>>> {
    let filter = params.filter(Utc::now());
    Json(transactions::list(session.auth(), &filter, params.search.as_deref()).await)
}

#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = String, Path, description = "Transaction identifier")),
    tag = "Transactions",
    responses((status = 200, description = "Transaction with its activity log"))
)]
pub async fn get_transaction(
    CurrentSession(session): CurrentSession,
    Path(transaction_id): Path<String>,
) -> Json<Watched<Transaction>> {
    Json(transactions::detail(session.auth(), &transaction_id).await)
}

#[utoipa::path(
    post,
    path = "/transactions/{transaction_id}/release-escrow",
    params(("transaction_id" = String, Path, description = "Transaction identifier")),
    tag = "Transactions",
    responses(
        (status = 200, body = Transaction),
        (status = 401, description = "Session rejected by the backend"),
        (status = 502, description = "Backend refused the release")
    )
)]
pub async fn release_escrow(
    CurrentSession(session): CurrentSession,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = transactions::release_escrow(session.auth(), &transaction_id).await?;
    Ok(Json(transaction))
}
