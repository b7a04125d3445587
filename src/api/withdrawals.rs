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
    models::{Withdrawal, WithdrawalRequest, WithdrawalStatus},
    screens::{
        withdrawals::{self, WithdrawalFilter},
        DateRange, Paging,
    },
    session::CurrentSession,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WithdrawalQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<WithdrawalStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Matches the payout reference and the account holder.
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/withdrawals",
    params(WithdrawalQuery),
    tag = "Withdrawals",
    responses((status = 200, description = "One page of withdrawals with an optional stale-data notice"))
)]
pub async fn list_withdrawals(
    CurrentSession(session): CurrentSession,
    Query(params): Query<WithdrawalQuery>,
) -> Json<Watched<Vec<Withdrawal>>> {
    let filter = WithdrawalFilter::new(
        Paging::new(params.page, params.limit),
        params.status,
        DateRange::or_default(params.start_date, params.end_date, Utc::now()),
    );
    Json(withdrawals::list(session.auth(), &filter, params.search.as_deref()).await)
}

#[utoipa::path(
    post,
    path = "/withdrawals/{withdrawal_id}/confirm",
    params(("withdrawal_id" = String, Path, description = "Withdrawal identifier")),
    tag = "Withdrawals",
    responses(
        (status = 200, body = WithdrawalRequest),
        (status = 502, description = "Backend refused the payout")
    )
)]
pub async fn confirm_withdrawal(
    CurrentSession(session): CurrentSession,
    Path(withdrawal_id): Path<String>,
) -> Result<Json<WithdrawalRequest>, ApiError> {
    Ok(Json(withdrawals::confirm(session.auth(), &withdrawal_id).await?))
}
