// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AccountType, AdminDashboardStats, AuditLog, Dispute, DisputeReport, DisputeStatus,
        EscrowStatus, Notification, SystemConfig, Transaction, TransactionReport,
        TransactionStatus, UserSummary, VerificationDocument, VerificationStatus, Withdrawal,
        WithdrawalRequest, WithdrawalStatus,
    },
    screens::{
        dashboard::Dashboard,
        reports::Reports,
        settings::{SettingsGroup, SystemConfigInput},
        signin::Credentials,
        DateRange,
    },
    session::{require_session, route_guard, SIGN_IN_PATH},
    state::AppState,
};

pub mod audit_logs;
pub mod dashboard;
pub mod disputes;
pub mod health;
pub mod notifications;
pub mod session;
pub mod settings;
pub mod transactions;
pub mod users;
pub mod verification;
pub mod withdrawals;

pub fn router(state: AppState) -> Router {
    let screens = Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/reports", get(dashboard::reports))
        .route("/session", get(session::current_session))
        .route("/users", get(users::list_users))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/management", put(users::update_user_management))
        .route("/transactions", get(transactions::list_transactions))
        .route("/transactions/{transaction_id}", get(transactions::get_transaction))
        .route(
            "/transactions/{transaction_id}/release-escrow",
            post(transactions::release_escrow),
        )
        .route("/disputes", get(disputes::list_disputes))
        .route("/disputes/{dispute_id}", get(disputes::get_dispute))
        .route("/disputes/{dispute_id}/resolve", post(disputes::resolve_dispute))
        .route("/withdrawals", get(withdrawals::list_withdrawals))
        .route(
            "/withdrawals/{withdrawal_id}/confirm",
            post(withdrawals::confirm_withdrawal),
        )
        .route(
            "/verification-documents",
            get(verification::list_pending_documents),
        )
        .route(
            "/verification-documents/{document_id}/review",
            post(verification::review_document),
        )
        .route("/audit-logs", get(audit_logs::list_audit_logs))
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/settings",
            get(settings::list_settings).put(settings::update_setting),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let public = Router::new()
        .route(
            SIGN_IN_PATH,
            get(session::sign_in_form).post(session::sign_in),
        )
        .route("/logout", post(session::logout))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .merge(screens)
        .merge(public)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn(route_guard))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard::dashboard,
        dashboard::reports,
        session::sign_in_form,
        session::sign_in,
        session::logout,
        session::current_session,
        users::list_users,
        users::get_user,
        users::update_user_management,
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::release_escrow,
        disputes::list_disputes,
        disputes::get_dispute,
        disputes::resolve_dispute,
        withdrawals::list_withdrawals,
        withdrawals::confirm_withdrawal,
        verification::list_pending_documents,
        verification::review_document,
        audit_logs::list_audit_logs,
        notifications::list_notifications,
        settings::list_settings,
        settings::update_setting,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            AccountType,
            AdminDashboardStats,
            AuditLog,
            Credentials,
            Dashboard,
            DateRange,
            Dispute,
            DisputeReport,
            DisputeStatus,
            EscrowStatus,
            Notification,
            Reports,
            SettingsGroup,
            SystemConfig,
            SystemConfigInput,
            Transaction,
            TransactionReport,
            TransactionStatus,
            UserSummary,
            VerificationDocument,
            VerificationStatus,
            Withdrawal,
            WithdrawalRequest,
            WithdrawalStatus,
            disputes::ResolveRequest,
            users::ManagementRequest,
            verification::ReviewRequest,
            session::SessionView,
            session::SignInForm,
            health::ReadyResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Session", description = "Sign-in, sign-out and the current admin"),
        (name = "Dashboard", description = "Platform totals and reports"),
        (name = "Users", description = "User management"),
        (name = "Transactions", description = "Escrow transactions"),
        (name = "Disputes", description = "Dispute review and resolution"),
        (name = "Withdrawals", description = "Withdrawal payouts"),
        (name = "Verification", description = "Identity document review"),
        (name = "Audit", description = "Audit log"),
        (name = "Notifications", description = "Admin notifications"),
        (name = "Settings", description = "System configuration"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
