// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Admin Data Models
//!
//! Entities returned by the Tanscrow GraphQL API and the inputs the admin
//! screens send back. Field names follow the backend's camelCase wire format
//! and enum values its SCREAMING_SNAKE_CASE.
//!
//! Timestamps are kept as the backend's strings; the console only displays
//! them. Selection sets differ between screens, so most non-key fields are
//! optional or defaulted.
//!
//! ## Model Categories
//!
//! - **Users**: [`UserSummary`], [`UserDetail`], [`UserPage`]
//! - **Transactions**: [`Transaction`], [`TransactionLog`]
//! - **Disputes**: [`Dispute`], [`Evidence`]
//! - **Wallet**: [`Withdrawal`], [`WithdrawalRequest`]
//! - **Compliance**: [`VerificationDocument`], [`AuditLogPage`]
//! - **System**: [`SystemConfig`], [`Notification`], reports and stats

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    InProgress,
    Completed,
    Delivered,
    Canceled,
    Disputed,
    RefundRequested,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscrowStatus {
    NotFunded,
    Funded,
    Released,
    Refunded,
    PartiallyRefunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    Opened,
    InReview,
    ResolvedForBuyer,
    ResolvedForSeller,
    ResolvedCompromise,
    Closed,
}

impl DisputeStatus {
    /// Statuses an admin may move a dispute into when resolving it.
    pub fn is_resolution(self) -> bool {
        matches!(
            self,
            DisputeStatus::ResolvedForBuyer
                | DisputeStatus::ResolvedForSeller
                | DisputeStatus::ResolvedCompromise
                | DisputeStatus::Closed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    NationalId,
    DriversLicense,
    Passport,
    VotersCard,
    BusinessRegistration,
    UtilityBill,
    Other,
}

/// Status of a wallet withdrawal. Unrecognised backend values decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalStatus {
    Pending,
    Completed,
    Failed,
    Reversed,
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Users
// =============================================================================

/// The slice of a backend user the console displays.
///
/// This is also the identity persisted in the session snapshot. It is always
/// replaced wholesale, never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub account_type: Option<AccountType>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Case-insensitive match against name and email.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.full_name().to_lowercase().contains(&needle)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub reviewer: Option<UserSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Full user record for the user detail screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub summary: UserSummary,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub reviews_received: Vec<Review>,
}

/// Paginated user listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<UserSummary>,
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLog {
    pub id: String,
    pub action: String,
    pub status: TransactionStatus,
    pub escrow_status: EscrowStatus,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub transaction_code: String,
    #[serde(default)]
    pub seller: Option<UserSummary>,
    #[serde(default)]
    pub buyer: Option<UserSummary>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_currency: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub escrow_fee: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub payment_reference: Option<String>,
    pub status: TransactionStatus,
    pub escrow_status: EscrowStatus,
    #[serde(default)]
    pub delivery_method: Option<String>,
    #[serde(default)]
    pub tracking_info: Option<String>,
    #[serde(default)]
    pub expected_delivery_date: Option<String>,
    #[serde(default)]
    pub actual_delivery_date: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub canceled_at: Option<String>,
    #[serde(default)]
    pub refunded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<TransactionLog>>,
}

impl Transaction {
    /// Case-insensitive match against code, title and party names.
    pub fn matches(&self, needle: &str) -> bool {
        let lowered = needle.to_lowercase();
        self.transaction_code.to_lowercase().contains(&lowered)
            || self
                .title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&lowered))
            || self.buyer.as_ref().is_some_and(|u| u.matches(needle))
            || self.seller.as_ref().is_some_and(|u| u.matches(needle))
    }
}

// =============================================================================
// Disputes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    pub evidence_type: String,
    #[serde(default)]
    pub evidence_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: String,
    pub status: DisputeStatus,
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub transaction: Option<Transaction>,
    #[serde(default)]
    pub initiator: Option<UserSummary>,
    #[serde(default)]
    pub moderator: Option<UserSummary>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<String>,
}

// =============================================================================
// Wallet
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalWallet {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub escrow_balance: f64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// A withdrawal as it appears in the wallet ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub reference: String,
    pub status: WithdrawalStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub balance_before: f64,
    #[serde(default)]
    pub balance_after: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub wallet: Option<WithdrawalWallet>,
}

impl Withdrawal {
    pub fn matches(&self, needle: &str) -> bool {
        self.reference.to_lowercase().contains(&needle.to_lowercase())
            || self
                .wallet
                .as_ref()
                .and_then(|w| w.user.as_ref())
                .is_some_and(|u| u.matches(needle))
    }
}

/// The payout request returned when a withdrawal is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub reference: String,
    pub status: WithdrawalStatus,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

// =============================================================================
// Compliance
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDocument {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub document_type: Option<DocumentType>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub entity_type: String,
    pub action: String,
    pub category: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
    pub has_more: bool,
}

// =============================================================================
// System
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub related_entity_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub id: String,
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SystemConfig {
    /// Settings are grouped by the key prefix before the first `_`.
    pub fn category(&self) -> &str {
        match self.key.split('_').next() {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => "General",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    pub total_users: i64,
    pub total_transactions: i64,
    pub active_disputes: i64,
    pub total_transaction_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: TransactionStatus,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReport {
    pub total_transactions: i64,
    pub total_amount: f64,
    pub total_escrow_fees: f64,
    pub completed_transactions: i64,
    pub canceled_transactions: i64,
    pub disputed_transactions: i64,
    pub average_transaction_amount: f64,
    #[serde(default)]
    pub status_breakdown: Vec<StatusBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisputeReport {
    pub total_disputes: i64,
    pub resolved_disputes: i64,
    pub pending_disputes: i64,
    pub average_resolution_time: f64,
    pub dispute_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_summary_tolerates_partial_selection() {
        let user: UserSummary = serde_json::from_value(json!({
            "id": "u1",
            "firstName": "Ada",
            "lastName": "Obi"
        }))
        .unwrap();
        assert_eq!(user.full_name(), "Ada Obi");
        assert!(user.account_type.is_none());
        assert!(!user.verified);
    }

    #[test]
    fn user_matches_on_name_or_email() {
        let user = UserSummary {
            id: "u1".into(),
            email: Some("ada@tanscrow.com".into()),
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            ..Default::default()
        };
        assert!(user.matches("ADA O"));
        assert!(user.matches("tanscrow"));
        assert!(!user.matches("bayo"));
    }

    #[test]
    fn enums_use_backend_wire_values() {
        assert_eq!(
            serde_json::to_value(DisputeStatus::ResolvedForBuyer).unwrap(),
            json!("RESOLVED_FOR_BUYER")
        );
        assert_eq!(
            serde_json::from_value::<EscrowStatus>(json!("NOT_FUNDED")).unwrap(),
            EscrowStatus::NotFunded
        );
    }

    #[test]
    fn unknown_withdrawal_status_is_tolerated() {
        let status: WithdrawalStatus = serde_json::from_value(json!("PROCESSING")).unwrap();
        assert_eq!(status, WithdrawalStatus::Unknown);
    }

    #[test]
    fn config_category_is_key_prefix() {
        let config = SystemConfig {
            id: "c1".into(),
            key: "ESCROW_FEE_PERCENT".into(),
            value: "1.5".into(),
            description: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(config.category(), "ESCROW");

        let bare = SystemConfig {
            key: "_HIDDEN".into(),
            ..config
        };
        assert_eq!(bare.category(), "General");
    }

    #[test]
    fn only_terminal_dispute_statuses_resolve() {
        assert!(DisputeStatus::ResolvedCompromise.is_resolution());
        assert!(DisputeStatus::Closed.is_resolution());
        assert!(!DisputeStatus::InReview.is_resolution());
    }
}
