// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth snapshot serialization on top of a [`CredentialStore`].

use serde::{Deserialize, Serialize};

use super::store::{CookieOptions, CredentialStore};
use crate::models::UserSummary;

/// Key the serialized snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "tanscrow-admin-auth";

/// The persisted part of the auth state.
///
/// Transient fields (`loading`, `error`) are never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Reads and writes [`Credential`] snapshots as JSON.
pub struct SnapshotCodec<'a> {
    store: &'a dyn CredentialStore,
}

impl<'a> SnapshotCodec<'a> {
    pub fn new(store: &'a dyn CredentialStore) -> Self {
        Self { store }
    }

    /// Load the snapshot. Missing or corrupt snapshots read as `None`.
    pub fn load(&self) -> Option<Credential> {
        let raw = self.store.get(SNAPSHOT_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable auth snapshot");
                None
            }
        }
    }

    /// Persist the snapshot. It carries the token, so scripts never see it.
    pub fn save(&self, credential: &Credential) {
        match serde_json::to_string(credential) {
            Ok(raw) => self.store.set(SNAPSHOT_KEY, &raw, CookieOptions::http_only()),
            Err(e) => tracing::error!(error = %e, "Failed to serialize auth snapshot"),
        }
    }

    /// Remove the snapshot under every scope.
    pub fn clear(&self) {
        self.store.purge(SNAPSHOT_KEY);
    }
}
