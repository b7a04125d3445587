// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Admin Session
//!
//! Everything that decides who the staff member is:
//!
//! - `token` - reads the expiry out of a bearer token without verifying it
//! - `store` - cookie-backed credential storage with multi-scope removal
//! - `snapshot` - JSON persistence of the auth state on top of a store
//! - `auth` - the in-memory auth state and the single logout path
//! - `bootstrap` - re-establishes identity on every protected request
//! - `guard` - presence-only edge redirects between sign-in and the console
//! - `context` - the per-request [`Session`] and its middleware/extractor

pub mod auth;
pub mod bootstrap;
pub mod context;
pub mod guard;
pub mod snapshot;
pub mod store;
pub mod token;

pub use auth::AuthState;
pub use bootstrap::{bootstrap, BootOutcome, BootState, SESSION_EXPIRED_NOTICE};
pub use context::{require_session, CurrentSession, Session};
pub use guard::{decide, route_guard, Decision, HOME_PATH, SIGN_IN_PATH};
pub use snapshot::{Credential, SnapshotCodec, SNAPSHOT_KEY};
pub use store::{CookieOptions, CookieStore, CredentialStore, MemoryStore, AUTH_TOKEN_KEY};
