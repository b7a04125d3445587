// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Gateway
//!
//! The single request pipeline between the console and the Tanscrow GraphQL
//! API: bearer authorization from the credential store, fetch/error policies
//! and per-session response caching.

pub mod cache;
pub mod client;
pub mod error;

pub use cache::{ResponseCache, SessionCaches};
pub use client::{ErrorPolicy, GatewayClient, Operation, Watched};
pub use error::{GatewayError, GraphQlError};
