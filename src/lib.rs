// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tanscrow Admin - Staff Console Edge Server
//!
//! Guards staff navigation, keeps the cookie-backed admin session alive and
//! fronts the Tanscrow GraphQL API for the admin screens.
//!
//! ## Modules
//!
//! - `api` - HTTP routes and handlers (Axum)
//! - `gateway` - GraphQL client with per-session response cache
//! - `screens` - One module per admin screen
//! - `session` - Credential cookies, auth state, bootstrap and route guard

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod screens;
pub mod session;
pub mod state;
