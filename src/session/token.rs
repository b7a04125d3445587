// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token expiry decoding.
//!
//! The console never verifies token signatures; the GraphQL backend does
//! that. It only reads the `exp` claim from the payload segment to decide
//! whether a stored session is worth re-validating.
//!
//! Anything that cannot be decoded counts as expired.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Base64url, padding optional. JWT payloads are normally encoded this way.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Standard alphabet, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the payload segment (second `.`-delimited part) as JSON.
fn decode_payload(token: &str) -> Option<Value> {
    let segment = token.split('.').nth(1)?;
    let bytes = URL_SAFE_LENIENT
        .decode(segment)
        .or_else(|_| STANDARD_LENIENT.decode(segment))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// The numeric `exp` claim in seconds, if the token carries one.
fn expiry_seconds(token: &str) -> Option<f64> {
    decode_payload(token)?.get("exp")?.as_f64()
}

/// Expiry instant of the token, if it can be decoded.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let exp = expiry_seconds(token)?;
    DateTime::from_timestamp_millis((exp * 1000.0) as i64)
}

/// Whether `token` is expired at `now`.
///
/// Returns `true` when `exp * 1000 < now` in milliseconds, and for every token
/// that has no payload segment, bad base64, bad JSON or a non-numeric `exp`.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match expiry_seconds(token) {
        Some(exp) => exp * 1000.0 < now.timestamp_millis() as f64,
        None => true,
    }
}

/// Whether `token` is expired right now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}
