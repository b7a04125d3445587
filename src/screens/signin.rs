// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Email/password sign-in.
//!
//! A successful sign-in writes the raw token to the `authToken` cookie
//! (HttpOnly) and then records token and user in the auth state, which
//! persists the snapshot cookie.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::mutate;
use crate::error::ScreenError;
use crate::gateway::Operation;
use crate::models::UserSummary;
use crate::session::{token, AuthState, CookieOptions, AUTH_TOKEN_KEY};

pub const SIGN_IN_WITH_EMAIL: Operation = Operation {
    name: "SigninWithEmail",
    document: r#"mutation SigninWithEmail($input: SigninWithEmailInput!) {
  signinWithEmail(input: $input) {
    token
    user {
      id
      email
      firstName
      lastName
      phoneNumber
      profileImageUrl
      accountType
      verified
      createdAt
    }
  }
}"#,
};

#[derive(Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct SigninPayload {
    token: String,
    user: UserSummary,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SigninData {
    signin_with_email: SigninPayload,
}

/// Exchange credentials for a session and return the signed-in user.
pub async fn sign_in(auth: &AuthState, credentials: Credentials) -> Result<UserSummary, ScreenError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(ScreenError::validation("Please enter email and password"));
    }

    let data: SigninData = mutate(auth, &SIGN_IN_WITH_EMAIL, json!({ "input": credentials })).await?;
    let SigninPayload { token, user } = data.signin_with_email;

    auth.store()
        .set(AUTH_TOKEN_KEY, &token, CookieOptions::http_only());
    let authenticated = !token::is_expired(&token);
    auth.set_token(Some(token));
    auth.set_user(Some(user.clone()));
    auth.set_is_authenticated(authenticated);

    tracing::info!(user_id = %user.id, "Admin signed in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayClient, ResponseCache};
    use crate::session::token::tests::token_expiring_at;
    use crate::session::{CredentialStore, MemoryStore, SnapshotCodec};
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use url::Url;
    use wiremock::matchers::{body_partial_json, header_exists, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn anonymous(server: &MockServer) -> (Arc<MemoryStore>, AuthState) {
        let store = Arc::new(MemoryStore::new());
        let gateway = GatewayClient::new(
            Url::parse(&server.uri()).unwrap(),
            reqwest::Client::new(),
            store.clone(),
            Arc::new(ResponseCache::default()),
        );
        (store.clone(), AuthState::new(store, gateway))
    }

    #[tokio::test]
    async fn blank_credentials_are_rejected_locally() {
        let server = MockServer::start().await;
        let (_, auth) = anonymous(&server);

        let err = sign_in(&auth, Credentials { email: "ops@tanscrow.com".into(), password: "".into() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter email and password");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_stores_token_and_user() {
        let server = MockServer::start().await;
        let token = token_expiring_at((Utc::now() + Duration::hours(4)).timestamp());
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "input": {
                "email": "ops@tanscrow.com", "password": "hunter22"
            } } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "signinWithEmail": {
                "token": token,
                "user": { "id": "admin_1", "firstName": "Tolu", "lastName": "Ade", "accountType": "ADMIN" }
            } } })))
            .expect(1)
            .mount(&server)
            .await;

        let (store, auth) = anonymous(&server);
        let user = sign_in(&auth, Credentials {
            email: "ops@tanscrow.com".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();

        assert_eq!(user.id, "admin_1");
        assert_eq!(store.get(AUTH_TOKEN_KEY), Some(token.clone()));
        assert!(auth.is_authenticated());
        let snapshot = SnapshotCodec::new(store.as_ref()).load().unwrap();
        assert_eq!(snapshot.token, Some(token));
        assert_eq!(snapshot.user.map(|u| u.id).as_deref(), Some("admin_1"));
    }

    #[tokio::test]
    async fn sign_in_request_carries_no_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Invalid email or password" }]
            })))
            .mount(&server)
            .await;

        let (store, auth) = anonymous(&server);
        let err = sign_in(&auth, Credentials { email: "ops@tanscrow.com".into(), password: "wrong".into() })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn debug_redacts_password() {
        let credentials = Credentials { email: "a@b.c".into(), password: "secret".into() };
        assert!(!format!("{credentials:?}").contains("secret"));
    }
}
