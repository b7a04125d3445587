// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User management screen.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{mutate, require, search};
use crate::error::ScreenError;
use crate::gateway::{Operation, Watched};
use crate::models::{AccountType, UserDetail, UserPage, UserSummary};
use crate::session::AuthState;

pub const USERS: Operation = Operation {
    name: "Users",
    document: r#"query Users {
  users {
    users {
      id
      email
      firstName
      lastName
      phoneNumber
      profileImageUrl
      accountType
      verified
      createdAt
      updatedAt
    }
    totalCount
    totalPages
    currentPage
    hasNextPage
    hasPreviousPage
  }
}"#,
};

pub const USER: Operation = Operation {
    name: "User",
    document: r#"query User($id: String!) {
  user(id: $id) {
    id
    email
    firstName
    lastName
    phoneNumber
    profileImageUrl
    accountType
    verified
    createdAt
    updatedAt
    address {
      id
      street
      city
      state
      postalCode
      country
    }
    reviewsReceived {
      id
      rating
      comment
      reviewer {
        id
        firstName
        lastName
        profileImageUrl
      }
      createdAt
    }
  }
}"#,
};

pub const UPDATE_USER_MANAGEMENT: Operation = Operation {
    name: "UpdateUserManagement",
    document: r#"mutation UpdateUserManagement($input: UserManagementInput!) {
  updateUserManagement(input: $input) {
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
}"#,
};

/// Account changes an admin can make to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserManagementInput {
    pub user_id: String,
    pub account_type: AccountType,
    pub verified: bool,
}

#[derive(Deserialize)]
struct UsersData {
    users: UserPage,
}

#[derive(Deserialize)]
struct UserData {
    user: UserDetail,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_user_management: UserSummary,
}

/// The user list, narrowed by `needle` over name and email.
pub async fn list(auth: &AuthState, needle: Option<&str>) -> Watched<UserPage> {
    auth.gateway()
        .watch_query::<UsersData>(&USERS, json!({}))
        .await
        .map(|data| {
            let mut page = data.users;
            page.users = search(page.users, needle, UserSummary::matches);
            page
        })
}

pub async fn detail(auth: &AuthState, id: &str) -> Watched<UserDetail> {
    auth.gateway()
        .watch_query::<UserData>(&USER, json!({ "id": id }))
        .await
        .map(|data| data.user)
}

pub async fn update_management(
    auth: &AuthState,
    input: UserManagementInput,
) -> Result<UserSummary, ScreenError> {
    require(&input.user_id, "User id is required")?;
    let data: UpdateData = mutate(auth, &UPDATE_USER_MANAGEMENT, json!({ "input": input })).await?;
    Ok(data.update_user_management)
}
