// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! System configuration screen.
//!
//! Settings are shown grouped by the key prefix before the first `_`
//! (`ESCROW_FEE_PERCENT` belongs to `ESCROW`), in the order the backend
//! returns them.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{mutate, require};
use crate::error::ScreenError;
use crate::gateway::{Operation, Watched};
use crate::models::SystemConfig;
use crate::session::AuthState;

pub const GET_SYSTEM_CONFIGS: Operation = Operation {
    name: "GetSystemConfigs",
    document: r#"query GetSystemConfigs {
  getSystemConfigs {
    id
    key
    value
    description
    createdAt
    updatedAt
  }
}"#,
};

pub const UPDATE_SYSTEM_CONFIG: Operation = Operation {
    name: "UpdateSystemConfig",
    document: r#"mutation UpdateSystemConfig($input: SystemConfigInput!) {
  updateSystemConfig(input: $input) {
    id
    key
    value
    description
    createdAt
    updatedAt
  }
}"#,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigInput {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SettingsGroup {
    pub category: String,
    pub configs: Vec<SystemConfig>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigsData {
    get_system_configs: Vec<SystemConfig>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_system_config: SystemConfig,
}

/// Group configs by category, keeping first-seen order.
pub fn group(configs: Vec<SystemConfig>) -> Vec<SettingsGroup> {
    let mut groups: Vec<SettingsGroup> = Vec::new();
    for config in configs {
        let category = config.category().to_string();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.configs.push(config),
            None => groups.push(SettingsGroup {
                category,
                configs: vec![config],
            }),
        }
    }
    groups
}

pub async fn list(auth: &AuthState) -> Watched<Vec<SettingsGroup>> {
    auth.gateway()
        .watch_query::<ConfigsData>(&GET_SYSTEM_CONFIGS, json!({}))
        .await
        .map(|data| group(data.get_system_configs))
}

pub async fn update(auth: &AuthState, input: SystemConfigInput) -> Result<SystemConfig, ScreenError> {
    require(&input.key, "Setting key is required")?;
    let data: UpdateData = mutate(auth, &UPDATE_SYSTEM_CONFIG, json!({ "input": input })).await?;
    Ok(data.update_system_config)
}
