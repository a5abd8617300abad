// Classic (REST) models: pipelines, builds, tokens, users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Pipeline
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub metadata: PipelineMetadata,
    #[serde(default)]
    pub spec: PipelineSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineMetadata {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub original_yaml_string: Option<String>,
    #[serde(rename = "created_at", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updated_at", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSpec {
    pub triggers: Vec<Trigger>,
    pub variables: Vec<Variable>,
    pub steps: serde_json::Map<String, serde_json::Value>,
    pub stages: Vec<serde_json::Value>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: String,
    pub events: Vec<String>,
    pub provider: String,
    pub context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Options for running a classic pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub variables: BTreeMap<String, String>,
}

// ============================================================================
// Workflow (build)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub user_yaml_descriptor: Option<String>,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished: Option<DateTime<Utc>>,
}

// ============================================================================
// Token
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub token_prefix: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: TokenSubject,
    /// Secret value, only known right after creation
    #[serde(skip)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSubject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Entity a token is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSubjectType {
    RuntimeEnvironment,
}

impl std::fmt::Display for TokenSubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSubjectType::RuntimeEnvironment => write!(f, "runtime-environment"),
        }
    }
}

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userName")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "account", default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub active_account_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(rename = "user_data", default)]
    pub user_data: UserData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    #[serde(rename = "image")]
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl User {
    /// Account matching `activeAccountName`, if the user belongs to it
    pub fn active_account(&self) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.name == self.active_account_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_active_account() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "userName": "jane",
            "account": [{"name": "a", "_id": "1"}, {"name": "b", "_id": "2"}],
            "activeAccountName": "b"
        }))
        .unwrap();

        assert_eq!(user.active_account().map(|a| a.id.as_str()), Some("2"));
    }

    #[test]
    fn test_user_without_matching_account() {
        let user = User {
            active_account_name: "missing".to_string(),
            ..Default::default()
        };
        assert!(user.active_account().is_none());
    }

    #[test]
    fn test_workflow_timestamps() {
        let wf: Workflow = serde_json::from_value(json!({
            "id": "b1",
            "status": "running",
            "created": "2024-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(wf.status, "running");
        assert!(wf.created.is_some());
        assert!(wf.finished.is_none());
    }

    #[test]
    fn test_token_subject_type_display() {
        assert_eq!(
            TokenSubjectType::RuntimeEnvironment.to_string(),
            "runtime-environment"
        );
    }
}
