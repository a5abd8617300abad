// Platform (GraphQL) models: clusters, runtimes, pipelines, users

use serde::{Deserialize, Serialize};

/// Object metadata shared by platform entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: Option<String>,
    pub runtime: Option<String>,
}

/// Sync/health summary of the backing Argo CD application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSelf {
    pub health_status: Option<String>,
    pub health_message: Option<String>,
    pub sync_status: Option<String>,
    pub version: Option<String>,
}

// ============================================================================
// Cluster
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub metadata: ObjectMeta,
    pub server: String,
    #[serde(default)]
    pub info: ClusterInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterInfo {
    pub connection_state: ConnectionState,
    pub server_version: Option<String>,
    pub cache_info: CacheInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionState {
    pub status: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheInfo {
    pub resources_count: i64,
    pub apis_count: i64,
}

// ============================================================================
// Runtime
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Runtime {
    pub metadata: ObjectMeta,
    #[serde(rename = "self", default)]
    pub self_status: Option<ResourceSelf>,
    pub sync_status: Option<String>,
    pub health_status: Option<String>,
    pub health_message: Option<String>,
    pub cluster: Option<String>,
    #[serde(default)]
    pub managed: bool,
    pub is_remote_cluster_connected: Option<bool>,
    pub ingress_host: Option<String>,
    pub internal_ingress_host: Option<String>,
    pub ingress_class: Option<String>,
    pub ingress_controller: Option<String>,
    pub runtime_version: Option<String>,
    pub installation_status: Option<String>,
    pub installation_type: Option<String>,
    pub repo: Option<String>,
    pub managed_clusters_num: Option<i64>,
    pub git_provider: Option<String>,
    pub access_mode: Option<String>,
}

impl Runtime {
    /// Host of the runtime's app-proxy
    ///
    /// The internal ingress host wins over the public one; empty values count
    /// as unset.
    pub fn app_proxy_host(&self) -> Option<&str> {
        [&self.internal_ingress_host, &self.ingress_host]
            .into_iter()
            .filter_map(|host| host.as_deref())
            .find(|host| !host.is_empty())
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub metadata: ObjectMeta,
    #[serde(rename = "self", default)]
    pub self_status: Option<ResourceSelf>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub spec: Option<PipelineSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineSpec {
    pub trigger: Option<String>,
}

/// Filters accepted by the `pipelines` query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinesFilterArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub accounts: Vec<AccountRef>,
    pub active_account: Option<Account>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub git_provider: Option<String>,
    pub git_api_url: Option<String>,
    pub shared_config_repo: Option<String>,
    #[serde(default)]
    pub admins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn runtime(internal: Option<&str>, public: Option<&str>) -> Runtime {
        Runtime {
            internal_ingress_host: internal.map(str::to_string),
            ingress_host: public.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_app_proxy_host_prefers_internal_ingress() {
        let rt = runtime(Some("https://internal.local"), Some("https://public.io"));
        assert_eq!(rt.app_proxy_host(), Some("https://internal.local"));
    }

    #[test]
    fn test_app_proxy_host_skips_empty_internal_ingress() {
        let rt = runtime(Some(""), Some("https://public.io"));
        assert_eq!(rt.app_proxy_host(), Some("https://public.io"));
    }

    #[test]
    fn test_app_proxy_host_missing() {
        assert_eq!(runtime(None, Some("")).app_proxy_host(), None);
        assert_eq!(runtime(None, None).app_proxy_host(), None);
    }

    #[test]
    fn test_runtime_decodes_self_block() {
        let rt: Runtime = serde_json::from_value(json!({
            "metadata": {"name": "rt1", "namespace": "codefresh"},
            "self": {"syncStatus": "SYNCED", "healthStatus": "HEALTHY"},
            "ingressHost": "https://rt1.example.com",
            "managed": false
        }))
        .unwrap();

        assert_eq!(rt.metadata.name, "rt1");
        assert_eq!(
            rt.self_status.unwrap().sync_status.as_deref(),
            Some("SYNCED")
        );
        assert_eq!(rt.ingress_host.as_deref(), Some("https://rt1.example.com"));
    }

    #[test]
    fn test_filter_args_omit_unset_fields() {
        let filters = PipelinesFilterArgs {
            runtime: Some("rt1".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(filters).unwrap(), json!({"runtime": "rt1"}));
    }
}
