// App-proxy version info adapter

use crate::error::Result;
use crate::graphql::graphql_data;
use crate::transport::Transport;
use async_trait::async_trait;
use codefresh_core::domain::VersionInfo;
use codefresh_core::port::VersionInfoApi;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const VERSION_INFO: &str = r#"
query VersionInfo {
	versionInfo {
		version
		platformHost
		platformVersion
	}
}"#;

#[derive(Debug, Clone)]
pub struct VersionInfos {
    transport: Transport,
}

impl VersionInfos {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl VersionInfoApi for VersionInfos {
    async fn version_info(&self, ctx: &CancellationToken) -> Result<VersionInfo> {
        graphql_data(ctx, &self.transport, VERSION_INFO, &json!({}))
            .await
            .map_err(|e| e.context("failed getting version info"))
    }
}
