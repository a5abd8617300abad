// App-proxy API ports

use crate::domain::VersionInfo;
use crate::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait VersionInfoApi: Send + Sync {
    async fn version_info(&self, ctx: &CancellationToken) -> Result<VersionInfo>;
}
