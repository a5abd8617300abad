// Platform GraphQL API ports

use crate::domain::platform::{Cluster, Pipeline, PipelinesFilterArgs, Runtime, User};
use crate::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// All clusters of a runtime, following the cursor until exhausted
    async fn list(&self, ctx: &CancellationToken, runtime: &str) -> Result<Vec<Cluster>>;
}

#[async_trait]
pub trait RuntimeApi: Send + Sync {
    async fn get(&self, ctx: &CancellationToken, name: &str) -> Result<Runtime>;

    async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Runtime>>;

    /// Delete a runtime, returning the server's affected-count
    async fn delete(&self, ctx: &CancellationToken, name: &str) -> Result<i64>;
}

#[async_trait]
pub trait PipelineApi: Send + Sync {
    async fn get(
        &self,
        ctx: &CancellationToken,
        name: &str,
        namespace: &str,
        runtime: &str,
    ) -> Result<Pipeline>;

    async fn list(
        &self,
        ctx: &CancellationToken,
        filters: &PipelinesFilterArgs,
    ) -> Result<Vec<Pipeline>>;
}

#[async_trait]
pub trait UserApi: Send + Sync {
    /// The user the token belongs to
    async fn current(&self, ctx: &CancellationToken) -> Result<User>;
}
