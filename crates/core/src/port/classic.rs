// Classic REST API ports

use crate::domain::classic::{Pipeline, RunOptions, Token, User, Workflow};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait ClassicPipelineApi: Send + Sync {
    /// List pipelines, filtered by raw query parameters
    async fn list(
        &self,
        ctx: &CancellationToken,
        query: &BTreeMap<String, String>,
    ) -> Result<Vec<Pipeline>>;

    /// Trigger a pipeline and return the new build ID
    async fn run(&self, ctx: &CancellationToken, name: &str, options: &RunOptions)
        -> Result<String>;
}

#[async_trait]
pub trait TokenApi: Send + Sync {
    /// Create a token scoped to a runtime environment
    ///
    /// The returned token carries its secret in `value`.
    async fn create(&self, ctx: &CancellationToken, name: &str, subject: &str) -> Result<Token>;

    async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Token>>;
}

/// Builds ("workflows" in the classic API)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn get(&self, ctx: &CancellationToken, id: &str) -> Result<Workflow>;
}

#[async_trait]
pub trait ClassicUserApi: Send + Sync {
    async fn current(&self, ctx: &CancellationToken) -> Result<User>;
}
