// Workflow (build) adapter

use crate::error::Result;
use crate::transport::{escape_path_segment, RequestSpec, Transport};
use async_trait::async_trait;
use codefresh_core::application::wait_for_workflow_status;
use codefresh_core::domain::classic::Workflow;
use codefresh_core::port::WorkflowApi;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct Workflows {
    transport: Transport,
}

impl Workflows {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Poll build `id` every `interval` until it reports `status`
    ///
    /// Fails with `ClientError::TimedOut` once `timeout` elapses.
    pub async fn wait_for_status(
        &self,
        ctx: &CancellationToken,
        id: &str,
        status: &str,
        interval: Duration,
        timeout: Duration,
    ) -> Result<()> {
        wait_for_workflow_status(self, ctx, id, status, interval, timeout).await
    }
}

#[async_trait]
impl WorkflowApi for Workflows {
    async fn get(&self, ctx: &CancellationToken, id: &str) -> Result<Workflow> {
        let spec = RequestSpec::get(format!("/api/builds/{}", escape_path_segment(id)));
        self.transport
            .rest_json(ctx, spec)
            .await
            .map_err(|e| e.context("failed getting a workflow"))
    }
}
