// Classic user adapter

use crate::error::Result;
use crate::transport::{RequestSpec, Transport};
use async_trait::async_trait;
use codefresh_core::domain::classic::User;
use codefresh_core::port::ClassicUserApi;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct Users {
    transport: Transport,
}

impl Users {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ClassicUserApi for Users {
    async fn current(&self, ctx: &CancellationToken) -> Result<User> {
        self.transport
            .rest_json(ctx, RequestSpec::get("/api/user"))
            .await
            .map_err(|e| e.context("failed getting current user"))
    }
}
