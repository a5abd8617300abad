// Token adapter

use crate::error::Result;
use crate::transport::{RequestSpec, Transport};
use async_trait::async_trait;
use codefresh_core::domain::classic::{Token, TokenSubjectType};
use codefresh_core::port::TokenApi;
use serde_json::json;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct Tokens {
    transport: Transport,
}

impl Tokens {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TokenApi for Tokens {
    async fn create(&self, ctx: &CancellationToken, name: &str, subject: &str) -> Result<Token> {
        let spec = RequestSpec::post("/api/auth/key")
            .query("subjectReference", subject)
            .query("subjectType", TokenSubjectType::RuntimeEnvironment.to_string())
            .json(&json!({ "name": name }))?;

        let body = self
            .transport
            .rest_call(ctx, spec)
            .await
            .map_err(|e| e.context("failed creating token"))?;

        // the response body is the secret itself
        Ok(Token {
            name: name.to_string(),
            value: Some(String::from_utf8_lossy(&body).into_owned()),
            ..Default::default()
        })
    }

    async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Token>> {
        self.transport
            .rest_json(ctx, RequestSpec::get("/api/auth/keys"))
            .await
            .map_err(|e| e.context("failed listing tokens"))
    }
}
