// Classic pipeline adapter

use crate::error::Result;
use crate::transport::{escape_path_segment, RequestSpec, Transport};
use async_trait::async_trait;
use codefresh_core::domain::classic::{Pipeline, RunOptions};
use codefresh_core::port::ClassicPipelineApi;
use serde::Deserialize;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Deserialize)]
struct PipelineList {
    #[serde(default)]
    docs: Vec<Pipeline>,
}

#[derive(Debug, Clone)]
pub struct Pipelines {
    transport: Transport,
}

impl Pipelines {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ClassicPipelineApi for Pipelines {
    async fn list(
        &self,
        ctx: &CancellationToken,
        query: &BTreeMap<String, String>,
    ) -> Result<Vec<Pipeline>> {
        let spec = query
            .iter()
            .fold(RequestSpec::get("/api/pipelines"), |spec, (key, value)| {
                spec.query(key.as_str(), value.as_str())
            });

        let list: PipelineList = self
            .transport
            .rest_json(ctx, spec)
            .await
            .map_err(|e| e.context("failed getting pipeline list"))?;

        Ok(list.docs)
    }

    async fn run(
        &self,
        ctx: &CancellationToken,
        name: &str,
        options: &RunOptions,
    ) -> Result<String> {
        let spec = RequestSpec::post(format!("/api/pipelines/run/{}", escape_path_segment(name)))
            .json(options)?;

        let body = self
            .transport
            .rest_call(ctx, spec)
            .await
            .map_err(|e| e.context("failed running pipeline"))?;

        let build_id = String::from_utf8_lossy(&body).replace('"', "");
        info!(pipeline = %name, build_id = %build_id, "Pipeline triggered");

        Ok(build_id)
    }
}
