// Platform pipeline adapter

use crate::error::Result;
use crate::graphql::graphql_data;
use crate::transport::Transport;
use async_trait::async_trait;
use codefresh_core::domain::platform::{Pipeline, PipelinesFilterArgs};
use codefresh_core::domain::Slice;
use codefresh_core::port::PipelineApi;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const GET_PIPELINE: &str = r#"
query Pipeline(
	$runtime: String!
	$name: String!
	$namespace: String
) {
	pipeline(name: $name, namespace: $namespace, runtime: $runtime) {
		metadata {
			name
			namespace
			runtime
		}
		self {
			healthStatus
			syncStatus
			version
		}
		projects
		spec {
			trigger
		}
	}
}"#;

const LIST_PIPELINES: &str = r#"
query Pipelines($filters: PipelinesFilterArgs) {
	pipelines(filters: $filters) {
		edges {
			node {
				metadata {
					name
					namespace
					runtime
				}
				self {
					healthStatus
					syncStatus
					version
				}
				projects
				spec {
					trigger
				}
			}
		}
	}
}"#;

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
impl PipelineApi for Pipelines {
    async fn get(
        &self,
        ctx: &CancellationToken,
        name: &str,
        namespace: &str,
        runtime: &str,
    ) -> Result<Pipeline> {
        let variables = json!({
            "runtime": runtime,
            "name": name,
            "namespace": namespace,
        });

        graphql_data(ctx, &self.transport, GET_PIPELINE, &variables)
            .await
            .map_err(|e| e.context("failed getting a pipeline"))
    }

    async fn list(
        &self,
        ctx: &CancellationToken,
        filters: &PipelinesFilterArgs,
    ) -> Result<Vec<Pipeline>> {
        let slice: Slice<Pipeline> =
            graphql_data(ctx, &self.transport, LIST_PIPELINES, &json!({ "filters": filters }))
                .await
                .map_err(|e| e.context("failed getting pipeline list"))?;

        Ok(slice.into_nodes())
    }
}
