// Runtime adapter

use crate::error::{ClientError, Result};
use crate::graphql::{graphql_api, graphql_data, GraphqlOutcome};
use crate::transport::Transport;
use async_trait::async_trait;
use codefresh_core::domain::platform::Runtime;
use codefresh_core::domain::Slice;
use codefresh_core::port::RuntimeApi;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const GET_RUNTIME: &str = r#"
query GetRuntime($name: String!) {
	runtime(name: $name) {
		metadata {
			name
			namespace
		}
		self {
			syncStatus
			healthMessage
			healthStatus
		}
		syncStatus
		healthStatus
		healthMessage
		cluster
		managed
		isRemoteClusterConnected
		ingressHost
		internalIngressHost
		ingressClass
		ingressController
		runtimeVersion
		installationStatus
		installationType
		repo
		managedClustersNum
		gitProvider
		accessMode
	}
}"#;

const LIST_RUNTIMES: &str = r#"
query Runtimes {
	runtimes {
		edges {
			node {
				metadata {
					name
					namespace
				}
				self {
					syncStatus
					healthMessage
					healthStatus
				}
				syncStatus
				healthMessage
				healthStatus
				managed
				cluster
				ingressHost
				runtimeVersion
				installationStatus
				installationType
			}
		}
	}
}"#;

const DELETE_RUNTIME: &str = r#"
mutation DeleteRuntime($name: String!) {
	deleteRuntime(name: $name)
}"#;

#[derive(Debug, Clone)]
pub struct Runtimes {
    transport: Transport,
}

impl Runtimes {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl RuntimeApi for Runtimes {
    async fn get(&self, ctx: &CancellationToken, name: &str) -> Result<Runtime> {
        let outcome: GraphqlOutcome<Runtime> =
            graphql_api(ctx, &self.transport, GET_RUNTIME, &json!({ "name": name }))
                .await
                .map_err(|e| e.context("failed getting a runtime"))?;

        let (data, errors) = outcome.into_parts();
        if let Some(errors) = errors {
            return Err(ClientError::from(errors).context("failed getting a runtime"));
        }

        // a missing runtime comes back as `null` or as an unnamed entity
        match data {
            Some(runtime) if !runtime.metadata.name.is_empty() => Ok(runtime),
            _ => Err(ClientError::NotFound {
                kind: "runtime",
                name: name.to_string(),
            }),
        }
    }

    async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Runtime>> {
        let slice: Slice<Runtime> = graphql_data(ctx, &self.transport, LIST_RUNTIMES, &json!({}))
            .await
            .map_err(|e| e.context("failed getting runtime list"))?;

        Ok(slice.into_nodes())
    }

    async fn delete(&self, ctx: &CancellationToken, name: &str) -> Result<i64> {
        graphql_data(ctx, &self.transport, DELETE_RUNTIME, &json!({ "name": name }))
            .await
            .map_err(|e| e.context("failed deleting a runtime"))
    }
}
