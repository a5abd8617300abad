// Cluster adapter: cursor-paginated listing

use crate::error::Result;
use crate::graphql::graphql_data;
use crate::transport::Transport;
use async_trait::async_trait;
use codefresh_core::application::collect_pages;
use codefresh_core::domain::platform::Cluster;
use codefresh_core::domain::Slice;
use codefresh_core::port::ClusterApi;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const CLUSTERS_QUERY: &str = r#"
query clusters($runtime: String, $pagination: SlicePaginationArgs) {
	clusters(runtime: $runtime, pagination: $pagination) {
		edges {
			node {
				metadata {
					name
					runtime
				}
				server
				info {
					connectionState {
						status
						message
					}
					serverVersion
					cacheInfo {
						resourcesCount
						apisCount
					}
				}
			}
		}
		pageInfo {
			endCursor
			hasNextPage
		}
	}
}"#;

#[derive(Debug, Clone)]
pub struct Clusters {
    transport: Transport,
}

impl Clusters {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    async fn page(
        &self,
        ctx: &CancellationToken,
        runtime: &str,
        after: String,
    ) -> Result<Slice<Cluster>> {
        let variables = json!({
            "runtime": runtime,
            "pagination": { "after": after },
        });

        graphql_data(ctx, &self.transport, CLUSTERS_QUERY, &variables)
            .await
            .map_err(|e| e.context("failed getting cluster list"))
    }
}

#[async_trait]
impl ClusterApi for Clusters {
    async fn list(&self, ctx: &CancellationToken, runtime: &str) -> Result<Vec<Cluster>> {
        collect_pages(|after| self.page(ctx, runtime, after)).await
    }
}
