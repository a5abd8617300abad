//! Platform GraphQL API ("v2")

pub mod cluster;
pub mod pipeline;
pub mod runtime;
pub mod user;

use crate::app_proxy::AppProxy;
use crate::error::{ClientError, Result};
use crate::transport::Transport;
use codefresh_core::port::RuntimeApi;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use cluster::Clusters;
pub use pipeline::Pipelines;
pub use runtime::Runtimes;
pub use user::Users;

/// Accessors for the platform GraphQL resources
#[derive(Debug, Clone)]
pub struct V2 {
    transport: Transport,
}

impl V2 {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn cluster(&self) -> Clusters {
        Clusters::new(self.transport.clone())
    }

    pub fn pipeline(&self) -> Pipelines {
        Pipelines::new(self.transport.clone())
    }

    pub fn runtime(&self) -> Runtimes {
        Runtimes::new(self.transport.clone())
    }

    pub fn user(&self) -> Users {
        Users::new(self.transport.clone())
    }

    /// Client for the app-proxy of `runtime`
    ///
    /// Looks the runtime up, takes its internal ingress host (falling back to
    /// the public one) and derives a transport for it. `insecure` disables TLS
    /// certificate verification on the derived transport only.
    pub async fn app_proxy(
        &self,
        ctx: &CancellationToken,
        runtime: &str,
        insecure: bool,
    ) -> Result<AppProxy> {
        let wrap = |e: ClientError| e.context("failed to create app-proxy client");

        let rt = self.runtime().get(ctx, runtime).await.map_err(wrap)?;
        let host = rt
            .app_proxy_host()
            .ok_or_else(|| ClientError::MissingIngressHost {
                runtime: runtime.to_string(),
            })
            .map_err(wrap)?;

        debug!(runtime = %runtime, host = %host, insecure, "Resolved app-proxy host");

        let transport = self
            .transport
            .app_proxy_transport(host, insecure)
            .map_err(wrap)?;

        Ok(AppProxy::new(transport))
    }
}
