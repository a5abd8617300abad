//! Codefresh SDK - Rust Client Library
//!
//! Exposes the platform's classic REST API, its GraphQL API and the
//! runtime-scoped app-proxy API as typed operations. All I/O goes through a
//! single [`Transport`]; resource adapters only build requests and map
//! results.
//!
//! # Example
//!
//! ```no_run
//! use codefresh_sdk::{ClientOptions, Codefresh, CancellationToken};
//! use codefresh_sdk::port::ClusterApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Codefresh::new(ClientOptions::new("https://g.codefresh.io", "my-api-key"))?;
//!     let ctx = CancellationToken::new();
//!
//!     for cluster in client.v2().cluster().list(&ctx, "my-runtime").await? {
//!         println!("{} -> {}", cluster.metadata.name, cluster.server);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod app_proxy;
pub mod classic;
mod client;
pub mod config;
mod error;
pub mod graphql;
pub mod platform;
pub mod transport;

pub use client::Codefresh;
pub use config::ClientOptions;
pub use error::{ApiError, ClientError, GraphqlError, GraphqlErrorResponse, Result};
pub use graphql::{graphql_api, GraphqlOutcome};
pub use transport::{escape_path_segment, QueryValue, RequestSpec, TlsPolicy, Transport};

pub use codefresh_core::application::constants::{
    DEFAULT_WAIT_INTERVAL, DEFAULT_WAIT_TIMEOUT, WORKFLOW_STATUS_SUCCESS,
};
pub use codefresh_core::application::PageLimit;
pub use codefresh_core::{application, domain, port};
pub use tokio_util::sync::CancellationToken;
