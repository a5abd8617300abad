// Port Layer - One capability interface per resource domain
//
// Implementations live in the sdk crate and hold nothing but a handle to the
// shared transport. Every method takes the caller's cancellation token.

pub mod app_proxy;
pub mod classic;
pub mod platform;

// Re-exports
pub use app_proxy::VersionInfoApi;
pub use classic::{ClassicPipelineApi, ClassicUserApi, TokenApi, WorkflowApi};
pub use platform::{ClusterApi, PipelineApi, RuntimeApi, UserApi};

pub use tokio_util::sync::CancellationToken;
