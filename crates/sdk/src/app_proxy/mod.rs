//! App-proxy API (runtime-scoped GraphQL)

pub mod version_info;

use crate::transport::Transport;

pub use version_info::VersionInfos;

/// Client bound to one runtime's app-proxy
///
/// Obtained through [`V2::app_proxy`](crate::platform::V2::app_proxy).
#[derive(Debug, Clone)]
pub struct AppProxy {
    transport: Transport,
}

impl AppProxy {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn version_info(&self) -> VersionInfos {
        VersionInfos::new(self.transport.clone())
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}
