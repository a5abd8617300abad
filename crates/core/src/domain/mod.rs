// Domain Layer - Platform entities as they appear on the wire

pub mod app_proxy;
pub mod classic;
pub mod page;
pub mod platform;

// Re-exports
pub use app_proxy::VersionInfo;
pub use page::{Edge, PageInfo, Slice};
