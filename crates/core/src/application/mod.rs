// Application Layer - Transport-agnostic algorithms shared by the adapters

pub mod constants;
pub mod pagination;
pub mod wait;

// Re-exports
pub use pagination::{collect_pages, collect_pages_with_limit, PageLimit};
pub use wait::{wait_for, wait_for_workflow_status};
