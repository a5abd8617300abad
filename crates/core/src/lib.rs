// Codefresh Core - Domain models, capability ports and shared algorithms
// NO HTTP dependencies: adapters live in the sdk crate

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{ApiError, ClientError, GraphqlError, GraphqlErrorResponse, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
