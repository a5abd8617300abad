//! Classic REST API ("v1")

pub mod pipeline;
pub mod token;
pub mod user;
pub mod workflow;

use crate::transport::Transport;

pub use pipeline::Pipelines;
pub use token::Tokens;
pub use user::Users;
pub use workflow::Workflows;

/// Accessors for the classic REST resources
#[derive(Debug, Clone)]
pub struct V1 {
    transport: Transport,
}

impl V1 {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn pipeline(&self) -> Pipelines {
        Pipelines::new(self.transport.clone())
    }

    pub fn token(&self) -> Tokens {
        Tokens::new(self.transport.clone())
    }

    pub fn user(&self) -> Users {
        Users::new(self.transport.clone())
    }

    pub fn workflow(&self) -> Workflows {
        Workflows::new(self.transport.clone())
    }
}
