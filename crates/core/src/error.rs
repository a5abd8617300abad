// Central Error Type for the SDK

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Underlying cause of a network-level failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// HTTP-level failure: the platform answered with status >= 400
///
/// Carries the raw body so callers can diagnose the failure without
/// re-issuing the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{status_code} {status_text}] {message}:\n{body}")]
pub struct ApiError {
    pub status_code: u16,
    pub status_text: String,
    pub body: String,
    pub message: String,
}

/// One entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

/// GraphQL logical errors, returned alongside (not instead of) decoded data
///
/// The human-readable form joins all messages with `\n` in arrival order.
/// It is computed on first use and cached.
#[derive(Debug, Clone, Default)]
pub struct GraphqlErrorResponse {
    errors: Vec<GraphqlError>,
    concatenated: OnceLock<String>,
}

impl GraphqlErrorResponse {
    pub fn new(errors: Vec<GraphqlError>) -> Self {
        Self {
            errors,
            concatenated: OnceLock::new(),
        }
    }

    /// Errors in the order the server reported them
    pub fn errors(&self) -> &[GraphqlError] {
        &self.errors
    }

    pub fn message(&self) -> &str {
        self.concatenated.get_or_init(|| {
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

impl fmt::Display for GraphqlErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for GraphqlErrorResponse {}

/// SDK error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("failed to create request: {0}")]
    Request(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to marshal request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to send request: {0}")]
    Send(#[source] BoxError),

    #[error("failed to read response body: {0}")]
    ReadBody(#[source] BoxError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Graphql(#[from] GraphqlErrorResponse),

    #[error("failed to unmarshal response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("GraphQL response carried no data")]
    MissingData,

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("pagination stopped after {0} pages")]
    PageLimitExceeded(usize),

    #[error("request cancelled")]
    Cancelled,

    #[error("timed out after {0:?}")]
    TimedOut(std::time::Duration),

    #[error("{kind} '{name}' does not exist")]
    NotFound { kind: &'static str, name: String },

    #[error("runtime {runtime} does not have ingressHost configured")]
    MissingIngressHost { runtime: String },

    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<ClientError>,
    },
}

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Wrap this error with a short description of the failed operation
    pub fn context(self, message: impl Into<String>) -> Self {
        ClientError::Context {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping any `Context` layers
    pub fn root(&self) -> &ClientError {
        let mut current = self;
        while let ClientError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self.root() {
            ClientError::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn graphql_errors(&self) -> Option<&GraphqlErrorResponse> {
        match self.root() {
            ClientError::Graphql(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self.root() {
            ClientError::NotFound { .. } => true,
            ClientError::Api(e) => e.status_code == 404,
            _ => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), ClientError::Cancelled)
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self.root(), ClientError::TimedOut(_))
    }
}
