//! Client configuration

use std::fmt;
use std::time::Duration;

/// Public SaaS endpoint
pub const DEFAULT_HOST: &str = "https://g.codefresh.io";

/// GraphQL path of the platform API
pub const DEFAULT_GRAPHQL_PATH: &str = "/2.0/api/graphql";

/// GraphQL path of a runtime's app-proxy
pub const APP_PROXY_GRAPHQL_PATH: &str = "/app-proxy/api/graphql";

/// Options for building a [`Transport`](crate::Transport)
///
/// Read once at construction; the resulting transport never changes.
#[derive(Clone)]
pub struct ClientOptions {
    /// Base URL, e.g. `https://g.codefresh.io`
    pub host: String,
    /// API key, sent verbatim in the `Authorization` header
    pub token: String,
    /// Defaults to [`DEFAULT_GRAPHQL_PATH`]
    pub graphql_path: Option<String>,
    /// Whole-request timeout, inherited by derived app-proxy clients
    pub timeout: Option<Duration>,
    /// Pre-built HTTP client (its own timeout and TLS settings apply)
    ///
    /// reqwest does not expose a client's timeout, so derived app-proxy
    /// clients only get one when `timeout` is set too.
    pub http_client: Option<reqwest::Client>,
}

impl ClientOptions {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            graphql_path: None,
            timeout: None,
            http_client: None,
        }
    }

    pub fn with_graphql_path(mut self, path: impl Into<String>) -> Self {
        self.graphql_path = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("graphql_path", &self.graphql_path)
            .field("timeout", &self.timeout)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let options = ClientOptions::new(DEFAULT_HOST, "super-secret");
        let debug = format!("{:?}", options);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("g.codefresh.io"));
    }
}
