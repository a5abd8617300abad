//! HTTP Transport
//!
//! One authenticated round trip per call. Every request carries the same
//! three headers (`Authorization`, `Content-Type`, `Origin`); failures are
//! classified into [`ClientError`] so callers can tell network, HTTP-status
//! and decode problems apart.

use crate::config::{ClientOptions, APP_PROXY_GRAPHQL_PATH, DEFAULT_GRAPHQL_PATH};
use crate::error::{read_error, send_error, ApiError, ClientError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const REST_FAILURE: &str = "failed to make a REST API request";
const GRAPHQL_FAILURE: &str = "failed to make a GraphQL API request";
const UNKNOWN_STATUS: &str = "Unknown Status";

/// Characters escaped inside a single path segment (`/` included)
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape a value so it stays one path segment
pub fn escape_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Query parameter value: single or repeated key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Description of one REST call
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    /// Relative to the host's base path
    pub path: String,
    /// Defaults to GET
    pub method: Method,
    pub query: BTreeMap<String, QueryValue>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            ..Default::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Serialize `body` as the JSON payload
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Encode)?);
        Ok(self)
    }
}

/// Certificate verification applied to a transport's HTTP client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsPolicy {
    #[default]
    Verify,
    AcceptInvalidCerts,
}

impl TlsPolicy {
    pub fn from_insecure(insecure: bool) -> Self {
        if insecure {
            TlsPolicy::AcceptInvalidCerts
        } else {
            TlsPolicy::Verify
        }
    }

    fn apply(self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        builder.danger_accept_invalid_certs(self == TlsPolicy::AcceptInvalidCerts)
    }
}

/// Authenticated HTTP transport bound to one host
///
/// Immutable after construction and cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: Url,
    graphql_url: Url,
    token: String,
    authorization: HeaderValue,
    origin: HeaderValue,
    timeout: Option<Duration>,
    tls: TlsPolicy,
}

impl Transport {
    /// Build a transport from options
    ///
    /// Fails with `InvalidUrl` when the host cannot be parsed as a base URL.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let ClientOptions {
            host,
            token,
            graphql_path,
            timeout,
            http_client,
        } = options;

        let http = match http_client {
            Some(client) => client,
            None => build_http_client(timeout, TlsPolicy::Verify)?,
        };
        let graphql_path = graphql_path.unwrap_or_else(|| DEFAULT_GRAPHQL_PATH.to_string());

        Self::from_parts(&host, token, &graphql_path, timeout, http, TlsPolicy::Verify)
    }

    fn from_parts(
        host: &str,
        token: String,
        graphql_path: &str,
        timeout: Option<Duration>,
        http: reqwest::Client,
        tls: TlsPolicy,
    ) -> Result<Self> {
        let base_url = parse_base_url(host)?;
        let graphql_url = join_path(&base_url, graphql_path);
        let origin = origin_of(&base_url)?;

        let mut authorization = HeaderValue::from_str(&token)
            .map_err(|_| ClientError::Config("token is not a valid header value".to_string()))?;
        authorization.set_sensitive(true);

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url,
                graphql_url,
                token,
                authorization,
                origin,
                timeout,
                tls,
            }),
        })
    }

    /// Derive a transport for a runtime's app-proxy
    ///
    /// Keeps the token and timeout, points at `host` with the app-proxy
    /// GraphQL path, and skips TLS verification when `insecure` is set. The
    /// parent transport is left untouched.
    pub fn app_proxy_transport(&self, host: &str, insecure: bool) -> Result<Transport> {
        if insecure {
            warn!(host = %host, "TLS certificate verification disabled for app-proxy");
        }

        let tls = TlsPolicy::from_insecure(insecure);
        let http = build_http_client(self.inner.timeout, tls)?;
        Self::from_parts(
            host,
            self.inner.token.clone(),
            APP_PROXY_GRAPHQL_PATH,
            self.inner.timeout,
            http,
            tls,
        )
    }

    /// Perform a REST call and return the raw response body
    pub async fn rest_call(&self, ctx: &CancellationToken, spec: RequestSpec) -> Result<Vec<u8>> {
        let url = request_url(&self.inner.base_url, &spec);
        self.execute(ctx, spec.method, url, spec.body, REST_FAILURE)
            .await
    }

    /// REST call decoded as JSON
    pub async fn rest_json<T: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        spec: RequestSpec,
    ) -> Result<T> {
        let bytes = self.rest_call(ctx, spec).await?;
        serde_json::from_slice(&bytes).map_err(ClientError::Decode)
    }

    /// POST `{query, variables}` to the GraphQL endpoint and return the raw body
    pub async fn graphql_call<V: Serialize + ?Sized>(
        &self,
        ctx: &CancellationToken,
        query: &str,
        variables: &V,
    ) -> Result<Vec<u8>> {
        let variables = serde_json::to_value(variables).map_err(ClientError::Encode)?;

        let mut body = serde_json::Map::new();
        body.insert("query".to_string(), Value::String(query.to_string()));
        body.insert("variables".to_string(), variables);

        self.execute(
            ctx,
            Method::POST,
            self.inner.graphql_url.clone(),
            Some(Value::Object(body)),
            GRAPHQL_FAILURE,
        )
        .await
    }

    async fn execute(
        &self,
        ctx: &CancellationToken,
        method: Method,
        url: Url,
        body: Option<Value>,
        failure: &str,
    ) -> Result<Vec<u8>> {
        if ctx.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let request = self.build_request(method, url, body)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let exchange = async {
            let response = self.inner.http.execute(request).await.map_err(send_error)?;
            let status = response.status();
            let bytes = response.bytes().await.map_err(read_error)?;
            Ok::<_, ClientError>((status, bytes))
        };

        let (status, bytes) = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ClientError::Cancelled),
            result = exchange => result?,
        };

        debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            bytes = bytes.len(),
            "HTTP exchange completed"
        );

        if status.as_u16() >= 400 {
            return Err(api_error(status, &bytes, failure).into());
        }

        Ok(bytes.to_vec())
    }

    fn build_request(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<reqwest::Request> {
        let mut builder = self
            .inner
            .http
            .request(method, url)
            .header(AUTHORIZATION, self.inner.authorization.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ORIGIN, self.inner.origin.clone());

        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body).map_err(ClientError::Encode)?;
            builder = builder.body(bytes);
        }

        builder
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))
    }

    pub fn token(&self) -> &str {
        &self.inner.token
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn graphql_url(&self) -> &Url {
        &self.inner.graphql_url
    }

    /// Policy the HTTP client was built with
    ///
    /// A client supplied through [`ClientOptions::http_client`] keeps its own
    /// TLS settings and reports `Verify`.
    pub fn tls_policy(&self) -> TlsPolicy {
        self.inner.tls
    }

    /// True only for app-proxy transports built with `insecure = true`
    pub fn accepts_invalid_certs(&self) -> bool {
        self.inner.tls == TlsPolicy::AcceptInvalidCerts
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.inner.base_url.as_str())
            .field("graphql_url", &self.inner.graphql_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("tls", &self.inner.tls)
            .finish_non_exhaustive()
    }
}

fn client_builder(timeout: Option<Duration>, tls: TlsPolicy) -> reqwest::ClientBuilder {
    let builder = tls.apply(reqwest::Client::builder());
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

fn build_http_client(timeout: Option<Duration>, tls: TlsPolicy) -> Result<reqwest::Client> {
    client_builder(timeout, tls)
        .build()
        .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))
}

fn parse_base_url(host: &str) -> Result<Url> {
    let mut url = Url::parse(host).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", host, e)))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ClientError::InvalidUrl(format!("{}: not a base URL", host)));
    }

    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn origin_of(url: &Url) -> Result<HeaderValue> {
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidUrl(format!("{}: missing host", url)))?;
    let origin = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    HeaderValue::from_str(&origin).map_err(|_| ClientError::InvalidUrl(origin))
}

/// Append `path` to the base path, normalizing duplicate and edge slashes
///
/// Existing percent-escapes in `path` are kept as-is.
pub(crate) fn join_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let mut joined = base.path().trim_end_matches('/').to_string();
    let mut appended = false;

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        joined.push('/');
        joined.push_str(segment);
        appended = true;
    }

    if appended {
        url.set_path(&joined);
    }
    url
}

fn request_url(base: &Url, spec: &RequestSpec) -> Url {
    let mut url = join_path(base, &spec.path);
    if !spec.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &spec.query {
            match value {
                QueryValue::Single(v) => {
                    pairs.append_pair(key, v);
                }
                QueryValue::List(values) => {
                    for v in values {
                        pairs.append_pair(key, v);
                    }
                }
            }
        }
    }
    url
}

fn api_error(status: StatusCode, body: &[u8], message: &str) -> ApiError {
    ApiError {
        status_code: status.as_u16(),
        status_text: status
            .canonical_reason()
            .unwrap_or(UNKNOWN_STATUS)
            .to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        message: message.to_string(),
    }
}
