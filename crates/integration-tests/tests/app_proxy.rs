//! Derived app-proxy client: runtime lookup, host choice, TLS flag

use codefresh_sdk::port::VersionInfoApi;
use codefresh_sdk::port::RuntimeApi;
use codefresh_sdk::{CancellationToken, ClientError, ClientOptions, Codefresh, TlsPolicy};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_runtime(platform: &MockServer, runtime: Value) {
    Mock::given(method("POST"))
        .and(path("/2.0/api/graphql"))
        .and(body_partial_json(json!({ "variables": { "name": "rt1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "runtime": runtime } })))
        .expect(1)
        .mount(platform)
        .await;
}

async fn serve_version_info(app_proxy: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/app-proxy/api/graphql"))
        .and(header("Authorization", "platform-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "versionInfo": {
                "version": "1.2.3",
                "platformHost": "https://g.codefresh.io",
                "platformVersion": "2.0"
            } }
        })))
        .expect(1)
        .mount(app_proxy)
        .await;
}

fn client(platform: &MockServer) -> Codefresh {
    Codefresh::new(
        ClientOptions::new(platform.uri(), "platform-token").with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_app_proxy_uses_ingress_host() {
    let platform = MockServer::start().await;
    let app_proxy = MockServer::start().await;
    serve_runtime(
        &platform,
        json!({ "metadata": { "name": "rt1" }, "ingressHost": app_proxy.uri() }),
    )
    .await;
    serve_version_info(&app_proxy).await;

    let ctx = CancellationToken::new();
    let client = client(&platform);
    let proxy = client.v2().app_proxy(&ctx, "rt1", false).await.unwrap();

    assert_eq!(proxy.transport().token(), "platform-token");
    assert_eq!(proxy.transport().timeout(), Some(Duration::from_secs(5)));
    assert!(!proxy.transport().accepts_invalid_certs());

    let info = proxy.version_info().version_info(&ctx).await.unwrap();
    assert_eq!(info.version, "1.2.3");
    assert_eq!(info.platform_version, "2.0");

    // parent unaffected
    assert_eq!(client.transport().base_url().as_str(), format!("{}/", platform.uri()));
}

#[tokio::test]
async fn test_internal_ingress_host_wins() {
    let platform = MockServer::start().await;
    let app_proxy = MockServer::start().await;
    serve_runtime(
        &platform,
        json!({
            "metadata": { "name": "rt1" },
            "ingressHost": "https://public.unreachable.invalid",
            "internalIngressHost": app_proxy.uri(),
        }),
    )
    .await;
    serve_version_info(&app_proxy).await;

    let ctx = CancellationToken::new();
    let proxy = client(&platform).v2().app_proxy(&ctx, "rt1", true).await.unwrap();
    assert!(proxy.transport().accepts_invalid_certs());
    assert_eq!(proxy.transport().tls_policy(), TlsPolicy::AcceptInvalidCerts);

    proxy.version_info().version_info(&ctx).await.unwrap();
}

#[tokio::test]
async fn test_missing_ingress_host() {
    let platform = MockServer::start().await;
    serve_runtime(
        &platform,
        json!({ "metadata": { "name": "rt1" }, "ingressHost": "" }),
    )
    .await;

    let err = client(&platform)
        .v2()
        .app_proxy(&CancellationToken::new(), "rt1", false)
        .await
        .unwrap_err();

    assert!(matches!(err.root(), ClientError::MissingIngressHost { runtime } if runtime == "rt1"));
    assert!(err.to_string().starts_with("failed to create app-proxy client"));
}

#[tokio::test]
async fn test_unknown_runtime() {
    let platform = MockServer::start().await;
    serve_runtime(&platform, json!({ "metadata": { "name": "" } })).await;

    let err = client(&platform)
        .v2()
        .app_proxy(&CancellationToken::new(), "rt1", false)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_null_runtime_is_not_found() {
    let platform = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2.0/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "runtime": null } })))
        .expect(2)
        .mount(&platform)
        .await;

    let ctx = CancellationToken::new();
    let client = client(&platform);

    let err = client.v2().runtime().get(&ctx, "ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(&err, ClientError::NotFound { kind: "runtime", name } if name == "ghost"));
    assert_eq!(err.to_string(), "runtime 'ghost' does not exist");

    let err = client.v2().app_proxy(&ctx, "ghost", false).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().starts_with("failed to create app-proxy client"));
}

#[tokio::test]
async fn test_runtime_graphql_errors_are_not_not_found() {
    let platform = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2.0/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "runtime": null },
            "errors": [{ "message": "forbidden" }]
        })))
        .mount(&platform)
        .await;

    let err = client(&platform)
        .v2()
        .runtime()
        .get(&CancellationToken::new(), "rt1")
        .await
        .unwrap_err();

    assert!(!err.is_not_found());
    assert_eq!(err.graphql_errors().unwrap().message(), "forbidden");
    assert!(err.to_string().starts_with("failed getting a runtime"));
}

#[tokio::test]
async fn test_runtime_lookup_failure_is_wrapped() {
    let platform = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2.0/api/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&platform)
        .await;

    let err = client(&platform)
        .v2()
        .app_proxy(&CancellationToken::new(), "rt1", false)
        .await
        .unwrap_err();

    assert_eq!(err.api_error().unwrap().status_code, 401);
    assert!(err
        .to_string()
        .starts_with("failed to create app-proxy client: failed getting a runtime: "));
}
