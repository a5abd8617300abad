//! Classic REST adapters and the build status wait

use codefresh_sdk::domain::classic::RunOptions;
use codefresh_sdk::port::{ClassicPipelineApi, ClassicUserApi, RuntimeApi, TokenApi, WorkflowApi};
use codefresh_sdk::{CancellationToken, ClientOptions, Codefresh};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn client(server: &MockServer) -> Codefresh {
    Codefresh::new(ClientOptions::new(server.uri(), "t")).unwrap()
}

/// Reports "running" until the n-th poll
struct BuildProgress {
    polls: Arc<AtomicUsize>,
    done_after: usize,
}

impl Respond for BuildProgress {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        let status = if poll >= self.done_after { "success" } else { "running" };
        ResponseTemplate::new(200).set_body_json(json!({ "id": "b1", "status": status }))
    }
}

#[tokio::test]
async fn test_create_token_returns_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/key"))
        .and(query_param("subjectReference", "rt1"))
        .and(query_param("subjectType", "runtime-environment"))
        .and(body_json(json!({ "name": "ci-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("abc.def"))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server)
        .v1()
        .token()
        .create(&CancellationToken::new(), "ci-token", "rt1")
        .await
        .unwrap();

    assert_eq!(token.name, "ci-token");
    assert_eq!(token.value.as_deref(), Some("abc.def"));
}

#[tokio::test]
async fn test_list_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "t1",
            "name": "ci-token",
            "tokenPrefix": "abc",
            "created": "2024-03-01T10:00:00Z",
            "subject": { "type": "runtime-environment", "ref": "rt1" }
        }])))
        .mount(&server)
        .await;

    let tokens = client(&server)
        .v1()
        .token()
        .list(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].subject.reference, "rt1");
    assert!(tokens[0].value.is_none());
}

#[tokio::test]
async fn test_run_pipeline_escapes_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pipelines/run/proj%2Fmy%20pipe"))
        .and(body_json(json!({ "branch": "main", "variables": { "TAG": "1.0" } })))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"5f1a2b\""))
        .expect(1)
        .mount(&server)
        .await;

    let options = RunOptions {
        branch: Some("main".to_string()),
        variables: BTreeMap::from([("TAG".to_string(), "1.0".to_string())]),
    };
    let build_id = client(&server)
        .v1()
        .pipeline()
        .run(&CancellationToken::new(), "proj/my pipe", &options)
        .await
        .unwrap();

    assert_eq!(build_id, "5f1a2b");
}

#[tokio::test]
async fn test_list_pipelines_passes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pipelines"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{ "metadata": { "name": "proj/build", "project": "proj" }, "spec": {} }],
            "count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = BTreeMap::from([("limit".to_string(), "5".to_string())]);
    let pipelines = client(&server)
        .v1()
        .pipeline()
        .list(&CancellationToken::new(), &query)
        .await
        .unwrap();

    assert_eq!(pipelines[0].metadata.name, "proj/build");
}

#[tokio::test]
async fn test_current_classic_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "userName": "jane",
            "email": "jane@example.com",
            "activeAccountName": "acme",
            "account": [{ "_id": "a1", "name": "acme" }]
        })))
        .mount(&server)
        .await;

    let user = client(&server)
        .v1()
        .user()
        .current(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(user.name, "jane");
    assert_eq!(user.active_account().unwrap().id, "a1");
}

#[tokio::test]
async fn test_get_missing_workflow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/builds/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("build not found"))
        .mount(&server)
        .await;

    let err = client(&server)
        .v1()
        .workflow()
        .get(&CancellationToken::new(), "nope")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().starts_with("failed getting a workflow: [404 Not Found]"));
}

#[tokio::test]
async fn test_wait_for_status_polls_until_success() {
    let server = MockServer::start().await;
    let polls = Arc::new(AtomicUsize::new(0));
    Mock::given(method("GET"))
        .and(path("/api/builds/b1"))
        .respond_with(BuildProgress {
            polls: polls.clone(),
            done_after: 3,
        })
        .mount(&server)
        .await;

    client(&server)
        .v1()
        .workflow()
        .wait_for_status(
            &CancellationToken::new(),
            "b1",
            "success",
            Duration::from_millis(10),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_wait_for_status_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/builds/b1"))
        .respond_with(BuildProgress {
            polls: Arc::new(AtomicUsize::new(0)),
            done_after: usize::MAX,
        })
        .mount(&server)
        .await;

    let err = client(&server)
        .v1()
        .workflow()
        .wait_for_status(
            &CancellationToken::new(),
            "b1",
            "success",
            Duration::from_millis(10),
            Duration::from_millis(100),
        )
        .await
        .unwrap_err();

    assert!(err.is_timed_out());
}

#[tokio::test]
async fn test_delete_runtime_returns_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2.0/api/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "deleteRuntime": 1 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client(&server)
        .v2()
        .runtime()
        .delete(&CancellationToken::new(), "rt1")
        .await
        .unwrap();
    assert_eq!(deleted, 1);
}
