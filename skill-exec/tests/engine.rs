mod common;

use std::time::Duration;

use serde_json::json;
use skill_core::{load_manifest_str, AuthScheme};
use skill_exec::{
    ActionEngine, ActionRegistry, ArgumentBag, BindingError, CancelReason, CancellationSignal,
    Credential, DispatchError, EngineConfig, Rendered,
};

use common::{bulk_labels_action, repo_issues_action, MockHttpClient};

fn engine(http: std::sync::Arc<MockHttpClient>, config: EngineConfig) -> ActionEngine {
    let registry = ActionRegistry::from_actions([repo_issues_action(), bulk_labels_action()]);
    ActionEngine::new(registry, http, config)
}

fn issue_args() -> ArgumentBag {
    ArgumentBag::new()
        .with_path("owner", json!("octo"))
        .with_path("repo", json!("hello"))
}

#[test]
fn lists_actions_sorted_by_name() {
    let engine = engine(MockHttpClient::ok(200, "{}"), EngineConfig::default());
    let names: Vec<_> = engine.list_actions().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["add_labels", "list_issues"]);

    let issues = &engine.list_actions()[1];
    assert_eq!(issues.method, "GET");
    assert_eq!(issues.params.len(), 4);
    assert_eq!(issues.headers["Accept"], "application/vnd.github+json");
}

#[tokio::test]
async fn unknown_action_never_sends() {
    let http = MockHttpClient::ok(200, "{}");
    let engine = engine(http.clone(), EngineConfig::default());

    let err = engine
        .dispatch("delete_repo", ArgumentBag::new(), &CancellationSignal::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnknownAction(ref n) if n == "delete_repo"));
    assert_eq!(err.to_string(), "action 'delete_repo' not found");
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn binding_errors_never_send() {
    let http = MockHttpClient::ok(200, "{}");
    let engine = engine(http.clone(), EngineConfig::default());

    let args = ArgumentBag::new().with_path("owner", json!("octo"));
    let err = engine
        .dispatch("list_issues", args, &CancellationSignal::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Binding(BindingError::MissingRequiredParameter { .. })
    ));
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn dispatch_renders_the_success_template() {
    let http = MockHttpClient::ok(200, r#"{"count": 12}"#);
    let config = EngineConfig::default().with_credential(Credential::new("k3y"));
    let engine = engine(http.clone(), config);

    let rendered = engine
        .dispatch(
            "list_issues",
            issue_args().with_query("page", json!(2)),
            &CancellationSignal::new(),
        )
        .await
        .unwrap();
    assert_eq!(rendered, Rendered::Success("12 issues".to_string()));

    let sent = http.last_request().unwrap();
    assert_eq!(sent.method, "GET");
    assert_eq!(sent.url, "https://api.example.com/repos/octo/hello/issues?page=2");
    assert_eq!(sent.header("x-api-key"), Some("k3y"));
    assert_eq!(sent.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn upstream_failure_renders_the_failure_template() {
    let http = MockHttpClient::ok(404, "no such repo");
    let engine = engine(http, EngineConfig::default());

    let rendered = engine
        .dispatch("list_issues", issue_args(), &CancellationSignal::new())
        .await
        .unwrap();
    assert_eq!(
        rendered.text(),
        "failed: HTTP error: 404 Not Found, body: no such repo"
    );
    assert!(!rendered.is_success());
}

#[tokio::test]
async fn missing_credential_sends_no_auth_header() {
    let http = MockHttpClient::ok(200, "{}");
    let engine = engine(http.clone(), EngineConfig::default());

    engine
        .dispatch("list_issues", issue_args(), &CancellationSignal::new())
        .await
        .unwrap();
    let sent = http.last_request().unwrap();
    assert!(sent.header("x-api-key").is_none());
    assert!(sent.header("authorization").is_none());
}

#[tokio::test]
async fn action_auth_overrides_the_engine_default() {
    let http = MockHttpClient::ok(200, "[]");
    let config = EngineConfig::default()
        .with_credential(Credential::new("tok"))
        .with_auth(AuthScheme::api_key("X-Skill-Key"));
    let registry = ActionRegistry::from_actions([
        repo_issues_action(),
        bulk_labels_action().with_auth(AuthScheme::Bearer),
    ]);
    let engine = ActionEngine::new(registry, http.clone(), config);

    engine
        .dispatch(
            "add_labels",
            ArgumentBag::new()
                .with_path("number", json!(3))
                .with_body("labels", json!(["bug"])),
            &CancellationSignal::new(),
        )
        .await
        .unwrap();
    let sent = http.last_request().unwrap();
    assert_eq!(sent.header("authorization"), Some("Bearer tok"));
    assert!(sent.header("x-skill-key").is_none());
    assert_eq!(sent.body_json(), Some(json!(["bug"])));

    engine
        .dispatch("list_issues", issue_args(), &CancellationSignal::new())
        .await
        .unwrap();
    let sent = http.last_request().unwrap();
    assert_eq!(sent.header("x-skill-key"), Some("tok"));
}

#[tokio::test(start_paused = true)]
async fn cancellation_returns_an_error() {
    let http = MockHttpClient::slow(200, "{}", Duration::from_secs(10));
    let engine = engine(http, EngineConfig::default());
    let signal = CancellationSignal::new();

    let canceller = signal.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel("interrupted");
    });

    let err = engine
        .dispatch("list_issues", issue_args(), &signal)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Cancelled(CancelReason::Cancelled(ref r)) if r == "interrupted"
    ));
}

#[tokio::test]
async fn broken_failure_template_returns_the_execution_error() {
    let manifest = load_manifest_str(
        r#"
actions:
  ping:
    method: GET
    base_url: https://api.example.com/ping
    response_template:
      success: "{{result}}"
      failure: "{{#if Error}}x{{/each}}"
"#,
    )
    .unwrap();
    let engine = ActionEngine::new(
        ActionRegistry::from_manifest(manifest),
        MockHttpClient::ok(500, "boom"),
        EngineConfig::default(),
    );

    let err = engine
        .dispatch("ping", ArgumentBag::new(), &CancellationSignal::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "HTTP error: 500 Internal Server Error, body: boom"
    );
}
