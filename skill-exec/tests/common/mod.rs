#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use skill_core::{ActionDefinition, ParamLocation, ParamType, ParameterSpec, ResponseTemplate};
use skill_exec::executor::{HttpClient, HttpError, HttpResponseParts};
use skill_exec::BoundRequest;

/// Replies with a canned response and records every request it sees.
pub struct MockHttpClient {
    response: Result<HttpResponseParts, HttpError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<BoundRequest>>,
}

impl MockHttpClient {
    pub fn ok(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(HttpResponseParts::new(status, body.as_bytes().to_vec())),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: HttpError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(err),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(status: u16, body: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(HttpResponseParts::new(status, body.as_bytes().to_vec())),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<BoundRequest> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        req: BoundRequest,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(req);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

pub fn repo_issues_action() -> ActionDefinition {
    ActionDefinition::new("list_issues", "get", "https://api.example.com/repos/{owner}/{repo}/issues")
        .with_param(ParameterSpec::new("owner", ParamType::String, ParamLocation::Path).required())
        .with_param(ParameterSpec::new("repo", ParamType::String, ParamLocation::Path).required())
        .with_param(ParameterSpec::new("tags", ParamType::Array, ParamLocation::Query))
        .with_param(ParameterSpec::new("page", ParamType::Integer, ParamLocation::Query))
        .with_header("Accept", "application/vnd.github+json")
        .with_templates(ResponseTemplate::new(
            "{{count}} issues",
            "failed: {{Error}}",
        ))
}

pub fn bulk_labels_action() -> ActionDefinition {
    ActionDefinition::new("add_labels", "POST", "https://api.example.com/issues/{number}/labels")
        .with_param(ParameterSpec::new("number", ParamType::Integer, ParamLocation::Path).required())
        .with_param(
            ParameterSpec::new("labels", ParamType::Array, ParamLocation::Body)
                .required()
                .root_body(),
        )
        .with_param(ParameterSpec::new("note", ParamType::String, ParamLocation::Body))
        .with_templates(ResponseTemplate::new("{{result}}", "failed: {{Error}}"))
}
