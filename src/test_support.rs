// src/test_support.rs
// =============================================================================
// A local stand-in for GitHub and the completion API, for tests.
//
// It serves two repositories:
//   octocat/Hello-World  README "Hello", greeting.txt "Hi"
//   octocat/loops        dir "a" whose listing points at itself and at the
//                        root, and bin.txt whose body is not UTF-8
// Everything else under /repos is 404. The completion endpoint answers with
// a configurable status and counts its calls.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::AnalyzerConfig;

struct FakeState {
    base: String,
    completion_status: StatusCode,
    github_calls: AtomicUsize,
    completion_calls: AtomicUsize,
    last_completion_body: Mutex<Option<Value>>,
    raw_accept_headers: Mutex<Vec<String>>,
}

pub struct FakeUpstream {
    state: Arc<FakeState>,
}

impl FakeUpstream {
    /// Starts a fake whose completion endpoint answers 200
    pub async fn start() -> Self {
        Self::with_completion_status(StatusCode::OK).await
    }

    pub async fn with_completion_status(completion_status: StatusCode) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let state = Arc::new(FakeState {
            base,
            completion_status,
            github_calls: AtomicUsize::new(0),
            completion_calls: AtomicUsize::new(0),
            last_completion_body: Mutex::new(None),
            raw_accept_headers: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/repos/:owner/:repo/readme", get(readme))
            .route("/repos/:owner/:repo/contents", get(contents))
            .route("/repos/:owner/:repo/contents/*path", get(nested_contents))
            .route("/raw/greeting.txt", get(raw_greeting))
            .route("/raw/bin.txt", get(raw_not_utf8))
            .route("/v1/chat/completions", post(completions))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeUpstream { state }
    }

    /// Settings pointing both upstreams at this fake
    pub fn config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            github_api: self.state.base.clone(),
            completion_url: format!("{}/v1/chat/completions", self.state.base),
            ..AnalyzerConfig::default()
        }
    }

    pub fn github_calls(&self) -> usize {
        self.state.github_calls.load(Ordering::SeqCst)
    }

    pub fn completion_calls(&self) -> usize {
        self.state.completion_calls.load(Ordering::SeqCst)
    }

    pub fn last_completion_body(&self) -> Option<Value> {
        self.state.last_completion_body.lock().unwrap().clone()
    }

    /// Accept headers seen by the raw file routes, in request order
    pub fn raw_accept_headers(&self) -> Vec<String> {
        self.state.raw_accept_headers.lock().unwrap().clone()
    }
}

fn is_hello_world(owner: &str, repo: &str) -> bool {
    owner == "octocat" && repo == "Hello-World"
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Not Found", "documentation_url": "https://docs.github.com/rest"})),
    )
        .into_response()
}

async fn readme(
    State(state): State<Arc<FakeState>>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    state.github_calls.fetch_add(1, Ordering::SeqCst);
    if !is_hello_world(&owner, &repo) {
        return not_found();
    }
    "Hello".into_response()
}

async fn contents(
    State(state): State<Arc<FakeState>>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    state.github_calls.fetch_add(1, Ordering::SeqCst);
    if is_hello_world(&owner, &repo) {
        return Json(json!([{
            "name": "greeting.txt",
            "path": "greeting.txt",
            "type": "file",
            "url": format!("{}/repos/octocat/Hello-World/contents/greeting.txt", state.base),
            "download_url": format!("{}/raw/greeting.txt", state.base),
        }]))
        .into_response();
    }
    if owner == "octocat" && repo == "loops" {
        return Json(json!([
            {
                "name": "a",
                "path": "a",
                "type": "dir",
                "url": format!("{}/repos/octocat/loops/contents/a", state.base),
                "download_url": null,
            },
            {
                "name": "bin.txt",
                "path": "bin.txt",
                "type": "file",
                "url": format!("{}/repos/octocat/loops/contents/bin.txt", state.base),
                "download_url": format!("{}/raw/bin.txt", state.base),
            }
        ]))
        .into_response();
    }
    not_found()
}

// Listing of octocat/loops/a: one entry back to "a" itself, one to the root
async fn nested_contents(
    State(state): State<Arc<FakeState>>,
    Path((owner, repo, path)): Path<(String, String, String)>,
) -> Response {
    state.github_calls.fetch_add(1, Ordering::SeqCst);
    if owner != "octocat" || repo != "loops" || path != "a" {
        return not_found();
    }
    Json(json!([
        {
            "name": "a",
            "path": "a",
            "type": "dir",
            "url": format!("{}/repos/octocat/loops/contents/a", state.base),
            "download_url": null,
        },
        {
            "name": "loops",
            "path": "",
            "type": "dir",
            "url": format!("{}/repos/octocat/loops/contents", state.base),
            "download_url": null,
        }
    ]))
    .into_response()
}

fn record_accept(state: &FakeState, headers: &HeaderMap) {
    let accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.raw_accept_headers.lock().unwrap().push(accept);
}

async fn raw_greeting(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> &'static str {
    state.github_calls.fetch_add(1, Ordering::SeqCst);
    record_accept(&state, &headers);
    "Hi"
}

async fn raw_not_utf8(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Vec<u8> {
    state.github_calls.fetch_add(1, Ordering::SeqCst);
    record_accept(&state, &headers);
    vec![0xff, 0xfe, 0x00]
}

async fn completions(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    state.completion_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_completion_body.lock().unwrap() = Some(body);

    if state.completion_status != StatusCode::OK {
        return (
            state.completion_status,
            Json(json!({"error": {"message": "Invalid API key"}})),
        )
            .into_response();
    }

    Json(json!({
        "id": "cmpl-fake",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "A friendly greeting repo."},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 100, "completion_tokens": 5, "total_tokens": 105}
    }))
    .into_response()
}
