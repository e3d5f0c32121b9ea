//! Minimal HTTP stub for integration tests
//!
//! An axum app on a random local port. Responses are canned per
//! `METHOD path` and can be replaced mid-test; every request is recorded.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

/// A request the stub received
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: String,
}

#[derive(Debug, Clone, Default)]
struct StubState {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Handle to a running stub server
#[derive(Debug, Clone)]
pub struct StubServer {
    pub base_url: String,
    state: StubState,
}

impl StubServer {
    /// Binds to 127.0.0.1 on a free port and starts serving
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new().fallback(respond).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve stub") });

        StubServer {
            base_url: format!("http://{}/", addr),
            state,
        }
    }

    /// Registers (or replaces) the response for `method path`
    pub fn route(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.state.routes.lock().unwrap().insert(
            route_key(method, path),
            Canned {
                status,
                body: body.into(),
            },
        );
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Number of requests for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

fn route_key(method: &str, path: &str) -> String {
    format!("{} {}", method, path)
}

/// Looks the request up in the route table; unknown routes get a JSON 404
async fn respond(State(state): State<StubState>, method: Method, uri: Uri, body: String) -> Response {
    let path = uri.path().to_string();
    let canned = state
        .routes
        .lock()
        .unwrap()
        .get(&route_key(method.as_str(), &path))
        .cloned();
    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path,
        body,
    });

    let Some(canned) = canned else {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error":"not found"}"#,
        )
            .into_response();
    };
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}
