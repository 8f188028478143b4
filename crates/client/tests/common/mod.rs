#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use client::config::ApiConfig;
use client::{
    ApiClient, HttpRequest, HttpResponse, MemoryStore, Method, Navigator, SessionManager,
    Transport, TransportError,
};
use contracts::system::auth::TokenPair;
use contracts::system::tenant::TenantId;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const BASE: &str = "http://api.test/api";

type Handler = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// Transport answering from a closure and recording every request.
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && path_of(r) == path)
            .count()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests().last().cloned().expect("no request sent")
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        // let concurrent callers interleave
        tokio::task::yield_now().await;
        (self.handler)(&request)
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub transport: Arc<MockTransport>,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(transport: Arc<MockTransport>, store: MemoryStore) -> Harness {
    let store = Arc::new(store);
    let session = Arc::new(SessionManager::new(Box::new(store.clone())));
    let config = ApiConfig {
        base_url: BASE.to_string(),
        timeout_ms: 5000,
    };
    let client = ApiClient::new(&config, transport.clone(), session);
    let navigator = Arc::new(RecordingNavigator::default());
    client.set_navigator(navigator.clone());
    Harness {
        client,
        transport,
        store,
        navigator,
    }
}

/// Logged-in store with tenant "1".
pub fn logged_in(access: &str, refresh: &str) -> MemoryStore {
    MemoryStore::with_session(
        TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        },
        Some(TenantId::new("1")),
    )
}

pub fn path_of(request: &HttpRequest) -> &str {
    request.url.strip_prefix(BASE).unwrap_or(&request.url)
}

pub fn bearer(request: &HttpRequest) -> Option<&str> {
    request
        .header("Authorization")
        .and_then(|h| h.strip_prefix("Bearer "))
}

pub fn reply(status: u16, body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(status, Some(body)))
}

pub fn no_content() -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(204, None))
}

pub fn jwt(claims: Value) -> String {
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.sig",
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}
