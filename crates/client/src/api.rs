//! HTTP client adapter.
//!
//! Every backend call goes through [`ApiClient`]: it tags requests with the
//! bearer token and tenant header, and recovers from a 401 by refreshing the
//! access token once and replaying the request.

use contracts::domain::common::{RecordId, UpdateMethod};
use contracts::shared::list::decode_list;
use contracts::shared::payload::SubmitBody;
use contracts::system::auth::{RefreshRequest, RefreshResponse};
use futures::lock::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::config::ApiConfig;
use crate::endpoint;
use crate::error::ApiError;
use crate::session::SessionManager;
use crate::transport::{HttpRequest, HttpResponse, Method, RequestBody, Transport};

pub const LOGIN_PATH: &str = "/login";
pub const REFRESH_PATH: &str = "/token/refresh/";

pub const AUTHORIZATION: &str = "Authorization";
pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Where the client sends the user once the session cannot be recovered.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

struct Inner {
    base_url: String,
    timeout_ms: u32,
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
    navigator: RwLock<Option<Arc<dyn Navigator>>>,
    /// Serializes refreshes so concurrent 401s share one refresh call
    refresh_lock: Mutex<()>,
}

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl From<SubmitBody> for RequestBody {
    fn from(body: SubmitBody) -> Self {
        match body {
            SubmitBody::Json(value) => RequestBody::Json(value),
            SubmitBody::Multipart(form) => RequestBody::Multipart(form),
        }
    }
}

/// Decode an optional JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ApiError> {
    Ok(serde_json::from_value(body.unwrap_or(Value::Null))?)
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_url: config.base_url.clone(),
                timeout_ms: config.timeout_ms,
                transport,
                session,
                navigator: RwLock::new(None),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    pub fn set_navigator(&self, navigator: Arc<dyn Navigator>) {
        if let Ok(mut slot) = self.inner.navigator.write() {
            *slot = Some(navigator);
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.inner.session
    }

    pub fn url(&self, path: &str) -> String {
        endpoint::join(&self.inner.base_url, path)
    }

    // ========================================================================
    // Resource operations
    // ========================================================================

    /// GET the endpoint. The body is returned as sent: a bare array or a
    /// `{results: [..]}` envelope; see [`ApiClient::list_records`].
    pub async fn list(&self, endpoint: &str) -> Result<Option<Value>, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url(endpoint));
        Ok(self.send(request).await?.body)
    }

    /// GET the endpoint and decode the normalized list.
    pub async fn list_records<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>, ApiError> {
        let body = self.list(endpoint).await?;
        Ok(decode_list(body)?)
    }

    pub async fn get(&self, endpoint: &str, id: RecordId) -> Result<Option<Value>, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url(&endpoint::item(endpoint, id)));
        Ok(self.send(request).await?.body)
    }

    pub async fn create(&self, endpoint: &str, body: SubmitBody) -> Result<Option<Value>, ApiError> {
        let request = HttpRequest::new(Method::Post, self.url(endpoint)).with_body(body.into());
        Ok(self.send(request).await?.body)
    }

    /// PUT, full replace.
    pub async fn update(
        &self,
        endpoint: &str,
        id: RecordId,
        body: SubmitBody,
    ) -> Result<Option<Value>, ApiError> {
        let request = HttpRequest::new(Method::Put, self.url(&endpoint::item(endpoint, id)))
            .with_body(body.into());
        Ok(self.send(request).await?.body)
    }

    pub async fn patch(
        &self,
        endpoint: &str,
        id: RecordId,
        body: SubmitBody,
    ) -> Result<Option<Value>, ApiError> {
        let request = HttpRequest::new(Method::Patch, self.url(&endpoint::item(endpoint, id)))
            .with_body(body.into());
        Ok(self.send(request).await?.body)
    }

    pub async fn remove(&self, endpoint: &str, id: RecordId) -> Result<(), ApiError> {
        let request = HttpRequest::new(Method::Delete, self.url(&endpoint::item(endpoint, id)));
        self.send(request).await?;
        Ok(())
    }

    /// Create when the draft has no id, otherwise update `{endpoint}{id}/`
    /// with the given verb.
    pub async fn save(
        &self,
        endpoint: &str,
        id: Option<RecordId>,
        body: SubmitBody,
        method: UpdateMethod,
    ) -> Result<Option<Value>, ApiError> {
        match (id, method) {
            (Some(id), UpdateMethod::Replace) => self.update(endpoint, id, body).await,
            (Some(id), UpdateMethod::Partial) => self.patch(endpoint, id, body).await,
            (None, _) => self.create(endpoint, body).await,
        }
    }

    /// `POST {endpoint}{id}/{action}/`
    pub async fn action(
        &self,
        endpoint: &str,
        id: RecordId,
        action: &str,
        body: Value,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url(&endpoint::action(endpoint, id, action));
        let request = HttpRequest::new(Method::Post, url).with_body(RequestBody::Json(body));
        Ok(self.send(request).await?.body)
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    /// Send with session headers; on 401 refresh once and replay.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let sent_with = self.inner.session.access_token();
        match self.dispatch(request.clone()).await {
            Err(e) if e.is_unauthorized() => {
                self.recover(sent_with, e).await?;
                log::debug!("Replaying {} {}", request.method, request.url);
                // a second 401 is returned as is
                self.dispatch(request).await
            }
            other => other,
        }
    }

    fn authorize(&self, request: &mut HttpRequest) {
        let session = &self.inner.session;
        if let Some(token) = session.access_token() {
            request.set_header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(tenant) = session.tenant_id() {
            request.set_header(TENANT_HEADER, tenant.as_str());
        }
    }

    async fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.authorize(&mut request);
        self.send_plain(request).await
    }

    /// Send without touching session headers; non-2xx becomes an error.
    pub(crate) async fn send_plain(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if request.timeout_ms == 0 {
            request.timeout_ms = self.inner.timeout_ms;
        }
        log::debug!("{} {}", request.method, request.url);
        let response = self.inner.transport.send(request).await?;
        if response.ok() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status,
                payload: response.body,
            })
        }
    }

    async fn recover(&self, stale: Option<String>, cause: ApiError) -> Result<(), ApiError> {
        let _guard = self.inner.refresh_lock.lock().await;
        let session = &self.inner.session;

        let current = session.access_token();
        if current.is_some() && current != stale {
            log::debug!("Access token already refreshed");
            return Ok(());
        }

        let Some(refresh) = session.refresh_token() else {
            log::warn!("Unauthorized and no refresh token; ending session");
            self.expire_session();
            return Err(ApiError::SessionExpired(Box::new(cause)));
        };

        match self.request_refresh(refresh).await {
            Ok(access) => {
                session.set_access_token(access);
                Ok(())
            }
            Err(e) => {
                log::warn!("Token refresh failed: {}", e);
                self.expire_session();
                Err(ApiError::SessionExpired(Box::new(e)))
            }
        }
    }

    async fn request_refresh(&self, refresh: String) -> Result<String, ApiError> {
        log::info!("Refreshing access token");
        let body = serde_json::to_value(RefreshRequest { refresh })
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let request = HttpRequest::new(Method::Post, self.url(REFRESH_PATH))
            .with_body(RequestBody::Json(body));
        let response = self.send_plain(request).await?;
        let refreshed: RefreshResponse = decode(response.body)?;
        Ok(refreshed.access)
    }

    /// Renew the access token ahead of expiry. Without a session this is a
    /// no-op; a rejected refresh ends the session.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let _guard = self.inner.refresh_lock.lock().await;
        let session = &self.inner.session;
        let Some(refresh) = session.refresh_token() else {
            return Ok(());
        };
        match self.request_refresh(refresh).await {
            Ok(access) => {
                session.set_access_token(access);
                Ok(())
            }
            Err(e) => {
                log::warn!("Periodic token refresh failed: {}", e);
                self.expire_session();
                Err(ApiError::SessionExpired(Box::new(e)))
            }
        }
    }

    /// Clear the session and send the user to the login screen.
    fn expire_session(&self) {
        self.inner.session.clear();
        let navigator = self
            .inner
            .navigator
            .read()
            .ok()
            .and_then(|n| n.clone());
        match navigator {
            Some(navigator) => navigator.navigate(LOGIN_PATH),
            None => log::warn!("Session expired; no navigator to redirect to {}", LOGIN_PATH),
        }
    }
}
