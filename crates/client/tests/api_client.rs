mod common;

use client::auth;
use client::config::TenantConfig;
use client::{
    ApiError, HttpRequest, HttpResponse, MemoryStore, Method, RequestBody, SessionStore,
    TransportError,
};
use common::*;
use contracts::domain::a012_production_order::aggregate::{ProductionOrder, QrCode, GENERATE_QR_ACTION};
use contracts::domain::common::{RecordId, Resource};
use contracts::shared::payload::SubmitBody;
use contracts::system::tenant::TenantId;
use serde_json::json;

type Reply = Result<HttpResponse, TransportError>;

/// Answers the refresh endpoint; `None` for any other request.
fn refresh_to(new_access: &'static str) -> impl Fn(&HttpRequest) -> Option<Reply> + Send + Sync {
    move |request: &HttpRequest| {
        (path_of(request) == "/token/refresh/").then(|| reply(200, json!({"access": new_access})))
    }
}

#[tokio::test]
async fn test_session_headers_on_every_request() {
    let transport = MockTransport::new(|_| reply(200, json!([])));
    let h = harness(transport, logged_in("a", "r"));

    h.client.list("/banks/").await.unwrap();
    h.client.get("/banks/", RecordId(4)).await.unwrap();

    for request in h.transport.requests() {
        assert_eq!(bearer(&request), Some("a"));
        assert_eq!(request.header("X-Tenant-ID"), Some("1"));
        assert_eq!(request.timeout_ms, 5000);
    }
    assert_eq!(h.transport.requests()[1].url, format!("{}/banks/4/", BASE));
}

#[tokio::test]
async fn test_anonymous_request_has_no_auth_header() {
    let transport = MockTransport::new(|_| reply(200, json!([])));
    let h = harness(transport, MemoryStore::new());
    h.client.list("/banks/").await.unwrap();
    let request = h.transport.last();
    assert_eq!(request.header("Authorization"), None);
    assert_eq!(request.header("X-Tenant-ID"), None);
}

#[tokio::test]
async fn test_expired_token_refreshed_and_replayed() {
    let refresh = refresh_to("newtoken");
    let transport = MockTransport::new(move |request| {
        if let Some(response) = refresh(request) {
            assert_eq!(request.body, RequestBody::Json(json!({"refresh": "r"})));
            assert_eq!(request.header("Authorization"), None);
            return response;
        }
        match bearer(request) {
            Some("newtoken") => reply(200, json!([{"id": 1}])),
            _ => reply(401, json!({"detail": "Given token not valid"})),
        }
    });
    let h = harness(transport, logged_in("old", "r"));

    let body = h.client.list("/clients/").await.unwrap();

    assert_eq!(body, Some(json!([{"id": 1}])));
    assert_eq!(h.transport.count(Method::Post, "/token/refresh/"), 1);
    assert_eq!(bearer(&h.transport.last()), Some("newtoken"));
    assert_eq!(h.store.load_tokens().unwrap().access, "newtoken");
    assert_eq!(h.store.load_tokens().unwrap().refresh, "r");
    assert!(h.navigator.paths().is_empty());
}

#[tokio::test]
async fn test_second_401_is_not_retried() {
    let refresh = refresh_to("newtoken");
    let transport = MockTransport::new(move |request| {
        refresh(request).unwrap_or_else(|| reply(401, json!({"detail": "nope"})))
    });
    let h = harness(transport, logged_in("old", "r"));

    let err = h.client.list("/clients/").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(h.transport.count(Method::Post, "/token/refresh/"), 1);
    assert_eq!(h.transport.count(Method::Get, "/clients/"), 2);
}

#[tokio::test]
async fn test_failed_refresh_ends_session() {
    let transport = MockTransport::new(|request| {
        if path_of(request) == "/token/refresh/" {
            reply(401, json!({"detail": "Token is blacklisted"}))
        } else {
            reply(401, json!({}))
        }
    });
    let h = harness(transport, logged_in("old", "r"));

    let err = h.client.list("/clients/").await.unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired(_)));
    assert!(!h.client.session().is_authenticated());
    assert_eq!(h.client.session().tenant_id(), None);
    assert_eq!(h.store.load_tokens(), None);
    assert_eq!(h.navigator.paths(), vec!["/login".to_string()]);
    assert_eq!(h.transport.count(Method::Get, "/clients/"), 1);
}

#[tokio::test]
async fn test_401_without_refresh_token_ends_session() {
    let transport = MockTransport::new(|_| reply(401, json!({})));
    let h = harness(transport, logged_in("old", ""));

    let err = h.client.list("/clients/").await.unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired(_)));
    assert_eq!(h.transport.count(Method::Post, "/token/refresh/"), 0);
    assert_eq!(h.navigator.paths(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let refresh = refresh_to("newtoken");
    let transport = MockTransport::new(move |request| {
        if let Some(response) = refresh(request) {
            return response;
        }
        match bearer(request) {
            Some("newtoken") => reply(200, json!([])),
            _ => reply(401, json!({})),
        }
    });
    let h = harness(transport, logged_in("old", "r"));

    let (banks, clients) = futures::join!(h.client.list("/banks/"), h.client.list("/clients/"));

    assert!(banks.is_ok());
    assert!(clients.is_ok());
    assert_eq!(h.transport.count(Method::Post, "/token/refresh/"), 1);
}

#[tokio::test]
async fn test_timeout_and_status_errors_propagate() {
    let transport = MockTransport::new(|request| match path_of(request) {
        "/slow/" => Err(TransportError::Timeout),
        _ => reply(400, json!({"name": ["This field is required."]})),
    });
    let h = harness(transport, logged_in("a", "r"));

    assert_eq!(h.client.list("/slow/").await.unwrap_err(), ApiError::Timeout);
    let err = h
        .client
        .create("/banks/", SubmitBody::Json(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "name: This field is required.");
    assert_eq!(h.transport.count(Method::Post, "/token/refresh/"), 0);
}

#[tokio::test]
async fn test_record_action() {
    let transport = MockTransport::new(|_| reply(200, json!({"qr_code_data": "iVBORw0KGgo="})));
    let h = harness(transport, logged_in("a", "r"));

    let body = h
        .client
        .action(ProductionOrder::endpoint(), RecordId(14), GENERATE_QR_ACTION, json!({}))
        .await
        .unwrap();
    let qr: QrCode = client::api::decode(body).unwrap();

    assert_eq!(qr.qr_code_data, "iVBORw0KGgo=");
    let request = h.transport.last();
    assert_eq!(request.method, Method::Post);
    assert_eq!(path_of(&request), "/production-orders/14/generate_qr_code/");
}

#[tokio::test]
async fn test_patch_sends_item_url_and_replays_after_refresh() {
    let refresh = refresh_to("newtoken");
    let transport = MockTransport::new(move |request| {
        if let Some(response) = refresh(request) {
            return response;
        }
        match bearer(request) {
            Some("newtoken") => reply(200, json!({"id": 11, "name": "Camiseta"})),
            _ => reply(401, json!({"detail": "Given token not valid"})),
        }
    });
    let h = harness(transport, logged_in("old", "r"));

    let body = h
        .client
        .patch("/plantillas/", RecordId(11), SubmitBody::Json(json!({"name": "Camiseta"})))
        .await
        .unwrap();

    assert_eq!(body, Some(json!({"id": 11, "name": "Camiseta"})));
    assert_eq!(h.transport.count(Method::Patch, "/plantillas/11/"), 2);
    assert_eq!(h.transport.count(Method::Post, "/token/refresh/"), 1);
    let request = h.transport.last();
    assert_eq!(request.url, format!("{}/plantillas/11/", BASE));
    assert_eq!(bearer(&request), Some("newtoken"));
    assert_eq!(request.header("X-Tenant-ID"), Some("1"));
    assert_eq!(request.body, RequestBody::Json(json!({"name": "Camiseta"})));
}

#[tokio::test]
async fn test_periodic_refresh() {
    let transport = MockTransport::new(|_| reply(200, json!({"access": "fresh"})));
    let h = harness(transport, logged_in("a", "r"));
    h.client.refresh_session().await.unwrap();
    assert_eq!(h.client.session().access_token().as_deref(), Some("fresh"));

    let transport = MockTransport::new(|_| reply(401, json!({})));
    let h = harness(transport, logged_in("a", "r"));
    assert!(h.client.refresh_session().await.is_err());
    assert!(!h.client.session().is_authenticated());
    assert_eq!(h.navigator.paths(), vec!["/login".to_string()]);

    let transport = MockTransport::new(|_| reply(200, json!({})));
    let h = harness(transport, MemoryStore::new());
    h.client.refresh_session().await.unwrap();
    assert!(h.transport.requests().is_empty());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_resolves_tenant_first() {
    let access = jwt(json!({"user_id": 7, "email": "ana@norte.com", "token_type": "access"}));
    let token = access.clone();
    let transport = MockTransport::new(move |request| match path_of(request) {
        "/tenants/?name=textil%20norte" => reply(200, json!([{"id": 3, "name": "textil norte"}])),
        "/token/" => {
            assert_eq!(request.header("X-Tenant-ID"), Some("3"));
            assert_eq!(request.header("Authorization"), None);
            assert_eq!(
                request.body,
                RequestBody::Json(json!({"email": "ana@norte.com", "password": "secreto"}))
            );
            reply(200, json!({"access": token, "refresh": "r"}))
        }
        other => panic!("unexpected request {}", other),
    });
    let h = harness(transport, MemoryStore::new());
    let tenant = TenantConfig {
        name: Some("textil norte".to_string()),
    };

    auth::login_with_tenant(&h.client, &tenant, "ana@norte.com", "secreto")
        .await
        .unwrap();

    let session = h.client.session();
    assert_eq!(session.tenant_id(), Some(TenantId::new("3")));
    assert_eq!(session.access_token(), Some(access));
    assert_eq!(session.user().unwrap().email.as_deref(), Some("ana@norte.com"));
    assert_eq!(h.store.load_tenant(), Some(TenantId::new("3")));

    auth::logout(&h.client);
    assert!(!session.is_authenticated());
    assert_eq!(h.store.load_tokens(), None);
}

#[tokio::test]
async fn test_login_rejected_uses_detail() {
    let transport = MockTransport::new(|_| {
        reply(401, json!({"detail": "No active account found with the given credentials"}))
    });
    let h = harness(transport, MemoryStore::new());

    let err = auth::login(&h.client, "ana@norte.com", "mal", &TenantId::new("3"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Login("No active account found with the given credentials".to_string())
    );
    assert!(!h.client.session().is_authenticated());
    assert_eq!(h.transport.count(Method::Post, "/token/refresh/"), 0);
}

#[tokio::test]
async fn test_login_rejected_without_detail() {
    let transport = MockTransport::new(|_| reply(500, json!({})));
    let h = harness(transport, MemoryStore::new());
    let err = auth::login(&h.client, "a@b.c", "x", &TenantId::new("3"))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Login("No se pudo iniciar sesión".to_string()));
}

#[tokio::test]
async fn test_unknown_or_missing_tenant() {
    let transport = MockTransport::new(|_| reply(200, json!([])));
    let h = harness(transport, MemoryStore::new());

    let err = auth::lookup_tenant(&h.client, "nadie").await.unwrap_err();
    assert_eq!(err, ApiError::TenantNotFound("nadie".to_string()));

    let err = auth::login_with_tenant(&h.client, &TenantConfig { name: None }, "a", "b")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
    assert_eq!(h.transport.requests().len(), 1);
}
