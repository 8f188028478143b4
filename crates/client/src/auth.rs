//! Login, logout and tenant resolution.

use contracts::shared::error_payload;
use contracts::shared::list::normalize_list;
use contracts::system::auth::{LoginRequest, TokenPair};
use contracts::system::tenant::{Tenant, TenantId};

use crate::api::{decode, ApiClient, TENANT_HEADER};
use crate::config::TenantConfig;
use crate::endpoint;
use crate::error::ApiError;
use crate::transport::{HttpRequest, Method, RequestBody};

pub const TOKEN_PATH: &str = "/token/";
pub const TENANTS_PATH: &str = "/tenants/";

/// Exchange a tenant name for its id (`GET /tenants/?name=`).
pub async fn lookup_tenant(client: &ApiClient, name: &str) -> Result<TenantId, ApiError> {
    let url = client.url(&endpoint::with_query(TENANTS_PATH, "name", name));
    let response = client.send_plain(HttpRequest::new(Method::Get, url)).await?;
    let first = normalize_list(response.body)
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::TenantNotFound(name.to_string()))?;
    let tenant: Tenant = decode(Some(first))?;
    log::info!("Tenant '{}' resolved to {}", name, tenant.id);
    Ok(tenant.id)
}

/// `POST /token/` for the given tenant. On success the session holds the
/// tokens, the decoded user and the tenant.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
    tenant: &TenantId,
) -> Result<(), ApiError> {
    let body = serde_json::to_value(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
    .map_err(|e| ApiError::Encode(e.to_string()))?;

    let mut request =
        HttpRequest::new(Method::Post, client.url(TOKEN_PATH)).with_body(RequestBody::Json(body));
    request.set_header(TENANT_HEADER, tenant.as_str());

    let response = match client.send_plain(request).await {
        Ok(response) => response,
        Err(ApiError::Status { payload, .. }) => {
            let message = payload
                .as_ref()
                .and_then(error_payload::detail)
                .unwrap_or_else(|| "No se pudo iniciar sesión".to_string());
            return Err(ApiError::Login(message));
        }
        Err(e) => return Err(e),
    };

    let tokens: TokenPair = decode(response.body)?;
    let session = client.session();
    session.set_tokens(tokens);
    session.set_tenant(tenant.clone());
    log::info!("Logged in as {}", email);
    Ok(())
}

/// Resolve the configured tenant name, then log in.
pub async fn login_with_tenant(
    client: &ApiClient,
    tenant: &TenantConfig,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let name = tenant
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Config("el nombre de la empresa no está configurado".to_string()))?;
    let tenant_id = lookup_tenant(client, name).await?;
    login(client, email, password, &tenant_id).await
}

pub fn logout(client: &ApiClient) {
    client.session().clear();
    log::info!("Logged out");
}
