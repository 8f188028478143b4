use client::SessionStore;
use contracts::system::auth::TokenPair;
use contracts::system::tenant::TenantId;
use web_sys::window;

const AUTH_TOKEN_KEY: &str = "authToken";
const TENANT_ID_KEY: &str = "tenantId";
const CASH_REGISTER_KEY: &str = "caja";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

fn write(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage rejected '{}'", key);
        }
    }
}

fn remove(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// Session persisted in localStorage: the token pair as JSON under
/// `authToken` and the tenant under `tenantId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl SessionStore for LocalStorageStore {
    fn load_tokens(&self) -> Option<TokenPair> {
        let raw = read(AUTH_TOKEN_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                log::warn!("Discarding unreadable stored tokens: {}", e);
                remove(AUTH_TOKEN_KEY);
                None
            }
        }
    }

    fn save_tokens(&self, tokens: &TokenPair) {
        match serde_json::to_string(tokens) {
            Ok(raw) => write(AUTH_TOKEN_KEY, &raw),
            Err(e) => log::error!("Failed to serialize tokens: {}", e),
        }
    }

    fn clear_tokens(&self) {
        remove(AUTH_TOKEN_KEY);
    }

    fn load_tenant(&self) -> Option<TenantId> {
        read(TENANT_ID_KEY)
            .filter(|t| !t.is_empty())
            .map(TenantId::new)
    }

    fn save_tenant(&self, tenant: &TenantId) {
        write(TENANT_ID_KEY, tenant.as_str());
    }

    fn clear_tenant(&self) {
        remove(TENANT_ID_KEY);
    }
}

/// Cash register selected at this terminal
pub fn get_cash_register() -> Option<String> {
    read(CASH_REGISTER_KEY).filter(|v| !v.is_empty())
}

pub fn save_cash_register(id: &str) {
    write(CASH_REGISTER_KEY, id);
}
