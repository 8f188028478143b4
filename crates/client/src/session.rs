//! Session state shared by every request: tokens, tenant and decoded user.
//!
//! One `SessionManager` is built at start-up and handed to the API client and
//! the UI. It reads back whatever the `SessionStore` persisted so a reload
//! keeps the user logged in.

use contracts::system::auth::{TokenClaims, TokenPair};
use contracts::system::tenant::TenantId;
use std::sync::{Arc, RwLock};

/// Durable storage for the session (localStorage in the browser).
pub trait SessionStore: Send + Sync {
    fn load_tokens(&self) -> Option<TokenPair>;
    fn save_tokens(&self, tokens: &TokenPair);
    fn clear_tokens(&self);
    fn load_tenant(&self) -> Option<TenantId>;
    fn save_tenant(&self, tenant: &TenantId);
    fn clear_tenant(&self);
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn load_tokens(&self) -> Option<TokenPair> {
        (**self).load_tokens()
    }

    fn save_tokens(&self, tokens: &TokenPair) {
        (**self).save_tokens(tokens)
    }

    fn clear_tokens(&self) {
        (**self).clear_tokens()
    }

    fn load_tenant(&self) -> Option<TenantId> {
        (**self).load_tenant()
    }

    fn save_tenant(&self, tenant: &TenantId) {
        (**self).save_tenant(tenant)
    }

    fn clear_tenant(&self) {
        (**self).clear_tenant()
    }
}

/// In-memory store for tests and native tools.
#[derive(Default)]
pub struct MemoryStore {
    tokens: RwLock<Option<TokenPair>>,
    tenant: RwLock<Option<TenantId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(tokens: TokenPair, tenant: Option<TenantId>) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
            tenant: RwLock::new(tenant),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load_tokens(&self) -> Option<TokenPair> {
        self.tokens.read().ok().and_then(|t| t.clone())
    }

    fn save_tokens(&self, tokens: &TokenPair) {
        if let Ok(mut slot) = self.tokens.write() {
            *slot = Some(tokens.clone());
        }
    }

    fn clear_tokens(&self) {
        if let Ok(mut slot) = self.tokens.write() {
            *slot = None;
        }
    }

    fn load_tenant(&self) -> Option<TenantId> {
        self.tenant.read().ok().and_then(|t| t.clone())
    }

    fn save_tenant(&self, tenant: &TenantId) {
        if let Ok(mut slot) = self.tenant.write() {
            *slot = Some(tenant.clone());
        }
    }

    fn clear_tenant(&self) {
        if let Ok(mut slot) = self.tenant.write() {
            *slot = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SessionState {
    tokens: Option<TokenPair>,
    tenant: Option<TenantId>,
    user: Option<TokenClaims>,
}

pub struct SessionManager {
    store: Box<dyn SessionStore>,
    state: RwLock<SessionState>,
}

fn decode_user(access: &str) -> Option<TokenClaims> {
    match TokenClaims::decode(access) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::warn!("Could not decode access token: {}", e);
            None
        }
    }
}

impl SessionManager {
    /// Restore whatever the store holds.
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        let tokens = store.load_tokens();
        let tenant = store.load_tenant();
        let user = tokens.as_ref().and_then(|t| decode_user(&t.access));
        Self {
            store,
            state: RwLock::new(SessionState {
                tokens,
                tenant,
                user,
            }),
        }
    }

    fn read(&self) -> SessionState {
        self.state.read().map(|s| s.clone()).unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        if let Ok(mut state) = self.state.write() {
            f(&mut state);
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().tokens.map(|t| t.access)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read()
            .tokens
            .map(|t| t.refresh)
            .filter(|r| !r.is_empty())
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.read().tokens
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.read().tenant
    }

    pub fn user(&self) -> Option<TokenClaims> {
        self.read().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().tokens.is_some()
    }

    /// Store a freshly issued pair (login).
    pub fn set_tokens(&self, tokens: TokenPair) {
        self.store.save_tokens(&tokens);
        let user = decode_user(&tokens.access);
        self.update(|s| {
            s.tokens = Some(tokens);
            s.user = user;
        });
    }

    /// Replace the access token after a refresh, keeping the refresh token.
    pub fn set_access_token(&self, access: String) {
        let Some(mut tokens) = self.tokens() else {
            log::warn!("Ignoring refreshed access token: no session");
            return;
        };
        tokens.access = access;
        self.set_tokens(tokens);
    }

    pub fn set_tenant(&self, tenant: TenantId) {
        self.store.save_tenant(&tenant);
        self.update(|s| s.tenant = Some(tenant));
    }

    /// Drop tokens, user and tenant from memory and storage.
    pub fn clear(&self) {
        self.store.clear_tokens();
        self.store.clear_tenant();
        self.update(|s| *s = SessionState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    #[test]
    fn test_restores_from_store() {
        let store = MemoryStore::with_session(pair("a", "r"), Some(TenantId::new("7")));
        let session = SessionManager::new(Box::new(store));
        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("a"));
        assert_eq!(session.tenant_id(), Some(TenantId::new("7")));
        // not a JWT, so no user
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_refresh_keeps_refresh_token_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionManager::new(Box::new(store.clone()));
        session.set_tokens(pair("a", "r"));
        session.set_access_token("b".to_string());
        assert_eq!(store.load_tokens(), Some(pair("b", "r")));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));
    }

    #[test]
    fn test_clear_wipes_storage() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionManager::new(Box::new(store.clone()));
        session.set_tokens(pair("a", "r"));
        session.set_tenant(TenantId::new("3"));
        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.tenant_id(), None);
        assert_eq!(store.load_tokens(), None);
        assert_eq!(store.load_tenant(), None);
    }

    #[test]
    fn test_access_refresh_without_session_is_ignored() {
        let session = SessionManager::new(Box::new(MemoryStore::new()));
        session.set_access_token("b".to_string());
        assert!(!session.is_authenticated());
    }
}
