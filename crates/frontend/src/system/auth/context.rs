use crate::shared::services::use_services;
use client::{Navigator, SessionManager};
use contracts::system::auth::TokenClaims;
use contracts::system::tenant::TenantId;
use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<TokenClaims>,
    pub tenant: Option<TenantId>,
}

impl AuthState {
    pub fn from_session(session: &SessionManager) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            user: session.user(),
            tenant: session.tenant_id(),
        }
    }
}

/// Sends the UI back to the login screen when the client gives up on the session.
struct WindowNavigator {
    auth: RwSignal<AuthState>,
}

impl Navigator for WindowNavigator {
    fn navigate(&self, path: &str) {
        self.auth.try_set(AuthState::default());
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
            }
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let services = use_services();
    let auth_state = RwSignal::new(AuthState::from_session(services.api.session()));

    services
        .api
        .set_navigator(Arc::new(WindowNavigator { auth: auth_state }));

    // Keep the access token fresh for as long as the app is open.
    let api = services.api.clone();
    let interval = Duration::from_secs(services.config.session.refresh_interval_secs.max(1));
    spawn_local(async move {
        loop {
            sleep(interval).await;
            if !api.session().is_authenticated() {
                continue;
            }
            if let Err(e) = api.refresh_session().await {
                log::warn!("Session refresh failed: {}", e);
            }
            auth_state.try_set(AuthState::from_session(api.session()));
        }
    });

    provide_context(auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

/// Re-read the session after login or logout.
pub fn sync_auth(auth_state: RwSignal<AuthState>, session: &SessionManager) {
    auth_state.set(AuthState::from_session(session));
}
