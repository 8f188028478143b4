//! Top bar: sidebar toggle, title, signed-in user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::services::use_services;
use crate::system::auth::context::{sync_auth, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let services = use_services();
    let api = StoredValue::new(services.api);
    let title = services.config.tenant.name.clone().unwrap_or_else(|| "ERP".to_string());
    let auth_state = use_auth();

    let logout = move |_| {
        api.with_value(|api| {
            client::auth::logout(api);
            sync_auth(auth_state, api.session());
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{title}</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span>
                        {move || auth_state.with(|s| {
                            s.user
                                .as_ref()
                                .and_then(|u| u.email.clone())
                                .unwrap_or_else(|| "Invitado".to_string())
                        })}
                    </span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
