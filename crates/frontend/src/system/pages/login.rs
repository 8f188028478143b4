use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::services::use_services;
use crate::system::auth::context::{sync_auth, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = use_services();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let auth_state = use_auth();
    let tenant_name = services.config.tenant.name.clone().unwrap_or_default();
    let services = StoredValue::new(services);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();
        let services = services.get_value();

        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            let result = client::auth::login_with_tenant(
                &services.api,
                &services.config.tenant,
                &email_val,
                &password_val,
            )
            .await;
            match result {
                // switches AppRoutes over to the main layout
                Ok(()) => sync_auth(auth_state, services.api.session()),
                Err(e) => {
                    log::error!("Login failed: {}", e);
                    error_message.set(Some(e.user_message()));
                }
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"ERP Textil"</h1>
                <h2>"Iniciar sesión"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Correo electrónico"</label>
                        <input
                            type="email"
                            id="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Contraseña"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>

                <div class="login-info">
                    <p>"Empresa: " <strong>{tenant_name}</strong></p>
                </div>
            </div>
        </div>
    }
}
