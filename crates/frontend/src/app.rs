use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::services::AppServices;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppServices::new());
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
