use crate::layout::global_context::AppGlobalContext;
use crate::layout::registry::render_page;
use crate::layout::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    // Restores `?active=` once, then keeps the URL in sync.
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <div class="app-tabs__page" data-page=move || ctx.active.get().unwrap_or_default()>
                        {move || render_page(&ctx.active.get().unwrap_or_default())}
                    </div>
                }
                .into_any()
            }
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.authenticated)
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
