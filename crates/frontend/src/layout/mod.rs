pub mod global_context;
pub mod registry;
pub mod sidebar;
pub mod top_header;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +------------------------------+
/// |  Sidebar  |     Content      |
/// +------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <div data-zone="left" class="app-sidebar" class:hidden=move || !ctx.left_open.get()>
                    {left()}
                </div>
                <div class="app-main">
                    <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
                        {center()}
                    </div>
                </div>
            </div>
        </div>
    }
}
