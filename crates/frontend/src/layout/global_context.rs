use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Which page is shown, mirrored in the `?active=` query so a reload
/// lands on the same screen.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    pub fn open_page(&self, key: &str) {
        log::debug!("open page '{}'", key);
        self.active.set(Some(key.to_string()));
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active") {
            self.active.set(Some(active_key.clone()));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(
                    &wasm_bindgen::JsValue::NULL,
                    "",
                    Some(&new_url),
                );
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
