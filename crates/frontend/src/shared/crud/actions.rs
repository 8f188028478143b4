//! Bridges between the CRUD state machine and the API client.
//!
//! Every function moves the module into its "in flight" state synchronously,
//! then finishes on a spawned task. A page that was closed in the meantime has
//! a disposed signal, and the late result is dropped.

use client::reference::load_references;
use client::{ApiClient, CrudModule};
use contracts::domain::common::{RecordId, Resource};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub fn reload<R: Resource>(module: RwSignal<CrudModule<R>>, api: ApiClient) {
    let tenant = api.session().tenant_id();
    let Some(ticket) = module.try_update(|m| m.begin_load(tenant.as_ref())).flatten() else {
        log::debug!("{}: no tenant selected yet", R::list_name());
        return;
    };
    spawn_local(async move {
        let result = api.list(R::endpoint()).await;
        module.try_update(|m| m.finish_load(ticket, result));
    });
}

/// Open the dialog empty (`None`) or on a listed record, and fetch its reference lists.
pub fn open_dialog<R: Resource>(module: RwSignal<CrudModule<R>>, api: ApiClient, id: Option<RecordId>) {
    let ticket = module
        .try_update(|m| match id {
            Some(id) => m.open_edit(id),
            None => Some(m.open_create()),
        })
        .flatten();
    let Some(ticket) = ticket else {
        return;
    };
    if R::references().is_empty() {
        return;
    }
    spawn_local(async move {
        let state = load_references(&api, R::references()).await;
        module.try_update(|m| m.finish_references(ticket, state));
    });
}

pub fn submit<R: Resource>(module: RwSignal<CrudModule<R>>, api: ApiClient) {
    let Some(request) = module.try_update(|m| m.begin_submit()).flatten() else {
        return;
    };
    spawn_local(async move {
        let result = api
            .save(R::endpoint(), request.id, request.body, request.method)
            .await
            .map(|_| ());
        if module.try_update(|m| m.finish_submit(request.ticket, result)).unwrap_or(false) {
            reload(module, api);
        }
    });
}

pub fn delete_confirmed<R: Resource>(module: RwSignal<CrudModule<R>>, api: ApiClient) {
    let Some(id) = module.try_update(|m| m.confirm_delete()).flatten() else {
        return;
    };
    spawn_local(async move {
        let result = api.remove(R::endpoint(), id).await;
        if module.try_update(|m| m.finish_delete(result)).unwrap_or(false) {
            reload(module, api);
        }
    });
}
