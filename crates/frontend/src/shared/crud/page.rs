use super::actions::{delete_confirmed, open_dialog, reload, submit};
use super::field::DialogField;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::services::use_services;
use crate::system::auth::context::use_auth;
use client::{ApiClient, CrudModule, ReferenceState};
use contracts::domain::common::{Draft, RecordId, Resource};
use leptos::prelude::*;
use thaw::{
    Button, ButtonAppearance, ButtonSize, Table, TableBody, TableCell, TableCellLayout,
    TableHeader, TableHeaderCell, TableRow,
};

/// Extra editor rendered below the dialog fields (line items and the like).
pub type DraftSlot<R> = fn(RwSignal<CrudModule<R>>) -> AnyView;

/// Extra buttons rendered in each row's action cell.
pub type RowSlot = fn(RecordId) -> AnyView;

/// List + dialog screen for one resource.
#[component]
pub fn CrudPage<R: Resource>(
    #[prop(optional)] draft_extra: Option<DraftSlot<R>>,
    #[prop(optional)] row_extra: Option<RowSlot>,
) -> impl IntoView {
    let api = StoredValue::new(use_services().api);
    let auth_state = use_auth();
    let module = RwSignal::new(CrudModule::<R>::new());

    // fetch on mount, and again once a tenant is selected
    Effect::new(move |_| {
        let _tenant = auth_state.with(|s| s.tenant.clone());
        reload(module, api.get_value());
    });

    let table = Memo::new(move |_| {
        module.with(|m| {
            m.rows()
                .iter()
                .map(|row| {
                    let cells: Vec<String> = R::columns().iter().map(|c| c.render(row)).collect();
                    (row.id(), cells)
                })
                .collect::<Vec<_>>()
        })
    });
    let banner = Memo::new(move |_| module.with(|m| m.banner().map(str::to_string)));
    let is_loading = Memo::new(move |_| module.with(|m| m.is_loading()));
    let dialog_open = Memo::new(move |_| module.with(|m| m.dialog().is_open()));
    let pending_delete = Memo::new(move |_| module.with(|m| m.pending_delete()));

    view! {
        <div class="page">
            <div class="header">
                <h2 class="header__title">{R::list_name()}</h2>
                <div class="header__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| open_dialog(module, api.get_value(), None)
                    >
                        {icon("plus")}
                        {format!(" Añadir {}", R::element_name())}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=move || is_loading.get()
                        on_click=move |_| reload(module, api.get_value())
                    >
                        {icon("refresh")}
                        {move || if is_loading.get() { " Cargando..." } else { " Actualizar" }}
                    </Button>
                </div>
            </div>

            {move || banner.get().map(|message| view! {
                <div class="warning-box">
                    <span class="warning-box__text">{message}</span>
                    <button class="button button--icon" on:click=move |_| module.update(|m| m.dismiss_banner())>
                        {icon("x")}
                    </button>
                </div>
            })}

            <div class="table table__data">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {R::columns()
                                .iter()
                                .map(|column| view! { <TableHeaderCell>{column.header}</TableHeaderCell> })
                                .collect_view()}
                            <TableHeaderCell>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            table
                                .get()
                                .into_iter()
                                .map(|(id, cells)| {
                                    view! {
                                        <TableRow>
                                            {cells
                                                .into_iter()
                                                .map(|cell| view! {
                                                    <TableCell>
                                                        <TableCellLayout>{cell}</TableCellLayout>
                                                    </TableCell>
                                                })
                                                .collect_view()}
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open_dialog(module, api.get_value(), Some(id))
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| module.update(|m| m.request_delete(id))
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                    {row_extra.map(|slot| slot(id))}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
                <Show when=move || !is_loading.get() && table.with(|rows| rows.is_empty())>
                    <div class="table__empty">"No hay registros."</div>
                </Show>
            </div>

            <Show when=move || dialog_open.get()>
                <CrudDialog<R> module=module api=api draft_extra=draft_extra />
            </Show>

            {move || pending_delete.get().map(|id| view! {
                <ConfirmDelete<R> module=module api=api id=id />
            })}
        </div>
    }
}

#[component]
fn CrudDialog<R: Resource>(
    module: RwSignal<CrudModule<R>>,
    api: StoredValue<ApiClient>,
    draft_extra: Option<DraftSlot<R>>,
) -> impl IntoView {
    let is_edit = module.with_untracked(|m| m.dialog().draft().and_then(Draft::id).is_some());
    let title = if is_edit {
        format!("Editar {}", R::element_name())
    } else {
        format!("Añadir {}", R::element_name())
    };

    let references_ready = Memo::new(move |_| module.with(|m| m.references().is_ready()));
    let references_error = Memo::new(move |_| {
        module.with(|m| match m.references() {
            ReferenceState::Failed(message) => Some(message.clone()),
            _ => None,
        })
    });
    let dialog_error = Memo::new(move |_| module.with(|m| m.dialog().error().map(str::to_string)));
    let submitting = Memo::new(move |_| module.with(|m| m.dialog().is_submitting()));

    let close = Callback::new(move |_| module.update(|m| m.close_dialog()));

    view! {
        <Modal title=title on_close=close>
            {move || dialog_error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            {move || references_error.get().map(|e| view! {
                <div class="error-message">{format!("Error al cargar datos de referencia: {}", e)}</div>
            })}
            <Show
                when=move || references_ready.get()
                fallback=move || view! {
                    <Show when=move || references_error.with(Option::is_none)>
                        <div class="loading">"Cargando datos..."</div>
                    </Show>
                }
            >
                <form class="dialog-form" on:submit=move |ev| {
                    ev.prevent_default();
                    submit(module, api.get_value());
                }>
                    {R::form_fields()
                        .iter()
                        .map(|field| view! { <DialogField<R> module=module field=*field /> })
                        .collect_view()}
                    {draft_extra.map(|slot| slot(module))}
                </form>
            </Show>
            <div class="modal-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=move || submitting.get() || !references_ready.get()
                    on_click=move |_| submit(module, api.get_value())
                >
                    {move || if submitting.get() { "Guardando..." } else { "Guardar" }}
                </Button>
            </div>
        </Modal>
    }
}

#[component]
fn ConfirmDelete<R: Resource>(
    module: RwSignal<CrudModule<R>>,
    api: StoredValue<ApiClient>,
    id: RecordId,
) -> impl IntoView {
    let cancel = Callback::new(move |_| module.update(|m| m.cancel_delete()));

    view! {
        <Modal title=format!("Eliminar {}", R::element_name()) on_close=cancel>
            <p>{format!("¿Está seguro de que desea eliminar el registro #{}?", id)}</p>
            <div class="modal-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| cancel.run(())>
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| delete_confirmed(module, api.get_value())
                >
                    "Eliminar"
                </Button>
            </div>
        </Modal>
    }
}
