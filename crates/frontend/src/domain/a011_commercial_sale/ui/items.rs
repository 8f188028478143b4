use crate::shared::icons::icon;
use client::reference::RefOption;
use client::CrudModule;
use contracts::domain::a011_commercial_sale::aggregate::{
    CommercialSale, SaleItemColumn, SaleItemDraft, PRODUCTS_ENDPOINT,
};
use leptos::prelude::*;

/// Line items of the sale dialog.
pub fn sale_items_editor(module: RwSignal<CrudModule<CommercialSale>>) -> AnyView {
    view! { <SaleItemsEditor module=module /> }.into_any()
}

#[component]
fn SaleItemsEditor(module: RwSignal<CrudModule<CommercialSale>>) -> impl IntoView {
    let products: Vec<RefOption> = module.with_untracked(|m| {
        m.references()
            .data()
            .map(|d| d.options(PRODUCTS_ENDPOINT).to_vec())
            .unwrap_or_default()
    });
    let products = StoredValue::new(products);

    // rows are rebuilt only when a line is added or removed
    let count = Memo::new(move |_| {
        module.with(|m| m.dialog().draft().map(|d| d.items.len()).unwrap_or(0))
    });
    let total = Memo::new(move |_| {
        module.with(|m| m.dialog().draft().map(|d| d.total()).unwrap_or(0.0))
    });
    let disabled = move || module.with(|m| m.dialog().is_submitting());

    view! {
        <div class="sale-items">
            <div class="sale-items__header">
                <h3>"Productos"</h3>
                // type="button": inside the dialog form
                <button
                    type="button"
                    class="button button--secondary"
                    on:click=move |_| module.update(|m| m.update_draft(|d| d.add_item()))
                    disabled=disabled
                >
                    {icon("plus")}
                    " Añadir producto"
                </button>
            </div>
            <table class="table__data">
                <thead>
                    <tr>
                        <th class="table__header-cell">"Producto"</th>
                        <th class="table__header-cell">"Cantidad"</th>
                        <th class="table__header-cell">"Precio unitario"</th>
                        <th class="table__header-cell">"Subtotal"</th>
                        <th class="table__header-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        (0..count.get())
                            .map(|index| view! { <SaleItemRow module=module index=index products=products /> })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <div class="sale-items__total">
                {move || format!("Total: {:.2}", total.get())}
            </div>
        </div>
    }
}

#[component]
fn SaleItemRow(
    module: RwSignal<CrudModule<CommercialSale>>,
    index: usize,
    products: StoredValue<Vec<RefOption>>,
) -> impl IntoView {
    let read = move |f: fn(&SaleItemDraft) -> String| {
        module.with(|m| {
            m.dialog()
                .draft()
                .and_then(|d| d.items.get(index))
                .map(f)
                .unwrap_or_default()
        })
    };
    let set = move |column: SaleItemColumn, input: String| {
        module.update(|m| m.update_draft(|d| d.set_item(index, column, input)))
    };
    let product = move || read(|item| item.commercial_product.input_value());
    let disabled = move || module.with(|m| m.dialog().is_submitting());

    view! {
        <tr class="table__row">
            <td class="table__cell">
                <select
                    prop:value=product
                    on:change=move |ev| set(SaleItemColumn::Product, event_target_value(&ev))
                    disabled=disabled
                >
                    <option value="" prop:selected=move || { product().is_empty() }>"---------"</option>
                    {products
                        .get_value()
                        .into_iter()
                        .map(|option| {
                            let id = option.id.to_string();
                            let id_for_selected = id.clone();
                            view! {
                                <option value=id prop:selected=move || { product() == id_for_selected }>
                                    {option.label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </td>
            <td class="table__cell">
                <input
                    type="number"
                    min="1"
                    prop:value=move || read(|item| item.quantity.clone())
                    on:input=move |ev| set(SaleItemColumn::Quantity, event_target_value(&ev))
                    disabled=disabled
                />
            </td>
            <td class="table__cell">
                <input
                    type="number"
                    step="any"
                    prop:value=move || read(|item| item.unit_price.clone())
                    on:input=move |ev| set(SaleItemColumn::UnitPrice, event_target_value(&ev))
                    disabled=disabled
                />
            </td>
            <td class="table__cell">
                {move || read(|item| format!("{:.2}", item.subtotal()))}
            </td>
            <td class="table__cell">
                <button
                    type="button"
                    class="button button--icon"
                    on:click=move |_| module.update(|m| m.update_draft(|d| d.remove_item(index)))
                    disabled=disabled
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}
