use super::api::{
    create_sale, load_terminal, Terminal, CLIENTS_ENDPOINT, PAYMENT_METHODS_ENDPOINT,
    TEMPLATES_ENDPOINT,
};
use crate::shared::icons::icon;
use crate::shared::services::use_services;
use crate::system::auth::context::use_auth;
use crate::system::auth::storage;
use contracts::domain::a006_cash_register::aggregate::local_of;
use contracts::domain::common::{ForeignKey, RecordId};
use contracts::shared::pos::cart::Cart;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

fn parse_amount(input: &str) -> f64 {
    input.trim().parse().unwrap_or(0.0)
}

#[component]
pub fn PointOfSaleView() -> impl IntoView {
    let api = StoredValue::new(use_services().api);
    let auth_state = use_auth();

    let terminal = RwSignal::new(Option::<Terminal>::None);
    let is_loading = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);
    let notice = RwSignal::new(Option::<String>::None);
    let is_saving = RwSignal::new(false);

    let cart = RwSignal::new(Cart::new());
    let register = RwSignal::new(storage::get_cash_register().unwrap_or_default());
    let product = RwSignal::new(String::new());
    let quantity = RwSignal::new("1".to_string());
    let unit_price = RwSignal::new(String::new());

    Effect::new(move |_| {
        if auth_state.with(|s| s.tenant.is_none()) {
            return;
        }
        is_loading.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match load_terminal(&api).await {
                Ok(data) => {
                    terminal.try_set(Some(data));
                }
                Err(e) => {
                    log::error!("Failed to load point of sale data: {}", e);
                    error_message.try_set(Some(
                        "Error al cargar los datos. Por favor, intente de nuevo.".to_string(),
                    ));
                }
            }
            is_loading.try_set(false);
        });
    });

    let options = move |endpoint: &'static str| {
        terminal.with(|t| {
            t.as_ref()
                .map(|t| t.options.options(endpoint).to_vec())
                .unwrap_or_default()
        })
    };

    let add_line = move |_: leptos::ev::MouseEvent| {
        let Ok(id) = RecordId::parse(&product.get_untracked()) else {
            error_message.set(Some("Por favor, seleccione una plantilla.".to_string()));
            return;
        };
        let name = terminal.with_untracked(|t| {
            t.as_ref()
                .and_then(|t| t.options.label(TEMPLATES_ENDPOINT, id).map(str::to_string))
                .unwrap_or_default()
        });
        let qty = quantity.get_untracked().trim().parse::<u32>().unwrap_or(0);
        let price = parse_amount(&unit_price.get_untracked());
        let mut result = Ok(());
        cart.update(|c| result = c.add_line(id, name, qty, price));
        match result {
            Ok(()) => {
                error_message.set(None);
                product.set(String::new());
                quantity.set("1".to_string());
                unit_price.set(String::new());
            }
            Err(e) => error_message.set(Some(e.to_string())),
        }
    };

    let save = move |_: leptos::ev::MouseEvent| {
        let local = terminal.with_untracked(|t| {
            let register_id = RecordId::parse(&register.get_untracked()).ok();
            t.as_ref()
                .zip(register_id)
                .and_then(|(t, id)| {
                    t.registers
                        .iter()
                        .find(|r| r.id == id)
                        .map(|r| local_of(r, &t.locals))
                })
                .unwrap_or_else(ForeignKey::none)
        });
        let sale = match cart.with_untracked(|c| c.checkout(local)) {
            Ok(sale) => sale,
            Err(e) => {
                error_message.set(Some(e.to_string()));
                return;
            }
        };
        is_saving.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match create_sale(&api, &sale).await {
                Ok(()) => {
                    cart.try_update(|c| c.clear());
                    error_message.try_set(None);
                    notice.try_set(Some("Venta registrada.".to_string()));
                }
                Err(e) => {
                    log::error!("Failed to save sale: {}", e);
                    error_message.try_set(Some(
                        "Error al guardar la venta. Por favor, intente de nuevo.".to_string(),
                    ));
                }
            }
            is_saving.try_set(false);
        });
    };

    view! {
        <div class="page pos">
            <div class="header">
                <h2 class="header__title">"Puesto de Venta"</h2>
            </div>

            {move || error_message.get().map(|message| view! {
                <div class="warning-box">
                    <span class="warning-box__text">{message}</span>
                    <button class="button button--icon" on:click=move |_| error_message.set(None)>
                        {icon("x")}
                    </button>
                </div>
            })}
            {move || notice.get().map(|message| view! {
                <div class="info-box" on:click=move |_| notice.set(None)>{message}</div>
            })}

            <Show
                when=move || terminal.with(Option::is_some)
                fallback=move || view! {
                    <Show when=move || is_loading.get()>
                        <div class="loading">"Cargando..."</div>
                    </Show>
                }
            >
                <div class="form-group">
                    <label for="pos-register">"Caja"</label>
                    <select
                        id="pos-register"
                        prop:value=move || register.get()
                        on:change=move |ev| {
                            let id = event_target_value(&ev);
                            storage::save_cash_register(&id);
                            register.set(id);
                        }
                    >
                        <option value="">"Seleccione una caja"</option>
                        {move || terminal.with(|t| {
                            t.as_ref()
                                .map(|t| t.registers.clone())
                                .unwrap_or_default()
                                .into_iter()
                                .map(|r| {
                                    let id = r.id.to_string();
                                    let id_for_selected = id.clone();
                                    view! {
                                        <option value=id prop:selected=move || { register.get() == id_for_selected }>
                                            {r.name}
                                        </option>
                                    }
                                })
                                .collect_view()
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="pos-client">"Cliente"</label>
                    <select
                        id="pos-client"
                        prop:value=move || cart.with(|c| c.client.input_value())
                        on:change=move |ev| {
                            let input = event_target_value(&ev);
                            cart.update(|c| c.client = ForeignKey::from_input(&input));
                        }
                    >
                        <option value="">"Seleccione un cliente"</option>
                        {move || options(CLIENTS_ENDPOINT)
                            .into_iter()
                            .map(|o| view! { <option value={o.id.to_string()}>{o.label}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="pos-payment">"Método de pago"</label>
                    <select
                        id="pos-payment"
                        prop:value=move || cart.with(|c| c.payment_method.input_value())
                        on:change=move |ev| {
                            let input = event_target_value(&ev);
                            cart.update(|c| c.payment_method = ForeignKey::from_input(&input));
                        }
                    >
                        <option value="">"Seleccione un método de pago"</option>
                        {move || options(PAYMENT_METHODS_ENDPOINT)
                            .into_iter()
                            .map(|o| view! { <option value={o.id.to_string()}>{o.label}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="pos__add-line">
                    <div class="form-group">
                        <label for="pos-template">"Plantilla"</label>
                        <select
                            id="pos-template"
                            prop:value=move || product.get()
                            on:change=move |ev| product.set(event_target_value(&ev))
                        >
                            <option value="">"Seleccione una plantilla"</option>
                            {move || options(TEMPLATES_ENDPOINT)
                                .into_iter()
                                .map(|o| view! { <option value={o.id.to_string()}>{o.label}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="pos-quantity">"Cantidad"</label>
                        <input
                            id="pos-quantity"
                            type="number"
                            min="1"
                            prop:value=move || quantity.get()
                            on:input=move |ev| quantity.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="pos-price">"Precio unitario"</label>
                        <input
                            id="pos-price"
                            type="number"
                            step="any"
                            prop:value=move || unit_price.get()
                            on:input=move |ev| unit_price.set(event_target_value(&ev))
                        />
                    </div>
                    <Button appearance=ButtonAppearance::Secondary on_click=add_line>
                        {icon("plus")}
                        " Añadir"
                    </Button>
                </div>

                <table class="table__data">
                    <thead>
                        <tr>
                            <th class="table__header-cell">"Plantilla"</th>
                            <th class="table__header-cell">"Cantidad"</th>
                            <th class="table__header-cell">"Precio unitario"</th>
                            <th class="table__header-cell">"Subtotal"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || cart.with(|c| c.lines().to_vec())
                            .into_iter()
                            .map(|line| {
                                let product_id = line.product;
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{line.name.clone()}</td>
                                        <td class="table__cell">
                                            <input
                                                type="number"
                                                min="1"
                                                prop:value=line.quantity.to_string()
                                                on:change=move |ev| {
                                                    let qty = event_target_value(&ev).trim().parse::<u32>().unwrap_or(0);
                                                    let mut result = Ok(());
                                                    cart.update(|c| result = c.set_quantity(product_id, qty));
                                                    if let Err(e) = result {
                                                        error_message.set(Some(e.to_string()));
                                                    }
                                                }
                                            />
                                        </td>
                                        <td class="table__cell">{format!("{:.2}", line.unit_price)}</td>
                                        <td class="table__cell">{format!("{:.2}", line.subtotal())}</td>
                                        <td class="table__cell">
                                            <button
                                                class="button button--icon"
                                                on:click=move |_| cart.update(|c| c.remove_line(product_id))
                                            >
                                                {icon("trash")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>

                <div class="pos__totals">
                    <p>{move || format!("Total: {:.2}", cart.with(Cart::total))}</p>
                    <div class="form-group">
                        <label for="pos-discount-reason">"Motivo del descuento"</label>
                        <input
                            id="pos-discount-reason"
                            type="text"
                            prop:value=move || cart.with(|c| c.discount_reason.clone())
                            on:input=move |ev| {
                                let reason = event_target_value(&ev);
                                cart.update(|c| c.discount_reason = reason);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="pos-discount-amount">"Descuento ($)"</label>
                        <input
                            id="pos-discount-amount"
                            type="number"
                            step="any"
                            prop:value=move || format!("{:.2}", cart.with(Cart::discount_amount))
                            on:change=move |ev| {
                                let amount = parse_amount(&event_target_value(&ev));
                                cart.update(|c| c.set_discount_amount(amount));
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="pos-discount-percentage">"Descuento (%)"</label>
                        <input
                            id="pos-discount-percentage"
                            type="number"
                            step="any"
                            prop:value=move || format!("{:.2}", cart.with(Cart::discount_percentage))
                            on:change=move |ev| {
                                let percentage = parse_amount(&event_target_value(&ev));
                                cart.update(|c| c.set_discount_percentage(percentage));
                            }
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| cart.update(|c| c.apply_discount())
                    >
                        "Aplicar descuento"
                    </Button>
                    <p>{move || format!("Descuento aplicado: {:.2}", cart.with(Cart::applied_discount))}</p>
                    <p class="pos__net-total">
                        {move || format!("Total neto: {:.2}", cart.with(Cart::net_total))}
                    </p>
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=move || is_saving.get()
                    on_click=save
                >
                    {move || if is_saving.get() { "Guardando..." } else { "Registrar venta" }}
                </Button>
            </Show>
        </div>
    }
}
