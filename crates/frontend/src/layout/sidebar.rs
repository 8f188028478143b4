use crate::layout::global_context::AppGlobalContext;
use crate::layout::registry::page_label;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<&'static str>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "sales",
            label: "Ventas",
            icon: "cart",
            items: vec![
                "u101_point_of_sale",
                "a011_commercial_sale",
                "a004_client",
                "a010_commercial_product",
                "a018_promotion",
                "a019_loyalty_card",
                "a020_delivery_note",
            ],
        },
        MenuGroup {
            id: "purchasing",
            label: "Compras",
            icon: "products",
            items: vec!["a003_supplier", "a008_purchase_order", "a014_warehouse"],
        },
        MenuGroup {
            id: "finance",
            label: "Finanzas",
            icon: "finance",
            items: vec![
                "a001_bank",
                "a002_account",
                "a009_bank_statement",
                "a007_payment_method_type",
            ],
        },
        MenuGroup {
            id: "stores",
            label: "Locales",
            icon: "customers",
            items: vec!["a005_local", "a006_cash_register"],
        },
        MenuGroup {
            id: "manufacturing",
            label: "Manufactura",
            icon: "factory",
            items: vec![
                "a013_order_note",
                "a012_production_order",
                "a016_product_template",
                "a022_size",
                "a021_factory",
            ],
        },
        MenuGroup {
            id: "staff",
            label: "Personal",
            icon: "customers",
            items: vec!["a017_employee", "a015_user"],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let expanded_groups = RwSignal::new(vec!["sales"]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups()
                .into_iter()
                .map(|group| {
                    let group_id = group.id;
                    view! {
                        <div>
                            <div
                                class="app-sidebar__item"
                                style:padding-left="12px"
                                on:click=move |_| {
                                    expanded_groups.update(|items| {
                                        match items.iter().position(|x| *x == group_id) {
                                            Some(pos) => {
                                                items.remove(pos);
                                            }
                                            None => items.push(group_id),
                                        }
                                    });
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || {
                                        expanded_groups.with(|items| items.contains(&group_id))
                                    }
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>
                            <Show when=move || expanded_groups.with(|items| items.contains(&group_id))>
                                <div class="app-sidebar__children">
                                    {group
                                        .items
                                        .iter()
                                        .map(|&key| {
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        ctx.active.with(|a| a.as_deref() == Some(key))
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_page(key)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon("item")}
                                                        <span>{page_label(key)}</span>
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
