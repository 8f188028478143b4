//! Page registry: the one place mapping `active` keys to screens.

use crate::domain::a011_commercial_sale::ui::sale_items_editor;
use crate::domain::a012_production_order::ui::qr_action;
use crate::shared::crud::CrudPage;
use crate::usecases::u101_point_of_sale::PointOfSaleView;
use contracts::domain::a001_bank::aggregate::Bank;
use contracts::domain::a002_account::aggregate::Account;
use contracts::domain::a003_supplier::aggregate::Supplier;
use contracts::domain::a004_client::aggregate::Client;
use contracts::domain::a005_local::aggregate::Local;
use contracts::domain::a006_cash_register::aggregate::CashRegister;
use contracts::domain::a007_payment_method_type::aggregate::PaymentMethodType;
use contracts::domain::a008_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::a009_bank_statement::aggregate::BankStatement;
use contracts::domain::a010_commercial_product::aggregate::CommercialProduct;
use contracts::domain::a011_commercial_sale::aggregate::CommercialSale;
use contracts::domain::a012_production_order::aggregate::ProductionOrder;
use contracts::domain::a013_order_note::aggregate::OrderNote;
use contracts::domain::a014_warehouse::aggregate::Warehouse;
use contracts::domain::a015_user::aggregate::User;
use contracts::domain::a016_product_template::aggregate::ProductTemplate;
use contracts::domain::a017_employee::aggregate::Employee;
use contracts::domain::a018_promotion::aggregate::Promotion;
use contracts::domain::a019_loyalty_card::aggregate::LoyaltyCard;
use contracts::domain::a020_delivery_note::aggregate::DeliveryNote;
use contracts::domain::a021_factory::aggregate::Factory;
use contracts::domain::a022_size::aggregate::Size;
use leptos::prelude::*;

pub fn page_label(key: &str) -> &'static str {
    match key {
        "a001_bank" => "Bancos",
        "a002_account" => "Cuentas",
        "a003_supplier" => "Proveedores",
        "a004_client" => "Clientes",
        "a005_local" => "Locales",
        "a006_cash_register" => "Cajas",
        "a007_payment_method_type" => "Tipos de Pago",
        "a008_purchase_order" => "Órdenes de Compra",
        "a009_bank_statement" => "Extractos Bancarios",
        "a010_commercial_product" => "Productos Comerciales",
        "a011_commercial_sale" => "Ventas",
        "a012_production_order" => "Órdenes de Producción",
        "a013_order_note" => "Notas de Pedido",
        "a014_warehouse" => "Depósitos",
        "a015_user" => "Usuarios",
        "a016_product_template" => "Plantillas de Producto",
        "a017_employee" => "Empleados",
        "a018_promotion" => "Promociones",
        "a019_loyalty_card" => "Tarjetas de Fidelidad",
        "a020_delivery_note" => "Remitos",
        "a021_factory" => "Fábricas",
        "a022_size" => "Talles",
        "u101_point_of_sale" => "Puesto de Venta",
        _ => "Inicio",
    }
}

pub fn render_page(key: &str) -> AnyView {
    match key {
        "a001_bank" => view! { <CrudPage<Bank> /> }.into_any(),
        "a002_account" => view! { <CrudPage<Account> /> }.into_any(),
        "a003_supplier" => view! { <CrudPage<Supplier> /> }.into_any(),
        "a004_client" => view! { <CrudPage<Client> /> }.into_any(),
        "a005_local" => view! { <CrudPage<Local> /> }.into_any(),
        "a006_cash_register" => view! { <CrudPage<CashRegister> /> }.into_any(),
        "a007_payment_method_type" => view! { <CrudPage<PaymentMethodType> /> }.into_any(),
        "a008_purchase_order" => view! { <CrudPage<PurchaseOrder> /> }.into_any(),
        "a009_bank_statement" => view! { <CrudPage<BankStatement> /> }.into_any(),
        "a010_commercial_product" => view! { <CrudPage<CommercialProduct> /> }.into_any(),
        "a011_commercial_sale" => {
            view! { <CrudPage<CommercialSale> draft_extra=sale_items_editor /> }.into_any()
        }
        "a012_production_order" => {
            view! { <CrudPage<ProductionOrder> row_extra=qr_action /> }.into_any()
        }
        "a013_order_note" => view! { <CrudPage<OrderNote> /> }.into_any(),
        "a014_warehouse" => view! { <CrudPage<Warehouse> /> }.into_any(),
        "a015_user" => view! { <CrudPage<User> /> }.into_any(),
        "a016_product_template" => view! { <CrudPage<ProductTemplate> /> }.into_any(),
        "a017_employee" => view! { <CrudPage<Employee> /> }.into_any(),
        "a018_promotion" => view! { <CrudPage<Promotion> /> }.into_any(),
        "a019_loyalty_card" => view! { <CrudPage<LoyaltyCard> /> }.into_any(),
        "a020_delivery_note" => view! { <CrudPage<DeliveryNote> /> }.into_any(),
        "a021_factory" => view! { <CrudPage<Factory> /> }.into_any(),
        "a022_size" => view! { <CrudPage<Size> /> }.into_any(),
        "u101_point_of_sale" => view! { <PointOfSaleView /> }.into_any(),
        other => {
            log::warn!("Unknown page '{}'", other);
            view! {
                <div class="page">
                    <h2 class="header__title">"Bienvenido"</h2>
                    <p>"Seleccione una sección del menú."</p>
                </div>
            }
            .into_any()
        }
    }
}
