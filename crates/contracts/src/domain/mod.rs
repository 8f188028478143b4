pub mod common;

pub mod a001_bank;
pub mod a002_account;
pub mod a003_supplier;
pub mod a004_client;
pub mod a005_local;
pub mod a006_cash_register;
pub mod a007_payment_method_type;
pub mod a008_purchase_order;
pub mod a009_bank_statement;
pub mod a010_commercial_product;
pub mod a011_commercial_sale;
pub mod a012_production_order;
pub mod a013_order_note;
pub mod a014_warehouse;
pub mod a015_user;
pub mod a016_product_template;
pub mod a017_employee;
pub mod a018_promotion;
pub mod a019_loyalty_card;
pub mod a020_delivery_note;
pub mod a021_factory;
pub mod a022_size;
