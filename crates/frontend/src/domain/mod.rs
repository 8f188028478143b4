pub mod a011_commercial_sale;
pub mod a012_production_order;
