pub mod items;

pub use items::sale_items_editor;
