pub mod actions;
pub mod field;
pub mod page;

pub use page::{CrudPage, DraftSlot, RowSlot};
