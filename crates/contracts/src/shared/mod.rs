pub mod error_payload;
pub mod form;
pub mod list;
pub mod payload;
pub mod pos;
pub mod table;
