//! Point-of-sale sale composition

pub mod cart;

pub use cart::{Cart, CartError, CartLine, SalePayload};
