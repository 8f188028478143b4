pub mod qr;

pub use qr::qr_action;
