pub mod crud;
pub mod http;
pub mod icons;
pub mod modal;
pub mod services;
