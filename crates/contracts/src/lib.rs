//! Wire types and UI-independent logic shared by the API client and the frontend.

pub mod domain;
pub mod shared;
pub mod system;
