//! Backend access shared by the ERP screens: HTTP adapter with session
//! handling, auth flows, and the generic CRUD module state machine.

pub mod api;
pub mod auth;
pub mod config;
pub mod crud;
pub mod endpoint;
pub mod error;
pub mod reference;
pub mod session;
pub mod transport;

pub use api::{ApiClient, Navigator, LOGIN_PATH};
pub use config::{load_config, Config};
pub use crud::{CrudModule, DialogState, ListState};
pub use error::ApiError;
pub use reference::{ReferenceData, ReferenceState};
pub use session::{MemoryStore, SessionManager, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportError};
