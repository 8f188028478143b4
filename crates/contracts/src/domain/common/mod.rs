//! Common types and traits for all backend resources

pub mod foreign_key;
pub mod lenient;
pub mod record_id;
pub mod resource;

// Re-exports
pub use foreign_key::ForeignKey;
pub use record_id::RecordId;
pub use resource::{Draft, Resource, UpdateMethod};
