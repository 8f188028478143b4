use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RecordId;
use crate::shared::form::FormField;
use crate::shared::payload::SubmitBody;
use crate::shared::table::Column;

/// A backend collection rendered as a list + edit dialog.
///
/// Everything the generic CRUD module needs is declared here, so one module
/// implementation serves every resource.
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Editable copy used by the dialog
    type Draft: Draft<Record = Self>;

    // ============================================================================
    // Instance data
    // ============================================================================

    /// Id used to build `{endpoint}{id}/` URLs
    fn id(&self) -> RecordId;

    // ============================================================================
    // Static description
    // ============================================================================

    /// REST collection path, relative to the API base (e.g. "/banks/")
    fn endpoint() -> &'static str;

    /// UI name, singular (e.g. "Banco")
    fn element_name() -> &'static str;

    /// UI name, plural (e.g. "Bancos")
    fn list_name() -> &'static str;

    /// Table layout
    fn columns() -> &'static [Column<Self>];

    /// Dialog layout
    fn form_fields() -> &'static [FormField<Self::Draft>];

    /// Reference lists the dialog must load before rendering editable fields.
    ///
    /// Each entry is a list endpoint; `FieldKind::Reference` fields name one of them.
    fn references() -> &'static [&'static str] {
        &[]
    }

    /// Verb used when saving an existing record
    fn update_method() -> UpdateMethod {
        UpdateMethod::Replace
    }
}

/// How an edit reaches `{endpoint}{id}/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateMethod {
    /// `PUT` with the whole draft
    #[default]
    Replace,
    /// `PATCH`; the backend keeps nested fields the draft does not carry
    Partial,
}

/// In-progress copy of a record held by an open dialog.
///
/// `Default` is the empty template for "create".
pub trait Draft: Clone + Default + Serialize + Send + Sync + 'static {
    type Record;

    /// Copy of an existing record, related objects flattened to their ids
    fn from_record(record: &Self::Record) -> Self;

    /// Id of the record being edited; unset (or zero) means create
    fn id(&self) -> Option<RecordId>;

    /// Body sent on save. JSON unless the draft carries files.
    fn to_payload(&self) -> Result<SubmitBody, serde_json::Error> {
        Ok(SubmitBody::Json(serde_json::to_value(self)?))
    }
}
