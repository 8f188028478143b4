//! Generic list + dialog module.
//!
//! One [`CrudModule`] per resource screen. Every transition is a plain method
//! (`begin_*` / `finish_*`) so a UI can keep the module in a signal and await
//! the network in between; the `async` drivers chain the same steps for
//! callers that own the module across the await.

use contracts::domain::common::{Draft, RecordId, Resource, UpdateMethod};
use contracts::shared::form::find_field;
use contracts::shared::list::decode_list;
use contracts::shared::payload::{FileUpload, SubmitBody};
use contracts::shared::table::render_rows;
use contracts::system::tenant::TenantId;
use serde_json::Value;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::reference::{load_references, ReferenceState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// No tenant yet; nothing fetched
    Idle,
    Loading,
    Loaded,
    LoadError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogState<D> {
    Closed,
    OpenCreate(D),
    OpenEdit(D),
    Submitting(D),
    OpenWithError { draft: D, error: String },
}

impl<D> DialogState<D> {
    pub fn draft(&self) -> Option<&D> {
        match self {
            DialogState::Closed => None,
            DialogState::OpenCreate(d)
            | DialogState::OpenEdit(d)
            | DialogState::Submitting(d)
            | DialogState::OpenWithError { draft: d, .. } => Some(d),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            DialogState::Closed | DialogState::Submitting(_) => None,
            DialogState::OpenCreate(d)
            | DialogState::OpenEdit(d)
            | DialogState::OpenWithError { draft: d, .. } => Some(d),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DialogState::Submitting(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DialogState::OpenWithError { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Identifies one list fetch; results of superseded fetches are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Identifies one dialog opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogTicket(u64);

/// What to send for a save.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    /// `None` creates; `Some` updates `{endpoint}{id}/`
    pub id: Option<RecordId>,
    pub body: SubmitBody,
    pub method: UpdateMethod,
    /// Dialog opening the save belongs to
    pub ticket: DialogTicket,
}

pub struct CrudModule<R: Resource> {
    rows: Vec<R>,
    list: ListState,
    dialog: DialogState<R::Draft>,
    references: ReferenceState,
    pending_delete: Option<RecordId>,
    banner: Option<String>,
    load_seq: u64,
    dialog_seq: u64,
}

impl<R: Resource> Default for CrudModule<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> CrudModule<R> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            list: ListState::Idle,
            dialog: DialogState::Closed,
            references: ReferenceState::Loading,
            pending_delete: None,
            banner: None,
            load_seq: 0,
            dialog_seq: 0,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn list_state(&self) -> &ListState {
        &self.list
    }

    pub fn is_loading(&self) -> bool {
        self.list == ListState::Loading
    }

    pub fn dialog(&self) -> &DialogState<R::Draft> {
        &self.dialog
    }

    pub fn references(&self) -> &ReferenceState {
        &self.references
    }

    pub fn pending_delete(&self) -> Option<RecordId> {
        self.pending_delete
    }

    /// Module-level error (load or delete).
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Rendered table cells, one row per record.
    pub fn table(&self) -> Vec<Vec<String>> {
        render_rows(&self.rows, R::columns())
    }

    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    // ========================================================================
    // List
    // ========================================================================

    /// Start a fetch. Without a tenant nothing is fetched.
    pub fn begin_load(&mut self, tenant: Option<&TenantId>) -> Option<LoadTicket> {
        if tenant.is_none() {
            return None;
        }
        self.load_seq += 1;
        self.list = ListState::Loading;
        Some(LoadTicket(self.load_seq))
    }

    /// Apply a list response. Stale tickets are ignored; on error the
    /// previous rows stay.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Option<Value>, ApiError>) {
        if ticket.0 != self.load_seq {
            log::debug!("Dropping stale {} list response", R::list_name());
            return;
        }
        let decoded = result.and_then(|body| Ok(decode_list::<R>(body)?));
        match decoded {
            Ok(rows) => {
                self.rows = rows;
                self.list = ListState::Loaded;
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", R::list_name(), e);
                let message = format!("Error al cargar {}: {}", R::list_name(), e.user_message());
                self.list = ListState::LoadError(message.clone());
                self.banner = Some(message);
            }
        }
    }

    pub async fn load(&mut self, client: &ApiClient) {
        let tenant = client.session().tenant_id();
        let Some(ticket) = self.begin_load(tenant.as_ref()) else {
            return;
        };
        let result = client.list(R::endpoint()).await;
        self.finish_load(ticket, result);
    }

    // ========================================================================
    // Dialog
    // ========================================================================

    fn open(&mut self, dialog: DialogState<R::Draft>) -> DialogTicket {
        self.dialog_seq += 1;
        self.dialog = dialog;
        self.references = if R::references().is_empty() {
            ReferenceState::Ready(Default::default())
        } else {
            ReferenceState::Loading
        };
        DialogTicket(self.dialog_seq)
    }

    pub fn open_create(&mut self) -> DialogTicket {
        self.open(DialogState::OpenCreate(R::Draft::default()))
    }

    /// Open the dialog on a listed record. `None` when the id is not listed.
    pub fn open_edit(&mut self, id: RecordId) -> Option<DialogTicket> {
        let draft = R::Draft::from_record(self.find(id)?);
        Some(self.open(DialogState::OpenEdit(draft)))
    }

    pub fn close_dialog(&mut self) {
        self.dialog = DialogState::Closed;
    }

    /// Set a form field from its input text. Ignored while submitting.
    pub fn edit_field(&mut self, name: &str, input: String) {
        let Some(field) = find_field(R::form_fields(), name) else {
            log::warn!("{} has no field '{}'", R::element_name(), name);
            return;
        };
        if let Some(draft) = self.dialog.draft_mut() {
            field.write(draft, input);
        }
    }

    pub fn attach_file(&mut self, name: &str, file: FileUpload) {
        let Some(field) = find_field(R::form_fields(), name) else {
            return;
        };
        if let Some(draft) = self.dialog.draft_mut() {
            field.attach(draft, file);
        }
    }

    /// Edit the draft directly (line items and other structured parts).
    pub fn update_draft(&mut self, f: impl FnOnce(&mut R::Draft)) {
        if let Some(draft) = self.dialog.draft_mut() {
            f(draft);
        }
    }

    pub fn finish_references(&mut self, ticket: DialogTicket, state: ReferenceState) {
        if ticket.0 == self.dialog_seq && self.dialog.is_open() {
            self.references = state;
        }
    }

    pub async fn load_references(&mut self, client: &ApiClient, ticket: DialogTicket) {
        let state = load_references(client, R::references()).await;
        self.finish_references(ticket, state);
    }

    /// Move to `Submitting` and hand out what to send. `None` when no dialog
    /// is open, a save is already in flight, or reference data is missing.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !self.references.is_ready() {
            return None;
        }
        let draft = match &self.dialog {
            DialogState::OpenCreate(d)
            | DialogState::OpenEdit(d)
            | DialogState::OpenWithError { draft: d, .. } => d.clone(),
            DialogState::Closed | DialogState::Submitting(_) => return None,
        };
        match draft.to_payload() {
            Ok(body) => {
                let request = SubmitRequest {
                    id: draft.id(),
                    body,
                    method: R::update_method(),
                    ticket: DialogTicket(self.dialog_seq),
                };
                self.dialog = DialogState::Submitting(draft);
                Some(request)
            }
            Err(e) => {
                self.dialog = DialogState::OpenWithError {
                    draft,
                    error: e.to_string(),
                };
                None
            }
        }
    }

    /// Apply the save result. Returns `true` when the record was saved and
    /// the list must be fetched again. A result for a dialog that was closed
    /// or reopened since leaves the current dialog alone.
    pub fn finish_submit(&mut self, ticket: DialogTicket, result: Result<(), ApiError>) -> bool {
        if ticket.0 != self.dialog_seq || !self.dialog.is_submitting() {
            log::debug!("Dropping stale {} save result", R::element_name());
            return result.is_ok();
        }
        let DialogState::Submitting(draft) = std::mem::replace(&mut self.dialog, DialogState::Closed)
        else {
            return false;
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save {}: {}", R::element_name(), e);
                self.dialog = DialogState::OpenWithError {
                    draft,
                    error: e.user_message(),
                };
                false
            }
        }
    }

    /// Save the open draft, then reload the list on success.
    pub async fn submit(&mut self, client: &ApiClient) {
        let Some(request) = self.begin_submit() else {
            return;
        };
        let result = client
            .save(R::endpoint(), request.id, request.body, request.method)
            .await
            .map(|_| ());
        if self.finish_submit(request.ticket, result) {
            self.load(client).await;
        }
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// Ask for confirmation; nothing is sent yet.
    pub fn request_delete(&mut self, id: RecordId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirmation given; returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<RecordId> {
        self.pending_delete.take()
    }

    /// Returns `true` when the list must be fetched again.
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to delete {}: {}", R::element_name(), e);
                self.banner = Some(format!(
                    "Error al eliminar {}: {}",
                    R::element_name(),
                    e.user_message()
                ));
                false
            }
        }
    }

    /// Delete the record awaiting confirmation, if any.
    pub async fn delete_confirmed(&mut self, client: &ApiClient) {
        let Some(id) = self.confirm_delete() else {
            return;
        };
        let result = client.remove(R::endpoint(), id).await;
        if self.finish_delete(result) {
            self.load(client).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_bank::aggregate::Bank;
    use contracts::domain::a006_cash_register::aggregate::CashRegister;
    use serde_json::json;

    fn tenant() -> TenantId {
        TenantId::new("1")
    }

    fn loaded<R: Resource>(body: Value) -> CrudModule<R> {
        let mut module = CrudModule::<R>::new();
        let ticket = module.begin_load(Some(&tenant())).unwrap();
        module.finish_load(ticket, Ok(Some(body)));
        module
    }

    #[test]
    fn test_no_tenant_no_fetch() {
        let mut module = CrudModule::<Bank>::new();
        assert!(module.begin_load(None).is_none());
        assert_eq!(module.list_state(), &ListState::Idle);
    }

    #[test]
    fn test_list_shapes() {
        let module = loaded::<Bank>(json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]));
        assert_eq!(module.rows().len(), 2);
        let module = loaded::<Bank>(json!({"results": [{"id": 1, "name": "A"}]}));
        assert_eq!(module.rows().len(), 1);

        let mut module = CrudModule::<Bank>::new();
        let ticket = module.begin_load(Some(&tenant())).unwrap();
        module.finish_load(ticket, Ok(None));
        assert!(module.rows().is_empty());
        assert_eq!(module.list_state(), &ListState::Loaded);
    }

    #[test]
    fn test_load_error_keeps_rows() {
        let mut module = loaded::<Bank>(json!([{"id": 1, "name": "A"}]));
        let ticket = module.begin_load(Some(&tenant())).unwrap();
        module.finish_load(ticket, Err(ApiError::Timeout));
        assert_eq!(module.rows().len(), 1);
        assert!(matches!(module.list_state(), ListState::LoadError(_)));
        assert_eq!(module.banner(), Some("Error al cargar Bancos: La solicitud excedió el tiempo de espera"));
        module.dismiss_banner();
        assert_eq!(module.banner(), None);
    }

    #[test]
    fn test_stale_load_dropped() {
        let mut module = CrudModule::<Bank>::new();
        let first = module.begin_load(Some(&tenant())).unwrap();
        let second = module.begin_load(Some(&tenant())).unwrap();
        module.finish_load(second, Ok(Some(json!([{"id": 2, "name": "B"}]))));
        module.finish_load(first, Ok(Some(json!([]))));
        assert_eq!(module.rows().len(), 1);
    }

    #[test]
    fn test_duplicate_submit_ignored() {
        let mut module = CrudModule::<Bank>::new();
        module.open_create();
        module.edit_field("name", "Nación".into());
        let request = module.begin_submit().unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.body.as_json(), Some(&json!({"name": "Nación"})));
        assert!(module.begin_submit().is_none());
        module.edit_field("name", "otro".into());
        assert_eq!(module.dialog().draft().unwrap().name, "Nación");
    }

    #[test]
    fn test_rejected_save_keeps_draft() {
        let mut module = CrudModule::<Bank>::new();
        module.open_create();
        let request = module.begin_submit().unwrap();
        let saved = module.finish_submit(request.ticket, Err(ApiError::Status {
            status: 400,
            payload: Some(json!({"name": ["This field is required."]})),
        }));
        assert!(!saved);
        assert_eq!(module.dialog().error(), Some("name: This field is required."));

        module.edit_field("name", "Nación".into());
        let request = module.begin_submit().unwrap();
        assert!(module.finish_submit(request.ticket, Ok(())));
        assert!(!module.dialog().is_open());
    }

    #[test]
    fn test_save_result_of_previous_dialog_dropped() {
        let mut module = CrudModule::<Bank>::new();
        module.open_create();
        module.edit_field("name", "first".into());
        let first = module.begin_submit().unwrap();
        module.close_dialog();

        module.open_create();
        module.edit_field("name", "second".into());
        let second = module.begin_submit().unwrap();

        let saved = module.finish_submit(
            first.ticket,
            Err(ApiError::Status {
                status: 400,
                payload: Some(json!({"name": ["dup"]})),
            }),
        );
        assert!(!saved);
        assert!(module.dialog().is_submitting());
        assert_eq!(module.dialog().error(), None);
        assert_eq!(module.dialog().draft().unwrap().name, "second");
        assert!(module.begin_submit().is_none());

        // an earlier save that succeeded still refreshes the list
        assert!(module.finish_submit(first.ticket, Ok(())));
        assert!(module.dialog().is_submitting());

        assert!(module.finish_submit(second.ticket, Ok(())));
        assert!(!module.dialog().is_open());
    }

    #[test]
    fn test_dialog_waits_for_references() {
        let mut module = loaded::<CashRegister>(json!([{"id": 3, "name": "Caja 1", "local": {"id": 2, "name": "Centro"}}]));
        let ticket = module.open_edit(RecordId(3)).unwrap();
        assert_eq!(module.references(), &ReferenceState::Loading);
        assert!(module.begin_submit().is_none());

        module.finish_references(ticket, ReferenceState::Failed("boom".into()));
        assert!(module.begin_submit().is_none());

        let ticket = module.open_edit(RecordId(3)).unwrap();
        module.finish_references(ticket, ReferenceState::Ready(Default::default()));
        let request = module.begin_submit().unwrap();
        assert_eq!(request.id, Some(RecordId(3)));
        assert_eq!(request.body.as_json().unwrap()["local"], json!(2));
    }

    #[test]
    fn test_references_of_closed_dialog_dropped() {
        let mut module = CrudModule::<CashRegister>::new();
        let ticket = module.open_create();
        module.close_dialog();
        module.finish_references(ticket, ReferenceState::Failed("late".into()));
        assert_eq!(module.references(), &ReferenceState::Loading);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut module = loaded::<Bank>(json!([{"id": 1, "name": "A"}]));
        assert_eq!(module.confirm_delete(), None);
        module.request_delete(RecordId(1));
        module.cancel_delete();
        assert_eq!(module.confirm_delete(), None);
        module.request_delete(RecordId(1));
        assert_eq!(module.confirm_delete(), Some(RecordId(1)));
        assert_eq!(module.pending_delete(), None);
    }

    #[test]
    fn test_failed_delete_keeps_row() {
        let mut module = loaded::<Bank>(json!([{"id": 1, "name": "A"}]));
        module.request_delete(RecordId(1));
        module.confirm_delete();
        assert!(!module.finish_delete(Err(ApiError::Status { status: 409, payload: None })));
        assert_eq!(module.rows().len(), 1);
        assert!(module.banner().unwrap().starts_with("Error al eliminar Banco"));
    }
}
