use serde::{Deserialize, Serialize};

use crate::domain::a005_local::aggregate::Local;
use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::Column;

/// Caja registradora, asignada a un local
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashRegister {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default)]
    pub local: ForeignKey,
}

impl Resource for CashRegister {
    type Draft = CashRegisterDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/cash-registers/"
    }

    fn element_name() -> &'static str {
        "Caja"
    }

    fn list_name() -> &'static str {
        "Cajas"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<CashRegisterDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const REFERENCES: &[&str] = &["/locals/"];

const COLUMNS: &[Column<CashRegister>] = &[
    Column::new("Nombre", |c: &CashRegister| c.name.clone()),
    Column::new("Local", |c: &CashRegister| c.local.display()),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CashRegisterDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub local: ForeignKey,
}

impl Draft for CashRegisterDraft {
    type Record = CashRegister;

    fn from_record(record: &CashRegister) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            local: record.local.flatten(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<CashRegisterDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &CashRegisterDraft| d.name.clone(),
        |d: &mut CashRegisterDraft, v| d.name = v,
    ),
    FormField::new(
        "local",
        "Local",
        FieldKind::Reference("/locals/"),
        |d: &CashRegisterDraft| d.local.input_value(),
        |d: &mut CashRegisterDraft, v| d.local = ForeignKey::from_input(&v),
    ),
];

/// Local a register belongs to, resolved against the loaded locals when the
/// register only carries the id.
pub fn local_of(register: &CashRegister, locals: &[Local]) -> ForeignKey {
    match register.local.id() {
        Some(id) => locals
            .iter()
            .find(|l| l.id == id)
            .map(|l| ForeignKey::with_label(l.id, l.name.clone()))
            .unwrap_or_else(|| register.local.clone()),
        None => ForeignKey::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_edit_flattens_nested_local() {
        let register: CashRegister = serde_json::from_value(json!({
            "id": 2,
            "name": "Caja 1",
            "local": {"id": 4, "name": "Centro"}
        }))
        .unwrap();
        assert_eq!(register.local.display(), "Centro");

        let draft = CashRegisterDraft::from_record(&register);
        assert_eq!(draft.local, ForeignKey::to(RecordId(4)));
        assert_eq!(
            draft.to_payload().unwrap().as_json().unwrap(),
            &json!({"name": "Caja 1", "local": 4})
        );
    }

    #[test]
    fn test_cleared_local_is_sent_as_null() {
        let mut draft = CashRegisterDraft::default();
        FIELDS[1].write(&mut draft, String::new());
        let body = draft.to_payload().unwrap();
        assert_eq!(body.as_json().unwrap()["local"], serde_json::Value::Null);
        assert!(body.as_json().unwrap().get("local").is_some());
    }
}
