use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::FormField;
use crate::shared::table::Column;

// ============================================================================
// Record
// ============================================================================

/// Banco
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

impl Resource for Bank {
    type Draft = BankDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/banks/"
    }

    fn element_name() -> &'static str {
        "Banco"
    }

    fn list_name() -> &'static str {
        "Bancos"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<BankDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Bank>] = &[Column::new("Nombre", |b: &Bank| b.name.clone())];

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BankDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
}

impl Draft for BankDraft {
    type Record = Bank;

    fn from_record(record: &Bank) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<BankDraft>] = &[FormField::text(
    "name",
    "Nombre",
    |d: &BankDraft| d.name.clone(),
    |d: &mut BankDraft, v| d.name = v,
)];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_has_no_id() {
        let bank: Bank = serde_json::from_value(json!({"id": 3, "name": "Nación"})).unwrap();
        let draft = BankDraft::from_record(&bank);
        assert_eq!(draft.id(), Some(RecordId(3)));
        let body = draft.to_payload().unwrap();
        assert_eq!(body.as_json().unwrap(), &json!({"name": "Nación"}));
    }
}
