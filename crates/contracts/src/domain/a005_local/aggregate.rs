use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::FormField;
use crate::shared::table::{or_dash, Column};

/// Local (punto de venta físico)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Local {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone_number: String,
}

impl Resource for Local {
    type Draft = LocalDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/locals/"
    }

    fn element_name() -> &'static str {
        "Local"
    }

    fn list_name() -> &'static str {
        "Locales"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<LocalDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Local>] = &[
    Column::new("Nombre", |l: &Local| l.name.clone()),
    Column::new("Dirección", |l: &Local| or_dash(&l.address)),
    Column::new("Teléfono", |l: &Local| or_dash(&l.phone_number)),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocalDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub address: String,
    pub phone_number: String,
}

impl Draft for LocalDraft {
    type Record = Local;

    fn from_record(record: &Local) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            address: record.address.clone(),
            phone_number: record.phone_number.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<LocalDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &LocalDraft| d.name.clone(),
        |d: &mut LocalDraft, v| d.name = v,
    ),
    FormField::text(
        "address",
        "Dirección",
        |d: &LocalDraft| d.address.clone(),
        |d: &mut LocalDraft, v| d.address = v,
    ),
    FormField::text(
        "phone_number",
        "Número de Teléfono",
        |d: &LocalDraft| d.phone_number.clone(),
        |d: &mut LocalDraft, v| d.phone_number = v,
    ),
];
