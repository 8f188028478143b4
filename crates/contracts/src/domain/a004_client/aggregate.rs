use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cuit: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
}

impl Resource for Client {
    type Draft = ClientDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/clients/"
    }

    fn element_name() -> &'static str {
        "Cliente"
    }

    fn list_name() -> &'static str {
        "Clientes"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<ClientDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Client>] = &[
    Column::new("Nombre", |c: &Client| c.name.clone()),
    Column::new("CUIT", |c: &Client| or_dash(&c.cuit)),
    Column::new("Email", |c: &Client| or_dash(&c.email)),
    Column::new("Teléfono", |c: &Client| or_dash(&c.phone)),
    Column::new("Dirección", |c: &Client| or_dash(&c.address)),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub cuit: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Draft for ClientDraft {
    type Record = Client;

    fn from_record(record: &Client) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            cuit: record.cuit.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<ClientDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &ClientDraft| d.name.clone(),
        |d: &mut ClientDraft, v| d.name = v,
    ),
    FormField::text(
        "cuit",
        "CUIT",
        |d: &ClientDraft| d.cuit.clone(),
        |d: &mut ClientDraft, v| d.cuit = v,
    ),
    FormField::new(
        "email",
        "Email",
        FieldKind::Email,
        |d: &ClientDraft| d.email.clone(),
        |d: &mut ClientDraft, v| d.email = v,
    ),
    FormField::text(
        "phone",
        "Teléfono",
        |d: &ClientDraft| d.phone.clone(),
        |d: &mut ClientDraft, v| d.phone = v,
    ),
    FormField::text(
        "address",
        "Dirección",
        |d: &ClientDraft| d.address.clone(),
        |d: &mut ClientDraft, v| d.address = v,
    ),
];
