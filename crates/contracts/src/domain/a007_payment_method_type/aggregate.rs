use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Tipo de medio de pago
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodType {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

impl Resource for PaymentMethodType {
    type Draft = PaymentMethodTypeDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/payment-method-types/"
    }

    fn element_name() -> &'static str {
        "Tipo de Pago"
    }

    fn list_name() -> &'static str {
        "Tipos de Pago"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<PaymentMethodTypeDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<PaymentMethodType>] = &[
    Column::new("Nombre", |p: &PaymentMethodType| p.name.clone()),
    Column::new("Descripción", |p: &PaymentMethodType| {
        or_dash(&p.description)
    }),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentMethodTypeDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
}

impl Draft for PaymentMethodTypeDraft {
    type Record = PaymentMethodType;

    fn from_record(record: &PaymentMethodType) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            description: record.description.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<PaymentMethodTypeDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &PaymentMethodTypeDraft| d.name.clone(),
        |d: &mut PaymentMethodTypeDraft, v| d.name = v,
    ),
    FormField::new(
        "description",
        "Descripción",
        FieldKind::TextArea,
        |d: &PaymentMethodTypeDraft| d.description.clone(),
        |d: &mut PaymentMethodTypeDraft, v| d.description = v,
    ),
];
