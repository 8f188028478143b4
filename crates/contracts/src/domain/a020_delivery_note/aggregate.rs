use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Remito de entrega de mercadería para una venta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryNote {
    pub id: RecordId,
    #[serde(default)]
    pub sale: ForeignKey,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub tracking_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: String,
    /// Product lines; not edited here
    #[serde(default)]
    pub items: Vec<Value>,
}

pub const STATUS_PENDING: &str = "Pendiente";

pub const STATUS_CHOICES: &[Choice] = &[
    Choice::plain(STATUS_PENDING),
    Choice::plain("Enviado"),
    Choice::plain("Entregado"),
];

impl Resource for DeliveryNote {
    type Draft = DeliveryNoteDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/delivery-notes/"
    }

    fn element_name() -> &'static str {
        "Remito"
    }

    fn list_name() -> &'static str {
        "Remitos"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<DeliveryNoteDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const SALES_ENDPOINT: &str = "/sales/";

const REFERENCES: &[&str] = &[SALES_ENDPOINT];

const COLUMNS: &[Column<DeliveryNote>] = &[
    Column::new("Remito", |n: &DeliveryNote| format!("#{}", n.id)),
    Column::new("Venta", |n: &DeliveryNote| n.sale.display()),
    Column::new("Fecha", |n: &DeliveryNote| or_dash(&n.date)),
    Column::new("Estado", |n: &DeliveryNote| or_dash(&n.status)),
    Column::new("Seguimiento", |n: &DeliveryNote| {
        or_dash(&n.tracking_number)
    }),
    Column::new("Ítems", |n: &DeliveryNote| n.items.len().to_string()),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryNoteDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub sale: ForeignKey,
    pub status: String,
    pub tracking_number: String,
    pub notes: String,
    pub items: Vec<Value>,
}

impl Default for DeliveryNoteDraft {
    fn default() -> Self {
        Self {
            id: None,
            sale: ForeignKey::none(),
            status: STATUS_PENDING.to_string(),
            tracking_number: String::new(),
            notes: String::new(),
            items: Vec::new(),
        }
    }
}

impl Draft for DeliveryNoteDraft {
    type Record = DeliveryNote;

    fn from_record(record: &DeliveryNote) -> Self {
        Self {
            id: Some(record.id),
            sale: record.sale.flatten(),
            status: record.status.clone(),
            tracking_number: record.tracking_number.clone(),
            notes: record.notes.clone(),
            items: record.items.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<DeliveryNoteDraft>] = &[
    FormField::new(
        "sale",
        "Venta",
        FieldKind::Reference(SALES_ENDPOINT),
        |d: &DeliveryNoteDraft| d.sale.input_value(),
        |d: &mut DeliveryNoteDraft, v| d.sale = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "status",
        "Estado",
        FieldKind::Choice(STATUS_CHOICES),
        |d: &DeliveryNoteDraft| d.status.clone(),
        |d: &mut DeliveryNoteDraft, v| d.status = v,
    ),
    FormField::text(
        "tracking_number",
        "Número de Seguimiento",
        |d: &DeliveryNoteDraft| d.tracking_number.clone(),
        |d: &mut DeliveryNoteDraft, v| d.tracking_number = v,
    ),
    FormField::new(
        "notes",
        "Notas",
        FieldKind::TextArea,
        |d: &DeliveryNoteDraft| d.notes.clone(),
        |d: &mut DeliveryNoteDraft, v| d.notes = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::find_field;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_status_change_keeps_items() {
        let note: DeliveryNote = serde_json::from_value(json!({
            "id": 30,
            "sale": 12,
            "date": "2026-05-04",
            "status": "Pendiente",
            "tracking_number": null,
            "items": [{"product": 3, "quantity": 2}]
        }))
        .unwrap();
        assert_eq!(
            render_rows(&[note.clone()], COLUMNS)[0],
            vec!["#30", "#12", "2026-05-04", "Pendiente", "-", "1"]
        );

        let mut draft = DeliveryNoteDraft::from_record(&note);
        find_field(FIELDS, "status")
            .unwrap()
            .write(&mut draft, "Enviado".into());
        let payload = serde_json::to_value(&draft).unwrap();
        assert_eq!(payload["status"], json!("Enviado"));
        assert_eq!(payload["items"], json!([{"product": 3, "quantity": 2}]));
        assert!(payload.get("date").is_none());
    }
}
