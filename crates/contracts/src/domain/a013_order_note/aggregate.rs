use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

// ============================================================================
// Record
// ============================================================================

/// Nota de pedido generada a partir de una venta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNote {
    pub id: RecordId,
    /// Nested sale on read
    #[serde(default)]
    pub sale: ForeignKey,
    #[serde(default, deserialize_with = "lenient::date")]
    pub order_date: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub estimated_delivery_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub shipping_method: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub details: String,
}

pub const STATUS_PENDING: &str = "Pendiente";

pub const STATUS_CHOICES: &[Choice] = &[
    Choice::plain(STATUS_PENDING),
    Choice::new("En Produccion", "En Producción"),
    Choice::plain("Completada"),
    Choice::plain("Cancelada"),
];

/// Label for a stored status value
pub fn status_label(value: &str) -> String {
    STATUS_CHOICES
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label.to_string())
        .unwrap_or_else(|| or_dash(value))
}

impl Resource for OrderNote {
    type Draft = OrderNoteDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/order-notes/"
    }

    fn element_name() -> &'static str {
        "Nota de Pedido"
    }

    fn list_name() -> &'static str {
        "Notas de Pedido"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<OrderNoteDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const SALES_ENDPOINT: &str = "/sales/";

const REFERENCES: &[&str] = &[SALES_ENDPOINT];

const COLUMNS: &[Column<OrderNote>] = &[
    Column::new("ID", |n: &OrderNote| n.id.to_string()),
    Column::new("Venta", |n: &OrderNote| n.sale.display()),
    Column::new("Fecha", |n: &OrderNote| or_dash(&n.order_date)),
    Column::new("Entrega Estimada", |n: &OrderNote| {
        or_dash(&n.estimated_delivery_date)
    }),
    Column::new("Envío", |n: &OrderNote| or_dash(&n.shipping_method)),
    Column::new("Estado", |n: &OrderNote| status_label(&n.status)),
];

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderNoteDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    /// Written as `sale_id`; the read side nests the sale
    #[serde(rename = "sale_id")]
    pub sale: ForeignKey,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub estimated_delivery_date: String,
    pub shipping_method: String,
    pub status: String,
    pub details: String,
}

impl Default for OrderNoteDraft {
    fn default() -> Self {
        Self {
            id: None,
            sale: ForeignKey::none(),
            estimated_delivery_date: String::new(),
            shipping_method: String::new(),
            status: STATUS_PENDING.to_string(),
            details: String::new(),
        }
    }
}

impl Draft for OrderNoteDraft {
    type Record = OrderNote;

    fn from_record(record: &OrderNote) -> Self {
        Self {
            id: Some(record.id),
            sale: record.sale.flatten(),
            estimated_delivery_date: record.estimated_delivery_date.clone(),
            shipping_method: record.shipping_method.clone(),
            status: if record.status.is_empty() {
                STATUS_PENDING.to_string()
            } else {
                record.status.clone()
            },
            details: record.details.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<OrderNoteDraft>] = &[
    FormField::new(
        "sale_id",
        "Venta",
        FieldKind::Reference(SALES_ENDPOINT),
        |d: &OrderNoteDraft| d.sale.input_value(),
        |d: &mut OrderNoteDraft, v| d.sale = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "estimated_delivery_date",
        "Fecha Estimada de Entrega",
        FieldKind::Date,
        |d: &OrderNoteDraft| d.estimated_delivery_date.clone(),
        |d: &mut OrderNoteDraft, v| d.estimated_delivery_date = v,
    ),
    FormField::text(
        "shipping_method",
        "Método de Envío",
        |d: &OrderNoteDraft| d.shipping_method.clone(),
        |d: &mut OrderNoteDraft, v| d.shipping_method = v,
    ),
    FormField::new(
        "status",
        "Estado",
        FieldKind::Choice(STATUS_CHOICES),
        |d: &OrderNoteDraft| d.status.clone(),
        |d: &mut OrderNoteDraft, v| d.status = v,
    ),
    FormField::new(
        "details",
        "Detalles",
        FieldKind::TextArea,
        |d: &OrderNoteDraft| d.details.clone(),
        |d: &mut OrderNoteDraft, v| d.details = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_nested_sale_written_back_as_id() {
        let note: OrderNote = serde_json::from_value(json!({
            "id": 3,
            "sale": {"id": 21, "client": {"name": "Club"}, "total_amount": "1500.00"},
            "order_date": "2026-04-02T10:00:00Z",
            "estimated_delivery_date": null,
            "status": "En Produccion"
        }))
        .unwrap();

        assert_eq!(
            render_rows(&[note.clone()], COLUMNS)[0],
            vec!["3", "#21", "2026-04-02", "-", "-", "En Producción"]
        );

        let payload = serde_json::to_value(OrderNoteDraft::from_record(&note)).unwrap();
        assert_eq!(
            payload,
            json!({
                "sale_id": 21,
                "shipping_method": "",
                "status": "En Produccion",
                "details": ""
            })
        );
    }

    #[test]
    fn test_new_note_is_pending() {
        let draft = OrderNoteDraft::default();
        assert_eq!(draft.status, STATUS_PENDING);
        assert_eq!(draft.id(), None);
    }
}
