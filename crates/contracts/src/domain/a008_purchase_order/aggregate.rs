use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Orden de compra a proveedor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: RecordId,
    #[serde(default)]
    pub supplier: ForeignKey,
    #[serde(default, deserialize_with = "lenient::date")]
    pub order_date: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub expected_delivery_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
}

pub const STATUS_CHOICES: &[Choice] = &[
    Choice::plain("Pendiente"),
    Choice::plain("Recibida"),
    Choice::plain("Cancelada"),
];

impl Resource for PurchaseOrder {
    type Draft = PurchaseOrderDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/purchase-orders/"
    }

    fn element_name() -> &'static str {
        "Orden de Compra"
    }

    fn list_name() -> &'static str {
        "Órdenes de Compra"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<PurchaseOrderDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const REFERENCES: &[&str] = &["/suppliers/"];

const COLUMNS: &[Column<PurchaseOrder>] = &[
    Column::new("Proveedor", |p: &PurchaseOrder| p.supplier.display()),
    Column::new("Fecha de Orden", |p: &PurchaseOrder| or_dash(&p.order_date)),
    Column::new("Entrega Esperada", |p: &PurchaseOrder| {
        or_dash(&p.expected_delivery_date)
    }),
    Column::new("Estado", |p: &PurchaseOrder| or_dash(&p.status)),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseOrderDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub supplier: ForeignKey,
    pub order_date: String,
    pub expected_delivery_date: String,
    pub status: String,
}

/// New orders are dated today and start pending.
impl Default for PurchaseOrderDraft {
    fn default() -> Self {
        Self {
            id: None,
            supplier: ForeignKey::none(),
            order_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            expected_delivery_date: String::new(),
            status: "Pendiente".to_string(),
        }
    }
}

impl Draft for PurchaseOrderDraft {
    type Record = PurchaseOrder;

    fn from_record(record: &PurchaseOrder) -> Self {
        Self {
            id: Some(record.id),
            supplier: record.supplier.flatten(),
            order_date: record.order_date.clone(),
            expected_delivery_date: record.expected_delivery_date.clone(),
            status: record.status.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<PurchaseOrderDraft>] = &[
    FormField::new(
        "supplier",
        "Proveedor",
        FieldKind::Reference("/suppliers/"),
        |d: &PurchaseOrderDraft| d.supplier.input_value(),
        |d: &mut PurchaseOrderDraft, v| d.supplier = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "order_date",
        "Fecha de Orden",
        FieldKind::Date,
        |d: &PurchaseOrderDraft| d.order_date.clone(),
        |d: &mut PurchaseOrderDraft, v| d.order_date = v,
    ),
    FormField::new(
        "expected_delivery_date",
        "Fecha de Entrega Esperada",
        FieldKind::Date,
        |d: &PurchaseOrderDraft| d.expected_delivery_date.clone(),
        |d: &mut PurchaseOrderDraft, v| d.expected_delivery_date = v,
    ),
    FormField::new(
        "status",
        "Estado",
        FieldKind::Choice(STATUS_CHOICES),
        |d: &PurchaseOrderDraft| d.status.clone(),
        |d: &mut PurchaseOrderDraft, v| d.status = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_defaults() {
        let draft = PurchaseOrderDraft::default();
        assert_eq!(draft.id(), None);
        assert_eq!(draft.status, "Pendiente");
        assert_eq!(draft.order_date.len(), 10);
    }

    #[test]
    fn test_record_dates_trimmed_for_inputs() {
        let order: PurchaseOrder = serde_json::from_value(json!({
            "id": 8,
            "supplier": {"id": 5, "name": "Acme"},
            "order_date": "2024-05-01T00:00:00Z",
            "expected_delivery_date": null,
            "status": "Recibida"
        }))
        .unwrap();
        let draft = PurchaseOrderDraft::from_record(&order);
        assert_eq!(draft.order_date, "2024-05-01");
        assert_eq!(
            draft.to_payload().unwrap().as_json().unwrap(),
            &json!({
                "supplier": 5,
                "order_date": "2024-05-01",
                "expected_delivery_date": "",
                "status": "Recibida"
            })
        );
    }
}
