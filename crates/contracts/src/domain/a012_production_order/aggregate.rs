use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::payload::{FileField, MultipartForm, SubmitBody};
use crate::shared::table::{or_dash, Column};

// ============================================================================
// Record
// ============================================================================

/// Orden de producción (Medias o Indumentaria)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub op_type: String,
    #[serde(default)]
    pub order_note: ForeignKey,
    #[serde(default, deserialize_with = "lenient::string")]
    pub equipo: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub creation_date: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub estimated_delivery_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub details: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    /// JSON object as text
    #[serde(default, deserialize_with = "lenient::string")]
    pub customization_details: String,
    /// Line items are not edited here; they travel back unchanged.
    #[serde(default)]
    pub items: Vec<Value>,
}

pub const OP_MEDIAS: &str = "Medias";
pub const OP_INDUMENTARIA: &str = "Indumentaria";

pub const OP_TYPE_CHOICES: &[Choice] = &[Choice::plain(OP_INDUMENTARIA), Choice::plain(OP_MEDIAS)];

/// Record action that renders a QR for the shop floor.
pub const GENERATE_QR_ACTION: &str = "generate_qr_code";

/// Response of [`GENERATE_QR_ACTION`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QrCode {
    #[serde(default)]
    pub qr_code_data: String,
}

impl Resource for ProductionOrder {
    type Draft = ProductionOrderDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/production-orders/"
    }

    fn element_name() -> &'static str {
        "Orden de Producción"
    }

    fn list_name() -> &'static str {
        "Órdenes de Producción"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<ProductionOrderDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

pub const PENDING_NOTES_ENDPOINT: &str = "/order-notes/?status=Pendiente";

const REFERENCES: &[&str] = &[PENDING_NOTES_ENDPOINT];

fn origin(order: &ProductionOrder) -> String {
    if order.order_note.is_empty() {
        "Decisión Interna".to_string()
    } else {
        order.order_note.display()
    }
}

const COLUMNS: &[Column<ProductionOrder>] = &[
    Column::new("ID", |o: &ProductionOrder| o.id.to_string()),
    Column::new("Tipo", |o: &ProductionOrder| or_dash(&o.op_type)),
    Column::new("Origen", origin),
    Column::new("Estado", |o: &ProductionOrder| or_dash(&o.status)),
    Column::new("Fecha Creación", |o: &ProductionOrder| {
        or_dash(&o.creation_date)
    }),
    Column::new("Fecha Entrega", |o: &ProductionOrder| {
        if o.estimated_delivery_date.is_empty() {
            "N/A".to_string()
        } else {
            o.estimated_delivery_date.clone()
        }
    }),
];

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionOrderDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub op_type: String,
    pub order_note: ForeignKey,
    pub equipo: String,
    pub estimated_delivery_date: String,
    pub details: String,
    pub status: String,
    pub customization_details: String,
    pub items: Vec<Value>,
    #[serde(skip)]
    pub template_file: FileField,
}

impl Default for ProductionOrderDraft {
    fn default() -> Self {
        Self {
            id: None,
            op_type: OP_INDUMENTARIA.to_string(),
            order_note: ForeignKey::none(),
            equipo: String::new(),
            estimated_delivery_date: String::new(),
            details: String::new(),
            status: "Pendiente".to_string(),
            customization_details: "{}".to_string(),
            items: Vec::new(),
            template_file: FileField::Empty,
        }
    }
}

impl ProductionOrderDraft {
    pub fn is_indumentaria(&self) -> bool {
        self.op_type == OP_INDUMENTARIA
    }
}

fn is_indumentaria(draft: &ProductionOrderDraft) -> bool {
    draft.is_indumentaria()
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

impl Draft for ProductionOrderDraft {
    type Record = ProductionOrder;

    fn from_record(record: &ProductionOrder) -> Self {
        Self {
            id: Some(record.id),
            op_type: non_empty_or(&record.op_type, OP_INDUMENTARIA),
            order_note: record.order_note.flatten(),
            equipo: record.equipo.clone(),
            estimated_delivery_date: record.estimated_delivery_date.clone(),
            details: record.details.clone(),
            status: non_empty_or(&record.status, "Pendiente"),
            customization_details: non_empty_or(&record.customization_details, "{}"),
            items: record.items.clone(),
            template_file: FileField::Empty,
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }

    /// Multipart, like every production order save. Items always travel as
    /// JSON text; the Indumentaria-only parts are dropped for Medias.
    fn to_payload(&self) -> Result<SubmitBody, serde_json::Error> {
        let mut form = MultipartForm::from_serializable(self)?;
        if self.estimated_delivery_date.is_empty() {
            form.remove("estimated_delivery_date");
        }
        if self.is_indumentaria() {
            form.push_file_field("template_files", &self.template_file);
        } else {
            form.remove("equipo");
            form.remove("customization_details");
        }
        Ok(SubmitBody::Multipart(form))
    }
}

const FIELDS: &[FormField<ProductionOrderDraft>] = &[
    FormField::new(
        "op_type",
        "Tipo de Producto",
        FieldKind::Choice(OP_TYPE_CHOICES),
        |d: &ProductionOrderDraft| d.op_type.clone(),
        |d: &mut ProductionOrderDraft, v| d.op_type = v,
    ),
    FormField::new(
        "order_note",
        "Nota de Pedido",
        FieldKind::Reference(PENDING_NOTES_ENDPOINT),
        |d: &ProductionOrderDraft| d.order_note.input_value(),
        |d: &mut ProductionOrderDraft, v| d.order_note = ForeignKey::from_input(&v),
    ),
    FormField::text(
        "equipo",
        "Equipo",
        |d: &ProductionOrderDraft| d.equipo.clone(),
        |d: &mut ProductionOrderDraft, v| d.equipo = v,
    )
    .visible_when(is_indumentaria),
    FormField::new(
        "estimated_delivery_date",
        "Fecha Estimada de Entrega",
        FieldKind::Date,
        |d: &ProductionOrderDraft| d.estimated_delivery_date.clone(),
        |d: &mut ProductionOrderDraft, v| d.estimated_delivery_date = v,
    ),
    FormField::new(
        "details",
        "Detalles",
        FieldKind::TextArea,
        |d: &ProductionOrderDraft| d.details.clone(),
        |d: &mut ProductionOrderDraft, v| d.details = v,
    ),
    FormField::text(
        "status",
        "Estado",
        |d: &ProductionOrderDraft| d.status.clone(),
        |d: &mut ProductionOrderDraft, v| d.status = v,
    ),
    FormField::new(
        "customization_details",
        "Personalización (JSON)",
        FieldKind::TextArea,
        |d: &ProductionOrderDraft| d.customization_details.clone(),
        |d: &mut ProductionOrderDraft, v| d.customization_details = v,
    )
    .visible_when(is_indumentaria),
    FormField::file(
        "template_files",
        "Plantilla",
        |d: &ProductionOrderDraft| d.template_file.display(),
        |d: &mut ProductionOrderDraft, f| d.template_file = FileField::Selected(f),
    )
    .visible_when(is_indumentaria),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::find_field;
    use crate::shared::payload::{FileUpload, FormPart};
    use serde_json::json;

    fn medias() -> ProductionOrder {
        serde_json::from_value(json!({
            "id": 14,
            "op_type": "Medias",
            "order_note": {"id": 3, "sale": {"client": {"name": "Club"}}},
            "creation_date": "2026-03-01T12:00:00Z",
            "estimated_delivery_date": null,
            "details": "Caña alta",
            "status": "En Proceso",
            "items": [{"product": 7, "size": "M", "quantity": 12}]
        }))
        .unwrap()
    }

    #[test]
    fn test_columns() {
        let rows = crate::shared::table::render_rows(&[medias()], COLUMNS);
        assert_eq!(
            rows[0],
            vec!["14", "Medias", "#3", "En Proceso", "2026-03-01", "N/A"]
        );
    }

    #[test]
    fn test_medias_payload_preserves_items() {
        let draft = ProductionOrderDraft::from_record(&medias());
        let body = draft.to_payload().unwrap();
        let form = body.as_multipart().unwrap();

        assert_eq!(form.get("op_type"), Some(&FormPart::Text("Medias".into())));
        assert_eq!(form.get("order_note"), Some(&FormPart::Text("3".into())));
        assert_eq!(
            form.get("items"),
            Some(&FormPart::Text(r#"[{"product":7,"size":"M","quantity":12}]"#.into()))
        );
        assert!(!form.contains("customization_details"));
        assert!(!form.contains("equipo"));
        assert!(!form.contains("estimated_delivery_date"));
    }

    #[test]
    fn test_indumentaria_only_fields() {
        let mut draft = ProductionOrderDraft::from_record(&medias());
        let equipo = find_field(FIELDS, "equipo").unwrap();
        assert!(!equipo.is_visible(&draft));
        equipo.write(&mut draft, "Los Pumas".into());
        assert_eq!(draft.equipo, "");

        find_field(FIELDS, "op_type")
            .unwrap()
            .write(&mut draft, OP_INDUMENTARIA.into());
        equipo.write(&mut draft, "Los Pumas".into());
        let upload = FileUpload::new("molde.pdf", "application/pdf", vec![1, 2, 3]);
        find_field(FIELDS, "template_files")
            .unwrap()
            .attach(&mut draft, upload.clone());

        let body = draft.to_payload().unwrap();
        let form = body.as_multipart().unwrap();
        assert_eq!(form.get("equipo"), Some(&FormPart::Text("Los Pumas".into())));
        assert_eq!(
            form.get("customization_details"),
            Some(&FormPart::Text("{}".into()))
        );
        assert_eq!(form.get("template_files"), Some(&FormPart::File(upload)));
    }

    #[test]
    fn test_new_order_defaults() {
        let draft = ProductionOrderDraft::default();
        assert!(draft.is_indumentaria());
        assert_eq!(draft.status, "Pendiente");
        assert_eq!(draft.id(), None);
    }
}
