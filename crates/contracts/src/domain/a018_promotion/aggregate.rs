use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

// ============================================================================
// Record
// ============================================================================

/// Promoción comercial (descuento, NxM o combo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub value: String,
    #[serde(default)]
    pub applicable_products: Vec<ForeignKey>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub min_quantity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub max_uses: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub requires_loyalty_card: bool,
    #[serde(default = "active", deserialize_with = "lenient::flag")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

pub const TYPE_PERCENTAGE: &str = "percentage";

pub const TYPE_CHOICES: &[Choice] = &[
    Choice::new(TYPE_PERCENTAGE, "Porcentaje de Descuento"),
    Choice::new("fixed_amount", "Monto Fijo de Descuento"),
    Choice::plain("2x1"),
    Choice::plain("3x2"),
    Choice::new("combo", "Combo"),
];

fn type_label(value: &str) -> String {
    TYPE_CHOICES
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label.to_string())
        .unwrap_or_else(|| or_dash(value))
}

impl Resource for Promotion {
    type Draft = PromotionDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "commercial/promotions/"
    }

    fn element_name() -> &'static str {
        "Promoción"
    }

    fn list_name() -> &'static str {
        "Promociones"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<PromotionDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Promotion>] = &[
    Column::new("Nombre", |p: &Promotion| p.name.clone()),
    Column::new("Tipo", |p: &Promotion| type_label(&p.kind)),
    Column::new("Valor", |p: &Promotion| or_dash(&p.value)),
    Column::new("Vigencia", |p: &Promotion| {
        format!("{} - {}", or_dash(&p.start_date), or_dash(&p.end_date))
    }),
    Column::new("Activa", |p: &Promotion| {
        let text = if p.is_active { "Sí" } else { "No" };
        text.to_string()
    }),
];

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    /// Not edited here; travels back unchanged
    pub applicable_products: Vec<ForeignKey>,
    pub start_date: String,
    pub end_date: String,
    pub min_quantity: String,
    #[serde(serialize_with = "lenient::blank_as_null")]
    pub max_uses: String,
    pub requires_loyalty_card: bool,
    pub is_active: bool,
}

impl Default for PromotionDraft {
    fn default() -> Self {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        Self {
            id: None,
            name: String::new(),
            kind: TYPE_PERCENTAGE.to_string(),
            value: String::new(),
            applicable_products: Vec::new(),
            start_date: today.clone(),
            end_date: today,
            min_quantity: "1".to_string(),
            max_uses: String::new(),
            requires_loyalty_card: false,
            is_active: true,
        }
    }
}

impl Draft for PromotionDraft {
    type Record = Promotion;

    fn from_record(record: &Promotion) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            kind: record.kind.clone(),
            value: record.value.clone(),
            applicable_products: record
                .applicable_products
                .iter()
                .map(ForeignKey::flatten)
                .collect(),
            start_date: record.start_date.clone(),
            end_date: record.end_date.clone(),
            min_quantity: record.min_quantity.clone(),
            max_uses: record.max_uses.clone(),
            requires_loyalty_card: record.requires_loyalty_card,
            is_active: record.is_active,
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<PromotionDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &PromotionDraft| d.name.clone(),
        |d: &mut PromotionDraft, v| d.name = v,
    ),
    FormField::new(
        "type",
        "Tipo",
        FieldKind::Choice(TYPE_CHOICES),
        |d: &PromotionDraft| d.kind.clone(),
        |d: &mut PromotionDraft, v| d.kind = v,
    ),
    FormField::new(
        "value",
        "Valor",
        FieldKind::Number,
        |d: &PromotionDraft| d.value.clone(),
        |d: &mut PromotionDraft, v| d.value = v,
    ),
    FormField::new(
        "start_date",
        "Fecha de Inicio",
        FieldKind::Date,
        |d: &PromotionDraft| d.start_date.clone(),
        |d: &mut PromotionDraft, v| d.start_date = v,
    ),
    FormField::new(
        "end_date",
        "Fecha de Fin",
        FieldKind::Date,
        |d: &PromotionDraft| d.end_date.clone(),
        |d: &mut PromotionDraft, v| d.end_date = v,
    ),
    FormField::new(
        "min_quantity",
        "Cantidad Mínima",
        FieldKind::Number,
        |d: &PromotionDraft| d.min_quantity.clone(),
        |d: &mut PromotionDraft, v| d.min_quantity = v,
    ),
    FormField::new(
        "max_uses",
        "Usos Máximos",
        FieldKind::Number,
        |d: &PromotionDraft| d.max_uses.clone(),
        |d: &mut PromotionDraft, v| d.max_uses = v,
    ),
    FormField::new(
        "requires_loyalty_card",
        "Requiere Tarjeta de Fidelidad",
        FieldKind::Checkbox,
        |d: &PromotionDraft| d.requires_loyalty_card.to_string(),
        |d: &mut PromotionDraft, v| d.requires_loyalty_card = v == "true",
    ),
    FormField::new(
        "is_active",
        "Activa",
        FieldKind::Checkbox,
        |d: &PromotionDraft| d.is_active.to_string(),
        |d: &mut PromotionDraft, v| d.is_active = v == "true",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_type_column_and_payload() {
        let promo: Promotion = serde_json::from_value(json!({
            "id": 2,
            "name": "Invierno",
            "type": "fixed_amount",
            "value": "500.00",
            "applicable_products": [8, 9],
            "start_date": "2026-06-01",
            "end_date": "2026-08-31",
            "min_quantity": 1,
            "max_uses": null,
            "requires_loyalty_card": true
        }))
        .unwrap();

        assert_eq!(
            render_rows(&[promo.clone()], COLUMNS)[0],
            vec!["Invierno", "Monto Fijo de Descuento", "500.00", "2026-06-01 - 2026-08-31", "Sí"]
        );

        let payload = serde_json::to_value(PromotionDraft::from_record(&promo)).unwrap();
        assert_eq!(payload["type"], json!("fixed_amount"));
        assert_eq!(payload["applicable_products"], json!([8, 9]));
        assert_eq!(payload["min_quantity"], json!("1"));
        assert_eq!(payload["max_uses"], json!(null));
        assert_eq!(payload["requires_loyalty_card"], json!(true));
    }

    #[test]
    fn test_new_promotion_defaults() {
        let draft = PromotionDraft::default();
        assert_eq!(draft.kind, TYPE_PERCENTAGE);
        assert_eq!(draft.min_quantity, "1");
        assert!(draft.is_active);
        assert_eq!(draft.start_date, draft.end_date);
    }
}
