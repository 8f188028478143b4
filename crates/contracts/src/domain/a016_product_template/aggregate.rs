use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource, UpdateMethod};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

// ============================================================================
// Record
// ============================================================================

/// Plantilla de producto (diseño con materiales, procesos y talles)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTemplate {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub product_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    /// Nested category on read
    #[serde(default)]
    pub category: ForeignKey,
    #[serde(default)]
    pub sizes: Vec<ForeignKey>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub calculated_cost: String,
}

impl Resource for ProductTemplate {
    type Draft = ProductTemplateDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/plantillas/"
    }

    fn element_name() -> &'static str {
        "Plantilla de Producto"
    }

    fn list_name() -> &'static str {
        "Plantillas de Producto"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<ProductTemplateDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }

    /// Materials, processes and files live in nested collections the dialog
    /// does not edit.
    fn update_method() -> UpdateMethod {
        UpdateMethod::Partial
    }
}

const CATEGORIES_ENDPOINT: &str = "/categories/";

const REFERENCES: &[&str] = &[CATEGORIES_ENDPOINT];

const COLUMNS: &[Column<ProductTemplate>] = &[
    Column::new("Código", |t: &ProductTemplate| or_dash(&t.product_code)),
    Column::new("Nombre", |t: &ProductTemplate| t.name.clone()),
    Column::new("Categoría", |t: &ProductTemplate| t.category.display()),
    Column::new("Talles", |t: &ProductTemplate| {
        let sizes: Vec<String> = t.sizes.iter().map(ForeignKey::display).collect();
        or_dash(&sizes.join(", "))
    }),
    Column::new("Costo Calculado", |t: &ProductTemplate| {
        or_dash(&t.calculated_cost)
    }),
];

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductTemplateDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub product_code: String,
    pub description: String,
    #[serde(rename = "category_id")]
    pub category: ForeignKey,
    /// Sizes travel back unchanged as ids
    #[serde(rename = "size_ids")]
    pub sizes: Vec<ForeignKey>,
}

impl Draft for ProductTemplateDraft {
    type Record = ProductTemplate;

    fn from_record(record: &ProductTemplate) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            product_code: record.product_code.clone(),
            description: record.description.clone(),
            category: record.category.flatten(),
            sizes: record.sizes.iter().map(ForeignKey::flatten).collect(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<ProductTemplateDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &ProductTemplateDraft| d.name.clone(),
        |d: &mut ProductTemplateDraft, v| d.name = v,
    ),
    FormField::text(
        "product_code",
        "Código de Producto",
        |d: &ProductTemplateDraft| d.product_code.clone(),
        |d: &mut ProductTemplateDraft, v| d.product_code = v,
    ),
    FormField::new(
        "description",
        "Descripción",
        FieldKind::TextArea,
        |d: &ProductTemplateDraft| d.description.clone(),
        |d: &mut ProductTemplateDraft, v| d.description = v,
    ),
    FormField::new(
        "category_id",
        "Categoría",
        FieldKind::Reference(CATEGORIES_ENDPOINT),
        |d: &ProductTemplateDraft| d.category.input_value(),
        |d: &mut ProductTemplateDraft, v| d.category = ForeignKey::from_input(&v),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_nested_read_flat_write() {
        let template: ProductTemplate = serde_json::from_value(json!({
            "id": 11,
            "name": "Camiseta Rugby",
            "product_code": "CR-01",
            "category": {"id": 4, "name": "Camisetas"},
            "sizes": [{"id": 1, "name": "S", "cost_percentage_increase": "0.00"}, {"id": 2, "name": "M"}],
            "materials": [{"id": 1, "raw_material": 3, "quantity": "1.50"}],
            "calculated_cost": "8250.00"
        }))
        .unwrap();

        assert_eq!(
            render_rows(&[template.clone()], COLUMNS)[0],
            vec!["CR-01", "Camiseta Rugby", "Camisetas", "S, M", "8250.00"]
        );
        assert_eq!(
            serde_json::to_value(ProductTemplateDraft::from_record(&template)).unwrap(),
            json!({
                "name": "Camiseta Rugby",
                "product_code": "CR-01",
                "description": "",
                "category_id": 4,
                "size_ids": [1, 2]
            })
        );
    }

    #[test]
    fn test_edits_are_partial() {
        assert_eq!(ProductTemplate::update_method(), UpdateMethod::Partial);
    }
}
