use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::payload::{FileField, MultipartForm, SubmitBody};
use crate::shared::table::{or_dash, Column};

// ============================================================================
// Record
// ============================================================================

/// Producto comercial (catálogo de reventa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialProduct {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sku: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub barcode: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subcategory: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: String,
    /// Free-form JSON object; kept as text
    #[serde(default, deserialize_with = "lenient::string")]
    pub variants: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cost_price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sale_price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub discount_price: String,
    #[serde(default)]
    pub supplier: ForeignKey,
    #[serde(default, deserialize_with = "lenient::string")]
    pub weight: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dimensions: String,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default = "active", deserialize_with = "lenient::flag")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

impl Resource for CommercialProduct {
    type Draft = CommercialProductDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "commercial/commercial-products/"
    }

    fn element_name() -> &'static str {
        "Producto Comercial"
    }

    fn list_name() -> &'static str {
        "Productos Comerciales"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<CommercialProductDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const REFERENCES: &[&str] = &["/suppliers/"];

const COLUMNS: &[Column<CommercialProduct>] = &[
    Column::new("SKU", |p: &CommercialProduct| or_dash(&p.sku)),
    Column::new("Nombre", |p: &CommercialProduct| p.name.clone()),
    Column::new("Categoría", |p: &CommercialProduct| or_dash(&p.category)),
    Column::new("Precio de Venta", |p: &CommercialProduct| {
        or_dash(&p.sale_price)
    }),
    Column::new("Proveedor", |p: &CommercialProduct| p.supplier.display()),
    Column::new("Activo", |p: &CommercialProduct| {
        let label = if p.is_active { "Sí" } else { "No" };
        label.to_string()
    }),
];

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommercialProductDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub sku: String,
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub brand: String,
    pub variants: String,
    pub cost_price: String,
    pub sale_price: String,
    pub discount_price: String,
    pub supplier: ForeignKey,
    pub weight: String,
    pub dimensions: String,
    pub is_active: bool,
    #[serde(skip)]
    pub main_image: FileField,
}

impl Default for CommercialProductDraft {
    fn default() -> Self {
        Self {
            id: None,
            sku: String::new(),
            barcode: String::new(),
            name: String::new(),
            description: String::new(),
            category: String::new(),
            subcategory: String::new(),
            brand: String::new(),
            variants: "{}".to_string(),
            cost_price: String::new(),
            sale_price: String::new(),
            discount_price: String::new(),
            supplier: ForeignKey::none(),
            weight: String::new(),
            dimensions: String::new(),
            is_active: true,
            main_image: FileField::Empty,
        }
    }
}

impl Draft for CommercialProductDraft {
    type Record = CommercialProduct;

    fn from_record(record: &CommercialProduct) -> Self {
        Self {
            id: Some(record.id),
            sku: record.sku.clone(),
            barcode: record.barcode.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            subcategory: record.subcategory.clone(),
            brand: record.brand.clone(),
            variants: if record.variants.is_empty() {
                "{}".to_string()
            } else {
                record.variants.clone()
            },
            cost_price: record.cost_price.clone(),
            sale_price: record.sale_price.clone(),
            discount_price: record.discount_price.clone(),
            supplier: record.supplier.flatten(),
            weight: record.weight.clone(),
            dimensions: record.dimensions.clone(),
            is_active: record.is_active,
            main_image: FileField::from_url(record.main_image.as_deref()),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }

    fn to_payload(&self) -> Result<SubmitBody, serde_json::Error> {
        let mut form = MultipartForm::from_serializable(self)?;
        form.push_file_field("main_image", &self.main_image);
        Ok(SubmitBody::Multipart(form))
    }
}

macro_rules! text_field {
    ($name:literal, $label:literal, $field:ident) => {
        FormField::text(
            $name,
            $label,
            |d: &CommercialProductDraft| d.$field.clone(),
            |d: &mut CommercialProductDraft, v| d.$field = v,
        )
    };
    ($name:literal, $label:literal, $field:ident, $kind:expr) => {
        FormField::new(
            $name,
            $label,
            $kind,
            |d: &CommercialProductDraft| d.$field.clone(),
            |d: &mut CommercialProductDraft, v| d.$field = v,
        )
    };
}

const FIELDS: &[FormField<CommercialProductDraft>] = &[
    text_field!("sku", "SKU", sku),
    text_field!("barcode", "Código de Barras", barcode),
    text_field!("name", "Nombre", name),
    text_field!("description", "Descripción", description, FieldKind::TextArea),
    text_field!("category", "Categoría", category),
    text_field!("subcategory", "Subcategoría", subcategory),
    text_field!("brand", "Marca", brand),
    text_field!("variants", "Variantes (JSON)", variants),
    text_field!("cost_price", "Precio de Costo", cost_price, FieldKind::Number),
    text_field!("sale_price", "Precio de Venta", sale_price, FieldKind::Number),
    text_field!(
        "discount_price",
        "Precio de Descuento",
        discount_price,
        FieldKind::Number
    ),
    FormField::new(
        "supplier",
        "Proveedor",
        FieldKind::Reference("/suppliers/"),
        |d: &CommercialProductDraft| d.supplier.input_value(),
        |d: &mut CommercialProductDraft, v| d.supplier = ForeignKey::from_input(&v),
    ),
    text_field!("weight", "Peso", weight, FieldKind::Number),
    text_field!("dimensions", "Dimensiones", dimensions),
    FormField::new(
        "is_active",
        "Activo",
        FieldKind::Checkbox,
        |d: &CommercialProductDraft| d.is_active.to_string(),
        |d: &mut CommercialProductDraft, v| d.is_active = v == "true",
    ),
    FormField::file(
        "main_image",
        "Imagen Principal",
        |d: &CommercialProductDraft| d.main_image.display(),
        |d: &mut CommercialProductDraft, f| d.main_image = FileField::Selected(f),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::find_field;
    use crate::shared::payload::{FileUpload, FormPart};
    use serde_json::json;

    fn stored() -> CommercialProduct {
        serde_json::from_value(json!({
            "id": 21,
            "sku": "REM-001",
            "name": "Remera",
            "variants": {"talle": ["S", "M"]},
            "sale_price": "1500.00",
            "supplier": {"id": 5, "name": "Acme"},
            "main_image": "http://localhost:8000/media/products/remera.png",
            "is_active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_record_shapes() {
        let product = stored();
        assert_eq!(product.variants, r#"{"talle":["S","M"]}"#);
        assert_eq!(
            crate::shared::table::render_rows(&[product], COLUMNS)[0],
            vec!["REM-001", "Remera", "-", "1500.00", "Acme", "Sí"]
        );
    }

    #[test]
    fn test_update_keeps_stored_image() {
        let draft = CommercialProductDraft::from_record(&stored());
        let body = draft.to_payload().unwrap();
        let form = body.as_multipart().unwrap();
        assert!(!form.contains("main_image"));
        assert_eq!(form.get("supplier"), Some(&FormPart::Text("5".into())));
        assert_eq!(form.get("is_active"), Some(&FormPart::Text("true".into())));
    }

    #[test]
    fn test_new_image_and_cleared_supplier() {
        let mut draft = CommercialProductDraft::from_record(&stored());
        find_field(FIELDS, "supplier").unwrap().write(&mut draft, String::new());
        let upload = FileUpload::new("nueva.png", "image/png", vec![137, 80]);
        find_field(FIELDS, "main_image")
            .unwrap()
            .attach(&mut draft, upload.clone());

        let body = draft.to_payload().unwrap();
        let form = body.as_multipart().unwrap();
        assert_eq!(form.get("main_image"), Some(&FormPart::File(upload)));
        assert_eq!(form.get("supplier"), Some(&FormPart::Text(String::new())));
    }
}
