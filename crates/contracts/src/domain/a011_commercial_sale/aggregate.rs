use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

// ============================================================================
// Record
// ============================================================================

/// Venta comercial con líneas de producto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialSale {
    pub id: RecordId,
    #[serde(default)]
    pub client: ForeignKey,
    #[serde(default)]
    pub user: ForeignKey,
    #[serde(default)]
    pub warehouse: ForeignKey,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub total_amount: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sale_date: String,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(default)]
    pub commercial_product: ForeignKey,
    #[serde(default, deserialize_with = "lenient::string")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit_price: String,
}

pub const STATUS_CHOICES: &[Choice] = &[
    Choice::new("pending", "Pendiente"),
    Choice::new("completed", "Completada"),
    Choice::new("cancelled", "Cancelada"),
];

fn status_label(value: &str) -> String {
    STATUS_CHOICES
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label.to_string())
        .unwrap_or_else(|| or_dash(value))
}

impl Resource for CommercialSale {
    type Draft = CommercialSaleDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/sales/"
    }

    fn element_name() -> &'static str {
        "Venta Comercial"
    }

    fn list_name() -> &'static str {
        "Ventas Comerciales"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<CommercialSaleDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

pub const PRODUCTS_ENDPOINT: &str = "commercial/commercial-products/";

const REFERENCES: &[&str] = &["/clients/", "/users/", "/warehouses/", PRODUCTS_ENDPOINT];

const COLUMNS: &[Column<CommercialSale>] = &[
    Column::new("ID", |s: &CommercialSale| s.id.to_string()),
    Column::new("Cliente", |s: &CommercialSale| s.client.display()),
    Column::new("Almacén", |s: &CommercialSale| s.warehouse.display()),
    Column::new("Estado", |s: &CommercialSale| status_label(&s.status)),
    Column::new("Items", |s: &CommercialSale| s.items.len().to_string()),
    Column::new("Total", |s: &CommercialSale| or_dash(&s.total_amount)),
];

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleItemDraft {
    pub commercial_product: ForeignKey,
    pub quantity: String,
    pub unit_price: String,
}

impl Default for SaleItemDraft {
    fn default() -> Self {
        Self {
            commercial_product: ForeignKey::none(),
            quantity: "1".to_string(),
            unit_price: String::new(),
        }
    }
}

impl SaleItemDraft {
    fn from_item(item: &SaleItem) -> Self {
        Self {
            commercial_product: item.commercial_product.flatten(),
            quantity: if item.quantity.is_empty() {
                "1".to_string()
            } else {
                item.quantity.clone()
            },
            unit_price: item.unit_price.clone(),
        }
    }

    /// quantity × unit price; unparsable input counts as zero
    pub fn subtotal(&self) -> f64 {
        let quantity: f64 = self.quantity.trim().parse().unwrap_or(0.0);
        let price: f64 = self.unit_price.trim().parse().unwrap_or(0.0);
        quantity * price
    }
}

/// Which column of a sale line an input edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleItemColumn {
    Product,
    Quantity,
    UnitPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommercialSaleDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub client: ForeignKey,
    pub user: ForeignKey,
    pub warehouse: ForeignKey,
    pub status: String,
    pub items: Vec<SaleItemDraft>,
}

impl Default for CommercialSaleDraft {
    fn default() -> Self {
        Self {
            id: None,
            client: ForeignKey::none(),
            user: ForeignKey::none(),
            warehouse: ForeignKey::none(),
            status: "pending".to_string(),
            items: Vec::new(),
        }
    }
}

impl CommercialSaleDraft {
    pub fn add_item(&mut self) {
        self.items.push(SaleItemDraft::default());
    }

    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn set_item(&mut self, index: usize, column: SaleItemColumn, input: String) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        match column {
            SaleItemColumn::Product => item.commercial_product = ForeignKey::from_input(&input),
            SaleItemColumn::Quantity => item.quantity = input,
            SaleItemColumn::UnitPrice => item.unit_price = input,
        }
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(SaleItemDraft::subtotal).sum()
    }
}

impl Draft for CommercialSaleDraft {
    type Record = CommercialSale;

    fn from_record(record: &CommercialSale) -> Self {
        Self {
            id: Some(record.id),
            client: record.client.flatten(),
            user: record.user.flatten(),
            warehouse: record.warehouse.flatten(),
            status: if record.status.is_empty() {
                "pending".to_string()
            } else {
                record.status.clone()
            },
            items: record.items.iter().map(SaleItemDraft::from_item).collect(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

macro_rules! reference_field {
    ($name:literal, $label:literal, $endpoint:literal, $field:ident) => {
        FormField::new(
            $name,
            $label,
            FieldKind::Reference($endpoint),
            |d: &CommercialSaleDraft| d.$field.input_value(),
            |d: &mut CommercialSaleDraft, v| d.$field = ForeignKey::from_input(&v),
        )
    };
}

const FIELDS: &[FormField<CommercialSaleDraft>] = &[
    reference_field!("client", "Cliente", "/clients/", client),
    reference_field!("user", "Usuario", "/users/", user),
    reference_field!("warehouse", "Almacén", "/warehouses/", warehouse),
    FormField::new(
        "status",
        "Estado",
        FieldKind::Choice(STATUS_CHOICES),
        |d: &CommercialSaleDraft| d.status.clone(),
        |d: &mut CommercialSaleDraft, v| d.status = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> CommercialSale {
        serde_json::from_value(json!({
            "id": 9,
            "client": {"id": 4, "name": "Ana"},
            "user": null,
            "warehouse": 2,
            "status": "completed",
            "total_amount": "3000.00",
            "items": [
                {"commercial_product": {"id": 21, "name": "Remera"}, "quantity": 2, "unit_price": "1500.00"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_items_survive_edit() {
        let draft = CommercialSaleDraft::from_record(&stored());
        let body = draft.to_payload().unwrap();
        assert_eq!(
            body.as_json().unwrap(),
            &json!({
                "client": 4,
                "user": null,
                "warehouse": 2,
                "status": "completed",
                "items": [{"commercial_product": 21, "quantity": "2", "unit_price": "1500.00"}]
            })
        );
    }

    #[test]
    fn test_line_editing() {
        let mut draft = CommercialSaleDraft::default();
        draft.add_item();
        draft.set_item(0, SaleItemColumn::Product, "21".into());
        draft.set_item(0, SaleItemColumn::Quantity, "3".into());
        draft.set_item(0, SaleItemColumn::UnitPrice, "10.5".into());
        draft.set_item(5, SaleItemColumn::Quantity, "9".into());
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.total(), 31.5);

        draft.remove_item(0);
        draft.remove_item(0);
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_status_column_uses_label() {
        let rows = crate::shared::table::render_rows(&[stored()], COLUMNS);
        assert_eq!(rows[0], vec!["9", "Ana", "#2", "Completada", "1", "3000.00"]);
    }
}
