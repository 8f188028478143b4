use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::Column;

/// Depósito de una fábrica
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default)]
    pub factory: ForeignKey,
    #[serde(default, deserialize_with = "lenient::string")]
    pub factory_name: String,
}

impl Resource for Warehouse {
    type Draft = WarehouseDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/warehouses/"
    }

    fn element_name() -> &'static str {
        "Depósito"
    }

    fn list_name() -> &'static str {
        "Depósitos"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<WarehouseDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const FACTORIES_ENDPOINT: &str = "/factories/";

const REFERENCES: &[&str] = &[FACTORIES_ENDPOINT];

const COLUMNS: &[Column<Warehouse>] = &[
    Column::new("Nombre", |w: &Warehouse| w.name.clone()),
    Column::new("Fábrica", |w: &Warehouse| {
        if w.factory_name.is_empty() {
            w.factory.display()
        } else {
            w.factory_name.clone()
        }
    }),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WarehouseDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub factory: ForeignKey,
}

impl Draft for WarehouseDraft {
    type Record = Warehouse;

    fn from_record(record: &Warehouse) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            factory: record.factory.flatten(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<WarehouseDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &WarehouseDraft| d.name.clone(),
        |d: &mut WarehouseDraft, v| d.name = v,
    ),
    FormField::new(
        "factory",
        "Fábrica",
        FieldKind::Reference(FACTORIES_ENDPOINT),
        |d: &WarehouseDraft| d.factory.input_value(),
        |d: &mut WarehouseDraft, v| d.factory = ForeignKey::from_input(&v),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_factory_name_preferred_over_id() {
        let rows: Vec<Warehouse> = serde_json::from_value(json!([
            {"id": 1, "name": "Central", "factory": 2, "factory_name": "Planta Norte"},
            {"id": 2, "name": "Anexo", "factory": 2},
            {"id": 3, "name": "Sin fábrica", "factory": null}
        ]))
        .unwrap();

        assert_eq!(
            render_rows(&rows, COLUMNS),
            vec![
                vec!["Central", "Planta Norte"],
                vec!["Anexo", "#2"],
                vec!["Sin fábrica", "-"],
            ]
        );
        let payload = serde_json::to_value(WarehouseDraft::from_record(&rows[2])).unwrap();
        assert_eq!(payload, json!({"name": "Sin fábrica", "factory": null}));
    }
}
