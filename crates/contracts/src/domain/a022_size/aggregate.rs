use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::Column;

/// Talle; encarece el costo base de la plantilla en un porcentaje
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cost_percentage_increase: String,
}

impl Resource for Size {
    type Draft = SizeDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/sizes/"
    }

    fn element_name() -> &'static str {
        "Talle"
    }

    fn list_name() -> &'static str {
        "Talles"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<SizeDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Size>] = &[
    Column::new("Talle", |s: &Size| s.name.clone()),
    Column::new("Incremento de Costo", |s: &Size| {
        if s.cost_percentage_increase.is_empty() {
            "0".to_string()
        } else {
            s.cost_percentage_increase.clone()
        }
    }),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub cost_percentage_increase: String,
}

impl Default for SizeDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            cost_percentage_increase: "0.00".to_string(),
        }
    }
}

impl Draft for SizeDraft {
    type Record = Size;

    fn from_record(record: &Size) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            cost_percentage_increase: record.cost_percentage_increase.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<SizeDraft>] = &[
    FormField::text(
        "name",
        "Talle",
        |d: &SizeDraft| d.name.clone(),
        |d: &mut SizeDraft, v| d.name = v,
    ),
    FormField::new(
        "cost_percentage_increase",
        "Incremento de Costo (ej: 0.10 = 10%)",
        FieldKind::Number,
        |d: &SizeDraft| d.cost_percentage_increase.clone(),
        |d: &mut SizeDraft, v| d.cost_percentage_increase = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_decimal_increase_kept_as_text() {
        let rows: Vec<Size> = serde_json::from_value(json!([
            {"id": 1, "name": "XL", "cost_percentage_increase": "0.10"},
            {"id": 2, "name": "S"}
        ]))
        .unwrap();
        assert_eq!(
            render_rows(&rows, COLUMNS),
            vec![vec!["XL", "0.10"], vec!["S", "0"]]
        );
        assert_eq!(SizeDraft::default().cost_percentage_increase, "0.00");
        assert_eq!(SizeDraft::from_record(&rows[0]).cost_percentage_increase, "0.10");
    }
}
