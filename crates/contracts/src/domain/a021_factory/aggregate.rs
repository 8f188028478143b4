use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::FormField;
use crate::shared::table::{or_dash, Column};

/// Fábrica
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
}

impl Resource for Factory {
    type Draft = FactoryDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/factories/"
    }

    fn element_name() -> &'static str {
        "Fábrica"
    }

    fn list_name() -> &'static str {
        "Fábricas"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<FactoryDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Factory>] = &[
    Column::new("Nombre", |f: &Factory| f.name.clone()),
    Column::new("Ubicación", |f: &Factory| or_dash(&f.location)),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactoryDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub location: String,
}

impl Draft for FactoryDraft {
    type Record = Factory;

    fn from_record(record: &Factory) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            location: record.location.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<FactoryDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &FactoryDraft| d.name.clone(),
        |d: &mut FactoryDraft, v| d.name = v,
    ),
    FormField::text(
        "location",
        "Ubicación",
        |d: &FactoryDraft| d.location.clone(),
        |d: &mut FactoryDraft, v| d.location = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list::decode_list;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_rows_and_prefill() {
        let rows: Vec<Factory> =
            decode_list(Some(json!([{"id": 2, "name": "Planta Norte", "location": null}]))).unwrap();
        assert_eq!(render_rows(&rows, Factory::columns()), vec![vec!["Planta Norte", "-"]]);

        let draft = FactoryDraft::from_record(&rows[0]);
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"name": "Planta Norte", "location": ""})
        );
        assert_eq!(draft.id(), Some(RecordId(2)));
    }
}
