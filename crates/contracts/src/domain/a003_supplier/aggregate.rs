use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::FormField;
use crate::shared::table::{or_dash, Column};

/// Proveedor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub contact_info: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cuit_cuil: String,
}

impl Resource for Supplier {
    type Draft = SupplierDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/suppliers/"
    }

    fn element_name() -> &'static str {
        "Proveedor"
    }

    fn list_name() -> &'static str {
        "Proveedores"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<SupplierDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Supplier>] = &[
    Column::new("Nombre", |s: &Supplier| s.name.clone()),
    Column::new("Información de Contacto", |s: &Supplier| {
        or_dash(&s.contact_info)
    }),
    Column::new("CUIT/CUIL", |s: &Supplier| or_dash(&s.cuit_cuil)),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupplierDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub contact_info: String,
    pub cuit_cuil: String,
}

impl Draft for SupplierDraft {
    type Record = Supplier;

    fn from_record(record: &Supplier) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            contact_info: record.contact_info.clone(),
            cuit_cuil: record.cuit_cuil.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<SupplierDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &SupplierDraft| d.name.clone(),
        |d: &mut SupplierDraft, v| d.name = v,
    ),
    FormField::text(
        "contact_info",
        "Información de Contacto",
        |d: &SupplierDraft| d.contact_info.clone(),
        |d: &mut SupplierDraft, v| d.contact_info = v,
    ),
    FormField::text(
        "cuit_cuil",
        "CUIT/CUIL",
        |d: &SupplierDraft| d.cuit_cuil.clone(),
        |d: &mut SupplierDraft, v| d.cuit_cuil = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list::decode_list;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_envelope_row_renders_and_prefills() {
        let rows: Vec<Supplier> =
            decode_list(Some(json!({"results": [{"id": 5, "name": "Acme"}]}))).unwrap();
        assert_eq!(render_rows(&rows, Supplier::columns()), vec![vec!["Acme", "-", "-"]]);

        let draft = SupplierDraft::from_record(&rows[0]);
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.id(), Some(RecordId(5)));
    }
}
