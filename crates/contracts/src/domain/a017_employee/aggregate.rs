use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Empleado: usuario asignado a una fábrica o a un local
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    #[serde(default)]
    pub user: ForeignKey,
    #[serde(default)]
    pub factory: ForeignKey,
    #[serde(default)]
    pub local: ForeignKey,
    #[serde(default)]
    pub role: ForeignKey,
    #[serde(default, deserialize_with = "lenient::date")]
    pub hire_date: String,
}

impl Employee {
    /// Factory or store the employee works at
    pub fn workplace(&self) -> String {
        if !self.factory.is_empty() {
            self.factory.display()
        } else {
            self.local.display()
        }
    }
}

impl Resource for Employee {
    type Draft = EmployeeDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/employees/"
    }

    fn element_name() -> &'static str {
        "Empleado"
    }

    fn list_name() -> &'static str {
        "Empleados"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<EmployeeDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const USERS_ENDPOINT: &str = "/users/";
const FACTORIES_ENDPOINT: &str = "/factories/";
const LOCALS_ENDPOINT: &str = "/locals/";
const ROLES_ENDPOINT: &str = "/employee-roles/";

const REFERENCES: &[&str] = &[
    USERS_ENDPOINT,
    FACTORIES_ENDPOINT,
    LOCALS_ENDPOINT,
    ROLES_ENDPOINT,
];

const COLUMNS: &[Column<Employee>] = &[
    Column::new("Usuario", |e: &Employee| e.user.display()),
    Column::new("Rol", |e: &Employee| e.role.display()),
    Column::new("Lugar de Trabajo", Employee::workplace),
    Column::new("Fecha de Ingreso", |e: &Employee| or_dash(&e.hire_date)),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub user: ForeignKey,
    pub factory: ForeignKey,
    pub local: ForeignKey,
    pub role: ForeignKey,
    pub hire_date: String,
}

impl Default for EmployeeDraft {
    fn default() -> Self {
        Self {
            id: None,
            user: ForeignKey::none(),
            factory: ForeignKey::none(),
            local: ForeignKey::none(),
            role: ForeignKey::none(),
            hire_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

impl Draft for EmployeeDraft {
    type Record = Employee;

    fn from_record(record: &Employee) -> Self {
        Self {
            id: Some(record.id),
            user: record.user.flatten(),
            factory: record.factory.flatten(),
            local: record.local.flatten(),
            role: record.role.flatten(),
            hire_date: record.hire_date.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<EmployeeDraft>] = &[
    FormField::new(
        "user",
        "Usuario",
        FieldKind::Reference(USERS_ENDPOINT),
        |d: &EmployeeDraft| d.user.input_value(),
        |d: &mut EmployeeDraft, v| d.user = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "role",
        "Rol",
        FieldKind::Reference(ROLES_ENDPOINT),
        |d: &EmployeeDraft| d.role.input_value(),
        |d: &mut EmployeeDraft, v| d.role = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "factory",
        "Fábrica",
        FieldKind::Reference(FACTORIES_ENDPOINT),
        |d: &EmployeeDraft| d.factory.input_value(),
        |d: &mut EmployeeDraft, v| d.factory = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "local",
        "Local",
        FieldKind::Reference(LOCALS_ENDPOINT),
        |d: &EmployeeDraft| d.local.input_value(),
        |d: &mut EmployeeDraft, v| d.local = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "hire_date",
        "Fecha de Ingreso",
        FieldKind::Date,
        |d: &EmployeeDraft| d.hire_date.clone(),
        |d: &mut EmployeeDraft, v| d.hire_date = v,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_workplace_falls_back_to_local() {
        let rows: Vec<Employee> = serde_json::from_value(json!([
            {"id": 1, "user": {"id": 3, "email": "ana@acme.com"}, "factory": 2, "local": null, "role": null, "hire_date": "2025-02-01"},
            {"id": 2, "user": 4, "factory": null, "local": {"id": 5, "name": "Centro"}, "role": {"id": 1, "name": "Vendedor"}}
        ]))
        .unwrap();

        assert_eq!(
            render_rows(&rows, COLUMNS),
            vec![
                vec!["ana@acme.com", "-", "#2", "2025-02-01"],
                vec!["#4", "Vendedor", "Centro", "-"],
            ]
        );
    }

    #[test]
    fn test_cleared_references_sent_as_null() {
        let mut draft = EmployeeDraft {
            user: ForeignKey::to(RecordId(3)),
            hire_date: "2025-02-01".into(),
            ..EmployeeDraft::default()
        };
        crate::shared::form::find_field(FIELDS, "factory")
            .unwrap()
            .write(&mut draft, String::new());

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"user": 3, "factory": null, "local": null, "role": null, "hire_date": "2025-02-01"})
        );
    }
}
