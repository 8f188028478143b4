use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Usuario del sistema (login por email dentro de la empresa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: String,
    /// System roles, ids or nested objects
    #[serde(default)]
    pub roles: Vec<ForeignKey>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Resource for User {
    type Draft = UserDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/users/"
    }

    fn element_name() -> &'static str {
        "Usuario"
    }

    fn list_name() -> &'static str {
        "Usuarios"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<UserDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<User>] = &[
    Column::new("Email", |u: &User| u.email.clone()),
    Column::new("Nombre", |u: &User| or_dash(&u.full_name())),
    Column::new("Roles", |u: &User| {
        let roles: Vec<String> = u.roles.iter().map(ForeignKey::display).collect();
        or_dash(&roles.join(", "))
    }),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub email: String,
    /// Only set when creating; the list endpoint never returns it
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Not edited here; travels back unchanged
    pub roles: Vec<ForeignKey>,
}

fn is_new(draft: &UserDraft) -> bool {
    draft.id().is_none()
}

impl Draft for UserDraft {
    type Record = User;

    fn from_record(record: &User) -> Self {
        Self {
            id: Some(record.id),
            email: record.email.clone(),
            password: String::new(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            roles: record.roles.iter().map(ForeignKey::flatten).collect(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<UserDraft>] = &[
    FormField::new(
        "email",
        "Email",
        FieldKind::Email,
        |d: &UserDraft| d.email.clone(),
        |d: &mut UserDraft, v| d.email = v,
    ),
    FormField::new(
        "password",
        "Contraseña",
        FieldKind::Password,
        |d: &UserDraft| d.password.clone(),
        |d: &mut UserDraft, v| d.password = v,
    )
    .visible_when(is_new),
    FormField::text(
        "first_name",
        "Nombre",
        |d: &UserDraft| d.first_name.clone(),
        |d: &mut UserDraft, v| d.first_name = v,
    ),
    FormField::text(
        "last_name",
        "Apellido",
        |d: &UserDraft| d.last_name.clone(),
        |d: &mut UserDraft, v| d.last_name = v,
    ),
];
