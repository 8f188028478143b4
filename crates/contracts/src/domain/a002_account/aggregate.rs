use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Cuenta contable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub account_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
}

pub const ACCOUNT_TYPES: &[Choice] = &[
    Choice::plain("Activo"),
    Choice::plain("Pasivo"),
    Choice::plain("Patrimonio Neto"),
    Choice::plain("Ingreso"),
    Choice::plain("Egreso"),
];

impl Resource for Account {
    type Draft = AccountDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/accounts/"
    }

    fn element_name() -> &'static str {
        "Cuenta"
    }

    fn list_name() -> &'static str {
        "Cuentas"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<AccountDraft>] {
        FIELDS
    }
}

const COLUMNS: &[Column<Account>] = &[
    Column::new("Nombre", |a: &Account| a.name.clone()),
    Column::new("Tipo", |a: &Account| or_dash(&a.account_type)),
    Column::new("Código", |a: &Account| or_dash(&a.code)),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub account_type: String,
    pub code: String,
}

impl Draft for AccountDraft {
    type Record = Account;

    fn from_record(record: &Account) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            account_type: record.account_type.clone(),
            code: record.code.clone(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<AccountDraft>] = &[
    FormField::text(
        "name",
        "Nombre",
        |d: &AccountDraft| d.name.clone(),
        |d: &mut AccountDraft, v| d.name = v,
    ),
    FormField::new(
        "account_type",
        "Tipo de Cuenta",
        FieldKind::Choice(ACCOUNT_TYPES),
        |d: &AccountDraft| d.account_type.clone(),
        |d: &mut AccountDraft, v| d.account_type = v,
    ),
    FormField::text(
        "code",
        "Código",
        |d: &AccountDraft| d.code.clone(),
        |d: &mut AccountDraft, v| d.code = v,
    ),
];
