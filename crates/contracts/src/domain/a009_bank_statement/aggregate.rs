use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{FieldKind, FormField};
use crate::shared::payload::{FileField, MultipartForm, SubmitBody};
use crate::shared::table::{or_dash, Column};

/// Extracto bancario con archivo adjunto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankStatement {
    pub id: RecordId,
    #[serde(default)]
    pub bank: ForeignKey,
    #[serde(default, deserialize_with = "lenient::date")]
    pub statement_date: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Resource for BankStatement {
    type Draft = BankStatementDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "/bank-statements/"
    }

    fn element_name() -> &'static str {
        "Extracto Bancario"
    }

    fn list_name() -> &'static str {
        "Extractos Bancarios"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<BankStatementDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const REFERENCES: &[&str] = &["/banks/"];

const COLUMNS: &[Column<BankStatement>] = &[
    Column::new("Banco", |s: &BankStatement| s.bank.display()),
    Column::new("Fecha", |s: &BankStatement| or_dash(&s.statement_date)),
    Column::new("Archivo", |s: &BankStatement| {
        or_dash(&FileField::from_url(s.file.as_deref()).display())
    }),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankStatementDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub bank: ForeignKey,
    pub statement_date: String,
    #[serde(skip)]
    pub file: FileField,
}

impl Default for BankStatementDraft {
    fn default() -> Self {
        Self {
            id: None,
            bank: ForeignKey::none(),
            statement_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            file: FileField::Empty,
        }
    }
}

impl Draft for BankStatementDraft {
    type Record = BankStatement;

    fn from_record(record: &BankStatement) -> Self {
        Self {
            id: Some(record.id),
            bank: record.bank.flatten(),
            statement_date: record.statement_date.clone(),
            file: FileField::from_url(record.file.as_deref()),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }

    /// Always multipart; the file part is present only when a new file was picked.
    fn to_payload(&self) -> Result<SubmitBody, serde_json::Error> {
        let mut form = MultipartForm::from_serializable(self)?;
        form.push_file_field("file", &self.file);
        Ok(SubmitBody::Multipart(form))
    }
}

const FIELDS: &[FormField<BankStatementDraft>] = &[
    FormField::new(
        "bank",
        "Banco",
        FieldKind::Reference("/banks/"),
        |d: &BankStatementDraft| d.bank.input_value(),
        |d: &mut BankStatementDraft, v| d.bank = ForeignKey::from_input(&v),
    ),
    FormField::new(
        "statement_date",
        "Fecha del Extracto",
        FieldKind::Date,
        |d: &BankStatementDraft| d.statement_date.clone(),
        |d: &mut BankStatementDraft, v| d.statement_date = v,
    ),
    FormField::file(
        "file",
        "Archivo",
        |d: &BankStatementDraft| d.file.display(),
        |d: &mut BankStatementDraft, f| d.file = FileField::Selected(f),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::payload::{FileUpload, FormPart};
    use serde_json::json;

    fn stored() -> BankStatement {
        serde_json::from_value(json!({
            "id": 11,
            "bank": {"id": 2, "name": "Nación"},
            "statement_date": "2024-02-29",
            "file": "/media/statements/feb.pdf"
        }))
        .unwrap()
    }

    #[test]
    fn test_update_without_new_file_omits_field() {
        let draft = BankStatementDraft::from_record(&stored());
        let body = draft.to_payload().unwrap();
        let form = body.as_multipart().unwrap();
        assert!(!form.contains("file"));
        assert_eq!(form.get("bank"), Some(&FormPart::Text("2".into())));
    }

    #[test]
    fn test_new_file_is_sent_as_binary() {
        let mut draft = BankStatementDraft::from_record(&stored());
        let upload = FileUpload::new("mar.pdf", "application/pdf", vec![0x25, 0x50]);
        FIELDS[2].attach(&mut draft, upload.clone());
        let body = draft.to_payload().unwrap();
        assert_eq!(body.as_multipart().unwrap().get("file"), Some(&FormPart::File(upload)));
    }
}
