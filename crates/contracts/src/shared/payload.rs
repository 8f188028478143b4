//! Submission bodies: JSON or multipart form

use serde::Serialize;
use serde_json::Value;

use crate::domain::common::lenient::scalar_to_string;

/// A file picked by the user, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// File slot of a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileField {
    #[default]
    Empty,
    /// Stored file (URL as returned by the backend); not re-sent
    Existing(String),
    /// New file chosen in this dialog
    Selected(FileUpload),
}

impl FileField {
    pub fn from_url(url: Option<&str>) -> Self {
        match url {
            Some(u) if !u.is_empty() => Self::Existing(u.to_string()),
            _ => Self::Empty,
        }
    }

    pub fn selected(&self) -> Option<&FileUpload> {
        match self {
            Self::Selected(f) => Some(f),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Existing(url) => url.rsplit('/').next().unwrap_or(url).to_string(),
            Self::Selected(f) => f.file_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text(String),
    File(FileUpload),
}

/// Ordered multipart form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a serialized draft into text parts.
    ///
    /// `null` becomes an empty part so cleared foreign keys still reach the
    /// backend; arrays and objects are sent as JSON text.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let mut form = Self::new();
        if let Value::Object(map) = serde_json::to_value(value)? {
            for (key, v) in map {
                form.push_text(key, scalar_to_string(&v));
            }
        }
        Ok(form)
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push((name.into(), FormPart::Text(value.into())));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: FileUpload) {
        self.parts.push((name.into(), FormPart::File(file)));
    }

    /// Attach the file only when one was chosen; otherwise the field is left
    /// out so the backend keeps the stored file.
    pub fn push_file_field(&mut self, name: impl Into<String>, field: &FileField) {
        if let Some(file) = field.selected() {
            self.push_file(name, file.clone());
        }
    }

    /// Drop every part with this name.
    pub fn remove(&mut self, name: &str) {
        self.parts.retain(|(n, _)| n != name);
    }

    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }
}

/// Body of a create/update/patch request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBody {
    Json(Value),
    Multipart(MultipartForm),
}

impl SubmitBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            Self::Multipart(_) => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            Self::Multipart(f) => Some(f),
            Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_keeps_cleared_keys() {
        let form = MultipartForm::from_serializable(&json!({
            "bank": null,
            "amount": 10.5,
            "tags": ["a"],
        }))
        .unwrap();
        assert_eq!(form.get("bank"), Some(&FormPart::Text(String::new())));
        assert_eq!(form.get("amount"), Some(&FormPart::Text("10.5".into())));
        assert_eq!(form.get("tags"), Some(&FormPart::Text("[\"a\"]".into())));
        assert_eq!(form.parts().len(), 3);
    }

    #[test]
    fn test_unchanged_file_is_omitted() {
        let mut form = MultipartForm::new();
        form.push_file_field("file", &FileField::Existing("/media/a.pdf".into()));
        assert!(!form.contains("file"));

        let upload = FileUpload::new("b.pdf", "application/pdf", vec![1, 2]);
        form.push_file_field("file", &FileField::Selected(upload.clone()));
        assert_eq!(form.get("file"), Some(&FormPart::File(upload)));
    }

    #[test]
    fn test_file_display() {
        assert_eq!(FileField::from_url(Some("/media/x/y.png")).display(), "y.png");
        assert_eq!(FileField::from_url(Some("")), FileField::Empty);
    }
}
