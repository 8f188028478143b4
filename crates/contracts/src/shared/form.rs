//! Form field descriptors for resource dialogs
//!
//! A dialog is a list of `FormField`s over a typed draft. Inputs read the
//! draft through `value` and write user input back through `set`.

use crate::shared::payload::FileUpload;

/// Option of a fixed-choice select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }

    /// Same text for the stored value and the label.
    pub const fn plain(value: &'static str) -> Self {
        Self {
            value,
            label: value,
        }
    }
}

/// Input widget for a field.
pub enum FieldKind<D> {
    Text,
    Email,
    Password,
    Number,
    Date,
    TextArea,
    Checkbox,
    Choice(&'static [Choice]),
    /// Select over a reference list loaded when the dialog opens
    Reference(&'static str),
    /// File picker; the chosen file is attached through `attach`
    File { attach: fn(&mut D, FileUpload) },
}

impl<D> Clone for FieldKind<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for FieldKind<D> {}

pub struct FormField<D> {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind<D>,
    pub value: fn(&D) -> String,
    pub set: fn(&mut D, String),
    /// Conditional fields are hidden (and ignored by `set`) unless this returns true
    pub visible: fn(&D) -> bool,
}

impl<D> Clone for FormField<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for FormField<D> {}

fn always<D>(_: &D) -> bool {
    true
}

fn ignore<D>(_: &mut D, _: String) {}

impl<D> FormField<D> {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind<D>,
        value: fn(&D) -> String,
        set: fn(&mut D, String),
    ) -> Self {
        Self {
            name,
            label,
            kind,
            value,
            set,
            visible: always::<D>,
        }
    }

    pub const fn text(
        name: &'static str,
        label: &'static str,
        value: fn(&D) -> String,
        set: fn(&mut D, String),
    ) -> Self {
        Self::new(name, label, FieldKind::Text, value, set)
    }

    /// File field; `value` shows the current file (URL or chosen name).
    pub const fn file(
        name: &'static str,
        label: &'static str,
        value: fn(&D) -> String,
        attach: fn(&mut D, FileUpload),
    ) -> Self {
        Self::new(name, label, FieldKind::File { attach }, value, ignore::<D>)
    }

    pub const fn visible_when(self, visible: fn(&D) -> bool) -> Self {
        Self { visible, ..self }
    }

    pub fn is_visible(&self, draft: &D) -> bool {
        (self.visible)(draft)
    }

    pub fn read(&self, draft: &D) -> String {
        (self.value)(draft)
    }

    /// Apply text input. Hidden fields keep their value.
    pub fn write(&self, draft: &mut D, input: String) {
        if self.is_visible(draft) {
            (self.set)(draft, input);
        }
    }

    pub fn attach(&self, draft: &mut D, file: FileUpload) {
        if let FieldKind::File { attach } = self.kind {
            if self.is_visible(draft) {
                attach(draft, file);
            }
        }
    }

    /// Reference endpoint for select-over-list fields.
    pub fn reference(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::Reference(endpoint) => Some(endpoint),
            _ => None,
        }
    }
}

/// Look a field up by its payload name.
pub fn find_field<'a, D>(fields: &'a [FormField<D>], name: &str) -> Option<&'a FormField<D>> {
    fields.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Draft {
        kind: String,
        note: String,
        file: Option<String>,
    }

    const FIELDS: &[FormField<Draft>] = &[
        FormField::text("kind", "Tipo", |d: &Draft| d.kind.clone(), |d: &mut Draft, v| {
            d.kind = v
        }),
        FormField::text("note", "Nota", |d: &Draft| d.note.clone(), |d: &mut Draft, v| {
            d.note = v
        })
        .visible_when(|d: &Draft| d.kind == "B"),
        FormField::file(
            "file",
            "Archivo",
            |d: &Draft| d.file.clone().unwrap_or_default(),
            |d: &mut Draft, f| d.file = Some(f.file_name),
        ),
    ];

    #[test]
    fn test_hidden_fields_ignore_input() {
        let mut draft = Draft::default();
        let note = find_field(FIELDS, "note").unwrap();
        note.write(&mut draft, "x".into());
        assert_eq!(draft.note, "");

        find_field(FIELDS, "kind").unwrap().write(&mut draft, "B".into());
        note.write(&mut draft, "x".into());
        assert_eq!(note.read(&draft), "x");
    }

    #[test]
    fn test_file_fields_attach() {
        let mut draft = Draft::default();
        let field = find_field(FIELDS, "file").unwrap();
        field.write(&mut draft, "ignored".into());
        assert_eq!(draft.file, None);
        field.attach(&mut draft, FileUpload::new("a.pdf", "application/pdf", vec![1]));
        assert_eq!(field.read(&draft), "a.pdf");
    }
}
