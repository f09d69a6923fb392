//! In-memory multipart form that keeps its parts inspectable until it is handed to reqwest.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content: Bytes,
}

/// A multipart body with exactly one file part followed by text fields in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    file: FilePart,
    fields: Vec<(String, String)>,
}

impl MultipartBody {
    pub fn new(file: FilePart) -> Self {
        Self {
            file,
            fields: Vec::new(),
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(&self) -> &FilePart {
        &self.file
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value of the named text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn into_form(self) -> Form {
        let file = Part::bytes(self.file.content.to_vec()).file_name(self.file.file_name);
        let mut form = Form::new().part(self.file.field, file);

        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        form
    }
}
