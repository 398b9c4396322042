//! Request body templates and their serialized payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Body template attached to a catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RequestBody {
    /// A JSON document sent as `application/json`.
    Json(Value),
    /// A `multipart/form-data` upload.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serializes the template into the payload the transport sends.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the JSON value cannot be encoded.
    pub fn to_payload(&self) -> DomainResult<Payload> {
        match self {
            Self::Json(value) => serde_json::to_vec(value)
                .map(Payload::Json)
                .map_err(|e| DomainError::InvalidBody(e.to_string())),
            Self::Multipart(form) => Ok(Payload::Multipart(form.clone())),
        }
    }
}

/// Text fields plus a single file part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartForm {
    /// Plain text fields, sent in order before the file.
    pub fields: Vec<FormField>,
    /// The uploaded file.
    pub file: FilePart,
}

impl MultipartForm {
    /// Creates a form with a single file part and no text fields.
    #[must_use]
    pub const fn new(file: FilePart) -> Self {
        Self {
            fields: Vec::new(),
            file,
        }
    }

    /// Adds a text field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// A named text field in a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: String,
}

/// The file part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePart {
    /// Form field the file is attached to.
    pub field: String,
    /// File name reported to the server; also used to guess the MIME type.
    pub file_name: String,
    /// Raw file content.
    pub content: Vec<u8>,
}

impl FilePart {
    /// Creates a file part.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// A serialized request body ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    /// No body.
    #[default]
    None,
    /// Encoded JSON bytes.
    Json(Vec<u8>),
    /// Multipart form, encoded by the transport so it can pick the boundary.
    Multipart(MultipartForm),
}

impl Payload {
    /// Content type the transport must set, if it is fixed up front.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::None | Self::Multipart(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_template_serializes_compactly() {
        let body = RequestBody::Json(json!({"title": "Test Conversation"}));
        let payload = body.to_payload().unwrap();

        let expected = br#"{"title":"Test Conversation"}"#.to_vec();
        assert_eq!(payload, Payload::Json(expected));
        assert_eq!(payload.content_type(), Some("application/json"));
    }

    #[test]
    fn multipart_is_passed_through() {
        let form = MultipartForm::new(FilePart::new("file", "test.txt", "test file content"))
            .field("conversationId", "test-id");
        let payload = RequestBody::Multipart(form.clone()).to_payload().unwrap();

        assert_eq!(payload, Payload::Multipart(form));
        assert_eq!(payload.content_type(), None);
    }
}
