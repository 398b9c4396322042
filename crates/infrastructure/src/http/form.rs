//! Multipart form builder.
//!
//! Turns the domain's [`MultipartForm`] into a `reqwest` form. The file
//! part's MIME type is guessed from its file name.

use omnicheck_domain::request::MultipartForm;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

/// Error type for form building.
#[derive(Debug, Error)]
pub enum FormBuildError {
    /// The guessed MIME type was rejected by the HTTP layer.
    #[error("Invalid MIME type for {file_name}: {message}")]
    InvalidMime {
        /// File the MIME type was guessed for
        file_name: String,
        /// Underlying error
        message: String,
    },
}

/// Build a multipart form: text fields first, then the file part.
///
/// # Errors
///
/// Returns [`FormBuildError::InvalidMime`] if the guessed MIME type is not
/// accepted for the file part.
pub fn build_form(form: &MultipartForm) -> Result<Form, FormBuildError> {
    let mut built = Form::new();

    for field in &form.fields {
        built = built.text(field.name.clone(), field.value.clone());
    }

    let file = &form.file;
    let mime_type = mime_guess::from_path(&file.file_name)
        .first_or_octet_stream()
        .to_string();

    let part = Part::bytes(file.content.clone())
        .file_name(file.file_name.clone())
        .mime_str(&mime_type)
        .map_err(|e| FormBuildError::InvalidMime {
            file_name: file.file_name.clone(),
            message: e.to_string(),
        })?;

    Ok(built.part(file.field.clone(), part))
}
