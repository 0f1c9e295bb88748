//! Multipart form bodies
//!
//! `reqwest::multipart::Form` is consumed when sent, so the gateway keeps
//! the parts here and builds a fresh form for each attempt.

use informado_domain::{Attachment, InformadoError};
use reqwest::multipart::{Form, Part};

use crate::errors::InfraError;

/// Replayable `multipart/form-data` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<FormPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormPart {
    Text { name: String, value: String },
    File { name: String, attachment: Attachment },
}

impl MultipartBody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text { name: name.into(), value: value.into() });
        self
    }

    /// Add a file field.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, attachment: &Attachment) -> Self {
        self.parts.push(FormPart::File { name: name.into(), attachment: attachment.clone() });
        self
    }

    /// Field names in insertion order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .map(|part| match part {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
            })
            .collect()
    }

    /// Build a reqwest form for one send.
    ///
    /// # Errors
    /// Returns `InformadoError::InvalidInput` for a malformed content type.
    pub fn to_form(&self) -> Result<Form, InformadoError> {
        self.parts.iter().try_fold(Form::new(), |form, part| match part {
            FormPart::Text { name, value } => Ok(form.text(name.clone(), value.clone())),
            FormPart::File { name, attachment } => {
                let file = Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.file_name.clone())
                    .mime_str(&attachment.content_type)
                    .map_err(InfraError::from)?;
                Ok(form.part(name.clone(), file))
            }
        })
    }
}
