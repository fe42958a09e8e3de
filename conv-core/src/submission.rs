//! Submission input and its validation.

use crate::error::{Field, FieldError, ValidationErrors};
use crate::format::{DelimiterRole, KeyPurpose, OutputFormat, SourceKind};
use crate::rule::delimiter_required;

/// Raw values collected for one conversion request.
///
/// All fields are kept as entered; nothing is trimmed or parsed until
/// [`SubmissionInput::validate`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    /// Name of the selected source file (may include directories).
    pub source_file_name: String,
    /// Folder the converted result is written to.
    pub destination_path: String,
    /// Requested output format: csv, txt, xml or json.
    pub output_format: String,
    /// Field delimiter; optional for structured-to-structured conversions.
    pub delimiter: String,
    /// Encryption or decryption key.
    pub key: String,
}

impl SubmissionInput {
    /// Whether this input needs a delimiter.
    #[must_use]
    pub fn delimiter_required(&self) -> bool {
        delimiter_required(&self.source_file_name, &self.output_format)
    }

    /// Kind of the selected source file, if its extension is recognized.
    #[must_use]
    pub fn source_kind(&self) -> Option<SourceKind> {
        SourceKind::from_file_name(&self.source_file_name)
    }

    /// Check every field and collect every failure.
    ///
    /// Never stops at the first error, so all of them can be shown at once.
    #[must_use]
    pub fn check(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.source_file_name.is_empty() {
            errors.push(FieldError::missing(Field::SourceFile));
        }
        if self.destination_path.is_empty() {
            errors.push(FieldError::missing(Field::DestinationPath));
        }
        if self.output_format.is_empty() {
            errors.push(FieldError::missing(Field::OutputFormat));
        } else if self.output_format.parse::<OutputFormat>().is_err() {
            errors.push(FieldError::invalid(Field::OutputFormat, &self.output_format));
        }
        if self.delimiter_required() && self.delimiter.is_empty() {
            errors.push(FieldError::missing(Field::Delimiter));
        }
        if self.key.is_empty() {
            errors.push(FieldError::missing(Field::Key));
        }

        errors
    }

    /// Validate the input, producing a submission the payload builder accepts.
    ///
    /// # Errors
    ///
    /// Returns every field error when at least one field is rejected.
    pub fn validate(self) -> Result<ValidatedSubmission, ValidationErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(ValidationErrors { errors });
        }

        let Ok(output_format) = self.output_format.parse::<OutputFormat>() else {
            return Err(ValidationErrors {
                errors: vec![FieldError::invalid(Field::OutputFormat, &self.output_format)],
            });
        };
        let delimiter_required = self.delimiter_required();
        let source_kind = self.source_kind();

        Ok(ValidatedSubmission {
            source_file_name: self.source_file_name,
            destination_path: self.destination_path,
            output_format,
            delimiter: delimiter_required.then_some(self.delimiter),
            key: self.key,
            source_kind,
        })
    }
}

/// A submission that passed validation.
///
/// Only [`SubmissionInput::validate`] creates one. `delimiter` is `Some`
/// exactly when the delimiter rule required it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    source_file_name: String,
    destination_path: String,
    output_format: OutputFormat,
    delimiter: Option<String>,
    key: String,
    source_kind: Option<SourceKind>,
}

impl ValidatedSubmission {
    #[must_use]
    pub fn source_file_name(&self) -> &str {
        &self.source_file_name
    }

    #[must_use]
    pub fn destination_path(&self) -> &str {
        &self.destination_path
    }

    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// The delimiter to send, or `None` when the conversion does not need one.
    #[must_use]
    pub fn delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source_kind
    }

    #[must_use]
    pub fn key_purpose(&self) -> KeyPurpose {
        KeyPurpose::for_source(self.source_kind)
    }

    #[must_use]
    pub fn delimiter_role(&self) -> DelimiterRole {
        DelimiterRole::for_source(self.source_kind)
    }
}
