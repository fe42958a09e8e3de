//! Validation report types.

use serde::Serialize;

use crate::error::FieldError;
use crate::format::{DelimiterRole, KeyPurpose, SourceKind};
use crate::submission::SubmissionInput;

/// Result of checking one submission, with the values derived from it.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// The source file name that was checked.
    pub source_file_name: String,
    /// The output format as entered.
    pub output_format: String,
    /// Detected source kind; `None` for unrecognized extensions.
    pub source_kind: Option<SourceKind>,
    /// Whether the delimiter rule required a delimiter.
    pub delimiter_required: bool,
    /// What the key will be used for.
    pub key_purpose: KeyPurpose,
    /// Which file the delimiter describes.
    pub delimiter_role: DelimiterRole,
    /// Whether every field passed.
    pub ok: bool,
    /// Every rejected field.
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Check an input and describe the outcome.
    #[must_use]
    pub fn for_input(input: &SubmissionInput) -> Self {
        let errors = input.check();
        let source_kind = input.source_kind();
        Self {
            source_file_name: input.source_file_name.clone(),
            output_format: input.output_format.clone(),
            source_kind,
            delimiter_required: input.delimiter_required(),
            key_purpose: KeyPurpose::for_source(source_kind),
            delimiter_role: DelimiterRole::for_source(source_kind),
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Number of rejected fields.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.errors.len()
    }
}
