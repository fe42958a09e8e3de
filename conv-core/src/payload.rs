//! Multipart payload for the conversion endpoint.
//!
//! The payload is plain data. Turning it into an actual HTTP body is the
//! client's job, so the field layout can be checked without a network.

use std::path::Path;

use crate::submission::ValidatedSubmission;

/// Multipart field carrying the source file.
pub const FIELD_FILE: &str = "file";
/// Multipart field carrying the key.
pub const FIELD_KEY: &str = "key";
/// Multipart field carrying the output format.
pub const FIELD_DOCUMENT_TYPE: &str = "documentType";
/// Multipart field carrying the destination path.
pub const FIELD_PATH_FILE: &str = "pathFile";
/// Multipart field carrying the delimiter.
pub const FIELD_DELIMITER: &str = "delimiter";

/// Value of a single multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File { file_name: String, content: Vec<u8> },
}

/// A named multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: &'static str,
    pub value: PartValue,
}

/// Ordered multipart fields for one conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPayload {
    parts: Vec<Part>,
}

impl ConversionPayload {
    /// Fields in the order they are sent.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Consume the payload, yielding its fields in order.
    #[must_use]
    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PartValue> {
        self.parts.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Text value of a field, if present and textual.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PartValue::Text(s) => Some(s),
            PartValue::File { .. } => None,
        }
    }

    /// Whether the payload carries a field with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Build the multipart payload for a validated submission.
///
/// Fields: `file`, `key`, `documentType`, `pathFile`, and `delimiter`
/// only when the submission requires one. The uploaded file name is the
/// last component of the source file name.
#[must_use]
pub fn build_payload(submission: &ValidatedSubmission, content: Vec<u8>) -> ConversionPayload {
    let file_name = Path::new(submission.source_file_name())
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(submission.source_file_name())
        .to_owned();

    let mut parts = vec![
        Part {
            name: FIELD_FILE,
            value: PartValue::File { file_name, content },
        },
        Part {
            name: FIELD_KEY,
            value: PartValue::Text(submission.key().to_owned()),
        },
        Part {
            name: FIELD_DOCUMENT_TYPE,
            value: PartValue::Text(submission.output_format().as_str().to_owned()),
        },
        Part {
            name: FIELD_PATH_FILE,
            value: PartValue::Text(submission.destination_path().to_owned()),
        },
    ];

    if let Some(delimiter) = submission.delimiter() {
        parts.push(Part {
            name: FIELD_DELIMITER,
            value: PartValue::Text(delimiter.to_owned()),
        });
    }

    ConversionPayload { parts }
}
