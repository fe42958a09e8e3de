//! Field-level validation errors.

use std::fmt;

use serde::Serialize;

/// A submission field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SourceFile,
    DestinationPath,
    OutputFormat,
    Delimiter,
    Key,
}

impl Field {
    /// Snake-case name used in reports and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceFile => "source_file",
            Self::DestinationPath => "destination_path",
            Self::OutputFormat => "output_format",
            Self::Delimiter => "delimiter",
            Self::Key => "key",
        }
    }

    /// The message shown to the user when this field is rejected.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SourceFile => "A source file must be selected",
            Self::DestinationPath => "A destination folder must be selected",
            Self::OutputFormat => "An output format must be selected (csv, txt, xml, json)",
            Self::Delimiter => "The delimiter cannot be empty",
            Self::Key => "The key cannot be empty",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// Human-readable description of the failure.
    pub message: String,
    /// The value that was rejected, when there was one worth echoing back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldError {
    /// Rejection of an empty or missing field, with the field's standard message.
    #[must_use]
    pub fn missing(field: Field) -> Self {
        Self {
            field,
            message: field.message().to_owned(),
            value: None,
        }
    }

    /// Rejection of a present but unacceptable value.
    #[must_use]
    pub fn invalid(field: Field, value: &str) -> Self {
        Self {
            field,
            message: field.message().to_owned(),
            value: Some(value.to_owned()),
        }
    }

    /// Format the error for human-readable output.
    ///
    /// `{field}: {message}` or `{field}: {message} [{value}]`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match &self.value {
            Some(value) => format!("{}: {} [{value}]", self.field, self.message),
            None => format!("{}: {}", self.field, self.message),
        }
    }
}

/// Every field error found in one submission.
///
/// Never empty when produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Look up the error for a given field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Whether the given field was rejected.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_missing_field() {
        let err = FieldError::missing(Field::Key);
        assert_eq!(err.format_human_readable(), "key: The key cannot be empty");
    }

    #[test]
    fn test_format_invalid_value() {
        let err = FieldError::invalid(Field::OutputFormat, "yaml");
        let formatted = err.format_human_readable();
        assert!(formatted.starts_with("output_format: "));
        assert!(formatted.ends_with("[yaml]"));
    }

    #[test]
    fn test_messages_are_distinct() {
        let fields = [
            Field::SourceFile,
            Field::DestinationPath,
            Field::OutputFormat,
            Field::Delimiter,
            Field::Key,
        ];
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let err = FieldError::missing(Field::DestinationPath);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "destination_path");
        assert!(json.get("value").is_none());
    }
}
