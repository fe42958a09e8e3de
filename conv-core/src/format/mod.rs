//! File formats known to the conversion service.
//!
//! `OutputFormat` is what the caller asks for; `SourceKind` is what the
//! selected file looks like, judged by its extension.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

/// Requested output format, sent to the service as `documentType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Txt,
    Xml,
    Json,
}

impl OutputFormat {
    /// Every format the service accepts, in the order they are offered.
    pub const ALL: [Self; 4] = [Self::Csv, Self::Txt, Self::Xml, Self::Json];

    /// Wire name of the format (also its file extension).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }

    /// File extension used for the converted result.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.as_str()
    }

    /// Whether this is a structured format (json or xml).
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Xml | Self::Json)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known output formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown output format '{0}' (expected csv, txt, xml or json)")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_owned()))
    }
}

/// Kind of the selected source file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Txt,
    Csv,
    Json,
    Xml,
}

impl SourceKind {
    /// Detect the kind from a file name. Extension matching ignores case.
    ///
    /// Returns `None` for names without an extension or with one the
    /// service does not read.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Txt),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Flat, delimited sources (txt and csv) are the ones the service encrypts.
    #[must_use]
    pub const fn is_flat(self) -> bool {
        matches!(self, Self::Txt | Self::Csv)
    }
}

/// What the key is used for, given the source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPurpose {
    Encrypt,
    Decrypt,
}

impl KeyPurpose {
    /// Flat sources get encrypted; anything else (including unknown) gets decrypted.
    #[must_use]
    pub fn for_source(kind: Option<SourceKind>) -> Self {
        if kind.is_some_and(SourceKind::is_flat) {
            Self::Encrypt
        } else {
            Self::Decrypt
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encryption key",
            Self::Decrypt => "Decryption key",
        }
    }
}

/// Which file the delimiter describes, given the source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterRole {
    Input,
    Output,
}

impl DelimiterRole {
    #[must_use]
    pub fn for_source(kind: Option<SourceKind>) -> Self {
        if kind.is_some_and(SourceKind::is_flat) {
            Self::Input
        } else {
            Self::Output
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Input => "Input file delimiter",
            Self::Output => "Output file delimiter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parses_wire_names() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_output_format_rejects_unknown_and_uppercase() {
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert!("JSON".parse::<OutputFormat>().is_err());
        assert!("".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_structured_formats() {
        assert!(OutputFormat::Json.is_structured());
        assert!(OutputFormat::Xml.is_structured());
        assert!(!OutputFormat::Csv.is_structured());
        assert!(!OutputFormat::Txt.is_structured());
    }

    #[test]
    fn test_source_kind_ignores_extension_case() {
        assert_eq!(SourceKind::from_file_name("a.CSV"), Some(SourceKind::Csv));
        assert_eq!(SourceKind::from_file_name("dir/b.Json"), Some(SourceKind::Json));
        assert_eq!(SourceKind::from_file_name("notes"), None);
        assert_eq!(SourceKind::from_file_name("image.png"), None);
    }

    #[test]
    fn test_roles_follow_source_kind() {
        let csv = Some(SourceKind::Csv);
        let xml = Some(SourceKind::Xml);
        assert_eq!(KeyPurpose::for_source(csv), KeyPurpose::Encrypt);
        assert_eq!(KeyPurpose::for_source(xml), KeyPurpose::Decrypt);
        assert_eq!(KeyPurpose::for_source(None), KeyPurpose::Decrypt);
        assert_eq!(DelimiterRole::for_source(csv), DelimiterRole::Input);
        assert_eq!(DelimiterRole::for_source(xml), DelimiterRole::Output);
    }
}
