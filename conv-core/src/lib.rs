//! # conv-core
//!
//! Rules for building a file conversion request.
//!
//! Everything here is pure: deciding whether a delimiter is needed,
//! validating the collected fields, and laying out the multipart payload.
//! Sending it is left to `conv-client`.
//!
//! ## Quick Start
//!
//! ```rust
//! use conv_core::{SubmissionInput, build_payload};
//!
//! let input = SubmissionInput {
//!     source_file_name: "orders.json".to_owned(),
//!     destination_path: "out".to_owned(),
//!     output_format: "xml".to_owned(),
//!     delimiter: String::new(),
//!     key: "secret".to_owned(),
//! };
//!
//! let submission = input.validate().unwrap();
//! let payload = build_payload(&submission, b"{}".to_vec());
//! assert!(!payload.contains("delimiter"));
//! ```

mod error;
mod format;
pub mod output;
mod payload;
mod report;
mod rule;
mod submission;


pub use error::{Field, FieldError, ValidationErrors};
pub use format::{DelimiterRole, KeyPurpose, OutputFormat, SourceKind, UnknownFormat};
pub use payload::{
    ConversionPayload, FIELD_DELIMITER, FIELD_DOCUMENT_TYPE, FIELD_FILE, FIELD_KEY,
    FIELD_PATH_FILE, Part, PartValue, build_payload,
};
pub use report::ValidationReport;
pub use rule::delimiter_required;
pub use submission::{SubmissionInput, ValidatedSubmission};
