//! Error types for conversion requests.

use std::path::PathBuf;

use conv_core::ValidationErrors;
use thiserror::Error;

/// Fallback message when the service rejects a request without saying why.
pub const DEFAULT_SERVER_MESSAGE: &str = "Error in server response.";

/// Everything that can go wrong between submitting a form and saving its result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// One or more fields were rejected before anything was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Another request from the same client has not finished yet.
    #[error("A conversion request is already in progress")]
    Busy,

    /// The configured endpoint is not a usable URL.
    #[error("Invalid conversion endpoint '{endpoint}': {cause}")]
    InvalidEndpoint { endpoint: String, cause: String },

    /// Connection, timeout or body transfer failure.
    #[error("Unexpected error while processing the file: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error status.
    #[error(
        "Server error (status {status}): {message}{}",
        render_field_errors(.errors)
    )]
    Server {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    /// The service answered with success but the body was unusable.
    #[error("Invalid response from the conversion service: {0}")]
    Decode(String),

    /// The conversion succeeded but the result could not be written.
    ///
    /// `content` holds the converted bytes so they are not lost.
    #[error("File processed but could not be saved to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        content: Vec<u8>,
        #[source]
        source: std::io::Error,
    },
}

impl ConversionError {
    /// Whether the remote conversion itself succeeded.
    #[must_use]
    pub fn is_partial_success(&self) -> bool {
        matches!(self, Self::Save { .. })
    }
}

fn render_field_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!("\n{}", errors.join("\n"))
    }
}
