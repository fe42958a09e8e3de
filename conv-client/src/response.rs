//! Interpreting conversion service responses.
//!
//! Success: 2xx with `{"data": "<base64>"}`.
//! Failure: any other status, optionally with `{"message": "...", "errors": [...]}`.

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ConversionError, DEFAULT_SERVER_MESSAGE};

/// Standard alphabet, `=` padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Converted content returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    content: Vec<u8>,
}

impl Conversion {
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// The content as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// Turn a status and body into a conversion or the matching error.
///
/// # Errors
///
/// `Server` for non-success statuses, `Decode` for a success body without a
/// valid base64 `data` field.
pub fn interpret(status: StatusCode, body: &[u8]) -> Result<Conversion, ConversionError> {
    if !status.is_success() {
        return Err(server_error(status, body));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ConversionError::Decode(format!("response is not JSON: {e}")))?;
    let data = value
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| ConversionError::Decode("response has no 'data' string".to_owned()))?;
    let content = decode_data(data)?;

    Ok(Conversion { content })
}

/// Decode the `data` field, ignoring ASCII whitespace (line-wrapped base64) and
/// missing padding.
fn decode_data(data: &str) -> Result<Vec<u8>, ConversionError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT
        .decode(compact)
        .map_err(|e| ConversionError::Decode(format!("'data' is not valid base64: {e}")))
}

/// Build a `Server` error, keeping whatever message and field errors the body carries.
fn server_error(status: StatusCode, body: &[u8]) -> ConversionError {
    let value = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_SERVER_MESSAGE)
        .to_owned();

    let errors = value
        .get("errors")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    ConversionError::Server {
        status: status.as_u16(),
        message,
        errors,
    }
}
