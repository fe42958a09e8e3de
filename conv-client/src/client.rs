//! HTTP client for the conversion service.

use std::path::{Path, PathBuf};
use std::time::Instant;

use conv_core::{ConversionPayload, PartValue, SourceKind, ValidatedSubmission, build_payload};
use reqwest::multipart::{Form, Part};

use crate::config::ClientConfig;
use crate::error::ConversionError;
use crate::in_flight::InFlight;
use crate::logging::RequestLogger;
use crate::response::{Conversion, interpret};
use crate::save::{output_file_name, save_result};

/// A converted result that was written to disk.
#[derive(Debug, Clone)]
pub struct SavedConversion {
    /// Where the result was written.
    pub path: PathBuf,
    /// The converted content.
    pub conversion: Conversion,
}

/// Sends conversion requests, one at a time.
#[derive(Debug)]
pub struct ConversionClient {
    http: reqwest::Client,
    config: ClientConfig,
    in_flight: InFlight,
    logger: RequestLogger,
}

impl ConversionClient {
    /// Build a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConversionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        let logger = RequestLogger::new(config.verbose);

        Ok(Self {
            http,
            config,
            in_flight: InFlight::default(),
            logger,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a request is currently outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Post a validated submission and return the decoded result.
    ///
    /// Only one request may be outstanding per client.
    ///
    /// # Errors
    ///
    /// - `Busy` if another request has not finished
    /// - `Transport` for connection, timeout or body failures
    /// - `Server` for non-success statuses
    /// - `Decode` for a success response without usable data
    pub async fn submit(
        &self,
        submission: &ValidatedSubmission,
        content: Vec<u8>,
    ) -> Result<Conversion, ConversionError> {
        let Some(_guard) = self.in_flight.try_acquire() else {
            return Err(ConversionError::Busy);
        };

        let form = into_form(build_payload(submission, content))?;
        let url = &self.config.endpoint;

        tracing::info!(
            source = submission.source_file_name(),
            format = %submission.output_format(),
            delimiter = submission.delimiter().is_some(),
            "submitting conversion request"
        );

        let start = Instant::now();
        let response = match self.http.post(url.clone()).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                self.logger.log_failure("POST", url, start.elapsed(), &e);
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.bytes().await?;
        self.logger
            .log_exchange("POST", url, status, start.elapsed(), &body);

        interpret(status, &body)
    }

    /// Submit, then save the result into the submission's destination folder.
    ///
    /// The result is named after the source file, see [`output_file_name`].
    ///
    /// # Errors
    ///
    /// Everything [`ConversionClient::submit`] returns, plus `Save` (carrying
    /// the converted content) when the result cannot be written.
    pub async fn convert(
        &self,
        submission: &ValidatedSubmission,
        content: Vec<u8>,
    ) -> Result<SavedConversion, ConversionError> {
        let conversion = self.submit(submission, content).await?;
        let file_name = output_file_name(submission.source_file_name(), submission.output_format());
        let path = save_result(
            Path::new(submission.destination_path()),
            &file_name,
            conversion.content(),
        )?;

        tracing::info!(path = %path.display(), bytes = conversion.content().len(), "saved converted file");
        Ok(SavedConversion { path, conversion })
    }
}

/// Encode the payload as a multipart form, keeping field order.
fn into_form(payload: ConversionPayload) -> Result<Form, ConversionError> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File { file_name, content } => {
                let mime = mime_for(&file_name);
                let file = Part::bytes(content).file_name(file_name).mime_str(mime)?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

fn mime_for(file_name: &str) -> &'static str {
    match SourceKind::from_file_name(file_name) {
        Some(SourceKind::Txt) => "text/plain",
        Some(SourceKind::Csv) => "text/csv",
        Some(SourceKind::Json) => "application/json",
        Some(SourceKind::Xml) => "application/xml",
        None => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_known_kinds() {
        assert_eq!(mime_for("a.csv"), "text/csv");
        assert_eq!(mime_for("a.XML"), "application/xml");
        assert_eq!(mime_for("a.bin"), "application/octet-stream");
    }
}
