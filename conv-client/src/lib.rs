//! # conv-client
//!
//! Sends validated conversion requests to the remote conversion service and
//! handles what comes back: decoding the base64 result, saving it next to
//! the chosen destination, and rendering previews.
//!
//! ```rust,no_run
//! use conv_client::{ClientConfig, ConversionClient};
//! use conv_core::SubmissionInput;
//!
//! # async fn run() -> Result<(), conv_client::ConversionError> {
//! let client = ConversionClient::new(ClientConfig::new("http://localhost:8080/convert")?)?;
//! let submission = SubmissionInput {
//!     source_file_name: "orders.csv".to_owned(),
//!     destination_path: "out".to_owned(),
//!     output_format: "json".to_owned(),
//!     delimiter: ";".to_owned(),
//!     key: "secret".to_owned(),
//! }
//! .validate()?;
//!
//! let saved = client.convert(&submission, std::fs::read("orders.csv").unwrap()).await?;
//! println!("{}", saved.path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod in_flight;
mod logging;
mod preview;
mod response;
mod save;

pub use client::{ConversionClient, SavedConversion};
pub use config::{ClientConfig, DEFAULT_TIMEOUT, ENDPOINT_ENV};
pub use error::{ConversionError, DEFAULT_SERVER_MESSAGE};
pub use preview::{read_preview, render_preview};
pub use response::Conversion;
pub use save::{CONVERTED_SUFFIX, output_file_name, save_result};
