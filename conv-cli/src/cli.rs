use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use conv_client::{
    ClientConfig, ConversionClient, ConversionError, DEFAULT_TIMEOUT, ENDPOINT_ENV, read_preview,
};
use conv_core::{SubmissionInput, ValidationReport, output};
use tracing_subscriber::EnvFilter;

const EXIT_OK: u8 = 0;
/// The form failed validation; nothing was sent.
const EXIT_INVALID: u8 = 1;
/// The conversion succeeded but the result could not be saved.
const EXIT_PARTIAL: u8 = 2;

/// Environment variable for `--timeout`.
const TIMEOUT_ENV: &str = "CONV_TIMEOUT";

#[derive(Debug, Parser)]
#[command(
    name = "conv",
    version,
    about = "Convert csv, txt, xml and json files with a remote conversion service"
)]
pub struct Cli {
    /// Verbosity: -v logs each request, -vv also logs response bodies
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate, upload and convert a file, then save the result
    Convert {
        #[command(flatten)]
        form: FormArgs,

        /// Conversion endpoint URL
        #[arg(long, env = ENDPOINT_ENV)]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long, env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT.as_secs())]
        timeout: u64,
    },

    /// Validate the form without sending anything
    Check {
        #[command(flatten)]
        form: FormArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the contents of a source file
    Preview {
        /// File to preview
        file: PathBuf,
    },
}

/// Form fields. All optional here so validation can report every missing one.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    /// Source file to convert (.txt, .csv, .json, .xml)
    pub file: Option<PathBuf>,

    /// Output format: csv, txt, xml or json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Destination folder for the converted file
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Field delimiter (not needed for json/xml to json/xml)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Encryption or decryption key
    #[arg(short, long, env = "CONV_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

impl FormArgs {
    pub fn to_input(&self) -> SubmissionInput {
        SubmissionInput {
            source_file_name: path_string(self.file.as_deref()),
            destination_path: path_string(self.dest.as_deref()),
            output_format: self.format.clone().unwrap_or_default(),
            delimiter: self.delimiter.clone().unwrap_or_default(),
            key: self.key.clone().unwrap_or_default(),
        }
    }
}

fn path_string(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Convert {
            form,
            endpoint,
            timeout,
        } => convert(&form, endpoint.as_deref(), timeout, cli.verbose)
            .await
            .map(ExitCode::from),
        Command::Check { form, json } => {
            let mut stdout = std::io::stdout();
            let ok = check(&form, json, &mut stdout)?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Preview { file } => {
            let text = read_preview(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validate the form and write the report. Returns whether it passed.
pub fn check(form: &FormArgs, json: bool, writer: &mut dyn Write) -> Result<bool> {
    let report = ValidationReport::for_input(&form.to_input());
    if json {
        output::write_json(&report, writer)?;
    } else {
        output::write_human(&report, writer)?;
    }
    Ok(report.ok)
}

/// Validate, convert and save. Returns the process exit status.
///
/// Transport, server and decode failures are returned as errors.
async fn convert(
    form: &FormArgs,
    endpoint: Option<&str>,
    timeout: u64,
    verbose: u8,
) -> Result<u8> {
    let input = form.to_input();
    let report = ValidationReport::for_input(&input);
    if !report.ok {
        let mut stderr = std::io::stderr();
        output::write_human(&report, &mut stderr)?;
        eprintln!("{}", "The form has errors. Review the fields above.".red());
        return Ok(EXIT_INVALID);
    }
    if report.source_kind.is_none() {
        tracing::warn!(
            source = %input.source_file_name,
            "source extension is not one of .txt, .csv, .json, .xml"
        );
    }

    let endpoint = endpoint.with_context(|| {
        format!("No conversion endpoint configured (use --endpoint or {ENDPOINT_ENV})")
    })?;
    let config = ClientConfig::new(endpoint)?
        .with_timeout(Duration::from_secs(timeout))
        .with_verbose(verbose);
    let client = ConversionClient::new(config)?;

    let submission = input.validate()?;
    let source_path = PathBuf::from(submission.source_file_name());
    let content = tokio::fs::read(&source_path)
        .await
        .with_context(|| format!("Failed to read {}", source_path.display()))?;
    let preview = conv_client::render_preview(submission.source_file_name(), &content);

    match client.convert(&submission, content).await {
        Ok(saved) => {
            print_panels(&preview, &saved.conversion.text());
            println!(
                "{} File processed and saved to {}",
                "\u{2713}".green(),
                saved.path.display()
            );
            Ok(EXIT_OK)
        }
        Err(ConversionError::Save {
            path,
            content,
            source,
        }) => {
            print_panels(&preview, &String::from_utf8_lossy(&content));
            eprintln!(
                "{} File processed but could not be saved to {}: {source}",
                "\u{26a0}".yellow(),
                path.display()
            );
            Ok(EXIT_PARTIAL)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_panels(preview: &str, result: &str) {
    println!("{}", "=".repeat(80));
    println!("  {}", "PREVIEW".bold());
    println!("{}", "-".repeat(80));
    println!("{preview}");
    println!("{}", "=".repeat(80));
    println!("  {}", "RESULT".bold());
    println!("{}", "-".repeat(80));
    println!("{result}");
    println!("{}", "=".repeat(80));
}
