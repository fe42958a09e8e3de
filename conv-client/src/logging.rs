use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use chrono::Local;
use reqwest::{StatusCode, Url};

// ANSI color codes
#[derive(Debug, Clone, Copy)]
struct Palette {
    reset: &'static str,
    dim: &'static str,
    ok: &'static str,
    redirect: &'static str,
    failed: &'static str,
    method: &'static str,
    path: &'static str,
    duration: &'static str,
    body: &'static str,
}

impl Palette {
    const ANSI: Self = Self {
        reset: "\x1b[0m",
        dim: "\x1b[2m",
        ok: "\x1b[92m",
        redirect: "\x1b[93m",
        failed: "\x1b[91m",
        method: "\x1b[96m",
        path: "\x1b[94m",
        duration: "\x1b[95m",
        body: "\x1b[90m",
    };

    const PLAIN: Self = Self {
        reset: "",
        dim: "",
        ok: "",
        redirect: "",
        failed: "",
        method: "",
        path: "",
        duration: "",
        body: "",
    };

    fn for_stderr() -> Self {
        if io::stderr().is_terminal() {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }

    fn status(self, status: StatusCode) -> &'static str {
        if status.is_success() {
            self.ok
        } else if status.is_redirection() {
            self.redirect
        } else {
            self.failed
        }
    }
}

fn timestamp() -> impl fmt::Display {
    Local::now().format("%Y-%m-%d %H:%M:%S,%3f")
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Logs each request/response exchange with the conversion service to stderr.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    pub verbose: u8,
}

impl RequestLogger {
    #[must_use]
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    /// Log one completed exchange.
    ///
    /// verbose 1: summary line. verbose 2: summary line plus response body.
    pub fn log_exchange(
        &self,
        method: &str,
        url: &Url,
        status: StatusCode,
        elapsed: Duration,
        body: &[u8],
    ) {
        tracing::debug!(
            method,
            url = %url,
            status = status.as_u16(),
            elapsed = ?elapsed,
            "conversion request finished"
        );

        if self.verbose == 0 {
            return;
        }
        // Written directly so tracing does not escape the ANSI codes.
        let palette = Palette::for_stderr();
        let _ = self.write_exchange(
            &mut io::stderr().lock(),
            palette,
            method,
            url,
            status,
            elapsed,
            body,
        );
    }

    /// Log a request that never got a response.
    pub fn log_failure(&self, method: &str, url: &Url, elapsed: Duration, error: &reqwest::Error) {
        tracing::warn!(method, url = %url, elapsed = ?elapsed, %error, "conversion request failed");

        if self.verbose == 0 {
            return;
        }
        let palette = Palette::for_stderr();
        let _ = self.write_failure(
            &mut io::stderr().lock(),
            palette,
            method,
            url,
            elapsed,
            error,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn write_exchange(
        &self,
        out: &mut dyn Write,
        p: Palette,
        method: &str,
        url: &Url,
        status: StatusCode,
        elapsed: Duration,
        body: &[u8],
    ) -> io::Result<()> {
        if self.verbose == 0 {
            return Ok(());
        }

        writeln!(
            out,
            "{} - INFO - {}{method}{} {}{}{} -> {}{}{} in {}{:.1}ms{}",
            timestamp(),
            p.method,
            p.reset,
            p.path,
            url.path(),
            p.reset,
            p.status(status),
            status.as_u16(),
            p.reset,
            p.duration,
            millis(elapsed),
            p.reset
        )?;

        if self.verbose < 2 || body.is_empty() {
            return Ok(());
        }

        let (label, rendered) = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(json) => (
                "Response body:",
                serde_json::to_string_pretty(&json).unwrap_or_default(),
            ),
            Err(_) => (
                "Response body (raw):",
                String::from_utf8_lossy(body).into_owned(),
            ),
        };
        writeln!(
            out,
            "{} - DEBUG - {}{label}{}\n{}{rendered}{}",
            timestamp(),
            p.dim,
            p.reset,
            p.body,
            p.reset
        )
    }

    fn write_failure(
        &self,
        out: &mut dyn Write,
        p: Palette,
        method: &str,
        url: &Url,
        elapsed: Duration,
        error: &dyn fmt::Display,
    ) -> io::Result<()> {
        if self.verbose == 0 {
            return Ok(());
        }

        writeln!(
            out,
            "{} - ERROR - {}{method}{} {}{}{} -> {}failed{} after {}{:.1}ms{}: {error}",
            timestamp(),
            p.method,
            p.reset,
            p.path,
            url.path(),
            p.reset,
            p.failed,
            p.reset,
            p.duration,
            millis(elapsed),
            p.reset
        )
    }
}
