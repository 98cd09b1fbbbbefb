// file: src/utils/logging.rs
// description: gateway log filter, subscriber setup and console status lines

use colored::*;
use reqwest::StatusCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const CRATE_TARGET: &str = "document_gateway";

/// Filter directive: dependencies stay at `warn`, gateway calls at `info` or
/// `debug` (request bodies and per-call timings).
pub fn log_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{}={}", CRATE_TARGET, level)
}

/// Logs go to stderr so documents printed on stdout stay pipeable.
/// `RUST_LOG` takes precedence over `verbose`.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(verbose)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// One-line summary of a backend reply, colored by status class.
pub fn format_status(operation: &str, status: StatusCode) -> String {
    let msg = format!("{} status={}", operation, status.as_u16());
    if status.is_success() {
        format_success(&msg)
    } else if status.is_server_error() {
        format_error(&msg)
    } else {
        format!("{} {}", "⚠".yellow().bold(), msg.yellow())
    }
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_scopes_gateway_target() {
        assert_eq!(log_directive(false), "warn,document_gateway=info");
        assert_eq!(log_directive(true), "warn,document_gateway=debug");
    }

    #[test]
    fn test_directive_parses() {
        assert!(EnvFilter::try_new(log_directive(true)).is_ok());
    }

    #[test]
    fn test_format_status_by_class() {
        colored::control::set_override(false);

        assert_eq!(format_status("load", StatusCode::OK), "✓ load status=200");
        assert_eq!(
            format_status("load", StatusCode::NOT_FOUND),
            "⚠ load status=404"
        );
        assert_eq!(
            format_status("load", StatusCode::SERVICE_UNAVAILABLE),
            "✗ load status=503"
        );
    }
}
