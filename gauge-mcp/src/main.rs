//! Gauge MCP Server
//!
//! Line-delimited JSON-RPC over stdio. One connection is one session.
//!
//! Tools:
//! - list_categories: List unit categories
//! - list_units: List the units of a category
//! - select_category: Switch the form to another category
//! - swap_units: Exchange source and target units
//! - convert: Convert a value between two units
//! - history: Show successful conversions
//! - clear_history: Forget all conversions

mod config;
mod protocol;
mod session;
mod tools;

use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use gauge_units::UNITS;
use config::Config;
use protocol::{McpError, McpRequest, McpResponse};
use session::Session;
use tools::{handle_request, PROTOCOL_VERSION, SERVER_VERSION};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Write one response line; returns false when stdout is gone
fn send(response: &McpResponse) -> bool {
    let response_json = match serde_json::to_string(response) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response");
            return true;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", response_json) {
        tracing::error!(error = %e, "error writing response");
        return false;
    }
    if let Err(e) = stdout.flush() {
        tracing::error!(error = %e, "error flushing stdout");
        return false;
    }
    true
}

fn main() {
    init_tracing();

    let config = Config::from_env(&UNITS);
    let mut session = match Session::new(&UNITS, &config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "cannot start session");
            std::process::exit(1);
        }
    };

    tracing::info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        category = %config.default_category,
        "Gauge MCP Server started"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                tracing::info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!(error = %e, "error parsing request");
                        let response = McpResponse::from_result(None, Err(McpError::parse_error(e)));
                        if !send(&response) {
                            break;
                        }
                        continue;
                    }
                };

                if request.jsonrpc != "2.0" {
                    tracing::warn!(version = %request.jsonrpc, "unexpected jsonrpc version");
                }
                tracing::debug!(method = %request.method, "processing");

                let response = handle_request(&mut session, &request);

                // Notifications get no response
                if request.id.is_none() {
                    tracing::debug!(method = %request.method, "notification processed");
                    continue;
                }

                if !send(&response) {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "error reading input");
                break;
            }
        }
    }

    tracing::info!("server shutting down");
}
