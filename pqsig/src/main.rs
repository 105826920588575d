//! pqsig: post-quantum key generation, signing and verification
//!
//! ```text
//! pqsig keygen <public_key_file> <private_key_file>
//! pqsig sign <message_file> <private_key_file> <signature_file>
//! pqsig verify <message_file> <signature_file> <public_key_file>
//! ```
//!
//! Exit status is 0 on success and 1 on any usage error or failure.

use anyhow::{Context, Result};
use pqsig::config::{self, ToolConfig};
use pqsig::ToolError;
use std::process::ExitCode;
use tracing::{debug, error};

fn main() -> Result<ExitCode> {
    // 1. Load configuration (environment only)
    let config = config::load_config().context("Failed to load configuration")?;

    // 2. Initialize logging
    init_logging(&config);
    debug!("pqsig v{} with {:?}", env!("CARGO_PKG_VERSION"), config);

    // 3. Run exactly one command
    match pqsig::run(std::env::args_os(), &config) {
        Ok(outcome) => {
            println!("{}", outcome);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initialize logging system (stderr, so stdout carries only results)
fn init_logging(config: &ToolConfig) {
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn report(err: &ToolError) {
    match err {
        err if err.is_usage() => eprintln!("{}", err),
        err if err.is_verification_failure() => {
            error!("Signature rejected");
            eprintln!("{}", err);
        }
        err => {
            error!("Command failed at step {:?}", err.step());
            eprintln!("{}", err);
        }
    }
}
