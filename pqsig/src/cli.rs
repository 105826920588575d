//! Command-line surface: three verbs with fixed positional arguments
//!
//! Help/version flags are disabled; the only accepted input is a verb and its
//! file paths. Every parse failure becomes a `UsageError` before any file is
//! touched.

use crate::error::UsageError;
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Post-quantum key generation, signing and verification
#[derive(Parser, Debug)]
#[command(
    name = "pqsig",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One command per process invocation
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a key pair and save both halves
    #[command(disable_help_flag = true)]
    Keygen {
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        public_key_file: PathBuf,
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        private_key_file: PathBuf,
    },

    /// Sign a message file with a private key
    #[command(disable_help_flag = true)]
    Sign {
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        message_file: PathBuf,
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        private_key_file: PathBuf,
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        signature_file: PathBuf,
    },

    /// Check a signature against a message and public key
    #[command(disable_help_flag = true)]
    Verify {
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        message_file: PathBuf,
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        signature_file: PathBuf,
        #[arg(allow_hyphen_values = true, value_parser = path_arg())]
        public_key_file: PathBuf,
    },
}

/// Any OS string is a file path, including empty and `-`-prefixed ones
fn path_arg() -> impl TypedValueParser<Value = PathBuf> {
    OsStringValueParser::new().map(PathBuf::from)
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Keygen { .. } => "keygen",
            Command::Sign { .. } => "sign",
            Command::Verify { .. } => "verify",
        }
    }
}

/// Full usage text listing every mode
pub fn usage() -> String {
    let bin = Cli::command().get_name().to_string();
    format!(
        "Usage: {bin} <mode> [options]\n\
         Modes:\n  \
         keygen <public_key_file> <private_key_file>\n  \
         sign <message_file> <private_key_file> <signature_file>\n  \
         verify <message_file> <signature_file> <public_key_file>"
    )
}

/// Usage text for a single mode
fn mode_usage(mode: &str) -> Option<String> {
    let cmd = Cli::command();
    let sub = cmd.find_subcommand(mode)?;
    let args: Vec<String> = sub
        .get_positionals()
        .map(|arg| format!("<{}>", arg.get_id()))
        .collect();
    Some(format!("Usage: {} {} {}", cmd.get_name(), mode, args.join(" ")))
}

/// Parse the full argument vector (program name first).
///
/// # Errors
/// - `MissingCommand`: no verb given
/// - `UnknownCommand`: verb is not `keygen`, `sign` or `verify`
/// - `WrongArity`: verb known but argument count (or an unexpected flag) is wrong
pub fn parse_args<I, T>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    match Cli::try_parse_from(&args) {
        Ok(cli) => Ok(cli.command),
        Err(err) => {
            let mode = args.get(1).map(|m| m.to_string_lossy().into_owned());
            Err(classify(err.kind(), mode))
        }
    }
}

fn classify(kind: ErrorKind, mode: Option<String>) -> UsageError {
    let Some(mode) = mode else {
        return UsageError::MissingCommand { usage: usage() };
    };

    match (kind, mode_usage(&mode)) {
        (ErrorKind::MissingSubcommand, _)
        | (ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand, None) => {
            UsageError::MissingCommand { usage: usage() }
        }
        (_, Some(usage)) => UsageError::WrongArity { usage },
        (_, None) => UsageError::UnknownCommand {
            command: mode,
            usage: usage(),
        },
    }
}
