//! Command dispatcher
//!
//! Each command is one isolated unit of work: open the configured scheme,
//! load inputs, call the provider, persist outputs. The scheme handle lives
//! for exactly one command and is dropped on every return path.

use crate::blob_io::{self, FileMode, StagedBlob};
use crate::cli::Command;
use crate::config::ToolConfig;
use crate::error::{Result, Step, ToolError};
use pqc_signer::{fingerprint, open_scheme_by_name, SignatureScheme};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Successful outcome of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    KeysGenerated {
        public_key_file: PathBuf,
        private_key_file: PathBuf,
        fingerprint: String,
    },
    Signed {
        signature_file: PathBuf,
        signature_len: usize,
    },
    Verified,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::KeysGenerated {
                public_key_file,
                private_key_file,
                fingerprint,
            } => write!(
                f,
                "Keys generated and saved successfully.\n\
                 Public key: {}\n\
                 Private key: {}\n\
                 Public key fingerprint: {}",
                public_key_file.display(),
                private_key_file.display(),
                fingerprint
            ),
            Outcome::Signed {
                signature_file,
                signature_len,
            } => write!(
                f,
                "Signature generated and saved successfully.\nSignature: {} ({} bytes)",
                signature_file.display(),
                signature_len
            ),
            Outcome::Verified => f.write_str("Signature successfully verified."),
        }
    }
}

/// Parse `args` (program name first) and run the command
pub fn run<I, T>(args: I, config: &ToolConfig) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let command = crate::cli::parse_args(args)?;
    execute(&command, config)
}

/// Run one parsed command with the configured scheme
pub fn execute(command: &Command, config: &ToolConfig) -> Result<Outcome> {
    let scheme = open_scheme_by_name(&config.algorithm).map_err(ToolError::crypto(Step::InitScheme))?;
    info!("{} using {}", command.name(), scheme.algorithm());

    match command {
        Command::Keygen {
            public_key_file,
            private_key_file,
        } => keygen(&*scheme, public_key_file, private_key_file, config.atomic_keygen),
        Command::Sign {
            message_file,
            private_key_file,
            signature_file,
        } => sign(&*scheme, message_file, private_key_file, signature_file),
        Command::Verify {
            message_file,
            signature_file,
            public_key_file,
        } => verify(&*scheme, message_file, signature_file, public_key_file),
    }
}

/// Generate a key pair and write the public half, then the private half.
///
/// With `atomic` set, both files are staged before either is committed and a
/// failed second commit removes the first. Otherwise the writes are plain and
/// sequential. Either way a half-written pair is reported as `PartialKeygen`.
pub fn keygen(
    scheme: &dyn SignatureScheme,
    public_key_file: &Path,
    private_key_file: &Path,
    atomic: bool,
) -> Result<Outcome> {
    let keypair = scheme
        .generate_keypair()
        .map_err(ToolError::crypto(Step::GenerateKeypair))?;
    let fingerprint = fingerprint(keypair.public_key());

    if atomic {
        let public = StagedBlob::stage(public_key_file, keypair.public_key(), FileMode::Public)
            .map_err(ToolError::io(Step::WritePublicKey))?;
        let secret = StagedBlob::stage(private_key_file, keypair.secret_key(), FileMode::Secret)
            .map_err(ToolError::io(Step::WritePrivateKey))?;

        // 符號鏈接已解析；回滾刪除的是實際寫入的文件
        let written_public = public.commit().map_err(ToolError::io(Step::WritePublicKey))?;
        if let Err(source) = secret.commit() {
            return Err(roll_back_public_key(&written_public, source));
        }
    } else {
        blob_io::write_file(public_key_file, keypair.public_key())
            .map_err(ToolError::io(Step::WritePublicKey))?;
        info!("Public key saved to {}", public_key_file.display());

        if let Err(source) = blob_io::write_secret_file(private_key_file, keypair.secret_key()) {
            warn!(
                "Public key {} was written but private key {} was not",
                public_key_file.display(),
                private_key_file.display()
            );
            return Err(ToolError::PartialKeygen {
                written: public_key_file.to_path_buf(),
                source,
            });
        }
    }

    info!(
        "Keypair saved: public={}, private={}, fingerprint={}",
        public_key_file.display(),
        private_key_file.display(),
        fingerprint
    );

    Ok(Outcome::KeysGenerated {
        public_key_file: public_key_file.to_path_buf(),
        private_key_file: private_key_file.to_path_buf(),
        fingerprint,
    })
}

fn roll_back_public_key(public_key_file: &Path, source: crate::error::IoError) -> ToolError {
    match std::fs::remove_file(public_key_file) {
        Ok(()) => {
            warn!(
                "Private key write failed; removed {} to keep the pair all-or-nothing",
                public_key_file.display()
            );
            ToolError::Io {
                step: Step::WritePrivateKey,
                source,
            }
        }
        Err(e) => {
            warn!(
                "Private key write failed and {} could not be removed: {}",
                public_key_file.display(),
                e
            );
            ToolError::PartialKeygen {
                written: public_key_file.to_path_buf(),
                source,
            }
        }
    }
}

/// Read the message, then the private key; sign; write exactly the produced
/// signature bytes.
pub fn sign(
    scheme: &dyn SignatureScheme,
    message_file: &Path,
    private_key_file: &Path,
    signature_file: &Path,
) -> Result<Outcome> {
    let message = blob_io::read_file(message_file).map_err(ToolError::io(Step::ReadMessage))?;
    let secret_key = Zeroizing::new(
        blob_io::read_file(private_key_file).map_err(ToolError::io(Step::ReadPrivateKey))?,
    );
    blob_io::warn_if_insecure_secret(private_key_file);

    let signature = scheme
        .sign(&message, &secret_key)
        .map_err(ToolError::crypto(Step::Sign))?;

    debug!(
        "Signature length {} bytes (scheme maximum {})",
        signature.len(),
        scheme.max_signature_length()
    );

    blob_io::write_file(signature_file, signature.as_bytes())
        .map_err(ToolError::io(Step::WriteSignature))?;
    info!("Signature saved to {}", signature_file.display());

    Ok(Outcome::Signed {
        signature_file: signature_file.to_path_buf(),
        signature_len: signature.len(),
    })
}

/// Read message, signature and public key (in that order) and verify.
pub fn verify(
    scheme: &dyn SignatureScheme,
    message_file: &Path,
    signature_file: &Path,
    public_key_file: &Path,
) -> Result<Outcome> {
    let message = blob_io::read_file(message_file).map_err(ToolError::io(Step::ReadMessage))?;
    let signature =
        blob_io::read_file(signature_file).map_err(ToolError::io(Step::ReadSignature))?;
    let public_key =
        blob_io::read_file(public_key_file).map_err(ToolError::io(Step::ReadPublicKey))?;

    scheme
        .verify(&message, &signature, &public_key)
        .map_err(ToolError::crypto(Step::Verify))?;

    info!("Signature in {} verified", signature_file.display());
    Ok(Outcome::Verified)
}
