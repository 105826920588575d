//! Algorithm selection and the per-invocation scheme handle

use crate::dilithium::{Dilithium2, Dilithium3, Dilithium5};
use crate::error::{CryptoError, Result};
use crate::falcon::Falcon512;
use crate::traits::SignatureScheme;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Supported signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Dilithium2,
    Dilithium3,
    Dilithium5,
    Falcon512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dilithium2,
        Algorithm::Dilithium3,
        Algorithm::Dilithium5,
        Algorithm::Falcon512,
    ];

    /// Algorithm name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dilithium2 => "Dilithium2",
            Algorithm::Dilithium3 => "Dilithium3",
            Algorithm::Dilithium5 => "Dilithium5",
            Algorithm::Falcon512 => "Falcon-512",
        }
    }

    /// NIST security level
    pub fn nist_level(self) -> u8 {
        match self {
            Algorithm::Dilithium2 => 2,
            Algorithm::Dilithium3 => 3,
            Algorithm::Dilithium5 => 5,
            Algorithm::Falcon512 => 1,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CryptoError;

    /// Case-insensitive; `-` and `_` are ignored (`Dilithium-2`, `falcon_512`)
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "dilithium2" => Ok(Algorithm::Dilithium2),
            "dilithium3" => Ok(Algorithm::Dilithium3),
            "dilithium5" => Ok(Algorithm::Dilithium5),
            "falcon512" => Ok(Algorithm::Falcon512),
            _ => Err(CryptoError::InitFailure(format!(
                "Unsupported algorithm: {}",
                s
            ))),
        }
    }
}

/// Algorithm information structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    /// Algorithm name
    pub name: &'static str,
    /// NIST security level
    pub nist_level: u8,
    /// Public key size (bytes)
    pub public_key_size: usize,
    /// Secret key size (bytes)
    pub secret_key_size: usize,
    /// Maximum signature size (bytes)
    pub signature_size: usize,
}

/// An instantiated provider, scoped to one command invocation.
///
/// Dropping the handle releases the provider; this happens on every exit path
/// of the owning scope, early `?` returns included.
pub struct SchemeHandle {
    inner: Box<dyn SignatureScheme>,
}

impl SchemeHandle {
    /// Wrap an already constructed provider, rejecting one with unusable sizes
    pub fn new(inner: Box<dyn SignatureScheme>) -> Result<Self> {
        if inner.public_key_length() == 0
            || inner.secret_key_length() == 0
            || inner.max_signature_length() == 0
        {
            return Err(CryptoError::InitFailure(format!(
                "{} declares a zero-length key or signature",
                inner.algorithm().name()
            )));
        }

        tracing::trace!("Acquired {} scheme handle", inner.algorithm().name());
        Ok(Self { inner })
    }
}

impl Deref for SchemeHandle {
    type Target = dyn SignatureScheme;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl Drop for SchemeHandle {
    fn drop(&mut self) {
        tracing::trace!("Released {} scheme handle", self.inner.algorithm().name());
    }
}

impl fmt::Debug for SchemeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemeHandle").field(&self.inner.info()).finish()
    }
}

/// Instantiate the provider for `algorithm`
pub fn open_scheme(algorithm: Algorithm) -> Result<SchemeHandle> {
    let inner: Box<dyn SignatureScheme> = match algorithm {
        Algorithm::Dilithium2 => Box::new(Dilithium2::new()),
        Algorithm::Dilithium3 => Box::new(Dilithium3::new()),
        Algorithm::Dilithium5 => Box::new(Dilithium5::new()),
        Algorithm::Falcon512 => Box::new(Falcon512::new()),
    };
    SchemeHandle::new(inner)
}

/// Instantiate a provider from its configured name
///
/// # Errors
/// - Returns `InitFailure` if the name is not a supported algorithm
pub fn open_scheme_by_name(name: &str) -> Result<SchemeHandle> {
    open_scheme(name.parse()?)
}
