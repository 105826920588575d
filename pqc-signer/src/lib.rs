//! Post-quantum cryptography signature library
//!
//! Exposes NIST post-quantum signature schemes (Dilithium2/3/5 and Falcon-512)
//! behind one provider interface that works purely on byte slices: fixed key
//! lengths, a maximum signature length, and keygen/sign/verify.
//!
//! # Quick Start
//!
//! ```rust
//! use pqc_signer::{open_scheme, Algorithm};
//!
//! // Acquire a provider for this unit of work
//! let scheme = open_scheme(Algorithm::Dilithium2).unwrap();
//!
//! // Generate keypair
//! let keypair = scheme.generate_keypair().unwrap();
//!
//! // Sign message
//! let message = b"Release manifest";
//! let signature = scheme.sign(message, keypair.secret_key()).unwrap();
//! assert!(signature.len() <= scheme.max_signature_length());
//!
//! // Verify signature
//! scheme
//!     .verify(message, signature.as_bytes(), keypair.public_key())
//!     .unwrap();
//! ```

pub mod dilithium;
pub mod error;
pub mod falcon;
mod provider;
pub mod scheme;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CryptoError, Result};
pub use scheme::{open_scheme, open_scheme_by_name, Algorithm, AlgorithmInfo, SchemeHandle};
pub use traits::SignatureScheme;
pub use types::{fingerprint, KeyPair, Signature};
