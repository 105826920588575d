//! Dilithium post-quantum digital signature implementations
//!
//! # About Dilithium
//!
//! Dilithium is one of the digital signature schemes selected in the NIST post-quantum cryptography standardization competition (FIPS 204).
//!
//! ## Security
//! - **Mathematical Foundation**: Based on lattice cryptography (Module-LWE problem)
//! - **Standardization**: NIST FIPS 204 standard (officially published in 2024)
//!
//! ## Parameter Sets
//! | Algorithm | NIST Level | Public Key Size | Signature Size |
//! |-----------|------------|----------------|----------------|
//! | **Dilithium2** | **2** | **1,312 bytes** | **~2,420 bytes** |
//! | Dilithium3 | 3 | 1,952 bytes | ~3,309 bytes |
//! | Dilithium5 | 5 | 2,592 bytes | ~4,627 bytes |
//!
//! Dilithium2 is the default for key files written by this crate's tooling.
//! Signatures are detached: the message is never embedded in the signature bytes.

use crate::provider::pqcrypto_scheme;
use crate::scheme::Algorithm;
use pqcrypto_dilithium::{dilithium2, dilithium3, dilithium5};

pqcrypto_scheme!(
    /// Dilithium2 signer
    ///
    /// # Example
    ///
    /// ```rust
    /// use pqc_signer::dilithium::Dilithium2;
    /// use pqc_signer::traits::SignatureScheme;
    ///
    /// let scheme = Dilithium2::new();
    /// let keypair = scheme.generate_keypair().unwrap();
    ///
    /// let message = b"release-1.4.2.tar.gz";
    /// let signature = scheme.sign(message, keypair.secret_key()).unwrap();
    ///
    /// assert!(scheme.verify(message, signature.as_bytes(), keypair.public_key()).is_ok());
    /// ```
    Dilithium2,
    dilithium2,
    Algorithm::Dilithium2
);

pqcrypto_scheme!(
    /// Dilithium3 signer
    Dilithium3,
    dilithium3,
    Algorithm::Dilithium3
);

pqcrypto_scheme!(
    /// Dilithium5 signer
    Dilithium5,
    dilithium5,
    Algorithm::Dilithium5
);
