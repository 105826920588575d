//! Key material and signatures as owned byte buffers

use sha3::{Digest, Sha3_256};
use std::fmt;
use zeroize::Zeroizing;

/// A public/secret key pair produced by one `generate_keypair()` call.
///
/// The two halves are only related by having come out of the same call; the
/// caller keeps them together. The secret half is wiped when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    public_key: Vec<u8>,
    secret_key: Zeroizing<Vec<u8>>,
}

impl KeyPair {
    pub fn new(public_key: Vec<u8>, secret_key: Vec<u8>) -> Self {
        Self {
            public_key,
            secret_key: Zeroizing::new(secret_key),
        }
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Get secret key bytes (for persistence)
    ///
    /// # Security Warning
    /// Private keys should be stored securely, not transmitted over network or logged
    pub fn secret_key(&self) -> &[u8] {
        self.secret_key.as_slice()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &fingerprint(&self.public_key))
            .field("secret_key", &format_args!("<{} bytes redacted>", self.secret_key.len()))
            .finish()
    }
}

/// A detached signature.
///
/// Holds exactly the bytes the provider produced, which may be fewer than the
/// scheme's maximum signature length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Short public key fingerprint: first 8 bytes of SHA3-256, hex encoded
pub fn fingerprint(public_key: &[u8]) -> String {
    let digest = Sha3_256::digest(public_key);
    hex::encode(&digest[..8])
}
