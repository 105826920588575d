/// Unified interface for post-quantum signature providers
use crate::error::Result;
use crate::scheme::{Algorithm, AlgorithmInfo};
use crate::types::{KeyPair, Signature};

/// A signature scheme provider.
///
/// Keys and signatures cross this boundary as raw bytes. Implementations hold
/// no mutable state, so `verify()` gives the same answer for the same inputs.
pub trait SignatureScheme {
    /// Which algorithm this provider implements
    fn algorithm(&self) -> Algorithm;

    /// Public key size (bytes), fixed by the scheme
    fn public_key_length(&self) -> usize;

    /// Secret key size (bytes), fixed by the scheme
    fn secret_key_length(&self) -> usize;

    /// Upper bound on signature size (bytes); produced signatures may be shorter
    fn max_signature_length(&self) -> usize;

    /// Generate a fresh keypair from the provider's own randomness
    fn generate_keypair(&self) -> Result<KeyPair>;

    /// Produce a detached signature over `message`
    fn sign(&self, message: &[u8], secret_key: &[u8]) -> Result<Signature>;

    /// Accept (`Ok`) or reject (`Err(VerificationFailed)`) a detached signature
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()>;

    /// Algorithm information
    fn info(&self) -> AlgorithmInfo {
        let algorithm = self.algorithm();
        AlgorithmInfo {
            name: algorithm.name(),
            nist_level: algorithm.nist_level(),
            public_key_size: self.public_key_length(),
            secret_key_size: self.secret_key_length(),
            signature_size: self.max_signature_length(),
        }
    }
}
