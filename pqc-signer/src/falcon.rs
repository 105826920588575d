//! Falcon-512 signature implementation
//!
//! Falcon signatures are compressed, so their length varies from call to call
//! up to `falcon512::signature_bytes()`.

use crate::provider::pqcrypto_scheme;
use crate::scheme::Algorithm;
use pqcrypto_falcon::falcon512;

pqcrypto_scheme!(
    /// Falcon-512 signer
    Falcon512,
    falcon512,
    Algorithm::Falcon512
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;
    use crate::traits::SignatureScheme;

    #[test]
    fn test_falcon_sign_and_verify() {
        let scheme = Falcon512::new();
        let keypair = scheme.generate_keypair().unwrap();

        let message = b"Falcon test message";
        let signature = scheme.sign(message, keypair.secret_key()).unwrap();

        assert!(scheme
            .verify(message, signature.as_bytes(), keypair.public_key())
            .is_ok());
        assert!(matches!(
            scheme.verify(b"other message", signature.as_bytes(), keypair.public_key()),
            Err(CryptoError::VerificationFailed(_))
        ));
    }

    #[test]
    fn test_falcon_signature_within_bound() {
        let scheme = Falcon512::new();
        let keypair = scheme.generate_keypair().unwrap();

        for i in 0..8u8 {
            let message = vec![i; 64 * i as usize];
            let signature = scheme.sign(&message, keypair.secret_key()).unwrap();
            assert!(signature.len() <= scheme.max_signature_length());
            assert!(!signature.is_empty());
        }
    }

    #[test]
    fn test_falcon_algorithm_info() {
        let info = Falcon512::new().info();

        assert_eq!(info.name, "Falcon-512");
        assert_eq!(info.nist_level, 1);
        assert_eq!(info.public_key_size, 897);
    }
}
