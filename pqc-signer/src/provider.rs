//! Glue between `SignatureScheme` and the `pqcrypto-*` parameter-set modules
//!
//! Every pqcrypto parameter set exposes the same free functions
//! (`keypair`, `detached_sign`, `verify_detached_signature`, `*_bytes`), so a
//! single macro maps one module onto the trait.

use crate::error::{CryptoError, Result};
use crate::traits::SignatureScheme;
use crate::types::{KeyPair, Signature};

/// Implement `SignatureScheme` for a unit struct backed by a pqcrypto module.
macro_rules! pqcrypto_scheme {
    ($(#[$meta:meta])* $name:ident, $module:ident, $algorithm:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self
            }
        }

        impl $crate::traits::SignatureScheme for $name {
            fn algorithm(&self) -> $crate::scheme::Algorithm {
                $algorithm
            }

            fn public_key_length(&self) -> usize {
                $module::public_key_bytes()
            }

            fn secret_key_length(&self) -> usize {
                $module::secret_key_bytes()
            }

            fn max_signature_length(&self) -> usize {
                $module::signature_bytes()
            }

            fn generate_keypair(&self) -> $crate::error::Result<$crate::types::KeyPair> {
                use pqcrypto_traits::sign::{PublicKey as _, SecretKey as _};

                let (pk, sk) = $module::keypair();
                $crate::provider::checked_keypair(self, pk.as_bytes(), sk.as_bytes())
            }

            fn sign(
                &self,
                message: &[u8],
                secret_key: &[u8],
            ) -> $crate::error::Result<$crate::types::Signature> {
                use pqcrypto_traits::sign::{DetachedSignature as _, SecretKey as _};

                $crate::provider::check_secret_key(self, secret_key)?;

                let sk = $module::SecretKey::from_bytes(secret_key).map_err(|e| {
                    $crate::error::CryptoError::SignFailure(format!(
                        "Failed to parse secret key: {:?}",
                        e
                    ))
                })?;

                let signature = $module::detached_sign(message, &sk);
                $crate::provider::checked_signature(self, message, signature.as_bytes())
            }

            fn verify(
                &self,
                message: &[u8],
                signature: &[u8],
                public_key: &[u8],
            ) -> $crate::error::Result<()> {
                use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};

                $crate::provider::check_verify_inputs(self, signature, public_key)?;

                let pk = $module::PublicKey::from_bytes(public_key).map_err(|e| {
                    $crate::error::CryptoError::VerificationFailed(format!(
                        "Failed to parse public key: {:?}",
                        e
                    ))
                })?;

                let sig = $module::DetachedSignature::from_bytes(signature).map_err(|e| {
                    $crate::error::CryptoError::VerificationFailed(format!(
                        "Failed to parse signature: {:?}",
                        e
                    ))
                })?;

                match $module::verify_detached_signature(&sig, message, &pk) {
                    Ok(()) => {
                        tracing::debug!(
                            "{} signature verified: msg_len={} bytes, sig_len={} bytes",
                            self.algorithm().name(),
                            message.len(),
                            signature.len()
                        );
                        Ok(())
                    }
                    Err(_) => {
                        tracing::warn!("{} signature verification failed", self.algorithm().name());
                        Err($crate::error::CryptoError::VerificationFailed(
                            "signature does not match message and public key".to_string(),
                        ))
                    }
                }
            }
        }
    };
}

pub(crate) use pqcrypto_scheme;

/// Copy freshly generated key material out of the provider, checking it has
/// the sizes the scheme declares.
pub(crate) fn checked_keypair<S: SignatureScheme + ?Sized>(
    scheme: &S,
    public_key: &[u8],
    secret_key: &[u8],
) -> Result<KeyPair> {
    if public_key.len() != scheme.public_key_length()
        || secret_key.len() != scheme.secret_key_length()
    {
        return Err(CryptoError::KeygenFailure(format!(
            "{} produced keys of unexpected size: pk={} bytes (expected {}), sk={} bytes (expected {})",
            scheme.algorithm().name(),
            public_key.len(),
            scheme.public_key_length(),
            secret_key.len(),
            scheme.secret_key_length()
        )));
    }

    tracing::info!(
        "Generated {} keypair: pk_len={} bytes, sk_len={} bytes",
        scheme.algorithm().name(),
        public_key.len(),
        secret_key.len()
    );

    Ok(KeyPair::new(public_key.to_vec(), secret_key.to_vec()))
}

pub(crate) fn check_secret_key<S: SignatureScheme + ?Sized>(
    scheme: &S,
    secret_key: &[u8],
) -> Result<()> {
    if secret_key.len() != scheme.secret_key_length() {
        return Err(CryptoError::SignFailure(format!(
            "Invalid secret key length: expected {} bytes, got {}",
            scheme.secret_key_length(),
            secret_key.len()
        )));
    }
    Ok(())
}

/// Wrap the produced signature bytes, never exceeding the declared maximum.
pub(crate) fn checked_signature<S: SignatureScheme + ?Sized>(
    scheme: &S,
    message: &[u8],
    signature: &[u8],
) -> Result<Signature> {
    if signature.is_empty() || signature.len() > scheme.max_signature_length() {
        return Err(CryptoError::SignFailure(format!(
            "Provider returned a {} byte signature (maximum {})",
            signature.len(),
            scheme.max_signature_length()
        )));
    }

    tracing::debug!(
        "Signed message: msg_len={} bytes, sig_len={} bytes (max {})",
        message.len(),
        signature.len(),
        scheme.max_signature_length()
    );

    Ok(Signature::new(signature.to_vec()))
}

pub(crate) fn check_verify_inputs<S: SignatureScheme + ?Sized>(
    scheme: &S,
    signature: &[u8],
    public_key: &[u8],
) -> Result<()> {
    if public_key.len() != scheme.public_key_length() {
        return Err(CryptoError::VerificationFailed(format!(
            "Invalid public key length: expected {} bytes, got {}",
            scheme.public_key_length(),
            public_key.len()
        )));
    }

    if signature.is_empty() || signature.len() > scheme.max_signature_length() {
        return Err(CryptoError::VerificationFailed(format!(
            "Invalid signature length: got {} bytes, maximum {}",
            signature.len(),
            scheme.max_signature_length()
        )));
    }

    Ok(())
}
