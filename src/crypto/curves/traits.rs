//! Elliptic Curve Traits
//!
//! Common interface for the ECDSA curves Flow accounts can use.

use super::CurveError;

/// Raw private scalar
pub type PrivateKeyBytes = [u8; 32];

/// Uncompressed public point as X || Y, without the SEC1 `0x04` prefix
pub type PublicKeyBytes = [u8; 64];

/// Fixed-width `r || s`
pub type SignatureBytes = [u8; 64];

/// Core trait for elliptic curve operations
///
/// All signing happens over a precomputed 32-byte digest; the hash algorithm
/// is chosen by the account key, not by the curve.
pub trait EllipticCurve {
    /// Generate a fresh private key from the OS RNG
    fn generate_private_key() -> PrivateKeyBytes;

    /// Derive the raw public point from a private key
    fn public_key_from_private(private_key: &[u8]) -> Result<PublicKeyBytes, CurveError>;

    /// Sign a digest, returning the library's DER-encoded signature
    fn sign_digest_der(private_key: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>, CurveError>;

    /// Re-encode a DER signature as fixed-width `r || s`
    fn der_to_fixed(der: &[u8]) -> Result<SignatureBytes, CurveError>;

    /// Verify a fixed-width `r || s` signature over a digest
    fn verify_digest(
        public_key: &[u8],
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool, CurveError>;
}

pub(crate) fn check_private_key_len(private_key: &[u8]) -> Result<(), CurveError> {
    if private_key.len() != 32 {
        return Err(CurveError::InvalidPrivateKey(format!(
            "Private key must be 32 bytes, got {}",
            private_key.len()
        )));
    }
    Ok(())
}

/// Accepts raw X || Y (64 bytes) or SEC1 uncompressed (65 bytes) and returns
/// the SEC1 form the curve libraries parse.
pub(crate) fn sec1_uncompressed(public_key: &[u8]) -> Result<[u8; 65], CurveError> {
    let mut uncompressed = [0u8; 65];
    match public_key.len() {
        64 => {
            uncompressed[0] = 0x04;
            uncompressed[1..].copy_from_slice(public_key);
        }
        65 if public_key[0] == 0x04 => uncompressed.copy_from_slice(public_key),
        _ => {
            return Err(CurveError::InvalidPublicKey(format!(
                "Public key must be 64 raw or 65 uncompressed bytes, got {}",
                public_key.len()
            )))
        }
    }
    Ok(uncompressed)
}
