//! Account key pairs
//!
//! Keys are exchanged as hex strings: a 64-char private scalar and a 128-char
//! public key (raw X || Y, no SEC1 prefix). A key pair also records the hash
//! algorithm its account key was registered with, since the network verifies
//! with that digest.
//!
//! Signing with a key whose curve or hash differs from the on-chain account
//! key yields a well-formed signature the network rejects; that mismatch can't
//! be detected locally.

use super::curves::{self, CurveType, PrivateKeyBytes, PublicKeyBytes};
use super::hash::HashAlgorithm;
use super::signature::{der_to_fixed, SIGNATURE_LENGTH};
use crate::error::{ErrorCode, FlowError, FlowResult};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

const PRIVATE_KEY_HEX_LENGTH: usize = 64;

/// An in-memory ECDSA key
#[derive(Clone)]
pub struct KeyPair {
    curve: CurveType,
    hash_algorithm: HashAlgorithm,
    private_key: Zeroizing<PrivateKeyBytes>,
    public_key: PublicKeyBytes,
}

impl KeyPair {
    /// Generate a fresh key on `curve`
    pub fn generate(curve: CurveType) -> FlowResult<Self> {
        let private_key = Zeroizing::new(curves::generate_private_key(curve));
        let public_key = curves::public_key_from_private(curve, &private_key[..])?;
        Ok(Self {
            curve,
            hash_algorithm: HashAlgorithm::default(),
            private_key,
            public_key,
        })
    }

    /// Rebuild a key from hex. When `public_hex` is given it must match the
    /// key derived from `private_hex`.
    pub fn from_hex(private_hex: &str, public_hex: Option<&str>, curve: CurveType) -> FlowResult<Self> {
        let private_key = parse_private_key(private_hex)?;
        let public_key = curves::public_key_from_private(curve, &private_key[..])?;

        if let Some(expected) = public_hex {
            let expected = parse_public_key(expected)?;
            if !bool::from(expected[..].ct_eq(&public_key[..])) {
                return Err(FlowError::new(
                    ErrorCode::InvalidPublicKey,
                    "Public key does not match private key",
                )
                .with_details(format!("curve: {}", curve)));
            }
        }

        Ok(Self {
            curve,
            hash_algorithm: HashAlgorithm::default(),
            private_key,
            public_key,
        })
    }

    /// Use `hash_algorithm` for digests instead of SHA3-256
    pub fn with_hash_algorithm(mut self, hash_algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    pub fn curve(&self) -> CurveType {
        self.curve
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    pub fn public_key(&self) -> &PublicKeyBytes {
        &self.public_key
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.private_key[..]))
    }

    /// Hash `message`, sign the digest and return `r || s`
    pub fn sign(&self, message: &[u8]) -> FlowResult<[u8; SIGNATURE_LENGTH]> {
        let digest = self.hash_algorithm.digest(message);
        let der = curves::sign_digest_der(self.curve, &self.private_key[..], &digest)?;
        Ok(der_to_fixed(self.curve, &der)?)
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> FlowResult<bool> {
        verify(&self.public_key, message, signature, self.curve, self.hash_algorithm)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &self.curve)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("public_key", &self.public_key_hex())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a key pair, returning `(private_hex, public_hex)`
pub fn generate_keypair(curve: CurveType) -> FlowResult<(String, String)> {
    let key = KeyPair::generate(curve)?;
    Ok((key.private_key_hex().to_string(), key.public_key_hex()))
}

pub fn import_keypair(
    private_hex: &str,
    public_hex: Option<&str>,
    curve: CurveType,
) -> FlowResult<KeyPair> {
    KeyPair::from_hex(private_hex, public_hex, curve)
}

pub fn sign(message: &[u8], key: &KeyPair) -> FlowResult<[u8; SIGNATURE_LENGTH]> {
    key.sign(message)
}

/// Verify a 64-byte `r || s` signature against a raw or SEC1 public key
pub fn verify(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
    curve: CurveType,
    hash_algorithm: HashAlgorithm,
) -> FlowResult<bool> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(FlowError::crypto_error(format!(
            "Signature must be {} bytes, got {}",
            SIGNATURE_LENGTH,
            signature.len()
        )));
    }
    let digest = hash_algorithm.digest(message);
    Ok(curves::verify_digest(curve, public_key, &digest, signature)?)
}

fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

fn parse_private_key(private_hex: &str) -> FlowResult<Zeroizing<PrivateKeyBytes>> {
    let hex_str = strip_hex_prefix(private_hex);
    if hex_str.is_empty() || hex_str.len() > PRIVATE_KEY_HEX_LENGTH {
        return Err(FlowError::new(
            ErrorCode::InvalidPrivateKey,
            format!("Private key must be 1..={} hex chars", PRIVATE_KEY_HEX_LENGTH),
        ));
    }

    // Integer-to-hex conversions elsewhere drop leading zeros
    let padded = Zeroizing::new(format!("{:0>width$}", hex_str, width = PRIVATE_KEY_HEX_LENGTH));

    let mut key = Zeroizing::new([0u8; 32]);
    hex::decode_to_slice(padded.as_str(), &mut key[..])
        .map_err(|e| FlowError::new(ErrorCode::InvalidPrivateKey, e.to_string()))?;
    Ok(key)
}

fn parse_public_key(public_hex: &str) -> FlowResult<PublicKeyBytes> {
    let bytes = hex::decode(strip_hex_prefix(public_hex))
        .map_err(|e| FlowError::new(ErrorCode::InvalidPublicKey, e.to_string()))?;

    let raw = match bytes.len() {
        64 => &bytes[..],
        65 if bytes[0] == 0x04 => &bytes[1..],
        n => {
            return Err(FlowError::new(
                ErrorCode::InvalidPublicKey,
                format!("Public key must be 64 or 65 bytes, got {}", n),
            ))
        }
    };

    let mut key = [0u8; 64];
    key.copy_from_slice(raw);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_hex_lengths() {
        for curve in [CurveType::P256, CurveType::Secp256k1] {
            let (private_hex, public_hex) = generate_keypair(curve).unwrap();
            assert_eq!(private_hex.len(), 64);
            assert_eq!(public_hex.len(), 128);
        }
    }

    #[test]
    fn test_import_round_trip() {
        let (private_hex, public_hex) = generate_keypair(CurveType::Secp256k1).unwrap();
        let key = import_keypair(&private_hex, Some(&public_hex), CurveType::Secp256k1).unwrap();
        assert_eq!(key.public_key_hex(), public_hex);

        let prefixed = format!("04{}", public_hex);
        assert!(import_keypair(&private_hex, Some(&prefixed), CurveType::Secp256k1).is_ok());
    }

    #[test]
    fn test_import_rejects_mismatched_public_key() {
        let (private_hex, _) = generate_keypair(CurveType::P256).unwrap();
        let (_, other_public) = generate_keypair(CurveType::P256).unwrap();

        let err = import_keypair(&private_hex, Some(&other_public), CurveType::P256).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPublicKey);
    }

    #[test]
    fn test_short_private_hex_is_zero_padded() {
        let short = import_keypair("1", None, CurveType::Secp256k1).unwrap();
        let full = import_keypair(
            "0000000000000000000000000000000000000000000000000000000000000001",
            None,
            CurveType::Secp256k1,
        )
        .unwrap();
        assert_eq!(short.public_key(), full.public_key());
        assert_eq!(short.private_key_hex().len(), 64);
    }

    #[test]
    fn test_rejects_bad_private_hex() {
        let err = import_keypair(&"ab".repeat(33), None, CurveType::P256).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrivateKey);
        assert!(import_keypair("zz", None, CurveType::P256).is_err());
        assert!(import_keypair("", None, CurveType::P256).is_err());
    }

    #[test]
    fn test_sign_and_verify_both_hashes() {
        for curve in [CurveType::P256, CurveType::Secp256k1] {
            for hash in [HashAlgorithm::Sha3_256, HashAlgorithm::Sha2_256] {
                let key = KeyPair::generate(curve).unwrap().with_hash_algorithm(hash);
                let sig = sign(b"hello flow", &key).unwrap();
                assert_eq!(sig.len(), 64);
                assert!(key.verify(b"hello flow", &sig).unwrap());
                assert!(!key.verify(b"hello flaw", &sig).unwrap());
            }
        }
    }

    #[test]
    fn test_hash_mismatch_fails_verification() {
        let key = KeyPair::generate(CurveType::P256).unwrap();
        let sig = key.sign(b"message").unwrap();
        let ok = verify(key.public_key(), b"message", &sig, CurveType::P256, HashAlgorithm::Sha2_256)
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let key = import_keypair("1", None, CurveType::P256).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&*key.private_key_hex()));
    }
}
