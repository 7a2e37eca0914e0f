//! secp256k1 Curve Implementation
//!
//! Flow name: `ECDSA_secp256k1`. Signatures come out low-S normalized.

use super::traits::{check_private_key_len, sec1_uncompressed};
use super::{CurveError, EllipticCurve, PrivateKeyBytes, PublicKeyBytes, SignatureBytes};
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

/// secp256k1 curve implementation
pub struct Secp256k1Curve;

impl EllipticCurve for Secp256k1Curve {
    fn generate_private_key() -> PrivateKeyBytes {
        SecretKey::new(&mut rand::thread_rng()).secret_bytes()
    }

    fn public_key_from_private(private_key: &[u8]) -> Result<PublicKeyBytes, CurveError> {
        check_private_key_len(private_key)?;

        let secp = Secp256k1::signing_only();
        let sk = SecretKey::from_slice(private_key)
            .map_err(|e| CurveError::InvalidPrivateKey(e.to_string()))?;

        let uncompressed = PublicKey::from_secret_key(&secp, &sk).serialize_uncompressed();
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&uncompressed[1..]);
        Ok(raw)
    }

    fn sign_digest_der(private_key: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>, CurveError> {
        check_private_key_len(private_key)?;

        let secp = Secp256k1::signing_only();
        let sk = SecretKey::from_slice(private_key)
            .map_err(|e| CurveError::InvalidPrivateKey(e.to_string()))?;

        let msg = Message::from_digest(*digest);
        let sig = secp.sign_ecdsa(&msg, &sk);

        Ok(sig.serialize_der().to_vec())
    }

    fn der_to_fixed(der: &[u8]) -> Result<SignatureBytes, CurveError> {
        let fixed = Signature::from_der(der)
            .map_err(|e| CurveError::InvalidSignature(e.to_string()))?
            .serialize_compact();

        // libsecp256k1 parses an overflowing scalar as zero
        let (r, s) = fixed.split_at(32);
        if r.iter().all(|b| *b == 0) || s.iter().all(|b| *b == 0) {
            return Err(CurveError::InvalidSignature("zero scalar".to_string()));
        }
        Ok(fixed)
    }

    fn verify_digest(
        public_key: &[u8],
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool, CurveError> {
        let secp = Secp256k1::verification_only();

        let uncompressed = sec1_uncompressed(public_key)?;
        let pk = PublicKey::from_slice(&uncompressed)
            .map_err(|e| CurveError::InvalidPublicKey(e.to_string()))?;

        let sig = Signature::from_compact(signature)
            .map_err(|e| CurveError::InvalidSignature(e.to_string()))?;

        let msg = Message::from_digest(*digest);
        Ok(secp.verify_ecdsa(&msg, &sig, &pk).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha3::{Digest, Sha3_256};

    #[test]
    fn test_public_key_from_private() {
        // Private key 1 maps to the generator point G
        let mut sk = [0u8; 32];
        sk[31] = 1;
        let pk = Secp256k1Curve::public_key_from_private(&sk).unwrap();
        assert_eq!(
            hex::encode(&pk[..32]),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_sign_verify() {
        let sk = Secp256k1Curve::generate_private_key();
        let pk = Secp256k1Curve::public_key_from_private(&sk).unwrap();
        let digest: [u8; 32] = Sha3_256::digest(b"flow").into();

        let der = Secp256k1Curve::sign_digest_der(&sk, &digest).unwrap();
        let compact = Secp256k1Curve::der_to_fixed(&der).unwrap();
        assert_eq!(compact, Signature::from_der(&der).unwrap().serialize_compact());

        assert!(Secp256k1Curve::verify_digest(&pk, &digest, &compact).unwrap());
    }

    #[test]
    fn test_invalid_public_key_length() {
        let err = Secp256k1Curve::verify_digest(&[4u8; 33], &[0u8; 32], &[0u8; 64]).unwrap_err();
        assert!(matches!(err, CurveError::InvalidPublicKey(_)));
    }
}
