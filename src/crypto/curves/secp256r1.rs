//! Secp256r1 (P-256/NIST) Curve Implementation
//!
//! Flow name: `ECDSA_P256`. The default curve for Flow account keys.

use super::traits::{check_private_key_len, sec1_uncompressed};
use super::{CurveError, EllipticCurve, PrivateKeyBytes, PublicKeyBytes, SignatureBytes};
use p256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        Signature, SigningKey, VerifyingKey,
    },
    elliptic_curve::sec1::ToEncodedPoint,
    EncodedPoint, SecretKey,
};
use rand::rngs::OsRng;

/// Secp256r1 (P-256) curve implementation
pub struct Secp256r1Curve;

impl EllipticCurve for Secp256r1Curve {
    fn generate_private_key() -> PrivateKeyBytes {
        SecretKey::random(&mut OsRng).to_bytes().into()
    }

    fn public_key_from_private(private_key: &[u8]) -> Result<PublicKeyBytes, CurveError> {
        check_private_key_len(private_key)?;

        let secret_key = SecretKey::from_slice(private_key)
            .map_err(|e| CurveError::InvalidPrivateKey(format!("Invalid P-256 scalar: {:?}", e)))?;

        let point = secret_key.public_key().to_encoded_point(false);
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&point.as_bytes()[1..]);
        Ok(raw)
    }

    fn sign_digest_der(private_key: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>, CurveError> {
        check_private_key_len(private_key)?;

        let signing_key = SigningKey::from_slice(private_key)
            .map_err(|e| CurveError::InvalidPrivateKey(format!("Invalid signing key: {:?}", e)))?;

        let signature: Signature = signing_key
            .sign_prehash(digest)
            .map_err(|e| CurveError::SigningFailed(format!("P-256 signing failed: {:?}", e)))?;

        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn der_to_fixed(der: &[u8]) -> Result<SignatureBytes, CurveError> {
        let signature = Signature::from_der(der)
            .map_err(|e| CurveError::InvalidSignature(format!("Invalid DER: {:?}", e)))?;

        let mut fixed = [0u8; 64];
        fixed.copy_from_slice(&signature.to_bytes());
        Ok(fixed)
    }

    fn verify_digest(
        public_key: &[u8],
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool, CurveError> {
        let verifying_key = Self::parse_public_key(public_key)?;

        let sig = Signature::from_slice(signature)
            .map_err(|e| CurveError::InvalidSignature(format!("Invalid signature: {:?}", e)))?;

        Ok(verifying_key.verify_prehash(digest, &sig).is_ok())
    }
}

impl Secp256r1Curve {
    fn parse_public_key(public_key: &[u8]) -> Result<VerifyingKey, CurveError> {
        let uncompressed = sec1_uncompressed(public_key)?;
        let point = EncodedPoint::from_bytes(uncompressed)
            .map_err(|e| CurveError::InvalidPublicKey(format!("Invalid point: {:?}", e)))?;

        VerifyingKey::from_encoded_point(&point)
            .map_err(|e| CurveError::InvalidPublicKey(format!("Invalid key: {:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha3::{Digest, Sha3_256};

    fn digest(message: &[u8]) -> [u8; 32] {
        Sha3_256::digest(message).into()
    }

    #[test]
    fn test_public_key_is_raw_coordinates() {
        let sk = Secp256r1Curve::generate_private_key();
        let pk = Secp256r1Curve::public_key_from_private(&sk).unwrap();
        assert_eq!(pk.len(), 64);
    }

    #[test]
    fn test_sign_verify_prehashed() {
        let sk = [42u8; 32];
        let pk = Secp256r1Curve::public_key_from_private(&sk).unwrap();

        let der = Secp256r1Curve::sign_digest_der(&sk, &digest(b"Hello, P-256!")).unwrap();
        let fixed = Secp256r1Curve::der_to_fixed(&der).unwrap();
        assert_eq!(fixed[..], Signature::from_der(&der).unwrap().to_bytes()[..]);

        assert!(Secp256r1Curve::verify_digest(&pk, &digest(b"Hello, P-256!"), &fixed).unwrap());
        assert!(!Secp256r1Curve::verify_digest(&pk, &digest(b"Wrong message"), &fixed).unwrap());
    }

    #[test]
    fn test_rejects_zero_scalar() {
        assert!(Secp256r1Curve::public_key_from_private(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_rejects_short_key() {
        let err = Secp256r1Curve::public_key_from_private(&[1u8; 31]).unwrap_err();
        assert!(matches!(err, CurveError::InvalidPrivateKey(_)));
    }
}
