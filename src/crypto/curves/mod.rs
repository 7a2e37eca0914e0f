//! Account key curves
//!
//! Flow account keys use one of two ECDSA curves:
//!
//! - `ECDSA_P256` (secp256r1 / NIST P-256)
//! - `ECDSA_secp256k1`
//!
//! Both implement [`EllipticCurve`]; the free functions below dispatch on
//! [`CurveType`] so callers never name a concrete curve.
//!
//! ```rust,ignore
//! use flow_client::crypto::curves::{CurveType, generate_private_key, public_key_from_private};
//!
//! let sk = generate_private_key(CurveType::P256);
//! let pk = public_key_from_private(CurveType::P256, &sk)?;
//! assert_eq!(pk.len(), 64);
//! ```

pub mod secp256k1;
pub mod secp256r1;
pub mod traits;

pub use secp256k1::Secp256k1Curve;
pub use secp256r1::Secp256r1Curve;
pub use traits::*;

use crate::error::{ErrorCode, FlowError};
use serde::{Deserialize, Serialize};

// MARK: - Curve Type Enum

/// Signature algorithm of an account key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveType {
    /// NIST P-256
    #[default]
    #[serde(rename = "ECDSA_P256")]
    P256,
    /// secp256k1
    #[serde(rename = "ECDSA_secp256k1")]
    Secp256k1,
}

impl CurveType {
    /// Name as used by the Access API
    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => "ECDSA_P256",
            Self::Secp256k1 => "ECDSA_secp256k1",
        }
    }

    /// Numeric code used in encoded account keys
    pub fn code(&self) -> u64 {
        match self {
            Self::P256 => 2,
            Self::Secp256k1 => 3,
        }
    }

    /// Parse a curve from either its network name or a common alias
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ecdsa_p256" | "p256" | "p-256" | "secp256r1" | "prime256v1" => Some(Self::P256),
            "ecdsa_secp256k1" | "secp256k1" => Some(Self::Secp256k1),
            _ => None,
        }
    }
}

impl std::fmt::Display for CurveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// MARK: - Curve Errors

/// Errors that can occur during curve operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl From<CurveError> for FlowError {
    fn from(e: CurveError) -> Self {
        let code = match e {
            CurveError::InvalidPrivateKey(_) => ErrorCode::InvalidPrivateKey,
            CurveError::InvalidPublicKey(_) => ErrorCode::InvalidPublicKey,
            CurveError::InvalidSignature(_) => ErrorCode::CryptoError,
            CurveError::SigningFailed(_) => ErrorCode::SigningFailed,
        };
        FlowError::new(code, e.to_string())
    }
}

// MARK: - Unified Interface

/// Generate a random private key for the curve
pub fn generate_private_key(curve: CurveType) -> PrivateKeyBytes {
    match curve {
        CurveType::P256 => Secp256r1Curve::generate_private_key(),
        CurveType::Secp256k1 => Secp256k1Curve::generate_private_key(),
    }
}

/// Derive the raw 64-byte public key
pub fn public_key_from_private(
    curve: CurveType,
    private_key: &[u8],
) -> Result<PublicKeyBytes, CurveError> {
    match curve {
        CurveType::P256 => Secp256r1Curve::public_key_from_private(private_key),
        CurveType::Secp256k1 => Secp256k1Curve::public_key_from_private(private_key),
    }
}

/// Sign a digest, returning DER
pub fn sign_digest_der(
    curve: CurveType,
    private_key: &[u8],
    digest: &[u8; 32],
) -> Result<Vec<u8>, CurveError> {
    match curve {
        CurveType::P256 => Secp256r1Curve::sign_digest_der(private_key, digest),
        CurveType::Secp256k1 => Secp256k1Curve::sign_digest_der(private_key, digest),
    }
}

/// Verify a fixed-width signature over a digest
pub fn verify_digest(
    curve: CurveType,
    public_key: &[u8],
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<bool, CurveError> {
    match curve {
        CurveType::P256 => Secp256r1Curve::verify_digest(public_key, digest, signature),
        CurveType::Secp256k1 => Secp256k1Curve::verify_digest(public_key, digest, signature),
    }
}

// MARK: - Tests
