//! Account key cryptography
//!
//! - `curves`: ECDSA over P-256 and secp256k1
//! - `hash`: SHA2-256 / SHA3-256 digests
//! - `signature`: DER to fixed-width `r || s`
//! - `keys`: hex key pairs, sign and verify

pub mod curves;
pub mod hash;
pub mod keys;
pub mod signature;

pub use curves::{CurveError, CurveType, EllipticCurve, Secp256k1Curve, Secp256r1Curve};
pub use hash::HashAlgorithm;
pub use keys::{generate_keypair, import_keypair, sign, verify, KeyPair};
pub use signature::{der_to_fixed, SIGNATURE_LENGTH};
