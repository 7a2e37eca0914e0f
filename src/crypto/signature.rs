//! ECDSA signature encodings
//!
//! The curve libraries sign into DER (`SEQUENCE { INTEGER r, INTEGER s }`).
//! Flow transmits signatures as `r || s`, each left-padded to 32 bytes.
//! Each curve backend parses DER with its own library and re-emits the
//! fixed-width form.

use super::curves::{CurveError, CurveType, EllipticCurve, Secp256k1Curve, Secp256r1Curve};

/// Width of one scalar in a Flow signature
pub const SCALAR_LENGTH: usize = 32;

/// Width of a Flow ECDSA signature
pub const SIGNATURE_LENGTH: usize = 2 * SCALAR_LENGTH;

/// DER in, Flow wire format out
pub fn der_to_fixed(curve: CurveType, der: &[u8]) -> Result<[u8; SIGNATURE_LENGTH], CurveError> {
    match curve {
        CurveType::P256 => Secp256r1Curve::der_to_fixed(der),
        CurveType::Secp256k1 => Secp256k1Curve::der_to_fixed(der),
    }
}
