//! Off-chain message signing
//!
//! Signs data that never becomes a transaction, with domain tags that keep
//! such signatures from being replayed as transaction signatures:
//! - user messages (`FLOW-V0.0-user`)
//! - FCL account-ownership proofs (`FCL-ACCOUNT-PROOF-V0.0`), see [`account_proof`]

pub mod account_proof;

pub use account_proof::{account_proof_message, sign_account_proof, AccountProofSignature};

use crate::crypto::{self, CurveType, HashAlgorithm};
use crate::error::FlowResult;
use crate::tx::{DomainTag, Signer};
use serde::{Deserialize, Serialize};

/// A detached signature with its scalars split out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSignature {
    /// `r || s` hex
    pub signature: String,
    pub r: String,
    pub s: String,
}

impl MessageSignature {
    pub fn from_bytes(sig: &[u8]) -> Self {
        let mid = sig.len() / 2;
        Self {
            signature: hex::encode(sig),
            r: hex::encode(&sig[..mid]),
            s: hex::encode(&sig[mid..]),
        }
    }
}

/// Message a user-message signer sees
pub fn user_message(message: &[u8]) -> Vec<u8> {
    DomainTag::User.prefix(message)
}

pub fn sign_user_message<S: Signer + ?Sized>(message: &[u8], signer: &S) -> FlowResult<MessageSignature> {
    let sig = signer.sign(&user_message(message))?;
    Ok(MessageSignature::from_bytes(&sig))
}

pub fn verify_user_message(
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
    curve: CurveType,
    hash_algorithm: HashAlgorithm,
) -> FlowResult<bool> {
    crypto::verify(public_key, &user_message(message), signature, curve, hash_algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::tx::LocalSigner;

    #[test]
    fn test_user_message_round_trip() {
        let key = KeyPair::generate(CurveType::P256).unwrap();
        let public_key = *key.public_key();
        let signer = LocalSigner::new(key);

        let sig = sign_user_message(b"hello", &signer).unwrap();
        assert_eq!(sig.signature.len(), 128);
        assert_eq!(format!("{}{}", sig.r, sig.s), sig.signature);

        let bytes = hex::decode(&sig.signature).unwrap();
        let ok = verify_user_message(b"hello", &bytes, &public_key, CurveType::P256, HashAlgorithm::Sha3_256);
        assert!(ok.unwrap());
    }

    #[test]
    fn test_user_tag_differs_from_transaction_tag() {
        let key = KeyPair::generate(CurveType::Secp256k1).unwrap();
        let sig = key.sign(&DomainTag::Transaction.prefix(b"payload")).unwrap();
        let ok = verify_user_message(
            b"payload",
            &sig,
            key.public_key(),
            CurveType::Secp256k1,
            HashAlgorithm::Sha3_256,
        );
        assert!(!ok.unwrap());
    }
}
