//! FCL account proofs
//!
//! A wallet proves it controls an account by signing
//! `tag || RLP([app_identifier, address, nonce])`, where the address is
//! left-padded to 8 bytes and the nonce is at least 32 bytes of hex.

use crate::encoding::{encode, RlpItem};
use crate::error::{FlowError, FlowResult};
use crate::tx::{DomainTag, Signer};
use crate::types::Address;
use serde::{Deserialize, Serialize};

pub const MIN_NONCE_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProofSignature {
    pub address: Address,
    pub key_index: u32,
    pub signature: String,
}

/// Bytes a wallet signs for an account proof
pub fn account_proof_message(app_identifier: &str, address: &Address, nonce_hex: &str) -> FlowResult<Vec<u8>> {
    let nonce = hex::decode(nonce_hex.trim_start_matches("0x"))?;
    if nonce.len() < MIN_NONCE_LENGTH {
        return Err(FlowError::invalid_input(format!(
            "Nonce must be at least {} bytes, got {}",
            MIN_NONCE_LENGTH,
            nonce.len()
        )));
    }

    let message = encode(&RlpItem::list(vec![
        RlpItem::bytes(app_identifier.as_bytes()),
        RlpItem::bytes(address.as_bytes().to_vec()),
        RlpItem::bytes(nonce),
    ]));
    Ok(DomainTag::AccountProof.prefix(&message))
}

pub fn sign_account_proof<S: Signer + ?Sized>(
    app_identifier: &str,
    address: Address,
    key_index: u32,
    nonce_hex: &str,
    signer: &S,
) -> FlowResult<AccountProofSignature> {
    let message = account_proof_message(app_identifier, &address, nonce_hex)?;
    Ok(AccountProofSignature {
        address,
        key_index,
        signature: hex::encode(signer.sign(&message)?),
    })
}
