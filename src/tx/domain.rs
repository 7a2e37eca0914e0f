//! Domain separation tags
//!
//! Every signed message is prefixed with a 32-byte, right-padded ASCII tag
//! naming what kind of message it is.

use crate::encoding::DOMAIN_TAG_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainTag {
    /// Transaction payloads and envelopes
    Transaction,
    /// Arbitrary user messages
    User,
    /// FCL account-ownership proofs
    AccountProof,
}

impl DomainTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "FLOW-V0.0-transaction",
            Self::User => "FLOW-V0.0-user",
            Self::AccountProof => "FCL-ACCOUNT-PROOF-V0.0",
        }
    }

    pub fn padded(&self) -> [u8; DOMAIN_TAG_LENGTH] {
        let mut out = [0u8; DOMAIN_TAG_LENGTH];
        let tag = self.as_str().as_bytes();
        out[..tag.len()].copy_from_slice(tag);
        out
    }

    /// `padded tag || message`
    pub fn prefix(&self, message: &[u8]) -> Vec<u8> {
        let mut tagged = Vec::with_capacity(DOMAIN_TAG_LENGTH + message.len());
        tagged.extend_from_slice(&self.padded());
        tagged.extend_from_slice(message);
        tagged
    }
}
