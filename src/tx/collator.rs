//! Multi-party signature collation
//!
//! Inside the envelope, payload signatures reference their signer by a small
//! integer instead of an address. The proposer always holds index 0; each
//! distinct payload-signer address after that takes the next index in the
//! order it first signed.

use super::transaction::TransactionSignature;
use crate::encoding::RlpItem;
use crate::types::Address;

/// Insertion-ordered address to index table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerIndex {
    order: Vec<Address>,
}

impl SignerIndex {
    pub fn new(proposer: Address) -> Self {
        Self { order: vec![proposer] }
    }

    /// Table for a proposer and its payload signatures, in signing order
    pub fn from_signatures(proposer: Address, signatures: &[TransactionSignature]) -> Self {
        let mut index = Self::new(proposer);
        for sig in signatures {
            index.insert(sig.address);
        }
        index
    }

    /// Index of `address`, assigning the next free one if unseen
    pub fn insert(&mut self, address: Address) -> usize {
        match self.index_of(&address) {
            Some(i) => i,
            None => {
                self.order.push(address);
                self.order.len() - 1
            }
        }
    }

    pub fn index_of(&self, address: &Address) -> Option<usize> {
        self.order.iter().position(|a| a == address)
    }

    pub fn addresses(&self) -> &[Address] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A payload signature as embedded in the envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollatedSignature {
    pub signer_index: usize,
    pub key_index: u32,
    pub signature: Vec<u8>,
}

impl CollatedSignature {
    pub fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(self.signer_index as u64),
            RlpItem::uint(u64::from(self.key_index)),
            RlpItem::bytes(self.signature.clone()),
        ])
    }
}

/// Rewrite payload signatures to signer indices, preserving their order
pub fn collate(proposer: Address, signatures: &[TransactionSignature]) -> Vec<CollatedSignature> {
    let mut index = SignerIndex::new(proposer);
    signatures
        .iter()
        .map(|sig| CollatedSignature {
            signer_index: index.insert(sig.address),
            key_index: sig.key_index,
            signature: sig.signature.clone(),
        })
        .collect()
}
