//! Transactions and their canonical forms
//!
//! A [`Transaction`] comes out of [`TransactionBuilder::build`] with its
//! payload fields fixed. Only signatures can be added afterwards, and all
//! payload signatures must be attached before the first envelope signature.
//!
//! [`TransactionBuilder::build`]: super::TransactionBuilder::build

use super::collator::collate;
use super::domain::DomainTag;
use super::signer::Signer;
use crate::encoding::{encode, RlpItem};
use crate::error::{FlowError, FlowResult};
use crate::types::{Address, ProposalKey};
use crate::{log_debug, serde_bytes};
use serde::{Deserialize, Serialize};

/// A signature as attached to a transaction, before collation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    pub address: Address,
    pub key_index: u32,
    #[serde(with = "serde_bytes::hex_vec")]
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    script: String,
    #[serde(with = "serde_bytes::base64_list")]
    arguments: Vec<Vec<u8>>,
    #[serde(with = "serde_bytes::hex32")]
    reference_block_id: [u8; 32],
    gas_limit: u64,
    proposal_key: ProposalKey,
    payer: Address,
    authorizers: Vec<Address>,
    payload_signatures: Vec<TransactionSignature>,
    envelope_signatures: Vec<TransactionSignature>,
}

impl Transaction {
    pub(crate) fn new(
        script: String,
        arguments: Vec<Vec<u8>>,
        reference_block_id: [u8; 32],
        gas_limit: u64,
        proposal_key: ProposalKey,
        payer: Address,
        authorizers: Vec<Address>,
    ) -> Self {
        Self {
            script,
            arguments,
            reference_block_id,
            gas_limit,
            proposal_key,
            payer,
            authorizers,
            payload_signatures: Vec::new(),
            envelope_signatures: Vec::new(),
        }
    }

    /// Script with address aliases already substituted
    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn arguments(&self) -> &[Vec<u8>] {
        &self.arguments
    }

    pub fn reference_block_id(&self) -> &[u8; 32] {
        &self.reference_block_id
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn proposal_key(&self) -> &ProposalKey {
        &self.proposal_key
    }

    pub fn payer(&self) -> Address {
        self.payer
    }

    pub fn authorizers(&self) -> &[Address] {
        &self.authorizers
    }

    pub fn payload_signatures(&self) -> &[TransactionSignature] {
        &self.payload_signatures
    }

    pub fn envelope_signatures(&self) -> &[TransactionSignature] {
        &self.envelope_signatures
    }

    // MARK: - Canonical forms

    pub fn payload_canonical_form(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::bytes(self.script.as_bytes()),
            RlpItem::list(self.arguments.iter().cloned().map(RlpItem::Bytes)),
            RlpItem::bytes(self.reference_block_id.to_vec()),
            RlpItem::uint(self.gas_limit),
            RlpItem::bytes(self.proposal_key.address.as_bytes().to_vec()),
            RlpItem::uint(u64::from(self.proposal_key.key_index)),
            RlpItem::uint(self.proposal_key.sequence_number),
            RlpItem::bytes(self.payer.as_bytes().to_vec()),
            RlpItem::list(self.authorizers.iter().map(|a| RlpItem::bytes(a.as_bytes().to_vec()))),
        ])
    }

    pub fn envelope_canonical_form(&self) -> RlpItem {
        let signatures = collate(self.proposal_key.address, &self.payload_signatures);
        RlpItem::list(vec![
            self.payload_canonical_form(),
            RlpItem::list(signatures.iter().map(|s| s.to_rlp())),
        ])
    }

    pub fn payload_message(&self) -> Vec<u8> {
        encode(&self.payload_canonical_form())
    }

    pub fn envelope_message(&self) -> Vec<u8> {
        encode(&self.envelope_canonical_form())
    }

    /// Bytes handed to payload signers
    pub fn payload_signing_message(&self) -> Vec<u8> {
        DomainTag::Transaction.prefix(&self.payload_message())
    }

    /// Bytes handed to envelope signers
    pub fn envelope_signing_message(&self) -> Vec<u8> {
        DomainTag::Transaction.prefix(&self.envelope_message())
    }

    // MARK: - Signing

    /// Sign the payload as `address` and attach the signature
    pub fn add_payload_signature<S: Signer + ?Sized>(
        &mut self,
        address: Address,
        key_index: u32,
        signer: &S,
    ) -> FlowResult<&mut Self> {
        if !self.envelope_signatures.is_empty() {
            return Err(FlowError::signing_order(
                "Payload signature added after an envelope signature",
            )
            .with_details(format!(
                "envelope signatures already attached: {}",
                self.envelope_signatures.len()
            )));
        }

        let signature = signer.sign(&self.payload_signing_message())?;
        self.payload_signatures.push(TransactionSignature {
            address,
            key_index,
            signature,
        });

        log_debug!(
            "tx",
            "Payload signature attached",
            address = address,
            key_index = key_index,
            signature_count = self.payload_signatures.len()
        );
        Ok(self)
    }

    /// Sign the envelope as `address` and attach the signature
    pub fn add_envelope_signature<S: Signer + ?Sized>(
        &mut self,
        address: Address,
        key_index: u32,
        signer: &S,
    ) -> FlowResult<&mut Self> {
        let signature = signer.sign(&self.envelope_signing_message())?;
        self.envelope_signatures.push(TransactionSignature {
            address,
            key_index,
            signature,
        });

        log_debug!(
            "tx",
            "Envelope signature attached",
            address = address,
            key_index = key_index,
            signature_count = self.envelope_signatures.len()
        );
        Ok(self)
    }

    /// Freeze into a wire-ready transaction. At least one envelope signature
    /// is required.
    pub fn finalize(self) -> FlowResult<SignedTransaction> {
        if self.envelope_signatures.is_empty() {
            return Err(FlowError::invalid_transaction(
                "Transaction has no envelope signature",
            ));
        }
        Ok(SignedTransaction { inner: self })
    }
}

/// A fully signed transaction, ready for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignedTransaction {
    inner: Transaction,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.inner
    }

    pub fn envelope_message(&self) -> Vec<u8> {
        self.inner.envelope_message()
    }

    pub fn into_inner(self) -> Transaction {
        self.inner
    }
}

impl std::ops::Deref for SignedTransaction {
    type Target = Transaction;

    fn deref(&self) -> &Transaction {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    struct FixedSigner(u8);

    impl Signer for FixedSigner {
        fn sign(&self, _message: &[u8]) -> FlowResult<Vec<u8>> {
            Ok(vec![self.0; 64])
        }
    }

    fn addr(n: u8) -> Address {
        Address::from_bytes([0, 0, 0, 0, 0, 0, 0, n])
    }

    fn tx() -> Transaction {
        Transaction::new(
            "transaction {}".into(),
            vec![],
            [7u8; 32],
            9999,
            ProposalKey {
                address: addr(1),
                key_index: 0,
                sequence_number: 3,
            },
            addr(1),
            vec![addr(2), addr(3)],
        )
    }

    #[test]
    fn test_payload_form_field_order() {
        let form = tx().payload_canonical_form();
        let fields = form.as_list().unwrap();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0].as_bytes().unwrap(), b"transaction {}");
        assert_eq!(fields[3].as_u64(), Some(9999));
        assert_eq!(fields[4].as_bytes().unwrap(), addr(1).as_bytes());
        assert_eq!(fields[6].as_u64(), Some(3));
        assert_eq!(fields[8].as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_envelope_without_payload_signatures() {
        let form = tx().envelope_canonical_form();
        let parts = form.as_list().unwrap();
        assert_eq!(parts[0], tx().payload_canonical_form());
        assert_eq!(parts[1], RlpItem::empty_list());
    }

    #[test]
    fn test_signer_indices_follow_attachment_order() {
        let mut t = tx();
        t.add_payload_signature(addr(2), 0, &FixedSigner(2)).unwrap();
        t.add_payload_signature(addr(3), 0, &FixedSigner(3)).unwrap();

        let form = t.envelope_canonical_form();
        let sigs = form.as_list().unwrap()[1].as_list().unwrap();
        let indices: Vec<_> = sigs.iter().map(|s| s.as_list().unwrap()[0].as_u64()).collect();
        assert_eq!(indices, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_payload_after_envelope_is_rejected() {
        let mut t = tx();
        t.add_envelope_signature(addr(1), 0, &FixedSigner(1)).unwrap();

        let err = t.add_payload_signature(addr(2), 0, &FixedSigner(2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::SigningOrder);
        assert!(t.payload_signatures().is_empty());
    }

    #[test]
    fn test_signing_messages_are_tagged() {
        let t = tx();
        let msg = t.payload_signing_message();
        assert_eq!(&msg[..32], &DomainTag::Transaction.padded());
        assert_eq!(&msg[32..], t.payload_message().as_slice());
    }

    #[test]
    fn test_finalize_requires_envelope_signature() {
        assert_eq!(tx().finalize().unwrap_err().code, ErrorCode::InvalidTransaction);

        let mut t = tx();
        t.add_envelope_signature(addr(1), 0, &FixedSigner(9)).unwrap();
        let signed = t.finalize().unwrap();
        assert_eq!(signed.envelope_signatures().len(), 1);
    }
}
