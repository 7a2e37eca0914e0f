//! Access REST API request and response bodies

use crate::error::{FlowError, FlowResult};
use crate::serde_bytes::{base64_list, base64_vec, u64_string};
use crate::tx::{SignedTransaction, TransactionSignature};
use crate::types::*;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Serialize)]
pub(super) struct ProposalKeyBody {
    pub address: String,
    #[serde(with = "u64_string")]
    pub key_index: u64,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct SignatureBody {
    pub address: String,
    #[serde(with = "u64_string")]
    pub key_index: u64,
    #[serde(with = "base64_vec")]
    pub signature: Vec<u8>,
}

impl From<&TransactionSignature> for SignatureBody {
    fn from(sig: &TransactionSignature) -> Self {
        Self {
            address: sig.address.to_hex(),
            key_index: u64::from(sig.key_index),
            signature: sig.signature.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct TransactionBody {
    #[serde(with = "base64_vec")]
    pub script: Vec<u8>,
    #[serde(with = "base64_list")]
    pub arguments: Vec<Vec<u8>>,
    pub reference_block_id: String,
    #[serde(with = "u64_string")]
    pub gas_limit: u64,
    pub payer: String,
    pub proposal_key: ProposalKeyBody,
    pub authorizers: Vec<String>,
    pub payload_signatures: Vec<SignatureBody>,
    pub envelope_signatures: Vec<SignatureBody>,
}

impl From<&SignedTransaction> for TransactionBody {
    fn from(tx: &SignedTransaction) -> Self {
        let key = tx.proposal_key();
        Self {
            script: tx.script().as_bytes().to_vec(),
            arguments: tx.arguments().to_vec(),
            reference_block_id: hex::encode(tx.reference_block_id()),
            gas_limit: tx.gas_limit(),
            payer: tx.payer().to_hex(),
            proposal_key: ProposalKeyBody {
                address: key.address.to_hex(),
                key_index: u64::from(key.key_index),
                sequence_number: key.sequence_number,
            },
            authorizers: tx.authorizers().iter().map(Address::to_hex).collect(),
            payload_signatures: tx.payload_signatures().iter().map(SignatureBody::from).collect(),
            envelope_signatures: tx.envelope_signatures().iter().map(SignatureBody::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ScriptBody {
    #[serde(with = "base64_vec")]
    pub script: Vec<u8>,
    #[serde(with = "base64_list")]
    pub arguments: Vec<Vec<u8>>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AccountKeyResponse {
    #[serde(with = "u64_string")]
    pub index: u64,
    pub public_key: String,
    pub signing_algorithm: String,
    pub hashing_algorithm: String,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    #[serde(with = "u64_string")]
    pub weight: u64,
    #[serde(default)]
    pub revoked: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct AccountResponse {
    pub address: String,
    #[serde(with = "u64_string")]
    pub balance: u64,
    #[serde(default)]
    pub keys: Vec<AccountKeyResponse>,
    #[serde(default)]
    pub contracts: BTreeMap<String, String>,
}

impl AccountResponse {
    pub fn into_account(self) -> FlowResult<Account> {
        let keys = self
            .keys
            .into_iter()
            .map(|k| {
                Ok(AccountKey {
                    index: narrow(k.index, "key index")?,
                    public_key: k.public_key.trim_start_matches("0x").to_string(),
                    sign_algo: crate::crypto::CurveType::from_name(&k.signing_algorithm)
                        .ok_or_else(|| unsupported("signing algorithm", &k.signing_algorithm))?,
                    hash_algo: crate::crypto::HashAlgorithm::from_name(&k.hashing_algorithm)
                        .ok_or_else(|| unsupported("hashing algorithm", &k.hashing_algorithm))?,
                    weight: narrow(k.weight, "key weight")?,
                    sequence_number: k.sequence_number,
                    revoked: k.revoked,
                })
            })
            .collect::<FlowResult<Vec<_>>>()?;

        // Contract code arrives base64 encoded
        let contracts = self
            .contracts
            .into_iter()
            .map(|(name, code)| {
                let decoded = STANDARD.decode(&code)?;
                let source = String::from_utf8(decoded)
                    .map_err(|e| FlowError::parse_error(format!("Contract {}: {}", name, e)))?;
                Ok((name, source))
            })
            .collect::<FlowResult<BTreeMap<_, _>>>()?;

        Ok(Account {
            address: self.address.parse()?,
            balance: self.balance,
            keys,
            contracts,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BlockHeaderResponse {
    pub id: String,
    pub parent_id: String,
    #[serde(with = "u64_string")]
    pub height: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub parent_voter_signature: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CollectionGuaranteeResponse {
    pub collection_id: String,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ApprovalSignaturesResponse {
    #[serde(default)]
    pub verifier_signatures: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct BlockSealResponse {
    pub block_id: String,
    #[serde(default)]
    pub result_id: String,
    #[serde(default)]
    pub aggregated_approval_signatures: Vec<ApprovalSignaturesResponse>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct BlockPayloadResponse {
    #[serde(default)]
    pub collection_guarantees: Vec<CollectionGuaranteeResponse>,
    #[serde(default)]
    pub block_seals: Vec<BlockSealResponse>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BlockResponse {
    pub header: BlockHeaderResponse,
    #[serde(default)]
    pub payload: Option<BlockPayloadResponse>,
}

impl BlockResponse {
    pub fn into_block(self) -> FlowResult<Block> {
        let payload = self.payload.unwrap_or_default();

        let collection_guarantees = payload
            .collection_guarantees
            .into_iter()
            .map(|g| {
                Ok(CollectionGuarantee {
                    collection_id: g.collection_id,
                    signatures: g.signature.iter().map(|s| base64_to_hex(s)).collect::<FlowResult<_>>()?,
                })
            })
            .collect::<FlowResult<_>>()?;

        let block_seals = payload
            .block_seals
            .into_iter()
            .map(|s| {
                let approvals = s
                    .aggregated_approval_signatures
                    .iter()
                    .flat_map(|a| a.verifier_signatures.iter())
                    .map(|sig| base64_to_hex(sig))
                    .collect::<FlowResult<_>>()?;
                Ok(BlockSeal {
                    block_id: s.block_id,
                    execution_receipt_id: s.result_id,
                    execution_receipt_signatures: Vec::new(),
                    result_approval_signatures: approvals,
                })
            })
            .collect::<FlowResult<_>>()?;

        let signatures = self
            .header
            .parent_voter_signature
            .iter()
            .map(|s| base64_to_hex(s))
            .collect::<FlowResult<_>>()?;

        Ok(Block {
            id: self.header.id,
            parent_id: self.header.parent_id,
            height: self.header.height,
            timestamp: self.header.timestamp,
            collection_guarantees,
            block_seals,
            signatures,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CollectionExpandable {
    #[serde(default)]
    pub transactions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CollectionResponse {
    pub id: String,
    #[serde(default)]
    pub transactions: Vec<IdResponse>,
    #[serde(default, rename = "_expandable")]
    pub expandable: CollectionExpandable,
}

impl CollectionResponse {
    pub fn into_collection(self) -> Collection {
        let mut transaction_ids: Vec<String> = self.transactions.into_iter().map(|t| t.id).collect();
        if transaction_ids.is_empty() {
            // Unexpanded collections only carry links ending in the id
            transaction_ids = self
                .expandable
                .transactions
                .iter()
                .filter_map(|link| link.rsplit('/').next().map(str::to_string))
                .collect();
        }
        Collection {
            id: self.id,
            transaction_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EventResponse {
    #[serde(rename = "type")]
    pub event_type: String,
    pub transaction_id: String,
    #[serde(with = "u64_string")]
    pub transaction_index: u64,
    #[serde(with = "u64_string")]
    pub event_index: u64,
    #[serde(with = "base64_vec")]
    pub payload: Vec<u8>,
}

impl EventResponse {
    pub fn into_event(self) -> FlowResult<Event> {
        Ok(Event {
            event_type: self.event_type,
            transaction_id: self.transaction_id,
            transaction_index: narrow(self.transaction_index, "transaction index")?,
            event_index: narrow(self.event_index, "event index")?,
            payload: self.payload,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EventsResultResponse {
    pub block_id: String,
    #[serde(with = "u64_string")]
    pub block_height: u64,
    pub block_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub events: Vec<EventResponse>,
}

impl EventsResultResponse {
    pub fn into_events_result(self) -> FlowResult<EventsResult> {
        Ok(EventsResult {
            block_id: self.block_id,
            block_height: self.block_height,
            block_timestamp: self.block_timestamp,
            events: self.events.into_iter().map(EventResponse::into_event).collect::<FlowResult<_>>()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionResultResponse {
    #[serde(default)]
    pub block_id: String,
    pub status: String,
    #[serde(default)]
    pub status_code: u32,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub events: Vec<EventResponse>,
}

impl TransactionResultResponse {
    pub fn into_result(self) -> FlowResult<TransactionResult> {
        Ok(TransactionResult {
            status: TransactionStatus::from_name(&self.status),
            status_code: self.status_code,
            error_message: self.error_message,
            events: self.events.into_iter().map(EventResponse::into_event).collect::<FlowResult<_>>()?,
            block_id: Some(self.block_id).filter(|id| !id.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProposalKeyResponse {
    pub address: String,
    #[serde(with = "u64_string")]
    pub key_index: u64,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct SignatureResponse {
    pub address: String,
    #[serde(with = "u64_string")]
    pub key_index: u64,
    #[serde(with = "base64_vec")]
    pub signature: Vec<u8>,
}

impl SignatureResponse {
    fn into_signature(self) -> FlowResult<TransactionSignature> {
        Ok(TransactionSignature {
            address: self.address.parse()?,
            key_index: narrow(self.key_index, "key index")?,
            signature: self.signature,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionResponse {
    pub id: String,
    #[serde(with = "base64_vec")]
    pub script: Vec<u8>,
    #[serde(default, with = "base64_list")]
    pub arguments: Vec<Vec<u8>>,
    pub reference_block_id: String,
    #[serde(with = "u64_string")]
    pub gas_limit: u64,
    pub payer: String,
    pub proposal_key: ProposalKeyResponse,
    #[serde(default)]
    pub authorizers: Vec<String>,
    #[serde(default)]
    pub payload_signatures: Vec<SignatureResponse>,
    #[serde(default)]
    pub envelope_signatures: Vec<SignatureResponse>,
}

impl TransactionResponse {
    pub fn into_transaction(self) -> FlowResult<TransactionInfo> {
        let script = String::from_utf8(self.script)
            .map_err(|e| FlowError::parse_error(format!("Transaction {} script: {}", self.id, e)))?;
        let signatures = |list: Vec<SignatureResponse>| {
            list.into_iter()
                .map(SignatureResponse::into_signature)
                .collect::<FlowResult<Vec<_>>>()
        };

        Ok(TransactionInfo {
            script,
            arguments: self.arguments,
            reference_block_id: self.reference_block_id,
            gas_limit: self.gas_limit,
            payer: self.payer.parse()?,
            proposal_key: ProposalKey {
                address: self.proposal_key.address.parse()?,
                key_index: narrow(self.proposal_key.key_index, "key index")?,
                sequence_number: self.proposal_key.sequence_number,
            },
            authorizers: self
                .authorizers
                .iter()
                .map(|a| a.parse())
                .collect::<FlowResult<_>>()?,
            payload_signatures: signatures(self.payload_signatures)?,
            envelope_signatures: signatures(self.envelope_signatures)?,
            id: self.id,
        })
    }
}

fn base64_to_hex(value: &str) -> FlowResult<String> {
    Ok(hex::encode(STANDARD.decode(value)?))
}

fn narrow<T: TryFrom<u64>>(value: u64, what: &str) -> FlowResult<T> {
    T::try_from(value).map_err(|_| FlowError::parse_error(format!("{} out of range: {}", what, value)))
}

fn unsupported(what: &str, value: &str) -> FlowError {
    FlowError::parse_error(format!("Unsupported {}: {}", what, value))
}
