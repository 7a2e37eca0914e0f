//! Shared types for the Flow client
//!
//! Data structures that cross module boundaries: addresses, account and key
//! metadata, blocks, collections, events and transaction results.

use crate::crypto::{CurveType, HashAlgorithm};
use crate::encoding::{left_pad_bytes, ADDRESS_LENGTH};
use crate::error::{ErrorCode, FlowError, FlowResult};
use crate::tx::TransactionSignature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Address
// =============================================================================

/// An 8-byte Flow account address
///
/// Parsed from hex with or without `0x`; shorter input is left-padded with
/// zeros, longer input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Left-pad `bytes` to 8 bytes
    pub fn from_slice(bytes: &[u8]) -> FlowResult<Self> {
        let padded = left_pad_bytes(bytes, ADDRESS_LENGTH).map_err(|e| {
            FlowError::invalid_address(format!("Address longer than {} bytes", ADDRESS_LENGTH))
                .with_details(e.message)
        })?;
        let mut raw = [0u8; ADDRESS_LENGTH];
        raw.copy_from_slice(&padded);
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// 16 lowercase hex chars, no prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Address {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex_str = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_str.is_empty() {
            return Err(FlowError::invalid_address("Empty address"));
        }

        // Odd-length hex is a dropped leading zero
        let normalized = if hex_str.len() % 2 == 1 {
            format!("0{}", hex_str)
        } else {
            hex_str.to_string()
        };

        let bytes = hex::decode(&normalized)
            .map_err(|e| FlowError::invalid_address(format!("Invalid hex '{}': {}", s, e)))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: FlowError| serde::de::Error::custom(e.message))
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// The key that authorizes a transaction's sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalKey {
    pub address: Address,
    pub key_index: u32,
    pub sequence_number: u64,
}

/// One key registered on an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKey {
    pub index: u32,
    /// Raw X || Y hex
    pub public_key: String,
    pub sign_algo: CurveType,
    pub hash_algo: HashAlgorithm,
    pub weight: u32,
    pub sequence_number: u64,
    pub revoked: bool,
}

/// Account state as reported by an access node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    /// Balance in the smallest FLOW unit (10^-8)
    pub balance: u64,
    pub keys: Vec<AccountKey>,
    #[serde(default)]
    pub contracts: BTreeMap<String, String>,
}

impl Account {
    pub fn key(&self, key_index: u32) -> Option<&AccountKey> {
        self.keys.iter().find(|k| k.index == key_index)
    }

    /// Proposal key for `key_index` carrying the current on-chain sequence number
    pub fn proposal_key(&self, key_index: u32) -> FlowResult<ProposalKey> {
        let key = self.key(key_index).ok_or_else(|| {
            FlowError::invalid_input(format!("Account {} has no key {}", self.address, key_index))
        })?;

        if key.revoked {
            return Err(FlowError::invalid_input(format!(
                "Key {} of account {} is revoked",
                key_index, self.address
            )));
        }

        Ok(ProposalKey {
            address: self.address,
            key_index,
            sequence_number: key.sequence_number,
        })
    }
}

// =============================================================================
// Blocks and collections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionGuarantee {
    pub collection_id: String,
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSeal {
    pub block_id: String,
    pub execution_receipt_id: String,
    pub execution_receipt_signatures: Vec<String>,
    pub result_approval_signatures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub parent_id: String,
    pub height: u64,
    pub timestamp: DateTime<Utc>,
    pub collection_guarantees: Vec<CollectionGuarantee>,
    pub block_seals: Vec<BlockSeal>,
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub transaction_ids: Vec<String>,
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub transaction_id: String,
    pub transaction_index: u32,
    pub event_index: u32,
    /// JSON-Cadence encoded payload
    pub payload: Vec<u8>,
}

impl Event {
    pub fn payload_json(&self) -> FlowResult<serde_json::Value> {
        Ok(serde_json::from_slice(&self.payload)?)
    }
}

/// Events of one type in one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsResult {
    pub block_id: String,
    pub block_height: u64,
    pub block_timestamp: DateTime<Utc>,
    pub events: Vec<Event>,
}

// =============================================================================
// Transactions
// =============================================================================

/// A submitted transaction as stored by the access node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub id: String,
    pub script: String,
    pub arguments: Vec<Vec<u8>>,
    pub reference_block_id: String,
    pub gas_limit: u64,
    pub payer: Address,
    pub proposal_key: ProposalKey,
    pub authorizers: Vec<Address>,
    pub payload_signatures: Vec<TransactionSignature>,
    pub envelope_signatures: Vec<TransactionSignature>,
}

// =============================================================================
// Transaction results
// =============================================================================

/// Lifecycle status reported by the access node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[default]
    Unknown,
    Pending,
    Finalized,
    Executed,
    Sealed,
    Expired,
}

impl TransactionStatus {
    /// Polling stops at these
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sealed | Self::Expired)
    }

    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pending" => Self::Pending,
            "finalized" => Self::Finalized,
            "executed" => Self::Executed,
            "sealed" => Self::Sealed,
            "expired" => Self::Expired,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub status: TransactionStatus,
    /// Non-zero when execution failed
    pub status_code: u32,
    pub error_message: String,
    pub events: Vec<Event>,
    pub block_id: Option<String>,
}

impl TransactionResult {
    pub fn is_sealed(&self) -> bool {
        self.status == TransactionStatus::Sealed
    }

    pub fn is_error(&self) -> bool {
        self.status_code != 0 || !self.error_message.is_empty()
    }

    /// Turn an execution failure into an error; successful results pass through
    pub fn into_result(self) -> FlowResult<Self> {
        if self.is_error() {
            return Err(FlowError::new(ErrorCode::InvalidTransaction, "Transaction execution failed")
                .with_details(format!("status_code {}: {}", self.status_code, self.error_message)));
        }
        Ok(self)
    }
}

// =============================================================================
// Tests
// =============================================================================
