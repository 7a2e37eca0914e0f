//! Transaction Builder
//!
//! Collects transaction fields, then validates them once in [`build`].
//!
//! ```rust,ignore
//! let tx = TransactionBuilder::new()
//!     .script("transaction(amount: UFix64) { execute {} }")
//!     .argument(&CadenceValue::ufix64("1.0")?)
//!     .reference_block_id("f0e4c2f76c58916ec258f246851bea091d14d4247a2fc3e18694461b1816e13b")
//!     .proposal_key(account.proposal_key(0)?)
//!     .payer(account.address)
//!     .authorizer(account.address)
//!     .build()?;
//! ```
//!
//! [`build`]: TransactionBuilder::build

use super::transaction::Transaction;
use crate::cadence::CadenceValue;
use crate::error::{FlowError, FlowResult};
use crate::types::{Address, ProposalKey};

/// Default computation limit
pub const DEFAULT_GAS_LIMIT: u64 = 9999;

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    script: String,
    arguments: Vec<Vec<u8>>,
    reference_block_id: Option<String>,
    gas_limit: u64,
    proposal_key: Option<ProposalKey>,
    payer: Option<Address>,
    authorizers: Vec<Address>,
    address_aliases: Vec<(String, Address)>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self {
            script: String::new(),
            arguments: Vec::new(),
            reference_block_id: None,
            gas_limit: DEFAULT_GAS_LIMIT,
            proposal_key: None,
            payer: None,
            authorizers: Vec::new(),
            address_aliases: Vec::new(),
        }
    }
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    /// Append a JSON-Cadence argument
    pub fn argument(mut self, value: &CadenceValue) -> Self {
        self.arguments.push(value.to_bytes());
        self
    }

    /// Append an argument that is already encoded
    pub fn raw_argument(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.arguments.push(bytes.into());
        self
    }

    /// Hex block id, with or without `0x`
    pub fn reference_block_id(mut self, id: impl Into<String>) -> Self {
        self.reference_block_id = Some(id.into());
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn proposal_key(mut self, key: ProposalKey) -> Self {
        self.proposal_key = Some(key);
        self
    }

    pub fn proposer(self, address: Address, key_index: u32, sequence_number: u64) -> Self {
        self.proposal_key(ProposalKey {
            address,
            key_index,
            sequence_number,
        })
    }

    pub fn payer(mut self, address: Address) -> Self {
        self.payer = Some(address);
        self
    }

    pub fn authorizer(mut self, address: Address) -> Self {
        self.authorizers.push(address);
        self
    }

    pub fn authorizers(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.authorizers.extend(addresses);
        self
    }

    /// Replace `placeholder` in the script with `0x<address>` at build time
    pub fn address_alias(mut self, placeholder: impl Into<String>, address: Address) -> Self {
        self.address_aliases.push((placeholder.into(), address));
        self
    }

    pub fn build(self) -> FlowResult<Transaction> {
        if self.script.trim().is_empty() {
            return Err(FlowError::invalid_transaction("Script is empty"));
        }

        let block_hex = self
            .reference_block_id
            .ok_or_else(|| FlowError::invalid_transaction("Reference block id is required"))?;
        let reference_block_id = parse_block_id(&block_hex)?;

        let proposal_key = self
            .proposal_key
            .ok_or_else(|| FlowError::invalid_transaction("Proposal key is required"))?;
        let payer = self
            .payer
            .ok_or_else(|| FlowError::invalid_transaction("Payer is required"))?;

        let script = substitute_aliases(&self.script, &self.address_aliases);

        Ok(Transaction::new(
            script,
            self.arguments,
            reference_block_id,
            self.gas_limit,
            proposal_key,
            payer,
            self.authorizers,
        ))
    }
}

fn parse_block_id(hex_str: &str) -> FlowResult<[u8; 32]> {
    let trimmed = hex_str.trim();
    let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        FlowError::invalid_transaction(format!(
            "Reference block id must be 32 bytes, got {}",
            b.len()
        ))
    })
}

/// Replace each placeholder in `script` with its `0x` address
pub(crate) fn substitute_aliases(script: &str, aliases: &[(String, Address)]) -> String {
    aliases
        .iter()
        .fold(script.to_string(), |acc, (placeholder, address)| {
            acc.replace(placeholder.as_str(), &address.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const BLOCK_ID: &str = "f0e4c2f76c58916ec258f246851bea091d14d4247a2fc3e18694461b1816e13b";

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn base() -> TransactionBuilder {
        TransactionBuilder::new()
            .script("transaction {}")
            .reference_block_id(BLOCK_ID)
            .proposer(addr("01"), 0, 1)
            .payer(addr("01"))
    }

    #[test]
    fn test_defaults() {
        let tx = base().build().unwrap();
        assert_eq!(tx.gas_limit(), DEFAULT_GAS_LIMIT);
        assert!(tx.arguments().is_empty());
        assert!(tx.authorizers().is_empty());
        assert_eq!(hex::encode(tx.reference_block_id()), BLOCK_ID);
    }

    #[test]
    fn test_missing_fields() {
        let err = TransactionBuilder::new().script("x").build().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransaction);
        assert!(base().script("  ").build().is_err());
    }

    #[test]
    fn test_block_id_length_checked() {
        let err = base().reference_block_id("abcd").build().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransaction);
        let err = base().reference_block_id("zz").build().unwrap_err();
        assert_eq!(err.code, ErrorCode::HexError);
        assert!(base().reference_block_id(format!("0x{}", BLOCK_ID)).build().is_ok());
    }

    #[test]
    fn test_address_alias_substitution() {
        let tx = base()
            .script("import FungibleToken from 0xFUNGIBLE_TOKEN_ADDRESS\ntransaction {}")
            .address_alias("0xFUNGIBLE_TOKEN_ADDRESS", addr("ee82856bf20e2aa6"))
            .build()
            .unwrap();
        assert_eq!(
            tx.script(),
            "import FungibleToken from 0xee82856bf20e2aa6\ntransaction {}"
        );
    }

    #[test]
    fn test_arguments_preserve_order() {
        let tx = base()
            .argument(&CadenceValue::from("a"))
            .raw_argument(b"raw".to_vec())
            .argument(&CadenceValue::from(true))
            .build()
            .unwrap();
        assert_eq!(tx.arguments().len(), 3);
        assert_eq!(tx.arguments()[1], b"raw".to_vec());
        assert!(tx.arguments()[2].starts_with(br#"{"type":"Bool""#));
    }
}
