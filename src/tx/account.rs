//! Account creation
//!
//! [`create_account`] prefills a [`TransactionBuilder`] with the account
//! creation script and its arguments. The caller still supplies the
//! reference block, proposer, payer and the authorizer that pays for the
//! new account.

use super::builder::TransactionBuilder;
use crate::cadence::{CadenceValue, DictionaryEntry};
use crate::crypto::{CurveType, HashAlgorithm, KeyPair};
use crate::encoding::{encode, RlpItem};
use crate::error::{FlowError, FlowResult};
use std::collections::BTreeMap;

/// Key weight that alone satisfies the signing threshold
pub const FULL_WEIGHT: u32 = 1000;

pub const CREATE_ACCOUNT_SCRIPT: &str = r#"transaction(publicKeys: [String], contracts: {String: String}) {
    prepare(signer: AuthAccount) {
        let account = AuthAccount(payer: signer)
        for key in publicKeys {
            account.addPublicKey(key.decodeHex())
        }
        for name in contracts.keys {
            account.contracts.add(name: name, code: contracts[name]!.decodeHex())
        }
    }
}"#;

/// A public key to register on a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountKey {
    pub public_key: Vec<u8>,
    pub sign_algo: CurveType,
    pub hash_algo: HashAlgorithm,
    pub weight: u32,
}

impl NewAccountKey {
    /// Full-weight key for `key`'s public half
    pub fn from_keypair(key: &KeyPair) -> Self {
        Self {
            public_key: key.public_key().to_vec(),
            sign_algo: key.curve(),
            hash_algo: key.hash_algorithm(),
            weight: FULL_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// RLP list `[public_key, sign_algo, hash_algo, weight]`
    pub fn encode(&self) -> Vec<u8> {
        encode(&RlpItem::list([
            RlpItem::bytes(self.public_key.clone()),
            RlpItem::uint(self.sign_algo.code()),
            RlpItem::uint(self.hash_algo.code()),
            RlpItem::uint(u64::from(self.weight)),
        ]))
    }
}

/// Builder carrying the account creation script for `keys` and `contracts`
///
/// `contracts` maps contract names to their Cadence source.
pub fn create_account(
    keys: &[NewAccountKey],
    contracts: &BTreeMap<String, String>,
) -> FlowResult<TransactionBuilder> {
    if keys.is_empty() {
        return Err(FlowError::invalid_input("A new account needs at least one key"));
    }
    if let Some(key) = keys.iter().find(|k| k.weight > FULL_WEIGHT) {
        return Err(FlowError::invalid_input(format!(
            "Key weight {} is above {}",
            key.weight, FULL_WEIGHT
        )));
    }

    let public_keys = CadenceValue::Array(
        keys.iter()
            .map(|k| CadenceValue::String(hex::encode(k.encode())))
            .collect(),
    );
    let contracts = CadenceValue::Dictionary(
        contracts
            .iter()
            .map(|(name, source)| DictionaryEntry {
                key: CadenceValue::String(name.clone()),
                value: CadenceValue::String(hex::encode(source)),
            })
            .collect(),
    );

    Ok(TransactionBuilder::new()
        .script(CREATE_ACCOUNT_SCRIPT)
        .argument(&public_keys)
        .argument(&contracts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode;
    use crate::error::ErrorCode;
    use crate::types::Address;
    use serde_json::Value;

    const BLOCK_ID: &str = "f0e4c2f76c58916ec258f246851bea091d14d4247a2fc3e18694461b1816e13b";

    fn key() -> NewAccountKey {
        NewAccountKey {
            public_key: vec![0x11; 64],
            sign_algo: CurveType::P256,
            hash_algo: HashAlgorithm::Sha3_256,
            weight: FULL_WEIGHT,
        }
    }

    #[test]
    fn test_account_key_encoding() {
        let encoded = key().encode();
        let item = decode(&encoded).unwrap();
        let fields = item.as_list().unwrap();

        assert_eq!(fields[0].as_bytes().unwrap(), &[0x11; 64][..]);
        assert_eq!(fields[1].as_u64(), Some(2));
        assert_eq!(fields[2].as_u64(), Some(3));
        assert_eq!(fields[3].as_u64(), Some(1000));
        // 71-byte list, then a 64-byte string header
        assert_eq!(&encoded[..4], &[0xf8, 0x47, 0xb8, 0x40]);
    }

    #[test]
    fn test_secp256k1_sha2_codes() {
        let key = NewAccountKey {
            sign_algo: CurveType::Secp256k1,
            hash_algo: HashAlgorithm::Sha2_256,
            ..key()
        }
        .with_weight(500);
        let item = decode(&key.encode()).unwrap();
        let fields = item.as_list().unwrap();

        assert_eq!(fields[1].as_u64(), Some(3));
        assert_eq!(fields[2].as_u64(), Some(1));
        assert_eq!(fields[3].as_u64(), Some(500));
    }

    #[test]
    fn test_create_account_arguments() {
        let mut contracts = BTreeMap::new();
        contracts.insert("Hello".to_string(), "pub contract Hello {}".to_string());

        let address: Address = "0xf8d6e0586b0a20c7".parse().unwrap();
        let tx = create_account(&[key()], &contracts)
            .unwrap()
            .reference_block_id(BLOCK_ID)
            .proposer(address, 0, 3)
            .payer(address)
            .authorizer(address)
            .build()
            .unwrap();

        assert_eq!(tx.script(), CREATE_ACCOUNT_SCRIPT);
        assert_eq!(tx.arguments().len(), 2);

        let keys: Value = serde_json::from_slice(&tx.arguments()[0]).unwrap();
        assert_eq!(keys["type"], "Array");
        assert_eq!(keys["value"][0]["type"], "String");
        assert_eq!(keys["value"][0]["value"], hex::encode(key().encode()));

        let contracts: Value = serde_json::from_slice(&tx.arguments()[1]).unwrap();
        assert_eq!(contracts["type"], "Dictionary");
        assert_eq!(contracts["value"][0]["key"]["value"], "Hello");
        assert_eq!(
            contracts["value"][0]["value"]["value"],
            hex::encode("pub contract Hello {}")
        );
    }

    #[test]
    fn test_create_account_needs_a_key() {
        let err = create_account(&[], &BTreeMap::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_overweight_key_rejected() {
        let err = create_account(&[key().with_weight(1001)], &BTreeMap::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_from_keypair_uses_full_weight() {
        let pair = KeyPair::generate(CurveType::Secp256k1).unwrap();
        let key = NewAccountKey::from_keypair(&pair);
        assert_eq!(key.public_key.len(), 64);
        assert_eq!(key.sign_algo, CurveType::Secp256k1);
        assert_eq!(key.weight, FULL_WEIGHT);
    }
}
