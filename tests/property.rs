use flow_client::crypto::{sign, verify, SIGNATURE_LENGTH};
use flow_client::encoding::{decode, encode, left_pad_bytes, right_pad_bytes};
use flow_client::tx::{collate, SignerIndex};
use flow_client::{Address, CurveType, HashAlgorithm, KeyPair, RlpItem, TransactionSignature};
use proptest::prelude::*;

fn any_rlp_item() -> impl Strategy<Value = RlpItem> {
    let leaf = prop::collection::vec(any::<u8>(), 0..80).prop_map(RlpItem::Bytes);
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop::collection::vec(inner, 0..8).prop_map(RlpItem::List)
    })
}

fn any_address() -> impl Strategy<Value = Address> {
    prop::array::uniform8(0u8..4).prop_map(Address::from_bytes)
}

fn any_curve() -> impl Strategy<Value = CurveType> {
    prop_oneof![Just(CurveType::P256), Just(CurveType::Secp256k1)]
}

proptest! {
    #[test]
    fn padding_keeps_input_at_the_right_end(bytes in prop::collection::vec(any::<u8>(), 0..32), extra in 0usize..16) {
        let width = bytes.len() + extra;

        let left = left_pad_bytes(&bytes, width).unwrap();
        prop_assert_eq!(left.len(), width);
        prop_assert!(left[..extra].iter().all(|b| *b == 0));
        prop_assert_eq!(&left[extra..], &bytes[..]);

        let right = right_pad_bytes(&bytes, width).unwrap();
        prop_assert_eq!(right.len(), width);
        prop_assert_eq!(&right[..bytes.len()], &bytes[..]);
        prop_assert!(right[bytes.len()..].iter().all(|b| *b == 0));
    }

    #[test]
    fn padding_rejects_over_length(bytes in prop::collection::vec(any::<u8>(), 1..40)) {
        prop_assert!(left_pad_bytes(&bytes, bytes.len() - 1).is_err());
        prop_assert!(right_pad_bytes(&bytes, bytes.len() - 1).is_err());
    }

    #[test]
    fn rlp_decode_inverts_encode(item in any_rlp_item()) {
        let encoded = encode(&item);
        prop_assert_eq!(decode(&encoded).unwrap(), item);
    }

    #[test]
    fn short_address_hex_is_left_padded(value in any::<u32>()) {
        let parsed: Address = format!("{:x}", value).parse().unwrap();
        let mut expected = [0u8; 8];
        expected[4..].copy_from_slice(&value.to_be_bytes());
        prop_assert_eq!(parsed, Address::from_bytes(expected));
        prop_assert_eq!(parsed.to_string().parse::<Address>().unwrap(), parsed);
    }

    #[test]
    fn proposer_always_takes_index_zero(
        proposer in any_address(),
        signers in prop::collection::vec(any_address(), 0..12),
    ) {
        let signatures: Vec<_> = signers
            .iter()
            .map(|address| TransactionSignature { address: *address, key_index: 0, signature: vec![1; 64] })
            .collect();

        let index = SignerIndex::from_signatures(proposer, &signatures);
        prop_assert_eq!(index.index_of(&proposer), Some(0));
        let mut seen = index.addresses().to_vec();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), index.len());

        let collated = collate(proposer, &signatures);
        prop_assert_eq!(collated.len(), signatures.len());
        for (c, s) in collated.iter().zip(&signatures) {
            prop_assert_eq!(Some(c.signer_index), index.index_of(&s.address));
            prop_assert_eq!(c.signer_index == 0, s.address == proposer);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn signatures_are_fixed_width_and_verify(
        curve in any_curve(),
        sha2 in any::<bool>(),
        message in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let hash = if sha2 { HashAlgorithm::Sha2_256 } else { HashAlgorithm::Sha3_256 };
        let key = KeyPair::generate(curve).unwrap().with_hash_algorithm(hash);

        let signature = sign(&message, &key).unwrap();
        prop_assert_eq!(signature.len(), SIGNATURE_LENGTH);
        prop_assert!(verify(key.public_key(), &message, &signature, curve, hash).unwrap());

        let mut tampered = message.clone();
        tampered.push(0);
        prop_assert!(!verify(key.public_key(), &tampered, &signature, curve, hash).unwrap());
    }
}
