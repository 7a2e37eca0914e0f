//! Flow Client Core Library
//!
//! Builds, signs and submits transactions for the Flow blockchain.
//!
//! # Architecture
//!
//! This crate provides:
//! - **encoding**: RLP and fixed-width padding for canonical forms
//! - **crypto**: ECDSA P-256 / secp256k1 keys, SHA2-256 / SHA3-256 hashing
//! - **tx**: Transaction building, multi-party signing, submission, sealing poll
//! - **cadence**: Cadence JSON argument values
//! - **api**: Access API trait and its REST client
//! - **message_signer**: User-message and account-proof signatures
//!
//! # Signing discipline
//!
//! Authorizers that are neither proposer nor payer sign the payload first.
//! The payer signs the envelope last, over the payload and every collected
//! payload signature. Adding a payload signature after an envelope signature
//! is rejected with [`ErrorCode::SigningOrder`].
//!
//! # Example
//!
//! ```rust,ignore
//! use flow_client::{CurveType, KeyPair, LocalSigner, TransactionBuilder};
//!
//! let key = KeyPair::generate(CurveType::P256)?;
//! let signer = LocalSigner::new(key);
//! let address = "0xf8d6e0586b0a20c7".parse()?;
//!
//! let mut tx = TransactionBuilder::new()
//!     .script("transaction { execute { log(\"hi\") } }")
//!     .reference_block_id(block_id)
//!     .proposer(address, 0, sequence_number)
//!     .payer(address)
//!     .authorizer(address)
//!     .build()?;
//! tx.add_envelope_signature(address, 0, &signer)?;
//! let signed = tx.finalize()?;
//! ```

pub mod api;
pub mod cadence;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod message_signer;
pub mod serde_bytes;
pub mod tx;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use error::{ErrorCode, FlowError, FlowResult};
pub use types::*;

pub use api::{AccessApi, HttpAccessClient};
pub use cadence::{CadenceValue, NumberKind};
pub use crypto::{CurveType, HashAlgorithm, KeyPair};
pub use encoding::{RlpError, RlpItem};
pub use message_signer::{
    account_proof_message, sign_account_proof, sign_user_message, verify_user_message,
    AccountProofSignature, MessageSignature,
};
pub use tx::{
    create_account, send_and_wait, submit, wait_for_seal, wait_for_seal_async, CancelHandle,
    DomainTag, LocalSigner, NewAccountKey, PollConfig, SignedTransaction, Signer, Transaction,
    TransactionBuilder, TransactionSignature,
};
pub use utils::{AccessConfig, Network};
