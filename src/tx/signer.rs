//! Transaction Signer
//!
//! A [`Signer`] turns a domain-tagged message into signature bytes. The
//! in-memory [`LocalSigner`] hashes and signs with a [`KeyPair`]; remote or
//! hardware signers implement the same trait.

use crate::crypto::KeyPair;
use crate::error::FlowResult;
use std::sync::Arc;

pub trait Signer: Send + Sync {
    /// Sign `message`, which already carries its domain tag
    fn sign(&self, message: &[u8]) -> FlowResult<Vec<u8>>;
}

/// Signs with a key held in memory
#[derive(Debug, Clone)]
pub struct LocalSigner {
    key: KeyPair,
}

impl LocalSigner {
    pub fn new(key: KeyPair) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &KeyPair {
        &self.key
    }
}

impl Signer for LocalSigner {
    fn sign(&self, message: &[u8]) -> FlowResult<Vec<u8>> {
        Ok(self.key.sign(message)?.to_vec())
    }
}

impl<S: Signer + ?Sized> Signer for &S {
    fn sign(&self, message: &[u8]) -> FlowResult<Vec<u8>> {
        (**self).sign(message)
    }
}

impl<S: Signer + ?Sized> Signer for Box<S> {
    fn sign(&self, message: &[u8]) -> FlowResult<Vec<u8>> {
        (**self).sign(message)
    }
}

impl<S: Signer + ?Sized> Signer for Arc<S> {
    fn sign(&self, message: &[u8]) -> FlowResult<Vec<u8>> {
        (**self).sign(message)
    }
}
