//! Access API
//!
//! [`AccessApi`] is everything the client needs from an access node. The
//! transaction core only depends on the trait, so tests and alternative
//! transports can stand in for [`HttpAccessClient`].

mod http;
mod wire;

pub use http::HttpAccessClient;

use crate::cadence::CadenceValue;
use crate::error::FlowResult;
use crate::tx::SignedTransaction;
use crate::types::{
    Account, Address, Block, Collection, EventsResult, TransactionInfo, TransactionResult,
};
use std::sync::Arc;

pub trait AccessApi: Send + Sync {
    /// Check that the node is reachable
    fn ping(&self) -> FlowResult<()>;

    fn get_account(&self, address: &Address) -> FlowResult<Account>;

    /// Latest sealed block, or latest finalized one when `sealed` is false
    fn get_latest_block(&self, sealed: bool) -> FlowResult<Block>;

    fn get_block_by_id(&self, id: &str) -> FlowResult<Block>;

    fn get_block_by_height(&self, height: u64) -> FlowResult<Block>;

    fn get_collection(&self, id: &str) -> FlowResult<Collection>;

    /// Run a read-only script against the latest sealed block
    fn execute_script(&self, script: &str, arguments: &[Vec<u8>]) -> FlowResult<CadenceValue>;

    /// Submit a transaction, returning its id as hex
    fn send_transaction(&self, transaction: &SignedTransaction) -> FlowResult<String>;

    /// The transaction as submitted, signatures included
    fn get_transaction(&self, transaction_id: &str) -> FlowResult<TransactionInfo>;

    fn get_transaction_result(&self, transaction_id: &str) -> FlowResult<TransactionResult>;

    /// Events of `event_type` in blocks `start_height..=end_height`
    fn get_events_for_height_range(
        &self,
        event_type: &str,
        start_height: u64,
        end_height: u64,
    ) -> FlowResult<Vec<EventsResult>>;
}

macro_rules! forward_access_api {
    ($($ptr:ty),*) => {$(
        impl<T: AccessApi + ?Sized> AccessApi for $ptr {
            fn ping(&self) -> FlowResult<()> {
                (**self).ping()
            }
            fn get_account(&self, address: &Address) -> FlowResult<Account> {
                (**self).get_account(address)
            }
            fn get_latest_block(&self, sealed: bool) -> FlowResult<Block> {
                (**self).get_latest_block(sealed)
            }
            fn get_block_by_id(&self, id: &str) -> FlowResult<Block> {
                (**self).get_block_by_id(id)
            }
            fn get_block_by_height(&self, height: u64) -> FlowResult<Block> {
                (**self).get_block_by_height(height)
            }
            fn get_collection(&self, id: &str) -> FlowResult<Collection> {
                (**self).get_collection(id)
            }
            fn execute_script(&self, script: &str, arguments: &[Vec<u8>]) -> FlowResult<CadenceValue> {
                (**self).execute_script(script, arguments)
            }
            fn send_transaction(&self, transaction: &SignedTransaction) -> FlowResult<String> {
                (**self).send_transaction(transaction)
            }
            fn get_transaction(&self, transaction_id: &str) -> FlowResult<TransactionInfo> {
                (**self).get_transaction(transaction_id)
            }
            fn get_transaction_result(&self, transaction_id: &str) -> FlowResult<TransactionResult> {
                (**self).get_transaction_result(transaction_id)
            }
            fn get_events_for_height_range(
                &self,
                event_type: &str,
                start_height: u64,
                end_height: u64,
            ) -> FlowResult<Vec<EventsResult>> {
                (**self).get_events_for_height_range(event_type, start_height, end_height)
            }
        }
    )*};
}

forward_access_api!(&T, Box<T>, Arc<T>);
