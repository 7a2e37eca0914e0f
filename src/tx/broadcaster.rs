//! Transaction Broadcaster
//!
//! Hands a signed transaction to the access node and, optionally, waits for
//! it to seal. Execution failures (non-zero `status_code`) are not errors at
//! this level: they reach the continuation inside the result.

use super::tracker::{wait_for_seal, PollConfig};
use super::transaction::SignedTransaction;
use crate::api::AccessApi;
use crate::error::FlowResult;
use crate::types::TransactionResult;
use crate::{log_error, log_info};

/// Submit and return the transaction id
pub fn submit<A: AccessApi + ?Sized>(api: &A, transaction: &SignedTransaction) -> FlowResult<String> {
    log_info!(
        "broadcaster",
        "Submitting transaction",
        proposer = transaction.proposal_key().address,
        payer = transaction.payer(),
        payload_signature_count = transaction.payload_signatures().len(),
        envelope_signature_count = transaction.envelope_signatures().len()
    );

    api.send_transaction(transaction).map_err(|e| {
        log_error!("broadcaster", "Submission failed", error = e);
        e
    })
}

/// Submit, wait for a terminal status and pass the result to `continuation`
pub fn send_and_wait<A, F, R>(
    api: &A,
    transaction: &SignedTransaction,
    config: &PollConfig,
    continuation: F,
) -> FlowResult<R>
where
    A: AccessApi + ?Sized,
    F: FnOnce(TransactionResult) -> R,
{
    let transaction_id = submit(api, transaction)?;
    let result = wait_for_seal(api, &transaction_id, config)?;
    Ok(continuation(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadence::CadenceValue;
    use crate::error::{ErrorCode, FlowError};
    use crate::tx::{Signer, TransactionBuilder};
    use crate::types::*;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedSigner;

    impl Signer for FixedSigner {
        fn sign(&self, _: &[u8]) -> FlowResult<Vec<u8>> {
            Ok(vec![1; 64])
        }
    }

    /// Accepts any transaction and reports it sealed with a stale sequence number
    #[derive(Default)]
    struct StaleSequenceApi {
        submitted: Mutex<Vec<String>>,
        reject: bool,
    }

    impl AccessApi for StaleSequenceApi {
        fn ping(&self) -> FlowResult<()> {
            Ok(())
        }
        fn get_account(&self, _: &Address) -> FlowResult<Account> {
            unimplemented!()
        }
        fn get_latest_block(&self, _: bool) -> FlowResult<Block> {
            unimplemented!()
        }
        fn get_block_by_id(&self, _: &str) -> FlowResult<Block> {
            unimplemented!()
        }
        fn get_block_by_height(&self, _: u64) -> FlowResult<Block> {
            unimplemented!()
        }
        fn get_collection(&self, _: &str) -> FlowResult<Collection> {
            unimplemented!()
        }
        fn execute_script(&self, _: &str, _: &[Vec<u8>]) -> FlowResult<CadenceValue> {
            unimplemented!()
        }
        fn get_transaction(&self, _: &str) -> FlowResult<TransactionInfo> {
            unimplemented!()
        }
        fn send_transaction(&self, tx: &SignedTransaction) -> FlowResult<String> {
            if self.reject {
                return Err(FlowError::broadcast_failed("rejected"));
            }
            self.submitted.lock().unwrap().push(tx.script().to_string());
            Ok("cd".repeat(32))
        }
        fn get_transaction_result(&self, _: &str) -> FlowResult<TransactionResult> {
            Ok(TransactionResult {
                status: TransactionStatus::Sealed,
                status_code: 1,
                error_message: "invalid proposal key: sequence number mismatch".into(),
                ..Default::default()
            })
        }
        fn get_events_for_height_range(&self, _: &str, _: u64, _: u64) -> FlowResult<Vec<EventsResult>> {
            unimplemented!()
        }
    }

    fn signed() -> SignedTransaction {
        let address: Address = "01".parse().unwrap();
        let mut tx = TransactionBuilder::new()
            .script("transaction {}")
            .reference_block_id("00".repeat(32))
            .proposer(address, 0, 0)
            .payer(address)
            .authorizer(address)
            .build()
            .unwrap();
        tx.add_envelope_signature(address, 0, &FixedSigner).unwrap();
        tx.finalize().unwrap()
    }

    #[test]
    fn test_execution_error_reaches_continuation() {
        let api = StaleSequenceApi::default();
        let config = PollConfig::default().with_interval(Duration::from_millis(1));

        let status_code = send_and_wait(&api, &signed(), &config, |result| result.status_code).unwrap();

        assert_eq!(status_code, 1);
        assert_eq!(api.submitted.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_submission_failure_propagates() {
        let api = StaleSequenceApi {
            reject: true,
            ..Default::default()
        };
        let err = submit(&api, &signed()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BroadcastFailed);
    }
}
