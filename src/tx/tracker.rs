//! Transaction Tracker
//!
//! Polls the access node until a submitted transaction reaches a terminal
//! status (`Sealed` or `Expired`). Polling stops early on timeout or when the
//! caller cancels.

use crate::api::AccessApi;
use crate::error::{ErrorCode, FlowError, FlowResult};
use crate::types::{TransactionResult, TransactionStatus};
use crate::{log_debug, log_info, log_warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared flag that stops a blocking poll loop
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    /// `None` waits forever
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelHandle>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: Some(DEFAULT_TIMEOUT),
            cancel: None,
        }
    }
}

impl PollConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelHandle::is_cancelled)
    }
}

/// One poll. A transaction the node has not indexed yet reads as `Unknown`.
fn poll_once<A: AccessApi + ?Sized>(api: &A, transaction_id: &str) -> FlowResult<TransactionResult> {
    match api.get_transaction_result(transaction_id) {
        Err(e) if e.code == ErrorCode::TransactionNotFound => Ok(TransactionResult::default()),
        other => other,
    }
}

fn log_terminal(transaction_id: &str, result: &TransactionResult) {
    if result.status == TransactionStatus::Expired {
        log_warn!("tracker", "Transaction expired", tx_id = transaction_id);
    } else if result.is_error() {
        log_warn!(
            "tracker",
            "Transaction sealed with error",
            tx_id = transaction_id,
            status_code = result.status_code
        );
    } else {
        log_info!("tracker", "Transaction sealed", tx_id = transaction_id);
    }
}

fn timeout_error(transaction_id: &str, timeout: Duration) -> FlowError {
    FlowError::timeout("Transaction was not sealed in time")
        .with_details(format!("{} after {:?}", transaction_id, timeout))
}

/// Block until `transaction_id` is sealed or expired
pub fn wait_for_seal<A: AccessApi + ?Sized>(
    api: &A,
    transaction_id: &str,
    config: &PollConfig,
) -> FlowResult<TransactionResult> {
    let deadline = config.timeout.map(|t| Instant::now() + t);

    loop {
        if config.is_cancelled() {
            return Err(FlowError::cancelled("Seal wait cancelled").with_details(transaction_id.to_string()));
        }

        let result = poll_once(api, transaction_id)?;
        log_debug!("tracker", "Polled transaction", tx_id = transaction_id, status = result.status);

        if result.status.is_terminal() {
            log_terminal(transaction_id, &result);
            return Ok(result);
        }

        let mut pause = config.interval;
        if let Some(deadline) = deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(timeout_error(transaction_id, config.timeout.unwrap_or_default()));
            }
            pause = pause.min(remaining);
        }
        std::thread::sleep(pause);
    }
}

/// Async form of [`wait_for_seal`]
///
/// Each poll runs on the blocking pool. On timeout, or when the future is
/// dropped, no further poll is started, but a request already in flight runs
/// to completion in the background and its result is discarded. The `cancel`
/// handle in `config` is checked before every poll.
pub async fn wait_for_seal_async<A: AccessApi + ?Sized + 'static>(
    api: Arc<A>,
    transaction_id: String,
    config: PollConfig,
) -> FlowResult<TransactionResult> {
    match config.timeout {
        Some(timeout) => tokio::time::timeout(timeout, poll_until_terminal(api, &transaction_id, &config))
            .await
            .map_err(|_| timeout_error(&transaction_id, timeout))?,
        None => poll_until_terminal(api, &transaction_id, &config).await,
    }
}

async fn poll_until_terminal<A: AccessApi + ?Sized + 'static>(
    api: Arc<A>,
    transaction_id: &str,
    config: &PollConfig,
) -> FlowResult<TransactionResult> {
    loop {
        if config.is_cancelled() {
            return Err(FlowError::cancelled("Seal wait cancelled").with_details(transaction_id.to_string()));
        }

        // The access client is blocking
        let task_api = Arc::clone(&api);
        let id = transaction_id.to_string();
        let result = tokio::task::spawn_blocking(move || poll_once(&*task_api, &id))
            .await
            .map_err(|e| FlowError::internal(format!("Poll task failed: {}", e)))??;

        log_debug!("tracker", "Polled transaction", tx_id = transaction_id, status = result.status);
        if result.status.is_terminal() {
            log_terminal(transaction_id, &result);
            return Ok(result);
        }
        tokio::time::sleep(config.interval).await;
    }
}
