//! Access REST API client
//!
//! Blocking `reqwest` client for the `/v1` REST endpoints. Remote errors are
//! mapped to [`FlowError`] once; nothing is retried.
//!
//! Address aliases registered with [`HttpAccessClient::with_address_alias`]
//! are substituted into scripts before they are executed.

use super::wire::*;
use super::AccessApi;
use crate::cadence::CadenceValue;
use crate::error::{ErrorCode, FlowError, FlowResult};
use crate::tx::{substitute_aliases, SignedTransaction};
use crate::types::*;
use crate::utils::network_config::AccessConfig;
use crate::{log_debug, log_info, log_warn};
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub struct HttpAccessClient {
    client: Client,
    config: AccessConfig,
    address_aliases: Vec<(String, Address)>,
}

impl HttpAccessClient {
    pub fn new(config: AccessConfig) -> FlowResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FlowError::network_error(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config,
            address_aliases: Vec::new(),
        })
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Replace `placeholder` with `address` in every executed script
    pub fn with_address_alias(mut self, placeholder: impl Into<String>, address: Address) -> Self {
        self.address_aliases.push((placeholder.into(), address));
        self
    }

    pub fn address_aliases(&self) -> &[(String, Address)] {
        &self.address_aliases
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> FlowResult<T> {
        let url = self.config.endpoint(path)?;
        log_debug!("access", "GET", path = path);
        self.execute(path, self.client.get(url).query(query))
    }

    fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> FlowResult<T> {
        let url = self.config.endpoint(path)?;
        log_debug!("access", "POST", path = path);
        self.execute(path, self.client.post(url).query(query).json(body))
    }

    fn execute<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> FlowResult<T> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        let code = match status {
            StatusCode::NOT_FOUND if path.starts_with("/v1/transaction") => {
                ErrorCode::TransactionNotFound
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => ErrorCode::InvalidInput,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ErrorCode::Timeout,
            _ => ErrorCode::NetworkError,
        };

        log_warn!("access", "Request failed", path = path, status = status.as_u16());
        Err(FlowError::new(code, format!("Access node returned {}", status.as_u16()))
            .with_details(message))
    }

    fn single_block(&self, blocks: Vec<BlockResponse>) -> FlowResult<Block> {
        blocks
            .into_iter()
            .next()
            .ok_or_else(|| FlowError::new(ErrorCode::ParseError, "Empty block response"))?
            .into_block()
    }
}

fn expand_payload() -> (&'static str, String) {
    ("expand", "payload".to_string())
}

impl AccessApi for HttpAccessClient {
    fn ping(&self) -> FlowResult<()> {
        let _: serde_json::Value = self.get("/v1/network/parameters", &[])?;
        Ok(())
    }

    fn get_account(&self, address: &Address) -> FlowResult<Account> {
        let response: AccountResponse = self.get(
            &format!("/v1/accounts/{}", address.to_hex()),
            &[
                ("block_height", "sealed".to_string()),
                ("expand", "keys,contracts".to_string()),
            ],
        )?;
        response.into_account()
    }

    fn get_latest_block(&self, sealed: bool) -> FlowResult<Block> {
        let height = if sealed { "sealed" } else { "final" };
        let blocks = self.get("/v1/blocks", &[("height", height.to_string()), expand_payload()])?;
        self.single_block(blocks)
    }

    fn get_block_by_id(&self, id: &str) -> FlowResult<Block> {
        let blocks = self.get(&format!("/v1/blocks/{}", id), &[expand_payload()])?;
        self.single_block(blocks)
    }

    fn get_block_by_height(&self, height: u64) -> FlowResult<Block> {
        let blocks = self.get("/v1/blocks", &[("height", height.to_string()), expand_payload()])?;
        self.single_block(blocks)
    }

    fn get_collection(&self, id: &str) -> FlowResult<Collection> {
        let response: CollectionResponse = self.get(&format!("/v1/collections/{}", id), &[])?;
        Ok(response.into_collection())
    }

    fn execute_script(&self, script: &str, arguments: &[Vec<u8>]) -> FlowResult<CadenceValue> {
        let body = ScriptBody {
            script: substitute_aliases(script, &self.address_aliases).into_bytes(),
            arguments: arguments.to_vec(),
        };
        // The response is a JSON string holding base64 JSON-Cadence
        let encoded: String = self.post("/v1/scripts", &[("block_height", "sealed".to_string())], &body)?;
        CadenceValue::from_slice(&STANDARD.decode(encoded)?)
    }

    fn send_transaction(&self, transaction: &SignedTransaction) -> FlowResult<String> {
        let body = TransactionBody::from(transaction);
        let response: IdResponse = self
            .post("/v1/transactions", &[], &body)
            .map_err(|e| FlowError { code: ErrorCode::BroadcastFailed, ..e })?;

        log_info!("access", "Transaction submitted", tx_id = response.id);
        Ok(response.id)
    }

    fn get_transaction(&self, transaction_id: &str) -> FlowResult<TransactionInfo> {
        let response: TransactionResponse =
            self.get(&format!("/v1/transactions/{}", transaction_id), &[])?;
        response.into_transaction()
    }

    fn get_transaction_result(&self, transaction_id: &str) -> FlowResult<TransactionResult> {
        let response: TransactionResultResponse =
            self.get(&format!("/v1/transaction_results/{}", transaction_id), &[])?;
        response.into_result()
    }

    fn get_events_for_height_range(
        &self,
        event_type: &str,
        start_height: u64,
        end_height: u64,
    ) -> FlowResult<Vec<EventsResult>> {
        if start_height > end_height {
            return Err(FlowError::invalid_input(format!(
                "start height {} is above end height {}",
                start_height, end_height
            )));
        }
        let results: Vec<EventsResultResponse> = self.get(
            "/v1/events",
            &[
                ("type", event_type.to_string()),
                ("start_height", start_height.to_string()),
                ("end_height", end_height.to_string()),
            ],
        )?;
        results.into_iter().map(EventsResultResponse::into_events_result).collect()
    }
}
