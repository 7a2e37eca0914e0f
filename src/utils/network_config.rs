//! Access node configuration
//!
//! Resolves which Access REST endpoint to talk to and validates it:
//! - known networks map to their public endpoints
//! - custom URLs must parse and use HTTPS unless they point at loopback
//! - `FLOW_ACCESS_URL` overrides the endpoint from the environment

use crate::error::{FlowError, FlowResult};
use std::time::Duration;
use url::Url;

/// Environment variable holding an Access REST base URL
pub const ACCESS_URL_ENV: &str = "FLOW_ACCESS_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_USER_AGENT: &str = concat!("flow-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    /// Local emulator REST port
    Emulator,
    Custom(String),
}

impl Network {
    pub fn endpoint(&self) -> &str {
        match self {
            Network::Mainnet => "https://rest-mainnet.onflow.org",
            Network::Testnet => "https://rest-testnet.onflow.org",
            Network::Emulator => "http://127.0.0.1:8888",
            Network::Custom(url) => url,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            "emulator" | "local" => Network::Emulator,
            _ => Network::Custom(name.to_string()),
        }
    }
}

/// Validation result for an endpoint URL
#[derive(Debug, Clone, Default)]
pub struct EndpointValidation {
    pub is_valid: bool,
    pub url: Option<Url>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl EndpointValidation {
    fn into_result(self) -> FlowResult<Url> {
        match (self.is_valid, self.url) {
            (true, Some(url)) => Ok(url),
            _ => Err(FlowError::invalid_input("Invalid access endpoint")
                .with_details(self.errors.join("; "))),
        }
    }
}

/// Validate an Access REST endpoint URL
pub fn validate_endpoint(raw: &str) -> EndpointValidation {
    let mut result = EndpointValidation::default();

    let parsed = match Url::parse(raw.trim()) {
        Ok(u) => u,
        Err(e) => {
            result.errors.push(format!("Invalid URL format: {}", e));
            return result;
        }
    };

    match parsed.scheme() {
        "https" => {}
        "http" if is_loopback(&parsed) => {
            result.warnings.push("HTTP allowed for local development only".to_string());
        }
        "http" => result.errors.push("HTTPS required for remote endpoints".to_string()),
        other => result.errors.push(format!("Unsupported scheme: {}", other)),
    }

    if !parsed.username().is_empty() || parsed.password().is_some() {
        result.warnings.push("URL contains credentials".to_string());
    }
    if parsed.query().is_some() {
        result.warnings.push("Query string will be ignored".to_string());
    }

    result.is_valid = result.errors.is_empty();
    result.url = Some(parsed);
    result
}

fn is_loopback(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost") | Some("127.0.0.1") | Some("[::1]") | Some("::1"))
}

/// Settings for talking to one access node
#[derive(Debug, Clone)]
pub struct AccessConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl AccessConfig {
    pub fn new(network: &Network) -> FlowResult<Self> {
        let base_url = validate_endpoint(network.endpoint()).into_result()?;
        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Use `FLOW_ACCESS_URL` when set, otherwise `fallback`
    pub fn from_env(fallback: &Network) -> FlowResult<Self> {
        match std::env::var(ACCESS_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(&Network::Custom(url)),
            _ => Self::new(fallback),
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `base_url` joined with a `/v1/...` path
    pub fn endpoint(&self, path: &str) -> FlowResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_networks_are_valid() {
        for network in [Network::Mainnet, Network::Testnet, Network::Emulator] {
            assert!(AccessConfig::new(&network).is_ok(), "{:?}", network);
        }
    }

    #[test]
    fn test_http_remote_rejected() {
        let v = validate_endpoint("http://access.example.com");
        assert!(!v.is_valid);
        assert!(v.errors[0].contains("HTTPS"));
    }

    #[test]
    fn test_localhost_http_allowed_with_warning() {
        let v = validate_endpoint("http://localhost:8888");
        assert!(v.is_valid);
        assert_eq!(v.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_url() {
        let err = AccessConfig::new(&Network::Custom("not a url".into())).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidInput);
    }

    #[test]
    fn test_endpoint_join() {
        let config = AccessConfig::new(&Network::Custom("https://node.example.com/api/".into())).unwrap();
        assert_eq!(
            config.endpoint("/v1/blocks").unwrap().as_str(),
            "https://node.example.com/api/v1/blocks"
        );
    }

    #[test]
    fn test_network_from_name() {
        assert_eq!(Network::from_name("Mainnet"), Network::Mainnet);
        assert_eq!(Network::from_name("local"), Network::Emulator);
        assert!(matches!(Network::from_name("https://x"), Network::Custom(_)));
    }
}
