//! Structured logging with redaction
//!
//! Lines go to stderr as
//! `[timestamp] LEVEL [module] message | key=value ...`.
//!
//! Field values are redacted by key name:
//! - private keys and signatures are hidden entirely
//! - addresses keep a short prefix and suffix
//! - transaction and block ids are shortened

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

pub fn disable_debug() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Structured log entry
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, redacted according to its key
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let redacted = redact_field(key, &value.to_string());
        self.fields.push((key, redacted));
        self
    }

    /// Render without timestamp
    pub fn render(&self) -> String {
        let mut line = format!("{} [{}] {}", self.level, self.module, self.message);
        if !self.fields.is_empty() {
            let fields = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" | ");
            line.push_str(&fields);
        }
        line
    }

    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        eprintln!("[{}] {}", timestamp, self.render());
    }
}

const SECRET_KEYS: &[&str] = &["private", "secret", "signature"];
const ADDRESS_KEYS: &[&str] = &["address", "proposer", "payer", "authorizer", "signer"];
const ID_KEYS: &[&str] = &["tx_id", "txid", "transaction_id", "block_id", "id", "hash"];

fn redact_field(key: &str, value: &str) -> String {
    let key = key.to_lowercase();
    let matches = |list: &[&str]| list.iter().any(|k| key.contains(k));

    // "signer_index" is a small integer, not key material
    if key.ends_with("_index") || key.ends_with("_count") {
        value.to_string()
    } else if matches(SECRET_KEYS) {
        redact_secret(value)
    } else if matches(ADDRESS_KEYS) {
        shorten(value, 6, 4)
    } else if matches(ID_KEYS) {
        shorten(value, 10, 6)
    } else {
        value.to_string()
    }
}

fn redact_secret(value: &str) -> String {
    if value.is_empty() {
        "[EMPTY]".to_string()
    } else {
        format!("[REDACTED:{}chars]", value.len())
    }
}

/// Keep `head` chars after any `0x` and the last `tail` chars
fn shorten(value: &str, head: usize, tail: usize) -> String {
    let value = value.trim();
    let prefix_len = if value.starts_with("0x") { head + 2 } else { head };
    if value.len() <= prefix_len + tail + 3 || !value.is_ascii() {
        return value.to_string();
    }
    format!("{}...{}", &value[..prefix_len], &value[value.len() - tail..])
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::$level,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// `log_debug!("module", "message", key = value, ...)`
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log_at!(Debug, $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log_at!(Info, $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log_at!(Warn, $($arg)*) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log_at!(Error, $($arg)*) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_hidden() {
        assert_eq!(redact_field("private_key", "abcd"), "[REDACTED:4chars]");
        assert_eq!(redact_field("signature", &"ff".repeat(64)), "[REDACTED:128chars]");
        assert_eq!(redact_field("secret", ""), "[EMPTY]");
    }

    #[test]
    fn test_addresses_shortened() {
        assert_eq!(redact_field("payer", "0xf8d6e0586b0a20c7"), "0xf8d6e0...20c7");
        assert_eq!(redact_field("address", "f8d6e0586b0a20c7"), "f8d6e0...20c7");
        assert_eq!(redact_field("proposer", "0x01"), "0x01");
    }

    #[test]
    fn test_ids_shortened() {
        let id = "f0e4c2f76c58916ec258f246851bea091d14d4247a2fc3e18694461b1816e13b";
        assert_eq!(redact_field("tx_id", id), "f0e4c2f76c...16e13b");
    }

    #[test]
    fn test_index_fields_untouched() {
        assert_eq!(redact_field("signer_index", "2"), "2");
        assert_eq!(redact_field("signature_count", "3"), "3");
        assert_eq!(redact_field("gas_limit", "9999"), "9999");
    }

    #[test]
    fn test_render() {
        let entry = LogEntry::new(LogLevel::Info, "tx", "submitted")
            .field("gas_limit", 9999)
            .field("private_key", "deadbeef");
        assert_eq!(
            entry.render(),
            "INFO [tx] submitted | gas_limit=9999 private_key=[REDACTED:8chars]"
        );
    }
}
