//! Parsing JSON-Cadence documents returned by scripts and events

use super::number::NumberKind;
use super::value::{CadenceValue, CompositeKind, DictionaryEntry, Field};
use crate::error::{FlowError, FlowResult};
use serde_json::Value;

impl CadenceValue {
    pub fn from_slice(bytes: &[u8]) -> FlowResult<Self> {
        let json: Value = serde_json::from_slice(bytes)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &Value) -> FlowResult<Self> {
        let type_name = json
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing \"type\""))?;
        let value = json.get("value").unwrap_or(&Value::Null);

        if let Some(kind) = NumberKind::from_type_name(type_name) {
            return CadenceValue::number(kind, expect_str(value)?);
        }
        if let Some(kind) = CompositeKind::from_type_name(type_name) {
            let id = expect_str(field(value, "id")?)?.to_string();
            let fields = expect_array(field(value, "fields")?)?
                .iter()
                .map(|f| {
                    Ok(Field {
                        name: expect_str(field(f, "name")?)?.to_string(),
                        value: Self::from_json(field(f, "value")?)?,
                    })
                })
                .collect::<FlowResult<_>>()?;
            return Ok(Self::Composite { kind, id, fields });
        }

        let parsed = match type_name {
            "Void" => Self::Void,
            "Optional" if value.is_null() => Self::Optional(None),
            "Optional" => Self::Optional(Some(Box::new(Self::from_json(value)?))),
            "Bool" => Self::Bool(value.as_bool().ok_or_else(|| malformed("Bool value"))?),
            "String" => Self::String(expect_str(value)?.to_string()),
            "Character" => Self::Character(expect_str(value)?.to_string()),
            "Address" => Self::Address(expect_str(value)?.parse()?),
            "Array" => Self::Array(
                expect_array(value)?
                    .iter()
                    .map(Self::from_json)
                    .collect::<FlowResult<_>>()?,
            ),
            "Dictionary" => Self::Dictionary(
                expect_array(value)?
                    .iter()
                    .map(|e| {
                        Ok(DictionaryEntry {
                            key: Self::from_json(field(e, "key")?)?,
                            value: Self::from_json(field(e, "value")?)?,
                        })
                    })
                    .collect::<FlowResult<_>>()?,
            ),
            "Path" => Self::Path {
                domain: expect_str(field(value, "domain")?)?.to_string(),
                identifier: expect_str(field(value, "identifier")?)?.to_string(),
            },
            "Capability" => Self::Capability {
                path: Box::new(Self::from_json(field(value, "path")?)?),
                address: expect_str(field(value, "address")?)?.parse()?,
                borrow_type: expect_str(field(value, "borrowType")?)?.to_string(),
            },
            "Type" => Self::Type {
                static_type: expect_str(field(value, "staticType")?)?.to_string(),
            },
            other => return Err(malformed(&format!("unknown type \"{}\"", other))),
        };
        Ok(parsed)
    }
}

fn field<'a>(value: &'a Value, name: &str) -> FlowResult<&'a Value> {
    value
        .get(name)
        .ok_or_else(|| malformed(&format!("missing \"{}\"", name)))
}

fn expect_str(value: &Value) -> FlowResult<&str> {
    value.as_str().ok_or_else(|| malformed("expected string"))
}

fn expect_array(value: &Value) -> FlowResult<&Vec<Value>> {
    value.as_array().ok_or_else(|| malformed("expected array"))
}

fn malformed(msg: &str) -> FlowError {
    FlowError::parse_error(format!("Malformed JSON-Cadence: {}", msg))
}
