//! The `CadenceValue` enum and its JSON encoding

use super::number::NumberKind;
use crate::error::FlowResult;
use crate::types::Address;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Struct,
    Resource,
    Event,
    Contract,
    Enum,
}

impl CompositeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Struct => "Struct",
            Self::Resource => "Resource",
            Self::Event => "Event",
            Self::Contract => "Contract",
            Self::Enum => "Enum",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Struct" => Some(Self::Struct),
            "Resource" => Some(Self::Resource),
            "Event" => Some(Self::Event),
            "Contract" => Some(Self::Contract),
            "Enum" => Some(Self::Enum),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: CadenceValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub key: CadenceValue,
    pub value: CadenceValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CadenceValue {
    Void,
    Optional(Option<Box<CadenceValue>>),
    Bool(bool),
    String(String),
    Character(String),
    Address(Address),
    Number { kind: NumberKind, value: String },
    Array(Vec<CadenceValue>),
    Dictionary(Vec<DictionaryEntry>),
    Path { domain: String, identifier: String },
    Capability { path: Box<CadenceValue>, address: Address, borrow_type: String },
    Composite { kind: CompositeKind, id: String, fields: Vec<Field> },
    Type { static_type: String },
}

impl CadenceValue {
    /// A number of `kind`, validated and normalized
    pub fn number(kind: NumberKind, literal: impl ToString) -> FlowResult<Self> {
        let value = kind.normalize(&literal.to_string())?;
        Ok(Self::Number { kind, value })
    }

    pub fn ufix64(literal: &str) -> FlowResult<Self> {
        Self::number(NumberKind::UFix64, literal)
    }

    pub fn optional(value: Option<CadenceValue>) -> Self {
        Self::Optional(value.map(Box::new))
    }

    pub fn path(domain: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::Path {
            domain: domain.into(),
            identifier: identifier.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Optional(_) => "Optional",
            Self::Bool(_) => "Bool",
            Self::String(_) => "String",
            Self::Character(_) => "Character",
            Self::Address(_) => "Address",
            Self::Number { kind, .. } => kind.type_name(),
            Self::Array(_) => "Array",
            Self::Dictionary(_) => "Dictionary",
            Self::Path { .. } => "Path",
            Self::Capability { .. } => "Capability",
            Self::Composite { kind, .. } => kind.type_name(),
            Self::Type { .. } => "Type",
        }
    }

    pub fn to_json(&self) -> Value {
        let value = match self {
            Self::Void => return json!({ "type": "Void" }),
            Self::Optional(inner) => inner.as_ref().map_or(Value::Null, |v| v.to_json()),
            Self::Bool(b) => json!(b),
            Self::String(s) | Self::Character(s) => json!(s),
            Self::Address(a) => json!(a.to_string()),
            Self::Number { value, .. } => json!(value),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Dictionary(entries) => Value::Array(
                entries
                    .iter()
                    .map(|e| json!({ "key": e.key.to_json(), "value": e.value.to_json() }))
                    .collect(),
            ),
            Self::Path { domain, identifier } => {
                json!({ "domain": domain, "identifier": identifier })
            }
            Self::Capability { path, address, borrow_type } => json!({
                "path": path.to_json(),
                "address": address.to_string(),
                "borrowType": borrow_type,
            }),
            Self::Composite { id, fields, .. } => json!({
                "id": id,
                "fields": fields
                    .iter()
                    .map(|f| json!({ "name": f.name, "value": f.value.to_json() }))
                    .collect::<Vec<_>>(),
            }),
            Self::Type { static_type } => json!({ "staticType": static_type }),
        };
        json!({ "type": self.type_name(), "value": value })
    }

    /// Argument bytes as they appear in the transaction payload
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_json().to_string().into_bytes()
    }
}

impl From<bool> for CadenceValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for CadenceValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for CadenceValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Address> for CadenceValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl From<$ty> for CadenceValue {
                fn from(n: $ty) -> Self {
                    Self::Number { kind: NumberKind::$kind, value: n.to_string() }
                }
            }
        )*
    };
}

impl_from_int!(
    i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64, i128 => Int128,
    u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64, u128 => UInt128,
);

impl<T: Into<CadenceValue>> From<Vec<T>> for CadenceValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}
