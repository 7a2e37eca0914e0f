//! JSON-Cadence values
//!
//! Transaction arguments travel as JSON-Cadence documents such as
//! `{"type":"UFix64","value":"10.00000000"}`. [`CadenceValue`] is the closed
//! set of value shapes; [`CadenceValue::to_bytes`] yields the argument bytes
//! that go into the transaction payload.

mod decode;
mod number;
mod value;

pub use number::NumberKind;
pub use value::{CadenceValue, CompositeKind, DictionaryEntry, Field};
