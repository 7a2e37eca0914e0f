//! Canonical Encoding
//!
//! Byte-level building blocks shared by every signed Flow message:
//! - `rlp`: recursive-length-prefix encoding of nested byte-string lists
//! - `padding`: fixed-width zero padding for addresses and domain tags

pub mod padding;
pub mod rlp;

pub use padding::*;
pub use rlp::{decode, encode, RlpError, RlpItem};
