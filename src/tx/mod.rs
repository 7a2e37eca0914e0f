//! Transaction Module
//!
//! Builds, signs, submits and tracks Flow transactions, including the
//! account creation template.

mod account;
mod broadcaster;
mod builder;
mod collator;
mod domain;
mod signer;
mod tracker;
mod transaction;

pub use account::*;
pub use broadcaster::*;
pub use builder::*;
pub use collator::*;
pub use domain::*;
pub use signer::*;
pub use tracker::*;
pub use transaction::*;
