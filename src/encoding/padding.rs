//! Fixed-width zero padding.
//!
//! Left and right padding produce structurally different messages, so the two
//! are never interchangeable: addresses are left-padded, domain tags are
//! right-padded. Over-length input is rejected rather than truncated.

use crate::error::{FlowError, FlowResult};

/// Width of a Flow account address in raw bytes
pub const ADDRESS_LENGTH: usize = 8;

/// Width of a padded domain tag in raw bytes
pub const DOMAIN_TAG_LENGTH: usize = 32;

/// Left pads a byte slice with zeros to `width`.
pub fn left_pad_bytes(bytes: &[u8], width: usize) -> FlowResult<Vec<u8>> {
    let pad = pad_count(bytes, width)?;
    let mut padded = vec![0u8; pad];
    padded.extend_from_slice(bytes);
    Ok(padded)
}

/// Right pads a byte slice with zeros to `width`.
pub fn right_pad_bytes(bytes: &[u8], width: usize) -> FlowResult<Vec<u8>> {
    let pad = pad_count(bytes, width)?;
    let mut padded = bytes.to_vec();
    padded.resize(bytes.len() + pad, 0);
    Ok(padded)
}

fn pad_count(bytes: &[u8], width: usize) -> FlowResult<usize> {
    width.checked_sub(bytes.len()).ok_or_else(|| {
        FlowError::invalid_input(format!(
            "Cannot pad {} bytes to width {}",
            bytes.len(),
            width
        ))
    })
}
