//! Digest algorithms for account keys

use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Sha3_256};

/// Hash algorithm bound to an account key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA2_256")]
    Sha2_256,
    #[default]
    #[serde(rename = "SHA3_256")]
    Sha3_256,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha2_256 => "SHA2_256",
            Self::Sha3_256 => "SHA3_256",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "SHA2_256" | "SHA256" => Some(Self::Sha2_256),
            "SHA3_256" => Some(Self::Sha3_256),
            _ => None,
        }
    }

    /// Numeric code used in encoded account keys
    pub fn code(&self) -> u64 {
        match self {
            Self::Sha2_256 => 1,
            Self::Sha3_256 => 3,
        }
    }

    /// Hash `data` to a 32-byte digest
    pub fn digest(&self, data: &[u8]) -> [u8; 32] {
        match self {
            Self::Sha2_256 => Sha256::digest(data).into(),
            Self::Sha3_256 => Sha3_256::digest(data).into(),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_empty() {
        assert_eq!(
            hex::encode(HashAlgorithm::Sha3_256.digest(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_sha2_abc() {
        assert_eq!(
            hex::encode(HashAlgorithm::Sha2_256.digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_default_is_sha3() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha3_256);
        assert_eq!(HashAlgorithm::from_name("sha2-256"), Some(HashAlgorithm::Sha2_256));
    }
}
