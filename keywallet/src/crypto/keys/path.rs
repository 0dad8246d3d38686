//! BIP-32 derivation paths

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Offset marking a path component as hardened
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Number of components a hashed phrase path expands to
const PHRASE_PATH_DEPTH: usize = 5;

/// A parsed BIP-32 derivation path
///
/// Paths are written as `m / purpose' / coin_type' / account' / change /
/// address_index`, a trailing `'` marking a hardened component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The path components, hardened components offset by [`HARDENED_OFFSET`]
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Derive a path from an arbitrary phrase instead of a `m/...` string
    ///
    /// The phrase is hashed with SHA-256 and the digest is split into five
    /// 31-bit non-hardened components. The same phrase always yields the
    /// same path.
    pub fn from_phrase(phrase: &str) -> Self {
        let digest = Sha256::digest(phrase.as_bytes());
        let components = digest
            .chunks(4)
            .take(PHRASE_PATH_DEPTH)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]) & !HARDENED_OFFSET)
            .collect();
        Self(components)
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        let rest = path
            .strip_prefix('m')
            .ok_or_else(|| Error::KeyDerivation(format!("Invalid derivation path: {}", path)))?;

        if rest.is_empty() {
            return Ok(Self(Vec::new()));
        }
        let rest = rest
            .strip_prefix('/')
            .ok_or_else(|| Error::KeyDerivation(format!("Invalid derivation path: {}", path)))?;

        let mut result = Vec::new();
        for component in rest.split('/') {
            let hardened = component.ends_with('\'');
            let digits = component.trim_end_matches('\'');
            let index = digits.parse::<u32>().map_err(|_| {
                Error::KeyDerivation(format!("Invalid derivation path component: {}", component))
            })?;
            if index >= HARDENED_OFFSET {
                return Err(Error::KeyDerivation(format!(
                    "Derivation path component out of range: {}",
                    component
                )));
            }
            result.push(if hardened { HARDENED_OFFSET + index } else { index });
        }

        Ok(Self(result))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for component in &self.0 {
            if *component >= HARDENED_OFFSET {
                write!(f, "/{}'", component - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", component)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bip44_path() {
        let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
        assert_eq!(
            path.components(),
            &[
                HARDENED_OFFSET + 44,
                HARDENED_OFFSET + 60,
                HARDENED_OFFSET,
                0,
                0
            ]
        );
    }

    #[test]
    fn test_parse_master_only() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.components().is_empty());
    }

    #[test]
    fn test_parse_invalid_paths() {
        assert!("44'/0'".parse::<DerivationPath>().is_err());
        assert!("m/abc".parse::<DerivationPath>().is_err());
        assert!("m//0".parse::<DerivationPath>().is_err());
        assert!("m/2147483648".parse::<DerivationPath>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let text = "m/44'/138'/0'/0/7";
        let path: DerivationPath = text.parse().unwrap();
        assert_eq!(path.to_string(), text);
    }

    #[test]
    fn test_phrase_path_is_deterministic() {
        let a = DerivationPath::from_phrase("castle ship bridge");
        let b = DerivationPath::from_phrase("castle ship bridge");
        let c = DerivationPath::from_phrase("castle ship harbor");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.components().len(), 5);
        assert!(a.components().iter().all(|c| *c < HARDENED_OFFSET));
    }
}
