//! Mnemonic phrase generation and handling

use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};

use crate::error::{Error, Result};

/// Entropy sizes (in bytes) accepted by BIP-39
const VALID_ENTROPY_SIZES: &[usize] = &[16, 20, 24, 28, 32];

/// Default entropy size in bytes (24 words)
pub const DEFAULT_ENTROPY_SIZE: usize = 32;

/// Generate cryptographically random entropy of the given size in bytes
pub fn generate_entropy(size: usize) -> Result<Vec<u8>> {
    if !VALID_ENTROPY_SIZES.contains(&size) {
        return Err(Error::InvalidInput(format!(
            "entropy size must be one of {:?} bytes, got {}",
            VALID_ENTROPY_SIZES, size
        )));
    }
    let mut entropy = vec![0u8; size];
    OsRng.fill_bytes(&mut entropy);
    Ok(entropy)
}

/// Encode entropy as a BIP-39 mnemonic phrase
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String> {
    let mnemonic = Mnemonic::from_entropy(entropy)
        .map_err(|e| Error::Mnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Generate a new random mnemonic phrase from `size` bytes of entropy
pub fn generate_mnemonic(size: usize) -> Result<String> {
    let entropy = generate_entropy(size)?;
    entropy_to_mnemonic(&entropy)
}

/// Validate a mnemonic phrase
pub fn validate_mnemonic(phrase: &str) -> Result<()> {
    Mnemonic::parse_normalized(phrase)
        .map(|_| ())
        .map_err(|e| Error::Mnemonic(e.to_string()))
}

/// Generate a seed from a mnemonic phrase and optional passphrase
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Result<Vec<u8>> {
    let mnemonic = Mnemonic::parse_normalized(phrase)
        .map_err(|e| Error::Mnemonic(e.to_string()))?;

    let seed = mnemonic.to_seed(passphrase.unwrap_or(""));
    Ok(seed.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_mnemonic() {
        let mnemonic = generate_mnemonic(16).unwrap();
        validate_mnemonic(&mnemonic).unwrap();

        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), 12);

        let mnemonic = generate_mnemonic(32).unwrap();
        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), 24);
    }

    #[test]
    fn test_invalid_entropy_size() {
        assert!(generate_entropy(15).is_err());
        assert!(generate_entropy(0).is_err());
        assert!(generate_entropy(64).is_err());
    }

    #[test]
    fn test_validate_mnemonic() {
        let invalid = "invalid mnemonic phrase test test test test test test test test test";

        assert!(validate_mnemonic(TEST_MNEMONIC).is_ok());
        assert!(validate_mnemonic(invalid).is_err());
    }

    #[test]
    fn test_mnemonic_to_seed() {
        let seed = mnemonic_to_seed(TEST_MNEMONIC, None).unwrap();
        assert_eq!(seed.len(), 64); // BIP39 seeds are 512 bits (64 bytes)
        assert_eq!(
            hex::encode(&seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let plain = mnemonic_to_seed(TEST_MNEMONIC, None).unwrap();
        let custom = mnemonic_to_seed(TEST_MNEMONIC, Some("TREZOR")).unwrap();
        assert_ne!(plain, custom);
    }
}
