//! Tests for end-to-end key derivation and address encoding

use keywallet::address;
use keywallet::crypto::keys::{DerivationPath, ExtendedKey};
use keywallet::crypto::mnemonic::mnemonic_to_seed;

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn derive(path: &str) -> ExtendedKey {
    let seed = mnemonic_to_seed(TEST_MNEMONIC, None).unwrap();
    let path: DerivationPath = path.parse().unwrap();
    ExtendedKey::master(&seed).unwrap().derive_path(&path).unwrap()
}

#[test]
fn test_ethereum_address_derivation() {
    let key = derive("m/44'/60'/0'/0/0");
    let address = address::ethereum_address(&key.public_key());
    assert_eq!(address, "0x9858effd232b4033e47d90003d41ec34ecaeda94");
}

#[test]
fn test_bitcoin_address_derivation() {
    let key = derive("m/44'/0'/0'/0/0");
    let address = address::base58_address(&key.public_key(), 0x00);
    assert_eq!(address, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
}

#[test]
fn test_bech32_address_derivation() {
    let key = derive("m/44'/138'/0'/0/0");
    let address = address::bech32_address(&key.public_key(), 0x00).unwrap();
    assert!(address.starts_with("kw1"));
    assert!(bech32::decode(&address).is_ok());
}

#[test]
fn test_custom_passphrase_changes_keys() {
    let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();

    let plain = mnemonic_to_seed(TEST_MNEMONIC, None).unwrap();
    let custom = mnemonic_to_seed(TEST_MNEMONIC, Some("secret")).unwrap();

    let plain_key = ExtendedKey::master(&plain).unwrap().derive_path(&path).unwrap();
    let custom_key = ExtendedKey::master(&custom).unwrap().derive_path(&path).unwrap();

    assert_ne!(plain_key.secret_bytes(), custom_key.secret_bytes());
}

#[test]
fn test_phrase_path_derivation() {
    let seed = mnemonic_to_seed(TEST_MNEMONIC, None).unwrap();
    let master = ExtendedKey::master(&seed).unwrap();

    let a = master.derive_path(&DerivationPath::from_phrase("orbit lantern")).unwrap();
    let b = master.derive_path(&DerivationPath::from_phrase("orbit lantern")).unwrap();
    let c = master.derive_path(&DerivationPath::from_phrase("orbit beacon")).unwrap();

    assert_eq!(a.secret_bytes(), b.secret_bytes());
    assert_ne!(a.secret_bytes(), c.secret_bytes());
}
