//! BIP-32 extended private keys

use std::fmt;

use hmac::{Hmac, Mac};
use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256, Sha512};

use super::path::{DerivationPath, HARDENED_OFFSET};
use crate::address::pk_hash;
use crate::error::{Error, Result};

/// Serialization version bytes for mainnet extended private keys
const XPRV_VERSION: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
/// Serialization version bytes for mainnet extended public keys
const XPUB_VERSION: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// An extended private key with its chain code and position in the tree
#[derive(Clone)]
pub struct ExtendedKey {
    secret_key: SecretKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

impl ExtendedKey {
    /// Derive the master key from a seed
    pub fn master(seed: &[u8]) -> Result<Self> {
        let mut hmac = <Hmac<Sha512> as Mac>::new_from_slice(b"Bitcoin seed")
            .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

        hmac.update(seed);
        let result = hmac.finalize().into_bytes();

        let secret_key = SecretKey::from_slice(&result[0..32])
            .map_err(|e| Error::KeyDerivation(format!("Invalid master key: {}", e)))?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&result[32..64]);

        Ok(Self {
            secret_key,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    /// Derive a child key at the given index
    ///
    /// Indexes at or above [`HARDENED_OFFSET`] use hardened derivation.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let secp = Secp256k1::new();

        let mut data = Vec::with_capacity(37);
        if index >= HARDENED_OFFSET {
            // Hardened derivation
            data.push(0);
            data.extend_from_slice(&self.secret_key.secret_bytes());
        } else {
            // Normal derivation
            let public_key = Secp256k1PublicKey::from_secret_key(&secp, &self.secret_key);
            data.extend_from_slice(&public_key.serialize());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let mut hmac = <Hmac<Sha512> as Mac>::new_from_slice(&self.chain_code)
            .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;
        hmac.update(&data);
        let result = hmac.finalize().into_bytes();

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&result[32..64]);

        // Add the parent key to the child key (mod n)
        let child_secret_key = SecretKey::from_slice(&result[0..32])
            .map_err(|e| Error::KeyDerivation(format!("Invalid child key: {}", e)))?;
        let child_secret_key = child_secret_key
            .add_tweak(&self.secret_key.into())
            .map_err(|e| Error::KeyDerivation(format!("Key addition error: {}", e)))?;

        let depth = self
            .depth
            .checked_add(1)
            .ok_or_else(|| Error::KeyDerivation("Derivation path too deep".to_string()))?;

        Ok(Self {
            secret_key: child_secret_key,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: index,
        })
    }

    /// Derive a key along a full path
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut key = self.clone();
        for component in path.components() {
            key = key.derive_child(*component)?;
        }
        Ok(key)
    }

    /// The secp256k1 public key for this extended key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        let secp = Secp256k1::new();
        Secp256k1PublicKey::from_secret_key(&secp, &self.secret_key)
    }

    /// The raw private key bytes
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret_key.secret_bytes()
    }

    /// First four bytes of the HASH160 of the public key
    fn fingerprint(&self) -> [u8; 4] {
        let hash = pk_hash(&self.public_key());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Serialize as a Base58Check `xprv` string
    pub fn to_xprv(&self) -> String {
        let mut key_data = [0u8; 33];
        key_data[1..].copy_from_slice(&self.secret_key.secret_bytes());
        self.serialize(XPRV_VERSION, &key_data)
    }

    /// Serialize the neutered (public-only) key as a Base58Check `xpub` string
    pub fn to_xpub(&self) -> String {
        self.serialize(XPUB_VERSION, &self.public_key().serialize())
    }

    fn serialize(&self, version: [u8; 4], key_data: &[u8; 33]) -> String {
        let mut data = Vec::with_capacity(82);
        data.extend_from_slice(&version);
        data.push(self.depth);
        data.extend_from_slice(&self.parent_fingerprint);
        data.extend_from_slice(&self.child_number.to_be_bytes());
        data.extend_from_slice(&self.chain_code);
        data.extend_from_slice(key_data);

        // Base58Check: append the first four bytes of a double SHA-256
        let checksum = Sha256::digest(Sha256::digest(&data));
        data.extend_from_slice(&checksum[0..4]);

        bs58::encode(data).into_string()
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_xprv())
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose key material through Debug
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-32 test vector 1
    const SEED_HEX: &str = "000102030405060708090a0b0c0d0e0f";

    fn master() -> ExtendedKey {
        ExtendedKey::master(&hex::decode(SEED_HEX).unwrap()).unwrap()
    }

    #[test]
    fn test_master_key_serialization() {
        let key = master();
        assert_eq!(
            key.to_xprv(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
        );
        assert_eq!(
            key.to_xpub(),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );
    }

    #[test]
    fn test_hardened_child() {
        let key = master().derive_child(HARDENED_OFFSET).unwrap();
        assert_eq!(
            key.to_xprv(),
            "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
        );
        assert_eq!(
            key.to_xpub(),
            "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw"
        );
    }

    #[test]
    fn test_derive_path() {
        let path: DerivationPath = "m/0'/1".parse().unwrap();
        let key = master().derive_path(&path).unwrap();
        assert_eq!(
            key.to_xprv(),
            "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs"
        );
    }

    #[test]
    fn test_display_matches_xprv() {
        let key = master();
        assert_eq!(key.to_string(), key.to_xprv());
    }

    #[test]
    fn test_debug_hides_key_material() {
        let key = master();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(&hex::encode(key.secret_bytes())));
    }
}
