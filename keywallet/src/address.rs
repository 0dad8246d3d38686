//! Address encoding
//!
//! Public keys can be rendered as Base58Check addresses with a network ID
//! byte, Bech32 addresses, or Ethereum-style hex addresses.

use bech32::{ToBase32, Variant};
use ripemd::Ripemd160;
use secp256k1::PublicKey;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::error::{Error, Result};

/// Human-readable part of Bech32 addresses
pub const BECH32_HRP: &str = "kw";

/// HASH160 of a public key: RIPEMD160(SHA256(compressed key))
pub fn pk_hash(public_key: &PublicKey) -> [u8; 20] {
    let sha = Sha256::digest(public_key.serialize());
    Ripemd160::digest(sha).into()
}

/// Base58Check address: network ID byte, HASH160, double-SHA256 checksum
pub fn base58_address(public_key: &PublicKey, network_id: u8) -> String {
    let hash = pk_hash(public_key);

    let mut data = Vec::with_capacity(25);
    data.push(network_id);
    data.extend_from_slice(&hash);

    let checksum = Sha256::digest(Sha256::digest(&data));
    data.extend_from_slice(&checksum[0..4]);

    bs58::encode(data).into_string()
}

/// Bech32 address over the network ID byte and the HASH160 of the key
pub fn bech32_address(public_key: &PublicKey, network_id: u8) -> Result<String> {
    let hash = pk_hash(public_key);

    let mut data = Vec::with_capacity(21);
    data.push(network_id);
    data.extend_from_slice(&hash);

    bech32::encode(BECH32_HRP, data.to_base32(), Variant::Bech32)
        .map_err(|e| Error::Address(format!("Bech32 encoding failed: {}", e)))
}

/// Ethereum-style address: last 20 bytes of the Keccak-256 of the key body
pub fn ethereum_address(public_key: &PublicKey) -> String {
    let uncompressed = public_key.serialize_uncompressed();

    // Skip the 0x04 prefix byte and hash the remaining 64 bytes
    let hash = Keccak256::digest(&uncompressed[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Content-addressed identity of a public key
///
/// Base58 encoding of the SHA-256 of the compressed key. Printed alongside
/// every derived address as a format-independent way to refer to the key.
pub fn key_id(public_key: &PublicKey) -> String {
    let digest = Sha256::digest(public_key.serialize());
    bs58::encode(digest).into_string()
}

/// Parse a network ID byte from a hex flag value such as `0x0` or `6f`
///
/// Anything that does not decode to exactly one byte is rejected.
pub fn parse_network_id(input: &str) -> Result<u8> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.is_empty() || digits.len() > 2 {
        return Err(Error::InvalidInput(format!(
            "invalid network ID {:?}: expected one hex byte",
            input
        )));
    }

    // Allow a single digit, as in the default "0x0"
    let padded = if digits.len() == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(&padded)
        .map_err(|e| Error::InvalidInput(format!("invalid network ID {:?}: {}", input, e)))?;
    Ok(bytes[0])
}
