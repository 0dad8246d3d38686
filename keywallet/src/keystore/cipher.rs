//! Sealing and opening of stored seeds
//!
//! A seed phrase is encrypted with AES-256-GCM under a key derived from the
//! user's password with scrypt. The salt, nonce, ciphertext and tag are kept
//! as hex strings so the keystore file stays readable JSON.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use scrypt::password_hash::SaltString;
use scrypt::Params;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// A password-encrypted seed phrase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedSeed {
    pub iv: String,
    pub content: String,
    pub tag: String,
    pub salt: String,
    pub created_at: String,
}

fn derive_key(password: &str, salt: &str) -> Result<Zeroizing<Vec<u8>>> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| Error::Keystore(format!("invalid scrypt parameters: {}", e)))?;
    let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
    scrypt::scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut key)
        .map_err(|e| Error::Keystore(format!("key derivation failed: {}", e)))?;
    Ok(key)
}

/// Encrypt a seed phrase under a password
pub fn seal(plaintext: &str, password: &str) -> Result<SealedSeed> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let key = derive_key(password, salt.as_str())?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| Error::Keystore(format!("cipher init failed: {}", e)))?;

    let mut iv = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    let nonce = Nonce::from_slice(&iv);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| Error::Keystore(format!("encryption failed: {:?}", e)))?;

    let tag_start = ciphertext.len() - TAG_LEN;
    Ok(SealedSeed {
        iv: hex::encode(iv),
        content: hex::encode(&ciphertext[..tag_start]),
        tag: hex::encode(&ciphertext[tag_start..]),
        salt: salt.as_str().to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Decrypt a sealed seed phrase
///
/// A wrong password fails GCM authentication and is reported as a keystore
/// error, indistinguishable from a corrupted entry.
pub fn open(sealed: &SealedSeed, password: &str) -> Result<Zeroizing<String>> {
    let key = derive_key(password, &sealed.salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| Error::Keystore(format!("cipher init failed: {}", e)))?;

    let iv = hex::decode(&sealed.iv)
        .map_err(|e| Error::Keystore(format!("corrupted entry: {}", e)))?;
    if iv.len() != NONCE_LEN {
        return Err(Error::Keystore(format!(
            "corrupted entry: nonce is {} bytes, expected {}",
            iv.len(),
            NONCE_LEN
        )));
    }
    let nonce = Nonce::from_slice(&iv);

    let mut ciphertext = hex::decode(&sealed.content)
        .map_err(|e| Error::Keystore(format!("corrupted entry: {}", e)))?;
    let tag = hex::decode(&sealed.tag)
        .map_err(|e| Error::Keystore(format!("corrupted entry: {}", e)))?;
    if tag.len() != TAG_LEN {
        return Err(Error::Keystore(format!(
            "corrupted entry: tag is {} bytes, expected {}",
            tag.len(),
            TAG_LEN
        )));
    }
    ciphertext.extend_from_slice(&tag);

    let mut plaintext = cipher.decrypt(nonce, ciphertext.as_ref()).map_err(|_| {
        Error::Keystore("decryption failed: invalid password or corrupted keystore".to_string())
    })?;

    let phrase = std::str::from_utf8(&plaintext)
        .map_err(|e| Error::Keystore(format!("corrupted entry: {}", e)))?
        .to_string();
    plaintext.zeroize();
    Ok(Zeroizing::new(phrase))
}
