//! Error types for the keywallet library

use thiserror::Error;

/// Custom error type for keywallet operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Address error: {0}")]
    Address(String),

    #[error("seed {0:?} was not found")]
    SeedNotFound(String),

    #[error("Keystore error: {0}")]
    Keystore(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for keywallet operations
pub type Result<T> = std::result::Result<T, Error>;
