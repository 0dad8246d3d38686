//! keywallet - HD seed and key management
//!
//! This library provides the core functionality behind the keywallet CLI:
//! mnemonic generation and validation, BIP-32 hierarchical key derivation,
//! address encoding in several formats, and an encrypted named-seed keystore.

pub mod address;
pub mod crypto;
pub mod error;
pub mod keystore;

// Re-export commonly used types for convenience
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
