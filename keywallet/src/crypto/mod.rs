//! Cryptographic primitives and operations
//!
//! This module provides functionality for mnemonic generation, entropy
//! handling, and hierarchical key derivation.

pub mod keys;
pub mod mnemonic;

pub use keys::*;
pub use mnemonic::*;
