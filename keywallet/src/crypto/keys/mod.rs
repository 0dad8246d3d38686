//! Hierarchical deterministic key derivation
//!
//! This module provides BIP-32 extended keys and derivation paths.

mod extended;
mod path;

pub use extended::*;
pub use path::*;
