//! Token identification
//!
//! A token is a 20-byte address plus its decimal precision. The native chain
//! currency is represented by the conventional 0xEeee...EEeE sentinel address
//! so it can travel through the same code paths as any other token.

use crate::errors::RequestError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel address for the native chain currency.
pub const NATIVE_TOKEN_ADDRESS: [u8; 20] = [0xEE; 20];

/// A token reference: address plus decimal precision.
///
/// Equality, ordering and hashing consider the address only; `decimals` is
/// carried metadata used by venue pricing (precision scaling), not identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Token {
    address: [u8; 20],
    decimals: u8,
}

impl Token {
    pub const fn new(address: [u8; 20], decimals: u8) -> Self {
        Self { address, decimals }
    }

    /// The native chain currency (18 decimals).
    pub const fn native() -> Self {
        Self {
            address: NATIVE_TOKEN_ADDRESS,
            decimals: 18,
        }
    }

    /// Parse a token from a `0x`-prefixed or bare hex address.
    pub fn from_hex(s: &str, decimals: u8) -> Result<Self, RequestError> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw)
            .map_err(|_| RequestError::InvalidAddress(s.to_string()))?;
        let address: [u8; 20] = bytes
            .try_into()
            .map_err(|_| RequestError::InvalidAddress(s.to_string()))?;
        Ok(Self { address, decimals })
    }

    pub const fn address(&self) -> [u8; 20] {
        self.address
    }

    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_native(&self) -> bool {
        self.address == NATIVE_TOKEN_ADDRESS
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.address.cmp(&other.address)
    }
}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.address))
    }
}
