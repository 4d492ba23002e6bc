//! Argument and result helpers for the convenience node methods.
//!
//! Results stay opaque [`serde_json::Value`]s everywhere else; only the
//! hex-encoded quantities returned by `eth_blockNumber` / `eth_getBalance`
//! are decoded here.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ==============================================================================
// Block Identifiers
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Earliest,
    Latest,
    Pending,
}

impl BlockTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Earliest => "earliest",
            Self::Latest => "latest",
            Self::Pending => "pending",
        }
    }
}

/// Block selector passed as the trailing param of state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockId {
    Number(u64),
    Tag(BlockTag),
}

impl Default for BlockId {
    fn default() -> Self {
        Self::Tag(BlockTag::Latest)
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        Self::Tag(tag)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number:#x}"),
            Self::Tag(tag) => f.write_str(tag.as_str()),
        }
    }
}

impl From<BlockId> for serde_json::Value {
    fn from(block: BlockId) -> Self {
        serde_json::Value::String(block.to_string())
    }
}

impl FromStr for BlockId {
    type Err = CoreError;

    /// Accepts a tag name, a decimal block number, or a `0x` hex number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidBlock(s.to_owned());
        match s {
            "earliest" => return Ok(Self::Tag(BlockTag::Earliest)),
            "latest" => return Ok(Self::Tag(BlockTag::Latest)),
            "pending" => return Ok(Self::Tag(BlockTag::Pending)),
            _ => {}
        }

        let number = match strip_hex_prefix(s) {
            Some(digits) if is_hex_digits(digits) => {
                u64::from_str_radix(digits, 16).map_err(|_| invalid())?
            }
            None if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse::<u64>().map_err(|_| invalid())?
            }
            _ => return Err(invalid()),
        };
        Ok(Self::Number(number))
    }
}

// ==============================================================================
// Quantities
// ==============================================================================

/// Decode a `0x`-prefixed hex quantity such as `"0x1b4"`.
pub fn parse_quantity(value: &serde_json::Value) -> Result<u128, CoreError> {
    let invalid = || CoreError::InvalidQuantity(value.to_string());
    let text = value.as_str().ok_or_else(invalid)?;
    let digits = strip_hex_prefix(text).ok_or_else(invalid)?;
    if !is_hex_digits(digits) {
        return Err(invalid());
    }
    u128::from_str_radix(digits, 16).map_err(|_| invalid())
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

/// `from_str_radix` tolerates a leading sign; quantities never carry one.
fn is_hex_digits(digits: &str) -> bool {
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}
