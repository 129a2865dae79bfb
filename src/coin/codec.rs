/**
* filename : codec
* author : HAMA
* date: 2025. 4. 7.
* description: hex wire format <-> native numbers
**/

use crate::types::AppError;
use primitive_types::U256;

fn strip_hex_prefix(s: &str) -> Result<&str, AppError> {
  let digits = s
    .strip_prefix("0x")
    .or_else(|| s.strip_prefix("0X"))
    .ok_or_else(|| AppError::Decode(format!("missing 0x prefix: {:?}", s)))?;

  if digits.is_empty() {
    return Err(AppError::Decode(format!("no hex digits: {:?}", s)));
  }
  if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
    return Err(AppError::Decode(format!("invalid hex digits: {:?}", s)));
  }
  Ok(digits)
}

/// Formats a height as an RPC parameter, e.g. `2760283` -> `"0x2a1e5b"`.
pub fn height_to_hex_param(height: u64) -> String {
  format!("0x{:x}", height)
}

pub fn hex_to_u64(s: &str) -> Result<u64, AppError> {
  let digits = strip_hex_prefix(s)?;
  u64::from_str_radix(digits, 16)
    .map_err(|e| AppError::Decode(format!("invalid u64 hex {:?}: {}", s, e)))
}

/// Parses a `0x`-prefixed hex quantity (amount, gas, price) into a 256-bit word.
pub fn hex_to_u256(s: &str) -> Result<U256, AppError> {
  let digits = strip_hex_prefix(s)?;
  U256::from_str_radix(digits, 16)
    .map_err(|e| AppError::Decode(format!("invalid u256 hex {:?}: {:?}", s, e)))
}

pub fn u256_to_hex(value: U256) -> String {
  format!("0x{:x}", value)
}
