/**
* filename : signer
* author : HAMA
* date: 2025. 4. 9.
* description: transaction hash signing capability
**/

use secp256k1::{Message, Secp256k1, SecretKey, SignOnly};

use crate::types::AppError;

pub const ECC_CURVE_SECP256K1: u32 = 0;

/// Signs a transaction hash with a private key on the given curve.
pub trait TransactionSigner: Send + Sync {
  fn sign_transaction_hash(&self, msg: &[u8], private_key: &[u8], ecc_type: u32) -> Result<Vec<u8>, AppError>;
}

/// Recoverable secp256k1 ECDSA; output is `r || s || v` with `v` in `0..=3`.
pub struct Secp256k1Signer {
  secp: Secp256k1<SignOnly>,
}

impl Secp256k1Signer {
  pub fn new() -> Self {
    Self {
      secp: Secp256k1::signing_only(),
    }
  }
}

impl Default for Secp256k1Signer {
  fn default() -> Self {
    Self::new()
  }
}

impl TransactionSigner for Secp256k1Signer {
  fn sign_transaction_hash(&self, msg: &[u8], private_key: &[u8], ecc_type: u32) -> Result<Vec<u8>, AppError> {
    if ecc_type != ECC_CURVE_SECP256K1 {
      return Err(AppError::Signer(format!("unsupported curve type {}", ecc_type)));
    }

    let sign_failed = |_| AppError::Signer("ECC sign hash failed".to_string());
    let key = SecretKey::from_slice(private_key).map_err(sign_failed)?;
    let message = Message::from_digest_slice(msg).map_err(sign_failed)?;

    let (recovery_id, compact) = self
      .secp
      .sign_ecdsa_recoverable(&message, &key)
      .serialize_compact();

    let mut signature = compact.to_vec();
    signature.push(recovery_id.to_i32() as u8);
    Ok(signature)
  }
}
