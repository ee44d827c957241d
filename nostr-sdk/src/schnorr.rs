use std::str::FromStr;

use bitcoin_hashes::{hex::FromHex, sha256};
use secp256k1::{
  schnorr, KeyPair, Message, PublicKey, Secp256k1, SecretKey, Signing, Verification,
  XOnlyPublicKey,
};

#[derive(Debug)]
pub struct AsymmetricKeys {
  pub private_key: SecretKey,
  pub public_key: PublicKey,
}

/// [`Schnorr`] error
#[derive(thiserror::Error, Debug)]
pub enum SchnorrError {
  /// Error related to bitcoin_hashes::hex
  #[error(transparent)]
  SHA256(#[from] bitcoin_hashes::hex::Error),

  /// Error secp256k1
  #[error(transparent)]
  SECP256K1(#[from] secp256k1::Error),
}

///
/// Signs a Schnorr signature for a determined content.
///
/// If the process of signing happens correctly, returns the `Signature` created.
/// Otherwise, returns a `SchnorrError` with an error message.
///
/// ## Arguments
///
/// * `secp` - A Secp256k1 engine to execute signature.
/// * `msg` - A SHA256 hashed message (hex).
/// * `seckey` - The Private Key to sign the message.
///
/// ## Examples
///
/// ```
///     use nostr_sdk::schnorr::*;
///     use secp256k1::Secp256k1;
///     use bitcoin_hashes::{hex::ToHex, sha256, Hash};
///
///     let seckey = [
///      59, 148, 11, 85, 134, 130, 61, 253, 2, 174, 59, 70, 27, 180, 51, 107, 94, 203, 174, 253, 102,
///      39, 170, 146, 46, 252, 4, 143, 236, 12, 136, 28,
///     ];
///     let hashed_msg = sha256::Hash::hash(b"This is some message");
///     let msg = hashed_msg.to_hex();
///     let secp = Secp256k1::new();
///     assert!(sign_schnorr(&secp, msg, &seckey).is_ok());
/// ```
pub fn sign_schnorr<C: Signing>(
  secp: &Secp256k1<C>,
  msg: String,
  seckey: &[u8],
) -> Result<schnorr::Signature, SchnorrError> {
  let hash_from_hex = sha256::Hash::from_hex(&msg)?;
  let msg = Message::from_slice(hash_from_hex.as_ref())?;
  match SecretKey::from_slice(seckey) {
    Ok(seckey) => {
      let keypair = KeyPair::from_secret_key(secp, &seckey);
      Ok(secp.sign_schnorr_no_aux_rand(&msg, &keypair))
    }
    Err(err) => {
      log::error!("[sign_schnorr > SecretKey::from_slice] {err}");
      Err(SchnorrError::SECP256K1(err))
    }
  }
}

///
/// Verifies a Schnorr signature for a determined content.
///
/// If the signature is verified correctly, returns an `Ok(true)`.
/// Otherwise, returns a `SchnorrError` with an error message.
///
/// ## Arguments
///
/// * `secp` - A Secp256k1 engine to execute verification.
/// * `msg` - A SHA256 hashed message (hex).
/// * `sig` - The schnorr signature to verify.
/// * `pubkey` - The x-only Public Key (hex) to verify against.
///
pub fn verify_schnorr<C: Verification>(
  secp: &Secp256k1<C>,
  msg: String,
  sig: schnorr::Signature,
  pubkey: String,
) -> Result<bool, SchnorrError> {
  let hash_from_hex = sha256::Hash::from_hex(&msg)?;
  let msg = Message::from_slice(hash_from_hex.as_ref())?;
  let x_only_pubkey = XOnlyPublicKey::from_str(&pubkey)?;

  match secp.verify_schnorr(&sig, &msg, &x_only_pubkey) {
    Ok(_) => Ok(true),
    Err(err) => {
      log::debug!("[verify_schnorr] {err}");
      Err(SchnorrError::SECP256K1(err))
    }
  }
}

/// Hex encoded x-only public key (the form used in `event.pubkey`)
/// of a secret key.
pub fn x_only_public_key(seckey: &[u8]) -> Result<String, SchnorrError> {
  let secp = Secp256k1::new();
  let seckey = SecretKey::from_slice(seckey)?;
  let keypair = KeyPair::from_secret_key(&secp, &seckey);
  Ok(XOnlyPublicKey::from_keypair(&keypair).0.to_string())
}

///
/// Generates random keypairs (private and public keys).
///
pub fn generate_keys() -> AsymmetricKeys {
  let secp = Secp256k1::new();
  let mut rng = rand::thread_rng();

  let (seckey, pubkey) = secp.generate_keypair(&mut rng);

  AsymmetricKeys {
    public_key: pubkey,
    private_key: seckey,
  }
}
