//! Password-based encryption for payload data
//!
//! Sealed layout: `salt (16) | nonce (12) | ciphertext | tag (16)`.
//! The key is derived with Argon2id from the password and a fresh random
//! salt; sealing uses AES-256-GCM-SIV. The frame and pixel codecs never call
//! into this module, callers encrypt file data before framing it.

use crate::error::StegError;
use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use argon2::Argon2;
use rand::RngCore;
use zeroize::Zeroizing;

/// Argon2 salt length in bytes
pub const SALT_LEN: usize = 16;

/// AES-GCM-SIV nonce length in bytes
pub const NONCE_LEN: usize = 12;

/// AES-GCM-SIV authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// Bytes added to the plaintext by [`encrypt`]
pub const SEAL_OVERHEAD: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, StegError> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut *key)
        .map_err(|e| StegError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

fn cipher(password: &str, salt: &[u8]) -> Result<Aes256GcmSiv, StegError> {
    let key = derive_key(password, salt)?;
    Aes256GcmSiv::new_from_slice(&*key).map_err(|e| StegError::KeyDerivation(e.to_string()))
}

/// Encrypt `plaintext` under `password` with a fresh salt and nonce
pub fn encrypt(password: &str, plaintext: &[u8]) -> Result<Vec<u8>, StegError> {
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let ciphertext = cipher(password, &salt)?
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| StegError::EncryptionFailed)?;

    let mut sealed = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt data produced by [`encrypt`]
///
/// Fails with [`StegError::DecryptionFailed`] for a wrong password or
/// modified ciphertext.
pub fn decrypt(password: &str, sealed: &[u8]) -> Result<Vec<u8>, StegError> {
    if sealed.len() < SEAL_OVERHEAD {
        return Err(StegError::MalformedCiphertext(sealed.len()));
    }

    let (salt, rest) = sealed.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    cipher(password, salt)?
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| StegError::DecryptionFailed)
}
