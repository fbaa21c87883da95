//! # 加密模块
//!
//! 为载荷提供基于密码的认证加密：SHA-256 派生密钥，AES-256-GCM 加解密。
//! 密文布局为 `nonce (12 字节) || ciphertext (含 16 字节认证标签)`。
//! 认证标签使得错误的密码会被确定性地检测出来，而不是解出一段
//! 看似合法实则损坏的载荷。

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::StegoError;

/// 密钥派生时混入的固定盐值。
const KEY_SALT: &[u8] = b"lsb_stash-key-v1";

/// AES-GCM nonce 的字节数。
const NONCE_LEN: usize = 12;

/// AES-GCM 认证标签的字节数。
const TAG_LEN: usize = 16;

/// 从用户密码派生 256 位密钥。
fn derive_key(password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(KEY_SALT);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// 使用密码加密载荷，返回 `nonce || ciphertext`。
///
/// 每次调用都会生成新的随机 nonce。
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>, StegoError> {
    let cipher = Aes256Gcm::new(&derive_key(password).into());

    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| StegoError::EncryptionFailed)?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);

    Ok(sealed)
}

/// 使用密码解密 `nonce || ciphertext` 布局的数据。
///
/// # Errors
///
/// 密码错误、密文被篡改或数据长度不足时返回 [`StegoError::DecryptionFailed`]。
pub fn decrypt(sealed: &[u8], password: &str) -> Result<Vec<u8>, StegoError> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(StegoError::DecryptionFailed);
    }

    let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(&derive_key(password).into());

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)
}
