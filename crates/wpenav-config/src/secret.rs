//! At-rest encryption for the stored API password.
//!
//! AES-256-GCM with a fresh random nonce per call, keyed by a
//! machine-wide master key that is never user-supplied. The stored form
//! is `base64(nonce || ciphertext)`. Decryption is deliberately
//! forgiving: any value that fails to decode or decrypt is returned
//! unchanged, so a plaintext password left over from an earlier config
//! keeps working until it is next saved.

use std::fs;
use std::path::PathBuf;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use tracing::warn;

use crate::Profile;

const NONCE_LEN: usize = 12;
const KEYRING_SERVICE: &str = "wpenav";
const KEYRING_ENTRY: &str = "config-master-key";

/// Symmetric cipher for config secrets.
pub struct SecretCipher {
    key: [u8; 32],
}

impl SecretCipher {
    /// Build a cipher over an explicit key (tests, embedding).
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Build a cipher over the machine's master key.
    ///
    /// The key lives in the OS keyring; when the keyring is unavailable
    /// (CI, headless boxes) a key file under the config directory is
    /// used instead. A missing key is generated and persisted on first
    /// use, so this never fails -- at worst the key is file-backed.
    pub fn from_machine_key() -> Self {
        Self::new(load_or_create_master_key())
    }

    /// Encrypt a plaintext value for storage.
    ///
    /// Empty input is returned unchanged (nothing to protect, and the
    /// empty string is the "unset" marker in the config).
    pub fn encrypt(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        match cipher.encrypt(nonce, plaintext.as_bytes()) {
            Ok(ciphertext) => {
                let mut framed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
                framed.extend_from_slice(&nonce_bytes);
                framed.extend_from_slice(&ciphertext);
                B64.encode(framed)
            }
            // Practically unreachable; mirror decrypt's fallback rather
            // than silently losing the value.
            Err(_) => plaintext.to_owned(),
        }
    }

    /// Decrypt a stored value.
    ///
    /// On any failure -- bad base64, short payload, wrong key, invalid
    /// UTF-8 -- the input comes back unchanged: an undecryptable stored
    /// value is treated as already-plaintext.
    pub fn decrypt(&self, stored: &str) -> String {
        if stored.is_empty() {
            return String::new();
        }

        let Ok(framed) = B64.decode(stored) else {
            return stored.to_owned();
        };
        if framed.len() <= NONCE_LEN {
            return stored.to_owned();
        }

        let (nonce_bytes, ciphertext) = framed.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let nonce = Nonce::from_slice(nonce_bytes);

        match cipher.decrypt(nonce, ciphertext) {
            Ok(plaintext) => String::from_utf8(plaintext).unwrap_or_else(|_| stored.to_owned()),
            Err(_) => stored.to_owned(),
        }
    }
}

/// Store a password on a profile, encrypting only when it changed.
///
/// Saving unrelated settings must not re-encrypt (and certainly not
/// double-encrypt) an untouched password, so the new plaintext is
/// compared against the decrypted stored value first.
pub fn store_password(profile: &mut Profile, cipher: &SecretCipher, new_plaintext: &str) {
    if new_plaintext.is_empty() {
        profile.password = Some(String::new());
        return;
    }

    if let Some(existing) = profile.password.as_deref() {
        if cipher.decrypt(existing) == new_plaintext {
            return;
        }
    }

    profile.password = Some(cipher.encrypt(new_plaintext));
}

// ── Master key management ───────────────────────────────────────────

fn load_or_create_master_key() -> [u8; 32] {
    match try_keyring() {
        Ok(key) => key,
        Err(e) => {
            warn!("keyring unavailable ({e}), using key file fallback");
            load_or_create_key_file()
        }
    }
}

fn try_keyring() -> Result<[u8; 32], keyring::Error> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ENTRY)?;

    match entry.get_password() {
        Ok(encoded) => {
            if let Some(key) = decode_key(&encoded) {
                return Ok(key);
            }
            // Stored entry is corrupt; replace it.
            let key = random_key();
            entry.set_password(&B64.encode(key))?;
            Ok(key)
        }
        Err(keyring::Error::NoEntry) => {
            let key = random_key();
            entry.set_password(&B64.encode(key))?;
            Ok(key)
        }
        Err(e) => Err(e),
    }
}

fn key_file_path() -> PathBuf {
    crate::config_dir().join("master.key")
}

fn load_or_create_key_file() -> [u8; 32] {
    let path = key_file_path();

    if let Ok(raw) = fs::read_to_string(&path) {
        if let Some(key) = decode_key(raw.trim()) {
            return key;
        }
        warn!("key file at {} is corrupt, regenerating", path.display());
    }

    let key = random_key();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Err(e) = fs::write(&path, B64.encode(key)) {
        warn!("failed to persist key file: {e}");
    }
    key
}

fn decode_key(encoded: &str) -> Option<[u8; 32]> {
    let bytes = B64.decode(encoded).ok()?;
    bytes.try_into().ok()
}

fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}
