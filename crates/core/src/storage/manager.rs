use crate::errors::CoreError;
use crate::models::dashboard::DashboardState;

use super::encryption::{self, KdfParams};
use super::format;

/// High-level persistence: save/load the dashboard state to/from encrypted
/// bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Encrypt and serialize the state to raw bytes (portable,
    /// platform-independent).
    ///
    /// Flow: DashboardState → bincode → AES-256-GCM(Argon2id(password)) → WDSB bytes
    pub fn save_to_bytes(state: &DashboardState, password: &str) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize state: {e}")))?;

        let salt = encryption::random_array::<16>()?;
        let nonce = encryption::random_array::<12>()?;

        let kdf_params = KdfParams::default();
        let key = encryption::derive_key(password, &salt, &kdf_params)?;

        let ciphertext = encryption::encrypt(&plaintext, &key, &nonce)?;

        Ok(format::write_snapshot(
            format::CURRENT_VERSION,
            &kdf_params,
            &salt,
            &nonce,
            &ciphertext,
        ))
    }

    /// Decrypt and deserialize the state from raw bytes.
    ///
    /// Flow: WDSB bytes → parse header → Argon2id(password, salt) → decrypt → bincode → DashboardState
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<DashboardState, CoreError> {
        let (header, ciphertext) = format::read_snapshot(data)?;

        let key = encryption::derive_key(password, &header.salt, &header.kdf_params)?;

        let plaintext = encryption::decrypt(ciphertext, &key, &header.nonce)?;

        let state: DashboardState = bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize state: {e}")))?;

        Ok(state)
    }

    /// Save the state to an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(
        state: &DashboardState,
        path: &str,
        password: &str,
    ) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(state, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load the state from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<DashboardState, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
