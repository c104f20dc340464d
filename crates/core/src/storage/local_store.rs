use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

/// Well-known store keys.
pub const KEY_THEME: &str = "theme";
pub const KEY_CONTEXT: &str = "context";

/// Prefix for the per-ticker cached income target, e.g.
/// `income_target_PETR4`.
pub const INCOME_TARGET_PREFIX: &str = "income_target_";

/// Prefix for provider API keys, e.g. `api_key_gemini`.
pub const API_KEY_PREFIX: &str = "api_key_";

/// Auth service endpoint and publishable key.
pub const KEY_AUTH_URL: &str = "auth_url";
pub const KEY_AUTH_KEY: &str = "auth_key";

/// Simple local key-value persistence: scalar strings keyed by name.
///
/// Holds the theme preference, the selected reporting context, cached
/// per-ticker income targets, cached profile fields, and provider API keys.
/// There are no transactional or multi-key atomicity guarantees — each
/// `set` stands alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStore {
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a key. Returns `true` if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// All keys, in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a value parsed as `f64`, if present and numeric.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.parse().ok()).filter(|v: &f64| v.is_finite())
    }

    // ── Serialization ───────────────────────────────────────────────

    /// Serialize the store to JSON bytes (platform-independent).
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize local store: {e}")))
    }

    /// Restore a store from JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let store = serde_json::from_slice(bytes)?;
        Ok(store)
    }

    /// Write the store to a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&self, path: &str) -> Result<(), CoreError> {
        let bytes = self.to_json_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a store from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::from_json_bytes(&bytes)
    }
}

/// Store key holding the cached income target for a ticker.
#[must_use]
pub fn income_target_key(ticker: &str) -> String {
    format!("{INCOME_TARGET_PREFIX}{}", ticker.to_uppercase())
}

/// Store key holding the API key for a provider.
#[must_use]
pub fn api_key_key(provider: &str) -> String {
    format!("{API_KEY_PREFIX}{}", provider.to_lowercase())
}
