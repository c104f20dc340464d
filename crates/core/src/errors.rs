use thiserror::Error;

/// Unified error type for the entire wealth-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Nothing in here is fatal: external-service failures surface as a message
/// plus a manual/retry path, and invalid input is rejected before it can
/// corrupt state.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / Snapshot ──────────────────────────────────────────
    #[error("Invalid snapshot format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted snapshot")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── External services ───────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Market data unavailable for {ticker}")]
    MarketDataUnavailable { ticker: String },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Institution not found: {0}")]
    InstitutionNotFound(String),

    #[error("Action not permitted in viewer mode")]
    ReadOnlyMode,

    #[error("A request is already in flight for this action")]
    RequestInFlight,
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
