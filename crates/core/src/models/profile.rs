use serde::{Deserialize, Serialize};

/// An authenticated session returned by the auth provider.
///
/// Presence of a session gates access to all protected views. The core only
/// depends on the user identity and display name — nothing else from the
/// provider's schema leaks in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub access_token: String,
}

/// User-editable profile settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name shown in the sidebar
    pub display_name: String,

    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    /// Profile photo as a URI or data string. `None` falls back to an
    /// initial-letter avatar.
    #[serde(default)]
    pub photo: Option<String>,

    /// Whether biometric unlock is enabled
    pub biometry_enabled: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            display_name: "User".to_string(),
            email: String::new(),
            phone: None,
            photo: None,
            biometry_enabled: true,
        }
    }
}

/// The fields collected by the signup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SignUpProfile {
    /// Full name as stored in the provider's user metadata.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
