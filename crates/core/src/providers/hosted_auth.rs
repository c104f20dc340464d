use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::profile::{Session, SignUpProfile};

use super::traits::AuthProvider;

/// REST client for the hosted authentication/storage service.
///
/// Speaks the GoTrue-style surface: password grant, signup, recover,
/// logout. Only the session's user identity and display name cross into the
/// core — the rest of the service's schema stays on the wire.
pub struct HostedAuthProvider {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl HostedAuthProvider {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Whether the endpoint looks usable: an https URL that is not a
    /// placeholder, plus a non-empty key.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.base_url.starts_with("https://")
            && !self.base_url.contains("placeholder")
            && !self.anon_key.trim().is_empty()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn ensure_configured(&self) -> Result<(), CoreError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(CoreError::NotConfigured("Authentication service".into()))
        }
    }

    async fn session_from_response(resp: reqwest::Response) -> Result<Session, CoreError> {
        let token: TokenResponse = resp.json().await.map_err(|e| CoreError::Auth(format!(
            "Unexpected response from authentication service: {e}"
        )))?;

        let display_name = token
            .user
            .user_metadata
            .and_then(|m| m.full_name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "User".to_string());

        Ok(Session {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_default(),
            display_name,
            access_token: token.access_token,
        })
    }

    async fn reject(resp: reqwest::Response) -> CoreError {
        let status = resp.status();
        let body: AuthErrorBody = resp.json().await.unwrap_or_default();
        let message = body
            .error_description
            .or(body.msg)
            .or(body.error)
            .unwrap_or_else(|| format!("Request rejected with status {status}"));
        CoreError::Auth(message)
    }
}

// ── Service response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthProvider for HostedAuthProvider {
    fn name(&self) -> &str {
        "HostedAuth"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        self.ensure_configured()?;

        let resp = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Self::session_from_response(resp).await
    }

    async fn sign_up(&self, profile: &SignUpProfile) -> Result<Session, CoreError> {
        self.ensure_configured()?;

        let resp = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": profile.email,
                "password": profile.password,
                "data": {
                    "full_name": profile.full_name(),
                    "phone": profile.phone,
                },
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Self::session_from_response(resp).await
    }

    async fn reset_password(&self, email: &str) -> Result<(), CoreError> {
        self.ensure_configured()?;

        let resp = self
            .client
            .post(self.endpoint("recover"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), CoreError> {
        self.ensure_configured()?;

        let resp = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(())
    }
}
