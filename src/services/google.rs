use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;

use crate::constants::{GOOGLE_OAUTH_SCOPES, TOKEN_ASSERTION_LIFETIME_SECS, TOKEN_REFRESH_MARGIN_SECS};
use crate::error::{AppError, Result};

use super::google_error_message;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Firebase service-account key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccount {
    /// Read the key file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        tracing::info!("Loading service account from: {:?}", path.as_ref());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let account: ServiceAccount =
            serde_json::from_str(raw).map_err(|e| AppError::Credentials(e.to_string()))?;

        if account.project_id.is_empty() || account.client_email.is_empty() {
            return Err(AppError::Credentials(
                "project_id and client_email must not be empty".to_string(),
            ));
        }

        Ok(account)
    }
}

/// JWT-bearer assertion claims (RFC 7523)
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    /// Unix timestamp
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now + TOKEN_REFRESH_MARGIN_SECS < self.expires_at
    }
}

/// Mints and caches OAuth access tokens for a service account
pub struct TokenSource {
    client: reqwest::Client,
    account: ServiceAccount,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(client: reqwest::Client, account: ServiceAccount) -> Self {
        Self {
            client,
            account,
            cached: Mutex::new(None),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.account.project_id
    }

    /// Current access token, fetching a new one when the cached token is
    /// missing or about to expire
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now().timestamp();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.fetch(now).await?;
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }

    fn assertion(&self, now: i64) -> Result<String> {
        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: GOOGLE_OAUTH_SCOPES,
            aud: &self.account.token_uri,
            iat: now,
            exp: now + TOKEN_ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())?;

        Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }

    async fn fetch(&self, now: i64) -> Result<CachedToken> {
        tracing::debug!("Requesting access token for {}", self.account.client_email);

        let assertion = self.assertion(now)?;
        let response = self
            .client
            .post(&self.account.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider {
                service: "oauth2",
                status: status.as_u16(),
                message: google_error_message(&body),
            });
        }

        let token: TokenResponse = response.json().await?;
        tracing::info!("Obtained access token (expires in {}s)", token.expires_in);

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}
