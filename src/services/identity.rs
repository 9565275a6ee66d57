use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::UserAccount;

use super::{google_error_message, AuthProvider, TokenSource};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Firebase Authentication through the Identity Toolkit admin API
pub struct FirebaseAuth {
    client: reqwest::Client,
    tokens: Arc<TokenSource>,
    base_url: String,
}

impl FirebaseAuth {
    pub fn new(client: reqwest::Client, tokens: Arc<TokenSource>, base_url: &str) -> Self {
        Self {
            client,
            tokens,
            base_url: base_url.to_string(),
        }
    }

    fn accounts_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/accounts",
            self.base_url,
            self.tokens.project_id()
        )
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuth {
    async fn get_user_by_email(&self, email: &str) -> Result<UserAccount> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(format!("{}:lookup", self.accounts_url()))
            .bearer_auth(token)
            .json(&json!({ "email": [email] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider {
                service: "identitytoolkit",
                status: status.as_u16(),
                message: google_error_message(&body),
            });
        }

        let lookup: LookupResponse = response.json().await?;
        let account = lookup
            .users
            .into_iter()
            .next()
            .ok_or(AppError::AuthenticationFailed)?;

        Ok(UserAccount {
            uid: account.local_id,
            email: account.email.unwrap_or_else(|| email.to_string()),
        })
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<UserAccount> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(self.accounts_url())
            .bearer_auth(token)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UserCreation(google_error_message(&body)));
        }

        let account: AccountInfo = response.json().await?;
        tracing::info!("Created auth account {}", account.local_id);

        Ok(UserAccount {
            uid: account.local_id,
            email: account.email.unwrap_or_else(|| email.to_string()),
        })
    }
}
