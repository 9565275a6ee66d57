use serde::{Deserialize, Serialize};

/// Logged-in user as kept in the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
}

/// Account as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Provider-assigned user id
    pub uid: String,
    pub email: String,
}

/// Login and sign-up form
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsForm {
    /// Email with surrounding whitespace removed
    pub fn email(&self) -> &str {
        self.email.trim()
    }
}
