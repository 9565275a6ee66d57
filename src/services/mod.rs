//! External collaborators and the orchestration that chains them.
//!
//! Each managed service sits behind a trait so the router can run against
//! in-memory implementations in tests:
//! - [`AuthProvider`]: user lookup and creation (Firebase Auth)
//! - [`LogoRepository`]: per-user logo records (Firestore)
//! - [`BlobStore`]: image bytes (Cloud Storage)
//! - [`ImageGenerator`]: text-to-image inference (Hugging Face)

pub mod firestore;
pub mod google;
pub mod identity;
pub mod inference;
pub mod storage;
pub mod studio;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GeneratedImage, LogoRecord, NewLogo, UserAccount};

pub use firestore::FirestoreLogoRepository;
pub use google::{ServiceAccount, TokenSource};
pub use identity::FirebaseAuth;
pub use inference::HuggingFaceGenerator;
pub use storage::CloudStorage;
pub use studio::{CreatedLogo, LogoStudio};

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Look up an account by email.
    ///
    /// Returns `Err(AuthenticationFailed)` when no account matches.
    async fn get_user_by_email(&self, email: &str) -> Result<UserAccount>;

    /// Create an account. Provider refusals surface as `Err(UserCreation)`.
    async fn create_user(&self, email: &str, password: &str) -> Result<UserAccount>;
}

#[async_trait]
pub trait LogoRepository: Send + Sync {
    /// Append a record to the user's collection and return its document id
    async fn add(&self, email: &str, logo: &NewLogo) -> Result<String>;

    /// Every record currently in the user's collection
    async fn list(&self, email: &str) -> Result<Vec<LogoRecord>>;
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` at `path` and return its public URL
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;
}

/// Pull a human-readable message out of a Google-style error body
/// (`{"error": {"message": "..."}}`), falling back to the raw text.
pub(crate) fn google_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
