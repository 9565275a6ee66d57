/// Hosted text-to-image model used when `INFERENCE_URL` is not set
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/strangerzonehf/Flux-Midjourney-Mix2-LoRA";

pub const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_STORAGE_URL: &str = "https://storage.googleapis.com";

/// OAuth scopes requested for the service-account access token
pub const GOOGLE_OAUTH_SCOPES: &str =
    "https://www.googleapis.com/auth/cloud-platform https://www.googleapis.com/auth/firebase";

/// Lifetime requested for the signed JWT assertion (1 hour, the Google maximum)
pub const TOKEN_ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh cached access tokens this long before they expire
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Page size used when listing a user's logo collection
pub const LOGO_LIST_PAGE_SIZE: u32 = 300;

/// Length of generated document ids (matches Firestore auto ids)
pub const DOCUMENT_ID_LEN: usize = 20;

/// Top-level collection holding one document per user email
pub const USERS_COLLECTION: &str = "users";

/// Per-user sub-collection of logo records
pub const LOGOS_COLLECTION: &str = "logos";

/// Blob path prefix for uploaded logo images
pub const LOGOS_BLOB_PREFIX: &str = "logos";

/// Session key holding the logged-in [`crate::models::SessionUser`]
pub const SESSION_USER_KEY: &str = "user";

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_AUTH_FAILED: &str = "Authentication failed. Please check your credentials.";

pub const MSG_ACCOUNT_CREATED: &str = "Account created successfully! You can now log in.";

pub const MSG_GENERATION_FAILED: &str = "Failed to generate logo. Please try again.";

pub const MSG_LOGO_SAVE_FAILED: &str = "Your logo was generated but could not be saved.";

pub const MSG_LOGOS_UNAVAILABLE: &str = "Could not load your logos. Please try again.";

pub const MSG_INTERNAL: &str = "Something went wrong. Please try again.";

pub const MSG_LOGGED_OUT: &str = "You have been logged out.";
