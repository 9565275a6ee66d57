use std::env;

use crate::constants::{
    DEFAULT_FIRESTORE_URL, DEFAULT_IDENTITY_TOOLKIT_URL, DEFAULT_INFERENCE_URL,
    DEFAULT_STORAGE_URL,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    /// Path to the Firebase service-account JSON file
    pub credentials_path: String,
    pub storage_bucket: String,
    pub huggingface_api_key: String,
    pub inference_url: String,
    pub identity_toolkit_url: String,
    pub firestore_url: String,
    pub storage_url: String,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let credentials_path = required("FIREBASE_CREDENTIALS_PATH")?;
        let storage_bucket = required("FIREBASE_STORAGE_BUCKET")?;
        let huggingface_api_key = required("HUGGINGFACE_API_KEY")?;

        let inference_url =
            env::var("INFERENCE_URL").unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string());
        let identity_toolkit_url = base_url("IDENTITY_TOOLKIT_URL", DEFAULT_IDENTITY_TOOLKIT_URL);
        let firestore_url = base_url("FIRESTORE_URL", DEFAULT_FIRESTORE_URL);
        let storage_url = base_url("STORAGE_URL", DEFAULT_STORAGE_URL);

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .map_err(|_| "Invalid HTTP_TIMEOUT_SECS")?;

        Ok(Config {
            server_host,
            server_port,
            environment,
            credentials_path,
            storage_bucket,
            huggingface_api_key,
            inference_url,
            identity_toolkit_url,
            firestore_url,
            storage_url,
            http_timeout_secs,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Session cookies only go out over HTTPS in production
    pub fn secure_cookies(&self) -> bool {
        self.environment == "production"
    }
}

fn required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{key} must be set")),
    }
}

fn base_url(key: &str, default: &str) -> String {
    trim_base_url(&env::var(key).unwrap_or_else(|_| default.to_string()))
}

/// Strip trailing slashes so paths can be appended with `format!("{base}/...")`
pub fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "development".to_string(),
            credentials_path: "creds.json".to_string(),
            storage_bucket: "bucket".to_string(),
            huggingface_api_key: "hf_key".to_string(),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            identity_toolkit_url: DEFAULT_IDENTITY_TOOLKIT_URL.to_string(),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            http_timeout_secs: 120,
        }
    }

    #[test]
    fn test_server_address() {
        assert_eq!(sample().server_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_secure_cookies_only_in_production() {
        let mut config = sample();
        assert!(!config.secure_cookies());

        config.environment = "production".to_string();
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_trim_base_url() {
        assert_eq!(
            trim_base_url("http://localhost:9099/"),
            "http://localhost:9099"
        );
        assert_eq!(
            trim_base_url(" https://storage.googleapis.com// "),
            "https://storage.googleapis.com"
        );
        assert_eq!(trim_base_url("http://x"), "http://x");
    }
}
