use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::constants::{DOCUMENT_ID_LEN, LOGOS_COLLECTION, LOGO_LIST_PAGE_SIZE, USERS_COLLECTION};
use crate::error::{AppError, Result};
use crate::models::{LogoRecord, NewLogo};

use super::{google_error_message, LogoRepository, TokenSource};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl Document {
    fn string_field(&self, key: &str) -> String {
        self.fields
            .get(key)
            .and_then(|v| v.get("stringValue"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn timestamp_field(&self, key: &str) -> Option<DateTime<Utc>> {
        self.fields
            .get(key)
            .and_then(|v| v.get("timestampValue"))
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn into_record(self) -> LogoRecord {
        LogoRecord {
            id: self.name.rsplit('/').next().unwrap_or_default().to_string(),
            title: self.string_field("title"),
            description: self.string_field("description"),
            file_url: self.string_field("file_url"),
            timestamp: self.timestamp_field("timestamp"),
        }
    }
}

/// Random document id in the same shape as Firestore auto ids
fn new_document_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(DOCUMENT_ID_LEN);
    id
}

/// Logo records in Firestore under `users/{email}/logos`
pub struct FirestoreLogoRepository {
    client: reqwest::Client,
    tokens: Arc<TokenSource>,
    base_url: String,
}

impl FirestoreLogoRepository {
    pub fn new(client: reqwest::Client, tokens: Arc<TokenSource>, base_url: &str) -> Self {
        Self {
            client,
            tokens,
            base_url: base_url.to_string(),
        }
    }

    /// `projects/{p}/databases/(default)/documents`
    fn database_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.tokens.project_id()
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::Provider {
            service: "firestore",
            status: status.as_u16(),
            message: google_error_message(&body),
        })
    }
}

/// Commit request creating one logo document with a server timestamp
fn commit_body(document_name: &str, logo: &NewLogo) -> Value {
    json!({
        "writes": [{
            "update": {
                "name": document_name,
                "fields": {
                    "title": { "stringValue": logo.title },
                    "description": { "stringValue": logo.description },
                    "file_url": { "stringValue": logo.file_url },
                },
            },
            "updateTransforms": [{
                "fieldPath": "timestamp",
                "setToServerValue": "REQUEST_TIME",
            }],
            "currentDocument": { "exists": false },
        }]
    })
}

#[async_trait]
impl LogoRepository for FirestoreLogoRepository {
    async fn add(&self, email: &str, logo: &NewLogo) -> Result<String> {
        let id = new_document_id();
        let name = format!(
            "{}/{USERS_COLLECTION}/{email}/{LOGOS_COLLECTION}/{id}",
            self.database_root()
        );

        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(format!("{}/v1/{}:commit", self.base_url, self.database_root()))
            .bearer_auth(token)
            .json(&commit_body(&name, logo))
            .send()
            .await?;
        Self::check(response).await?;

        tracing::debug!("Logo record {} written for {}", id, email);
        Ok(id)
    }

    async fn list(&self, email: &str) -> Result<Vec<LogoRecord>> {
        let url = format!(
            "{}/v1/{}/{USERS_COLLECTION}/{}/{LOGOS_COLLECTION}",
            self.base_url,
            self.database_root(),
            urlencoding::encode(email)
        );

        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.tokens.access_token().await?;
            let mut request = self
                .client
                .get(&url)
                .bearer_auth(token)
                .query(&[("pageSize", LOGO_LIST_PAGE_SIZE.to_string())]);
            if let Some(page) = &page_token {
                request = request.query(&[("pageToken", page)]);
            }

            let page: ListDocumentsResponse = Self::check(request.send().await?).await?.json().await?;
            records.extend(page.documents.into_iter().map(Document::into_record));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_into_record() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/users/a@b.com/logos/Xy12",
            "fields": {
                "title": { "stringValue": "Acme" },
                "description": { "stringValue": "rockets" },
                "file_url": { "stringValue": "https://storage.googleapis.com/b/logos/a%40b.com/1.png" },
                "timestamp": { "timestampValue": "2024-05-01T12:30:00.123456Z" }
            },
            "createTime": "2024-05-01T12:30:00.123456Z"
        }))
        .unwrap();

        let record = doc.into_record();

        assert_eq!(record.id, "Xy12");
        assert_eq!(record.title, "Acme");
        assert_eq!(record.description, "rockets");
        assert_eq!(
            record.file_url,
            "https://storage.googleapis.com/b/logos/a%40b.com/1.png"
        );
        assert_eq!(
            record.timestamp.unwrap().to_rfc3339(),
            "2024-05-01T12:30:00.123456+00:00"
        );
    }

    #[test]
    fn test_document_missing_fields() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/users/a@b.com/logos/id1"
        }))
        .unwrap();

        let record = doc.into_record();
        assert_eq!(record.id, "id1");
        assert!(record.title.is_empty());
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_list_response_without_documents() {
        let page: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_commit_body_shape() {
        let logo = NewLogo {
            title: "Acme".to_string(),
            description: "rockets".to_string(),
            file_url: "https://example.com/x.png".to_string(),
        };

        let body = commit_body("projects/p/databases/(default)/documents/users/u/logos/1", &logo);
        let write = &body["writes"][0];

        assert_eq!(
            write["update"]["fields"]["file_url"]["stringValue"],
            "https://example.com/x.png"
        );
        assert_eq!(write["updateTransforms"][0]["fieldPath"], "timestamp");
        assert_eq!(
            write["updateTransforms"][0]["setToServerValue"],
            "REQUEST_TIME"
        );
        assert_eq!(write["currentDocument"]["exists"], false);
    }

    #[test]
    fn test_new_document_id() {
        let a = new_document_id();
        let b = new_document_id();

        assert_eq!(a.len(), DOCUMENT_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
