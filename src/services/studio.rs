use std::sync::Arc;
use uuid::Uuid;

use crate::constants::LOGOS_BLOB_PREFIX;
use crate::error::Result;
use crate::models::{GeneratedImage, ImageFormat, LogoRecord, LogoRequest, NewLogo};

use super::{BlobStore, ImageGenerator, LogoRepository};

/// Outcome of a successful generate → upload → record flow
#[derive(Debug, Clone)]
pub struct CreatedLogo {
    /// Document id of the new record
    pub id: String,
    /// Public URL returned by the blob store, as written into the record
    pub file_url: String,
    pub image: GeneratedImage,
    pub download_name: String,
}

/// Blob path for a new logo image: `logos/{email}/{id}.{ext}`
pub fn blob_path(email: &str, id: Uuid, format: ImageFormat) -> String {
    format!("{LOGOS_BLOB_PREFIX}/{email}/{id}.{}", format.extension())
}

/// Chains the inference endpoint, blob store and logo records
pub struct LogoStudio {
    generator: Arc<dyn ImageGenerator>,
    blobs: Arc<dyn BlobStore>,
    logos: Arc<dyn LogoRepository>,
}

impl LogoStudio {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        blobs: Arc<dyn BlobStore>,
        logos: Arc<dyn LogoRepository>,
    ) -> Self {
        Self {
            generator,
            blobs,
            logos,
        }
    }

    /// Generate an image, upload it, then record its URL.
    ///
    /// The steps are not transactional: if the record write fails after a
    /// successful upload, the blob stays in the bucket unreferenced.
    pub async fn create_logo(&self, email: &str, request: &LogoRequest) -> Result<CreatedLogo> {
        let image = self.generator.generate(&request.prompt()).await?;

        let path = blob_path(email, Uuid::new_v4(), image.format);
        let file_url = self
            .blobs
            .upload(&path, image.bytes.clone(), image.format.mime_type())
            .await?;

        let record = NewLogo {
            title: request.title.clone(),
            description: request.description.clone(),
            file_url: file_url.clone(),
        };
        let id = self.logos.add(email, &record).await.inspect_err(|e| {
            tracing::warn!("Orphaned blob {} after record write failed: {}", path, e);
        })?;

        tracing::info!("Logo {} created for {}", id, email);

        Ok(CreatedLogo {
            id,
            file_url,
            download_name: request.download_file_name(image.format.extension()),
            image,
        })
    }

    pub async fn list_logos(&self, email: &str) -> Result<Vec<LogoRecord>> {
        let logos = self.logos.list(email).await?;
        tracing::debug!("Listed {} logos for {}", logos.len(), email);
        Ok(logos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ColorPalette, Theme};
    use crate::services::{BlobStore, ImageGenerator, LogoRepository};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

    struct FixedGenerator(Option<u16>);

    #[async_trait]
    impl ImageGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<GeneratedImage> {
            match self.0 {
                Some(status) => Err(AppError::GenerationFailed(status)),
                None => Ok(GeneratedImage::decode(PNG.to_vec()).unwrap()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingBlobs {
        uploads: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl BlobStore for RecordingBlobs {
        async fn upload(&self, path: &str, _data: Vec<u8>, content_type: &str) -> Result<String> {
            self.uploads
                .lock()
                .unwrap()
                .push((path.to_string(), content_type.to_string()));
            Ok(format!("https://cdn.example.com/{path}?token=xyz"))
        }
    }

    #[derive(Default)]
    struct RecordingLogos {
        fail: bool,
        added: Mutex<Vec<NewLogo>>,
    }

    #[async_trait]
    impl LogoRepository for RecordingLogos {
        async fn add(&self, _email: &str, logo: &NewLogo) -> Result<String> {
            if self.fail {
                return Err(AppError::Provider {
                    service: "firestore",
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            self.added.lock().unwrap().push(logo.clone());
            Ok("doc-1".to_string())
        }

        async fn list(&self, _email: &str) -> Result<Vec<LogoRecord>> {
            Ok(Vec::new())
        }
    }

    fn request() -> LogoRequest {
        LogoRequest {
            title: "Acme Rockets".to_string(),
            description: "fast".to_string(),
            theme: Theme::Trendy,
            color_palette: ColorPalette::Dark,
        }
    }

    #[test]
    fn test_blob_path() {
        let id = Uuid::nil();
        assert_eq!(
            blob_path("a@b.com", id, ImageFormat::Png),
            "logos/a@b.com/00000000-0000-0000-0000-000000000000.png"
        );
    }

    #[tokio::test]
    async fn test_record_carries_uploaded_url() {
        let blobs = Arc::new(RecordingBlobs::default());
        let logos = Arc::new(RecordingLogos::default());
        let studio = LogoStudio::new(Arc::new(FixedGenerator(None)), blobs.clone(), logos.clone());

        let created = studio.create_logo("a@b.com", &request()).await.unwrap();

        let uploads = blobs.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].0.starts_with("logos/a@b.com/"));
        assert_eq!(uploads[0].1, "image/png");

        let added = logos.added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].file_url, created.file_url);
        assert_eq!(
            added[0].file_url,
            format!("https://cdn.example.com/{}?token=xyz", uploads[0].0)
        );
        assert_eq!(added[0].title, "Acme Rockets");
        assert_eq!(created.id, "doc-1");
        assert_eq!(created.download_name, "Acme_Rockets_logo.png");
    }

    #[tokio::test]
    async fn test_generation_failure_skips_upload() {
        let blobs = Arc::new(RecordingBlobs::default());
        let logos = Arc::new(RecordingLogos::default());
        let studio = LogoStudio::new(
            Arc::new(FixedGenerator(Some(503))),
            blobs.clone(),
            logos.clone(),
        );

        let result = studio.create_logo("a@b.com", &request()).await;

        assert!(matches!(result, Err(AppError::GenerationFailed(503))));
        assert!(blobs.uploads.lock().unwrap().is_empty());
        assert!(logos.added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_failure_leaves_blob() {
        let blobs = Arc::new(RecordingBlobs::default());
        let logos = Arc::new(RecordingLogos {
            fail: true,
            ..Default::default()
        });
        let studio = LogoStudio::new(Arc::new(FixedGenerator(None)), blobs.clone(), logos);

        let result = studio.create_logo("a@b.com", &request()).await;

        assert!(matches!(result, Err(AppError::Provider { status: 503, .. })));
        assert_eq!(blobs.uploads.lock().unwrap().len(), 1);
    }
}
